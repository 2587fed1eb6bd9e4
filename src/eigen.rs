use errors::*;

use Matrix;
use decompose::check_square;
use norm::{Norm, VectorNorm};
use ops::Dot;
use solve::{gauss, Pivoting};

/// Options for the cyclic Jacobi eigenvalue method.
#[derive(Debug, Clone, Copy)]
pub struct JacobiOptions {
    max_iter: usize,
    tol: f64,
    eigenvectors: bool,
}
impl Default for JacobiOptions {
    fn default() -> JacobiOptions {
        JacobiOptions {
            max_iter: 100,
            tol: 1e-8,
            eigenvectors: false,
        }
    }
}
impl JacobiOptions {
    pub fn new() -> JacobiOptions { JacobiOptions::default() }

    /// Maximum number of sweeps over the off-diagonal entries.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
    /// Stop once the sum of off-diagonal magnitudes drops below `tol`.
    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
    /// Accumulate the rotations into an eigenvector matrix.
    pub fn eigenvectors(mut self, eigenvectors: bool) -> Self {
        self.eigenvectors = eigenvectors;
        self
    }
}

/// Outcome of the Jacobi method.
///
/// Running out of sweeps is not an error: `converged` is `false` and `values` holds the diagonal
/// reached so far.
#[derive(Debug, Clone)]
pub struct JacobiEigen {
    /// Eigenvalues, in the order of the final rotated diagonal.
    pub values: Vec<f64>,
    /// Eigenvectors as columns (matching `values`), if requested.
    pub vectors: Option<Matrix>,
    pub converged: bool,
    /// Number of sweeps performed.
    pub iterations: usize,
    /// Sum of off-diagonal magnitudes of the final rotated matrix.
    pub off_norm: f64,
}
impl JacobiEigen {
    /// Eigenvalues in ascending order, with the eigenvector columns permuted to match.
    pub fn sorted(&self) -> JacobiEigen {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&i, &j| self.values[i].total_cmp(&self.values[j]));

        let values = order.iter().map(|&i| self.values[i]).collect();
        let vectors = self.vectors.as_ref().map(|v| {
            let mut sorted = Matrix::zeros(v.nrows(), v.ncols());
            for (new_col, &old_col) in order.iter().enumerate() {
                for r in 0..v.nrows() {
                    sorted[(r, new_col)] = v[(r, old_col)];
                }
            }
            sorted
        });
        JacobiEigen {
            values: values,
            vectors: vectors,
            converged: self.converged,
            iterations: self.iterations,
            off_norm: self.off_norm,
        }
    }
}

pub trait SymmetricEigen {
    /// All eigenvalues of a symmetric matrix by cyclic Jacobi rotations with a per-sweep
    /// threshold.
    fn eigen_symm(&self, options: JacobiOptions) -> Result<JacobiEigen>;

    /// Eigenvalues with default options (`max_iter = 100`, `tol = 1e-8`).
    fn eigenvalues_symm(&self) -> Result<Vec<f64>> {
        self.eigen_symm(JacobiOptions::default()).map(|eig| eig.values)
    }
}

fn check_iteration_params(tol: f64, max_iter: usize) -> Result<()> {
    if !(tol >= 0.0) {
        return Err(Error::from_kind(ErrorKind::InvalidParameter(
            format!("tolerance must be nonnegative, got {}", tol))));
    }
    if max_iter == 0 {
        return Err(Error::from_kind(ErrorKind::InvalidParameter(
            "max_iter must be positive".to_string())));
    }
    Ok(())
}

/// Rotation `(cos, sin)` that zeroes `m[(i, j)]` under the row update
/// `r_i <- c r_i + s r_j`, `r_j <- -s r_i + c r_j` (and the same on columns).
fn jacobi_rotation(m: &Matrix, i: usize, j: usize) -> (f64, f64) {
    let tau = (m[(j, j)] - m[(i, i)]) / (2.0 * m[(i, j)]);
    // smaller-magnitude root of t^2 - 2 t tau - 1 = 0; sign(0) taken as +1
    let sign = if tau < 0.0 { -1.0 } else { 1.0 };
    let t = -sign / (tau.abs() + (1.0 + tau * tau).sqrt());
    let c = 1.0 / (1.0 + t * t).sqrt();
    (c, t * c)
}

fn rotate(m: &mut Matrix, vectors: Option<&mut Matrix>, i: usize, j: usize, c: f64, s: f64) {
    let n = m.nrows();
    for k in 0..n {
        let (mik, mjk) = (m[(i, k)], m[(j, k)]);
        m[(i, k)] = c * mik + s * mjk;
        m[(j, k)] = -s * mik + c * mjk;
    }
    for k in 0..n {
        let (mki, mkj) = (m[(k, i)], m[(k, j)]);
        m[(k, i)] = c * mki + s * mkj;
        m[(k, j)] = -s * mki + c * mkj;
    }
    m[(i, j)] = 0.0;
    m[(j, i)] = 0.0;

    if let Some(v) = vectors {
        for k in 0..n {
            let (vki, vkj) = (v[(k, i)], v[(k, j)]);
            v[(k, i)] = c * vki + s * vkj;
            v[(k, j)] = -s * vki + c * vkj;
        }
    }
}

impl SymmetricEigen for Matrix {
    fn eigen_symm(&self, options: JacobiOptions) -> Result<JacobiEigen> {
        let n = check_square(self, "eigen_symm")?;
        check_iteration_params(options.tol, options.max_iter)?;
        let sym_tol = 1e-10 * self.max_abs().max(1.0);
        if let Some((i, j)) = self.asymmetry(sym_tol) {
            return Err(Error::from_kind(ErrorKind::NotSymmetric(i, j)));
        }

        if n <= 1 {
            return Ok(JacobiEigen {
                values: self.diagonal(),
                vectors: if options.eigenvectors { Some(Matrix::eye(n)) } else { None },
                converged: true,
                iterations: 0,
                off_norm: 0.0,
            });
        }

        let mut m = self.clone();
        let mut vectors = if options.eigenvectors { Some(Matrix::eye(n)) } else { None };
        let pairs = (n * (n - 1)) as f64;

        let mut iterations = 0;
        let mut off = m.off_diagonal_norm(Norm::L1);
        while off >= options.tol && iterations < options.max_iter {
            let limit = off / pairs;
            let mut rotations = 0;
            for i in 0..(n - 1) {
                for j in (i + 1)..n {
                    if m[(i, j)].abs() > limit {
                        let (c, s) = jacobi_rotation(&m, i, j);
                        trace!("sweep {}: rotating ({}, {}) c={} s={}", iterations, i, j, c, s);
                        rotate(&mut m, vectors.as_mut(), i, j, c, s);
                        rotations += 1;
                    }
                }
            }
            iterations += 1;
            off = m.off_diagonal_norm(Norm::L1);
            debug!("jacobi sweep {}: {} rotations, off-diagonal norm {:e}",
                iterations, rotations, off);
        }

        let converged = off < options.tol;
        if !converged {
            warn!("jacobi: no convergence after {} sweeps (off-diagonal norm {:e}, tol {:e})",
                iterations, off, options.tol);
        }

        Ok(JacobiEigen {
            values: m.diagonal(),
            vectors: vectors,
            converged: converged,
            iterations: iterations,
            off_norm: off,
        })
    }
}

/// How the shift evolves between inverse iteration steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftUpdate {
    /// Replace the shift by the Rayleigh quotient after every step (cubic local convergence).
    Rayleigh,
    /// Keep the initial shift (plain inverse iteration, linear convergence).
    Fixed,
}

/// Options for shifted inverse iteration.
#[derive(Debug, Clone, Copy)]
pub struct InverseIterOptions {
    mu: f64,
    tol: f64,
    max_iter: usize,
    shift: ShiftUpdate,
}
impl Default for InverseIterOptions {
    fn default() -> InverseIterOptions {
        InverseIterOptions {
            mu: 0.0,
            tol: 1e-8,
            max_iter: 10000,
            shift: ShiftUpdate::Rayleigh,
        }
    }
}
impl InverseIterOptions {
    pub fn new() -> InverseIterOptions { InverseIterOptions::default() }

    /// Initial eigenvalue guess.
    pub fn mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }
    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
    pub fn shift(mut self, shift: ShiftUpdate) -> Self {
        self.shift = shift;
        self
    }
}

/// Eigenvalue estimate with its (unit-norm) eigenvector.
#[derive(Debug, Clone)]
pub struct Eigenpair {
    pub value: f64,
    pub vector: Vec<f64>,
    /// `false` if `max_iter` ran out before successive estimates agreed within `tol`.
    pub converged: bool,
    pub iterations: usize,
}

pub trait InverseIteration {
    /// Eigenpair whose eigenvalue is nearest the (possibly updated) shift.
    fn inverse_iteration(&self, options: InverseIterOptions) -> Result<Eigenpair>;
}

impl InverseIteration for Matrix {
    fn inverse_iteration(&self, options: InverseIterOptions) -> Result<Eigenpair> {
        let n = check_square(self, "inverse_iteration")?;
        check_iteration_params(options.tol, options.max_iter)?;
        if !options.mu.is_finite() {
            return Err(Error::from_kind(ErrorKind::InvalidParameter(
                format!("shift must be finite, got {}", options.mu))));
        }
        if n == 0 {
            return Err(Error::from_kind(ErrorKind::ShapeError(
                "inverse_iteration called with empty matrix".to_string())));
        }
        if n == 1 {
            return Ok(Eigenpair {
                value: self[(0, 0)],
                vector: vec![1.0],
                converged: true,
                iterations: 0,
            });
        }

        let mut mu = options.mu;
        let mut u = vec![1.0; n];
        let mut shifted = self.shifted(mu);

        for iteration in 0..options.max_iter {
            let norm = u.norm(Norm::L2);
            let w: Vec<f64> = u.iter().map(|x| x / norm).collect();

            u = match gauss(&shifted, &w, Pivoting::Partial, 0.0) {
                Ok(u) => u,
                Err(e) => {
                    let singular = match *e.kind() {
                        ErrorKind::SingularMatrix(_) => true,
                        _ => false,
                    };
                    if !singular {
                        return Err(e);
                    }
                    // a Rayleigh quotient that lands exactly on an eigenvalue is convergence,
                    // and `w` is already its eigenvector
                    if iteration > 0 && options.shift == ShiftUpdate::Rayleigh {
                        debug!("inverse iteration {}: shift {} is an eigenvalue", iteration, mu);
                        return Ok(Eigenpair {
                            value: mu,
                            vector: w,
                            converged: true,
                            iterations: iteration,
                        });
                    }
                    let used = shifted_mu(options, mu);
                    return Err(Error::from_kind(ErrorKind::SingularShift(used, iteration)));
                }
            };

            let au = self * &u;
            let mu_new = u[..].dot(&au[..]) / u[..].dot(&u[..]);
            debug!("inverse iteration {}: mu={} mu_new={}", iteration, mu, mu_new);

            // overflow in `u` only happens with a shift sitting on an eigenvalue
            if !mu_new.is_finite() && iteration > 0 {
                return Ok(Eigenpair {
                    value: mu,
                    vector: w,
                    converged: true,
                    iterations: iteration,
                });
            }

            if (mu - mu_new).abs() < options.tol {
                return Ok(Eigenpair {
                    value: mu_new,
                    vector: normalized(u),
                    converged: true,
                    iterations: iteration + 1,
                });
            }

            mu = mu_new;
            if options.shift == ShiftUpdate::Rayleigh {
                shifted = self.shifted(mu);
            }
        }

        warn!("inverse iteration: no convergence after {} iterations (mu={})",
            options.max_iter, mu);
        Ok(Eigenpair {
            value: mu,
            vector: normalized(u),
            converged: false,
            iterations: options.max_iter,
        })
    }
}

// shift actually used by the linear solve at this point
fn shifted_mu(options: InverseIterOptions, mu: f64) -> f64 {
    match options.shift {
        ShiftUpdate::Rayleigh => mu,
        ShiftUpdate::Fixed => options.mu,
    }
}

fn normalized(u: Vec<f64>) -> Vec<f64> {
    let norm = u.norm(Norm::L2);
    u.into_iter().map(|x| x / norm).collect()
}
