use errors::*;

use Matrix;
use ops::Dot;

pub trait Compose<T> {
    fn compose(&self) -> T;
}

pub(crate) fn check_square(a: &Matrix, caller: &str) -> Result<usize> {
    if !a.is_square() {
        return Err(Error::from_kind(ErrorKind::ShapeError(
            format!("{} called with non-square {}x{} matrix", caller, a.nrows(), a.ncols()))))
    }
    Ok(a.nrows())
}

/// Cholesky factor `L` of a symmetric positive-definite matrix, `A = L Lᵗ`.
#[derive(Debug, Clone)]
pub struct Cholesky<T> {
    l: T,
}
impl Cholesky<Matrix> {
    /// Lower-triangular factor with strictly positive diagonal.
    pub fn l(&self) -> &Matrix {
        &self.l
    }
    pub fn into_l(self) -> Matrix {
        self.l
    }

    /// Solves `A x = b` by forward substitution on `L y = b` followed by back substitution on
    /// `Lᵗ x = y`.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.l.nrows();
        if b.len() != n {
            return Err(Error::from_kind(ErrorKind::ShapeError(
                format!("right-hand side length {} must match factor dimension {}",
                    b.len(), n))))
        }

        let mut y = vec![0.0; n];
        for i in 0..n {
            let row = self.l.row(i);
            y[i] = (b[i] - row[..i].dot(&y[..i])) / row[i];
        }

        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = y[i];
            for k in (i + 1)..n {
                sum -= self.l[(k, i)] * x[k];
            }
            x[i] = sum / self.l[(i, i)];
        }
        Ok(x)
    }

    /// Determinant of the factored matrix.
    pub fn det(&self) -> f64 {
        self.l.diagonal().iter().fold(1.0, |acc, d| acc * d * d)
    }
}
impl Compose<Matrix> for Cholesky<Matrix> {
    fn compose(&self) -> Matrix {
        &self.l * &self.l.t()
    }
}

pub trait CholeskyDecompose: Sized {
    /// Banachiewicz (row-by-row) Cholesky factorization.
    ///
    /// Only the lower triangle of the matrix is referenced. Fails with `NotPositiveDefinite`
    /// as soon as a diagonal term would be non-positive.
    fn cholesky(&self) -> Result<Cholesky<Self>>;
}

impl CholeskyDecompose for Matrix {
    fn cholesky(&self) -> Result<Cholesky<Matrix>> {
        let n = check_square(self, "cholesky")?;
        debug!("cholesky: n={}", n);

        let mut l = Matrix::zeros(n, n);
        for i in 0..n {
            for j in 0..(i + 1) {
                let value = self[(i, j)] - l.row(i)[..j].dot(&l.row(j)[..j]);

                if i == j {
                    // also rejects NaN
                    if !(value > 0.0) {
                        debug!("cholesky: diagonal term {} at row {}", value, i);
                        return Err(Error::from_kind(ErrorKind::NotPositiveDefinite(i)));
                    }
                    l[(i, i)] = value.sqrt();
                } else {
                    l[(i, j)] = value / l[(j, j)];
                }
            }
        }

        Ok(Cholesky { l: l })
    }
}

/// Square-root-free factorization `A = L D Lᵗ` with unit lower-triangular `L`.
#[derive(Debug, Clone)]
pub struct Ldl<T, D> {
    l: T,
    d: D,
}
impl Ldl<Matrix, Vec<f64>> {
    pub fn l(&self) -> &Matrix {
        &self.l
    }
    pub fn d(&self) -> &[f64] {
        &self.d[..]
    }
    /// `L D^{1/2}`, which is exactly the Cholesky factor.
    pub fn to_cholesky(&self) -> Cholesky<Matrix> {
        let mut l = self.l.clone();
        for (j, dj) in self.d.iter().enumerate() {
            let scale = dj.sqrt();
            for i in j..l.nrows() {
                l[(i, j)] *= scale;
            }
        }
        Cholesky { l: l }
    }
}
impl Compose<Matrix> for Ldl<Matrix, Vec<f64>> {
    fn compose(&self) -> Matrix {
        &self.l * Matrix::diag(&self.d) * self.l.t()
    }
}

pub trait LdlDecompose: Sized {
    type DiagonalStore;

    fn ldl(&self) -> Result<Ldl<Self, Self::DiagonalStore>>;
}

impl LdlDecompose for Matrix {
    type DiagonalStore = Vec<f64>;

    fn ldl(&self) -> Result<Ldl<Matrix, Vec<f64>>> {
        let n = check_square(self, "ldl")?;

        let mut l = Matrix::eye(n);
        let mut d = vec![0.0; n];
        for i in 0..n {
            for j in 0..(i + 1) {
                let mut value = self[(i, j)];
                for k in 0..j {
                    value -= l[(i, k)] * l[(j, k)] * d[k];
                }

                if i == j {
                    if !(value > 0.0) {
                        return Err(Error::from_kind(ErrorKind::NotPositiveDefinite(i)));
                    }
                    d[i] = value;
                } else {
                    l[(i, j)] = value / d[j];
                }
            }
        }

        Ok(Ldl { l: l, d: d })
    }
}
