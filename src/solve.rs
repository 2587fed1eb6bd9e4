use std::f64;

use errors::*;

use Matrix;
use ops::Dot;

/// Row-interchange strategy used during Gaussian elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivoting {
    /// Swap in the row with the largest magnitude entry in the pivot column.
    Partial,
    /// Always use the diagonal entry; a zero on the diagonal is fatal even when the matrix is
    /// nonsingular.
    None,
}
impl Default for Pivoting {
    fn default() -> Pivoting { Pivoting::Partial }
}

pub trait Solve {
    type Rhs: ?Sized;
    type Output;

    /// Solve `A x = b` with partial pivoting.
    fn solve(&self, b: &Self::Rhs) -> Result<Self::Output>;
    fn solve_with(&self, b: &Self::Rhs, pivoting: Pivoting) -> Result<Self::Output>;
    fn inverse(&self) -> Result<Matrix>;
}

impl Solve for Matrix {
    type Rhs = [f64];
    type Output = Vec<f64>;

    fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        self.solve_with(b, Pivoting::default())
    }

    fn solve_with(&self, b: &[f64], pivoting: Pivoting) -> Result<Vec<f64>> {
        gauss(self, b, pivoting, relative_min_pivot(self))
    }

    fn inverse(&self) -> Result<Matrix> {
        if !self.is_square() {
            return Err(Error::from_kind(ErrorKind::ShapeError(
                "inverse called with non-square matrix".to_string())))
        }
        let n = self.nrows();
        let min_pivot = relative_min_pivot(self);
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![0.0; n];
        for j in 0..n {
            e[j] = 1.0;
            let col = gauss(self, &e, Pivoting::Partial, min_pivot)?;
            for (i, value) in col.into_iter().enumerate() {
                inv[(i, j)] = value;
            }
            e[j] = 0.0;
        }
        Ok(inv)
    }
}

/// Pivots at or below `n ε max|A|` are indistinguishable from rounding noise.
fn relative_min_pivot(a: &Matrix) -> f64 {
    a.nrows() as f64 * f64::EPSILON * a.max_abs()
}

#[inline]
fn is_usable_pivot(pivot: f64, min_pivot: f64) -> bool {
    pivot.is_finite() && pivot.abs() > min_pivot && pivot.abs() >= f64::MIN_POSITIVE
}

/// Gaussian elimination on `[A | b]` followed by back-substitution.
///
/// Works on a private augmented copy; neither `a` nor `b` is modified. Any pivot with magnitude
/// at or below `min_pivot` (or below `f64::MIN_POSITIVE`) is reported as `SingularMatrix`. Shifted
/// systems in inverse iteration pass `0.0` here, since a nearly singular `A - mu I` is exactly
/// what they want to solve.
pub(crate) fn gauss(a: &Matrix, b: &[f64], pivoting: Pivoting, min_pivot: f64)
        -> Result<Vec<f64>> {
    if !a.is_square() {
        return Err(Error::from_kind(ErrorKind::ShapeError(
            format!("solve called with non-square {}x{} matrix", a.nrows(), a.ncols()))))
    }
    let n = a.nrows();
    if b.len() != n {
        return Err(Error::from_kind(ErrorKind::ShapeError(
            format!("right-hand side length {} must match left-hand matrix nrows {}",
                b.len(), n))))
    }
    debug!("gaussian elimination: n={} pivoting={:?}", n, pivoting);

    // column n holds the right-hand side
    let mut aug = a.hcat(&Matrix::from(b.to_vec()));

    for j in 0..n {
        if pivoting == Pivoting::Partial {
            let mut p = j;
            for i in (j + 1)..n {
                if aug[(i, j)].abs() > aug[(p, j)].abs() {
                    p = i;
                }
            }
            if p != j {
                trace!("step {}: swapping rows {} and {}", j, j, p);
                aug.swap_rows(j, p);
            }
        }

        let pivot = aug[(j, j)];
        if !is_usable_pivot(pivot, min_pivot) {
            debug!("step {}: unusable pivot {}", j, pivot);
            return Err(Error::from_kind(ErrorKind::SingularMatrix(j)));
        }

        for value in aug.row_mut(j)[j..].iter_mut() {
            *value /= pivot;
        }
        aug[(j, j)] = 1.0;

        for i in (j + 1)..n {
            let factor = aug[(i, j)];
            if factor == 0.0 {
                continue;
            }
            for k in j..(n + 1) {
                let update = factor * aug[(j, k)];
                aug[(i, k)] -= update;
            }
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let row = aug.row(i);
        let tail = row[(i + 1)..n].dot(&x[(i + 1)..]);
        x[i] = (row[n] - tail) / row[i];
    }
    Ok(x)
}
