use std::f64;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;

use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

use errors::*;

/// Dense matrix of `f64` values stored in row-major order.
///
/// Every routine in this crate takes its matrix arguments by reference and works on a private
/// copy, so a `Matrix` handed to a solver comes back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

// for to_symmetric
#[derive(Debug, Clone, Copy)]
pub enum SymmetrizeMethod {
    CopyLower,
    CopyUpper,
}

impl Matrix {
    /// Builds a matrix from row-major data.
    ///
    /// # Panics
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(data: Vec<f64>, nrows: usize, ncols: usize) -> Matrix {
        assert_eq!(data.len(), nrows * ncols);
        Matrix {
            values: data,
            rows: nrows,
            cols: ncols,
        }
    }
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Matrix> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::from_kind(ErrorKind::ShapeError(
                    format!("row {} has {} entries, expected {}", i, row.len(), ncols))));
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix::from_vec(data, nrows, ncols))
    }
    pub fn ones(nrows: usize, ncols: usize) -> Matrix {
        Matrix::from_vec(vec![1.0; nrows * ncols], nrows, ncols)
    }
    pub fn zeros(nrows: usize, ncols: usize) -> Matrix {
        Matrix::from_vec(vec![0.0; nrows * ncols], nrows, ncols)
    }
    pub fn diag(vec: &[f64]) -> Matrix {
        let n = vec.len();
        let mut m = Matrix::zeros(n, n);
        for (i, &value) in vec.iter().enumerate() {
            m[(i, i)] = value;
        }
        m
    }
    pub fn eye(n: usize) -> Matrix {
        Matrix::diag(&vec![1.0; n])
    }

    /// Matrix of uniform samples in `[0, 1)` drawn from `rng`.
    pub fn rand<R: Rng + ?Sized>(nrows: usize, ncols: usize, rng: &mut R) -> Matrix {
        let v: Vec<f64> = (0..nrows * ncols).map(|_| rng.gen::<f64>()).collect();
        Matrix::from_vec(v, nrows, ncols)
    }
    /// Matrix of standard normal samples drawn from `rng`.
    pub fn randsn<R: Rng + ?Sized>(nrows: usize, ncols: usize, rng: &mut R) -> Matrix {
        let v: Vec<f64> = (0..nrows * ncols).map(|_| StandardNormal.sample(rng)).collect();
        Matrix::from_vec(v, nrows, ncols)
    }
    pub fn randn<R: Rng + ?Sized>(nrows: usize, ncols: usize, mean: f64, stdev: f64, rng: &mut R)
            -> Result<Matrix> {
        if !(stdev >= 0.0 && stdev.is_finite()) {
            return Err(Error::from_kind(ErrorKind::InvalidParameter(
                format!("standard deviation must be finite and nonnegative, got {}", stdev))));
        }
        let dist = Normal::new(mean, stdev).map_err(|e| Error::from_kind(
            ErrorKind::InvalidParameter(format!("normal distribution: {}", e))))?;
        let v: Vec<f64> = (0..nrows * ncols).map(|_| dist.sample(rng)).collect();
        Ok(Matrix::from_vec(v, nrows, ncols))
    }
    /// Random symmetric matrix with standard normal entries in the upper triangle.
    pub fn rand_symmetric<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Matrix {
        Matrix::randsn(n, n, rng).to_symmetric(SymmetrizeMethod::CopyUpper)
    }
    /// Random symmetric positive-definite matrix, `B Bᵗ + n I` for a standard normal `B`.
    pub fn rand_spd<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Matrix {
        let b = Matrix::randsn(n, n, rng);
        let mut spd = &b * &b.t();
        for i in 0..n {
            spd[(i, i)] += n as f64;
        }
        spd
    }

    pub fn nrows(&self) -> usize { self.rows }
    pub fn ncols(&self) -> usize { self.cols }
    pub fn dims(&self) -> (usize, usize) { (self.rows, self.cols) }
    pub fn length(&self) -> usize { self.rows * self.cols }
    pub fn is_square(&self) -> bool { self.nrows() == self.ncols() }
    pub fn is_vector(&self) -> bool { self.nrows() == 1 || self.ncols() == 1 }

    /// Returns `true` if the matrix is square and `|A[i,j] - A[j,i]| <= tol` everywhere.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.asymmetry(tol).is_none()
    }
    /// First `(i, j)` pair (with `i < j`) whose mirrored entries differ by more than `tol`.
    pub(crate) fn asymmetry(&self, tol: f64) -> Option<(usize, usize)> {
        if !self.is_square() {
            return Some((0, 0));
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                if (self[(i, j)] - self[(j, i)]).abs() > tol {
                    return Some((i, j));
                }
            }
        }
        None
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }
    #[inline]
    pub fn t(&self) -> Matrix { self.transpose() }

    pub fn iter(&self) -> MatrixIter {
        MatrixIter {
            inner: self.values.iter(),
        }
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.values[..]
    }
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    pub fn get(&self, r: usize, c: usize) -> Result<f64> {
        if r >= self.rows || c >= self.cols {
            return Err(Error::from_kind(ErrorKind::IndexError("index out of bounds")));
        }
        Ok(self.values[r * self.cols + c])
    }
    pub fn set(&mut self, r: usize, c: usize, value: f64) -> Result<()> {
        if r >= self.rows || c >= self.cols {
            return Err(Error::from_kind(ErrorKind::IndexError("index out of bounds")));
        }
        self.values[r * self.cols + c] = value;
        Ok(())
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.values[r * self.cols..(r + 1) * self.cols]
    }
    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        let cols = self.cols;
        &mut self.values[r * cols..(r + 1) * cols]
    }
    pub fn column(&self, c: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self[(r, c)]).collect()
    }
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols)).map(|i| self[(i, i)]).collect()
    }
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.values.swap(a * self.cols + c, b * self.cols + c);
        }
    }
    /// Largest absolute entry (zero for an empty matrix).
    pub fn max_abs(&self) -> f64 {
        self.iter().fold(0.0, |acc, f| f.abs().max(acc))
    }

    pub fn hcat(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.nrows(), other.nrows());

        let (nrows, ncols) = (self.nrows(), self.ncols() + other.ncols());
        let mut data_vec: Vec<f64> = Vec::with_capacity(nrows * ncols);
        for r in 0..nrows {
            data_vec.extend_from_slice(self.row(r));
            data_vec.extend_from_slice(other.row(r));
        }
        Matrix::from_vec(data_vec, nrows, ncols)
    }
    pub fn vcat(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.ncols(), other.ncols());

        let mut data_vec = self.values.clone();
        data_vec.extend_from_slice(&other.values[..]);
        Matrix::from_vec(data_vec, self.nrows() + other.nrows(), self.ncols())
    }

    pub fn to_symmetric(&self, method: SymmetrizeMethod) -> Matrix {
        assert!(self.is_square());
        let mut symm = self.clone();
        let m = self.nrows();
        match method {
            SymmetrizeMethod::CopyUpper => {
                for i in 0..m {
                    for j in 0..i {
                        symm[(i, j)] = self[(j, i)];
                    }
                }
            }
            SymmetrizeMethod::CopyLower => {
                for i in 0..m {
                    for j in (i + 1)..m {
                        symm[(i, j)] = self[(j, i)];
                    }
                }
            }
        }
        symm
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        debug_assert!(r < self.rows && c < self.cols);
        &self.values[r * self.cols + c]
    }
}
impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        debug_assert!(r < self.rows && c < self.cols);
        &mut self.values[r * self.cols + c]
    }
}

impl From<Vec<f64>> for Matrix {
    /// Column vector.
    fn from(v: Vec<f64>) -> Matrix {
        let n = v.len();
        Matrix::from_vec(v, n, 1)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                write!(f, "{:+1.5e} ", self[(i, j)])?;
            }
            write!(f, "\n")?;
        }
        Ok(())
    }
}

pub struct MatrixIter<'a> {
    inner: slice::Iter<'a, f64>,
}
impl<'a> Iterator for MatrixIter<'a> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.inner.next().cloned()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ones() {
        let (m,n) = (5, 10);
        let a = Matrix::ones(m, n);

        assert_eq!(a.dims(), (m, n));
        assert_eq!(a.iter().fold(f64::NEG_INFINITY, |acc, f| acc.max(f)), 1.0);
        assert_eq!(a.iter().fold(f64::INFINITY, |acc, f| acc.min(f)), 1.0);
    }

    #[test]
    fn test_zeros() {
        let (m,n) = (5, 10);
        let a = Matrix::zeros(m, n);

        assert_eq!(a.dims(), (m, n));
        assert_eq!(a.max_abs(), 0.0);
    }

    #[test]
    fn test_get() {
        let a = mat![1, 2; 3, 4];
        assert_eq!(a.dims(), (2, 2));
        assert_eq!(a.get(0, 0).unwrap(), 1.0);
        assert_eq!(a.get(0, 1).unwrap(), 2.0);
        assert_eq!(a.get(1, 0).unwrap(), 3.0);
        assert_eq!(a.get(1, 1).unwrap(), 4.0);
        assert!(a.get(2, 0).is_err());
        assert!(a.get(0, 2).is_err());
    }
    #[test]
    fn test_set() {
        let mut a = mat![1, 2; 3, 4];
        a.set(1, 0, 5.0).unwrap();

        assert_eq!(a.as_slice(), &[1.0, 2.0, 5.0, 4.0]);
        match *a.set(5, 5, 1.0).unwrap_err().kind() {
            ErrorKind::IndexError(_) => {}
            ref k => panic!("expected IndexError, found: {}", k),
        }
    }

    #[test]
    fn test_from_rows() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(a, mat![1, 2, 3; 4, 5, 6]);

        let ragged = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(ragged.is_err());
    }

    #[test]
    fn test_diag() {
        let a = Matrix::diag(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(a.dims(), (5, 5));

        for i in 0..5 {
            for j in 0..5 {
                if i == j {
                    assert_eq!(a[(i, j)], i as f64 + 1.0);
                } else {
                    assert_eq!(a[(i, j)], 0.0);
                }
            }
        }
        assert_eq!(a.diagonal(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
    #[test]
    fn test_eye() {
        let a = Matrix::eye(5);

        assert_eq!(a.dims(), (5, 5));
        assert_eq!(a.iter().sum::<f64>(), 5.0);
        assert!(a.is_symmetric(0.0));
    }

    #[test]
    fn test_rand_is_reproducible() {
        let (m, n) = (20, 30);
        let a = Matrix::rand(m, n, &mut StdRng::seed_from_u64(7));
        let b = Matrix::rand(m, n, &mut StdRng::seed_from_u64(7));

        assert_eq!(a.dims(), (m, n));
        assert_eq!(a, b);
        assert!(a.iter().fold(f64::NEG_INFINITY, |acc, f| acc.max(f)) < 1.0);
        assert!(a.iter().fold(f64::INFINITY, |acc, f| acc.min(f)) >= 0.0);
    }

    #[test]
    fn test_randsn() {
        let mut rng = StdRng::seed_from_u64(11);
        let (m, n) = (100, 100);
        let a = Matrix::randsn(m, n, &mut rng);

        assert_eq!(a.dims(), (m, n));

        let rares = a.iter().fold(0, |acc, f| if f < -3.0 || f > 3.0 { acc + 1 } else { acc });
        // should be ~0.003, give a bit of leeway
        let limit = (0.006 * (m * n) as f64) as usize;
        println!("{:#?} {:#?}", rares, limit);
        assert!(rares < limit);
    }

    #[test]
    fn test_randn() {
        let mut rng = StdRng::seed_from_u64(13);
        let (m, n) = (100, 100);
        let (mean, stdev) = (10.0, 3.0);
        let a = Matrix::randn(m, n, mean, stdev, &mut rng).unwrap();

        assert_eq!(a.dims(), (m, n));

        let rares = a.iter().fold(
            0,
            |acc, f| if f < mean - 3.0 * stdev || f > mean + 3.0 * stdev { acc + 1 } else { acc }
        );
        let limit = (0.006 * (m * n) as f64) as usize;
        assert!(rares < limit);

        match *Matrix::randn(2, 2, 0.0, -1.0, &mut rng).unwrap_err().kind() {
            ErrorKind::InvalidParameter(_) => {}
            ref k => panic!("expected InvalidParameter, found: {}", k),
        }
        assert!(Matrix::randn(2, 2, 0.0, f64::NAN, &mut rng).is_err());
        assert!(Matrix::randn(2, 2, 0.0, f64::INFINITY, &mut rng).is_err());
        assert!(Matrix::randn(2, 2, 1.0, 0.0, &mut rng).unwrap().iter().all(|f| f == 1.0));
    }

    #[test]
    fn test_rand_spd() {
        let mut rng = StdRng::seed_from_u64(17);
        let a = Matrix::rand_spd(8, &mut rng);
        assert!(a.is_symmetric(0.0));
        for i in 0..8 {
            assert!(a[(i, i)] > 0.0);
        }
    }

    #[test]
    fn test_hcat() {
        let a = Matrix::ones(2, 3);
        let b = Matrix::zeros(2, 2);

        let c = a.hcat(&b);
        assert_eq!(c.dims(), (2, 5));
        assert_eq!(c.row(0), &[1.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(c.row(1), &[1.0, 1.0, 1.0, 0.0, 0.0]);

        let x = Matrix::from(vec![7.0, 8.0]);
        let c = b.hcat(&x);
        assert_eq!(c.column(2), vec![7.0, 8.0]);
    }

    #[test]
    fn test_vcat() {
        let a = mat![1, 2, 3; 4, 5, 6];
        let b = mat![7, 8, 9];
        let c = a.vcat(&b);
        assert_eq!(c.dims(), (3, 3));
        assert_eq!(c.into_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_swap_rows() {
        let mut a = mat![1, 2; 3, 4; 5, 6];
        a.swap_rows(0, 2);
        assert_eq!(a, mat![5, 6; 3, 4; 1, 2]);
        a.swap_rows(1, 1);
        assert_eq!(a, mat![5, 6; 3, 4; 1, 2]);
    }

    #[test]
    fn test_symmetrize_lower() {
        let a = mat![1.0, 2.0, 3.0, 4.0;
                     1.0, 2.0, 3.0, 4.0;
                     1.0, 2.0, 3.0, 4.0;
                     1.0, 2.0, 3.0, 4.0];

        let a_symm = a.to_symmetric(SymmetrizeMethod::CopyLower);
        assert_eq!(a_symm,
            mat![1.0, 1.0, 1.0, 1.0;
                 1.0, 2.0, 2.0, 2.0;
                 1.0, 2.0, 3.0, 3.0;
                 1.0, 2.0, 3.0, 4.0]);
        assert!(a_symm.is_symmetric(0.0));
        assert!(!a.is_symmetric(0.5));
    }
    #[test]
    fn test_symmetrize_upper() {
        let a = mat![1.0, 2.0, 3.0, 4.0;
                     1.0, 2.0, 3.0, 4.0;
                     1.0, 2.0, 3.0, 4.0;
                     1.0, 2.0, 3.0, 4.0];

        let a_symm = a.to_symmetric(SymmetrizeMethod::CopyUpper);
        assert_eq!(a_symm,
            mat![1.0, 2.0, 3.0, 4.0;
                 2.0, 2.0, 3.0, 4.0;
                 3.0, 3.0, 3.0, 4.0;
                 4.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_asymmetry_reports_first_pair() {
        let a = mat![1, 2, 3; 2, 1, 9; 3, 0, 1];
        assert_eq!(a.asymmetry(1e-12), Some((1, 2)));
        assert_eq!(mat![1, 2; 3, 4; 5, 6].asymmetry(0.0), Some((0, 0)));
    }

    #[test]
    fn test_transpose() {
        let (m, n) = (2, 5);
        let a = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0],
            m, n);
        let b = a.t();

        assert_eq!(a.dims(), (m, n));
        assert_eq!(b.dims(), (n, m));

        assert_eq!(a[(1, 2)], 30.0);
        assert_eq!(a[(0, 4)], 5.0);
        assert_eq!(b[(2, 1)], 30.0);
        assert_eq!(b[(4, 0)], 5.0);
        assert_eq!(b.t(), a);
    }
}
