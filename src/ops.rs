use std::ops::{Add, Mul};

use Matrix;


macro_rules! bin_inner {
    ($rhs:ty, $name:ident, $op:tt) => {
        type Output = Matrix;

        fn $name(self, rhs: $rhs) -> Matrix {
            assert_eq!(self.nrows(), rhs.nrows());
            assert_eq!(self.ncols(), rhs.ncols());

            Matrix::from_vec(
                self.iter().zip(rhs.iter()).map(|(l, r)| l $op r).collect(),
                self.nrows(), self.ncols()
            )
        }
    }
}
macro_rules! add_inner {
    ($rhs:ty) => { bin_inner!($rhs, add, +); }
}
macro_rules! implement_add {
    ($lhs:ty, $rhs:ty) => {
        impl Add<$rhs> for $lhs {
            add_inner!($rhs);
        }
    };
    ($lhs:ty, $rhs:ty, $( $lifetime:tt ),* ) => {
        impl<$($lifetime),*> Add<$rhs> for $lhs {
            add_inner!($rhs);
        }
    };
}
implement_add!(Matrix, Matrix);
implement_add!(Matrix, &'a Matrix, 'a);
implement_add!(&'a Matrix, Matrix, 'a);
implement_add!(&'a Matrix, &'b Matrix, 'a, 'b);

// multiplication

/// General matrix multiply: `alpha * a * b + beta * c`.
///
/// # Panics
/// Panics on incompatible dimensions.
pub fn gemm(a: &Matrix, b: &Matrix, alpha: f64, c_beta: Option<(&Matrix, f64)>) -> Matrix {
    let (m, k, n) = (a.nrows(), a.ncols(), b.ncols());
    assert!(k == b.nrows());
    let (mut out, beta) = match c_beta {
        Some((c, beta)) => {
            assert!(m == c.nrows());
            assert!(n == c.ncols());
            (c.clone(), beta)
        },
        None => {
            (Matrix::zeros(m, n), 0.0)
        }
    };

    for i in 0..m {
        let a_row = a.row(i);
        let out_row = out.row_mut(i);
        for value in out_row.iter_mut() {
            *value = if beta == 0.0 { 0.0 } else { beta * *value };
        }
        // i-k-j ordering keeps the inner loop on contiguous rows
        for (p, &a_ip) in a_row.iter().enumerate() {
            if a_ip == 0.0 {
                continue;
            }
            let scaled = alpha * a_ip;
            for (value, &b_pj) in out_row.iter_mut().zip(b.row(p)) {
                *value += scaled * b_pj;
            }
        }
    }

    out
}

macro_rules! mul_inner {
    ($rhs:ty) => {
        type Output = Matrix;

        fn mul(self, rhs: $rhs) -> Matrix {
            gemm(&self, &rhs, 1.0, None)
        }
    }
}
macro_rules! implement_mul {
    ($lhs:ty, $rhs:ty) => {
        impl Mul<$rhs> for $lhs {
            mul_inner!($rhs);
        }
    };
    ($lhs:ty, $rhs:ty, $( $lifetime:tt),* ) => {
        impl<$($lifetime),*> Mul<$rhs> for $lhs {
            mul_inner!($rhs);
        }
    }
}
implement_mul!(Matrix, Matrix);
implement_mul!(Matrix, &'a Matrix, 'a);
implement_mul!(&'a Matrix, Matrix, 'a);
implement_mul!(&'a Matrix, &'b Matrix, 'a, 'b);

/// Matrix-vector product.
///
/// # Panics
/// Panics if `x.len() != a.ncols()`.
pub fn gemv(a: &Matrix, x: &[f64]) -> Vec<f64> {
    assert_eq!(a.ncols(), x.len());
    (0..a.nrows()).map(|i| a.row(i).dot(x)).collect()
}

impl<'a, 'b> Mul<&'b [f64]> for &'a Matrix {
    type Output = Vec<f64>;

    fn mul(self, rhs: &'b [f64]) -> Vec<f64> {
        gemv(self, rhs)
    }
}
impl<'a, 'b> Mul<&'b Vec<f64>> for &'a Matrix {
    type Output = Vec<f64>;

    fn mul(self, rhs: &'b Vec<f64>) -> Vec<f64> {
        gemv(self, &rhs[..])
    }
}

fn scalar_mul(mat: &Matrix, rhs: f64) -> Matrix {
    Matrix::from_vec(mat.iter().map(|e| rhs * e).collect(), mat.nrows(), mat.ncols())
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        scalar_mul(&self, rhs)
    }
}
impl<'a> Mul<f64> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        scalar_mul(self, rhs)
    }
}
impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        scalar_mul(&rhs, self)
    }
}
impl<'a> Mul<&'a Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &'a Matrix) -> Matrix {
        scalar_mul(rhs, self)
    }
}

impl Matrix {
    /// Returns `self - mu * I`.
    ///
    /// # Panics
    /// Panics if the matrix is not square.
    pub fn shifted(&self, mu: f64) -> Matrix {
        assert!(self.is_square());
        let mut out = self.clone();
        for i in 0..out.nrows() {
            out[(i, i)] -= mu;
        }
        out
    }
}

pub trait Dot<T: ?Sized> {
    type Output;

    fn dot(&self, rhs: &T) -> Self::Output;
}
impl Dot<[f64]> for [f64] {
    type Output = f64;

    fn dot(&self, rhs: &[f64]) -> f64 {
        assert_eq!(self.len(), rhs.len());
        self.iter().zip(rhs.iter()).map(|(l, r)| l * r).fold(0.0, |acc, f| acc + f)
    }
}
