//! Classical dense linear algebra on a small row-major `Matrix` type: Gaussian elimination,
//! Cholesky and LDLᵗ factorization, the cyclic Jacobi eigenvalue method and shifted inverse
//! iteration.

#[macro_use] extern crate error_chain;
#[macro_use] extern crate log;
extern crate rand;
extern crate rand_distr;

#[cfg(test)] #[macro_use] extern crate approx;
#[cfg(test)] extern crate nalgebra;

#[macro_use] mod macro_def;

pub mod errors;
pub use errors::{Error, ErrorKind, Result};

pub mod matrix;
pub use matrix::{Matrix, MatrixIter, SymmetrizeMethod};

mod ops;
pub use ops::{gemm, gemv, Dot};

pub mod norm;
pub use norm::{Norm, VectorNorm};

pub mod solve;
pub use solve::{Solve, Pivoting};

pub mod decompose;
pub use decompose::{Compose, Cholesky, CholeskyDecompose, Ldl, LdlDecompose};

pub mod eigen;
pub use eigen::{SymmetricEigen, JacobiOptions, JacobiEigen, InverseIteration, InverseIterOptions,
    ShiftUpdate, Eigenpair};
