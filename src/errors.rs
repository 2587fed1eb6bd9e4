error_chain! {
    errors {
        IndexError(s: &'static str) {
            description("Index error")
            display("Index error: {}", s)
        }
        ShapeError(s: String) {
            description("Shape error")
            display("Shape error: {}", s)
        }
        SingularMatrix(pivot: usize) {
            description("Singular matrix")
            display("Singular matrix: zero pivot encountered at elimination step {}", pivot)
        }
        SingularShift(mu: f64, iteration: usize) {
            description("Singular shift")
            display("Singular shift: A - mu*I is not invertible for mu = {} (iteration {})",
                mu, iteration)
        }
        NotPositiveDefinite(row: usize) {
            description("Matrix not positive definite")
            display("Matrix is not positive definite: non-positive diagonal term at row {}", row)
        }
        NotSymmetric(i: usize, j: usize) {
            description("Matrix not symmetric")
            display("Matrix is not symmetric: entries ({}, {}) and ({}, {}) differ", i, j, j, i)
        }
        InvalidParameter(s: String) {
            description("Invalid parameter")
            display("Invalid parameter: {}", s)
        }
    }
}
