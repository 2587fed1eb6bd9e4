use Matrix;

/// Vector norm types
#[derive(Debug, Clone, Copy)]
pub enum Norm {
    /// L1 (absolute value) norm
    L1,
    /// L2 (Euclidean) norm
    L2,
}

fn norm_of<I: Iterator<Item = f64>>(values: I, norm_type: Norm) -> f64 {
    match norm_type {
        Norm::L1 => { values.fold(0.0, |acc, f| acc + f.abs()) }
        Norm::L2 => { values.fold(0.0, |acc, f| acc + f * f).sqrt() }
    }
}

/// Trait providing vector norms
pub trait VectorNorm {
    /// Compute the specified norm type on the vector.
    fn norm(&self, norm_type: Norm) -> f64;
}

impl VectorNorm for [f64] {
    fn norm(&self, norm_type: Norm) -> f64 {
        norm_of(self.iter().cloned(), norm_type)
    }
}

impl Matrix {
    /// Norm of the strictly upper triangular entries; for a symmetric matrix this measures how
    /// far it is from diagonal.
    pub fn off_diagonal_norm(&self, norm_type: Norm) -> f64 {
        let n = self.nrows();
        norm_of(
            (0..n).flat_map(|i| self.row(i)[(i + 1).min(self.ncols())..].iter().cloned()),
            norm_type)
    }
}
