// Example:
// let a = mat![1, 2, 3, 4; 5, 6, 7, 8; 9, 10, 11, 12];
// assert_eq!(a.dims(), (3, 4));
#[macro_export]
macro_rules! mat {
    [$( $( $x:expr ),* );*] => {{
        let mut data: Vec<f64> = Vec::new();
        let mut nrows = 0;
        let mut ncols = 0;
        $(
            let mut tmp_ncols = 0;
            $(
                data.push($x as f64);
                tmp_ncols += 1;
            )*
            if nrows > 0 {
                assert_eq!(ncols, tmp_ncols);
            }
            ncols = tmp_ncols;
            nrows += 1;
        )*

        $crate::Matrix::from_vec(data, nrows, ncols)
    }}
}

// entrywise comparison of two matrices (or anything exposing dims() and iter())
#[cfg(test)]
macro_rules! assert_mat_eq {
    ($left:expr, $right:expr) => { assert_mat_eq!($left, $right, 1e-10) };
    ($left:expr, $right:expr, $eps:expr) => {{
        let (left, right) = (&$left, &$right);
        assert_eq!(left.dims(), right.dims());
        for (l, r) in left.iter().zip(right.iter()) {
            assert_abs_diff_eq!(l, r, epsilon = $eps);
        }
    }};
}

#[cfg(test)]
mod tests {
    use Matrix;

    #[test]
    fn test_macro() {
        let a = mat![1, 2, 3, 4; 5, 6, 7, 8];
        assert_eq!(a.dims(), (2, 4));
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        println!("{:#?}", a);

        let a = mat![1, 2; 3.0, 4; 5.5, 6];
        assert_eq!(a.dims(), (3, 2));

        assert_eq!(a.get(0, 0).unwrap(), 1.0);
        assert_eq!(a.get(0, 1).unwrap(), 2.0);
        assert_eq!(a.get(1, 0).unwrap(), 3.0);
        assert_eq!(a.get(1, 1).unwrap(), 4.0);
        assert_eq!(a.get(2, 0).unwrap(), 5.5);
        assert_eq!(a.get(2, 1).unwrap(), 6.0);

        let single = mat![42];
        assert_eq!(single, Matrix::from_vec(vec![42.0], 1, 1));
    }

    #[test]
    #[should_panic]
    fn test_macro_ragged() {
        let _ = mat![1, 2; 3];
    }
}
