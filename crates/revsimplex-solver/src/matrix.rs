use thiserror::Error;

/// The basis matrix could not be inverted. Under correct pivoting every
/// basis is nonsingular, so hitting this means an internal invariant broke.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("basis matrix is numerically singular")]
pub struct SingularMatrix;

/// Dense row-major matrix of f64. Sized for simplex bases, not for sparse
/// or large-scale work.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Builds a matrix from row vectors. `cols` disambiguates the empty case.
    pub fn from_rows(rows: Vec<Vec<f64>>, cols: usize) -> Self {
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for row in &rows {
            debug_assert_eq!(row.len(), cols);
            data.extend_from_slice(row);
        }
        Self {
            rows: n_rows,
            cols,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        self.data[r * self.cols + c] = value;
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn column(&self, c: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self.get(r, c)).collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Appends one column on the right.
    pub fn push_column(&mut self, column: &[f64]) {
        debug_assert_eq!(column.len(), self.rows);
        let new_cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for r in 0..self.rows {
            data.extend_from_slice(self.row(r));
            data.push(column[r]);
        }
        self.cols = new_cols;
        self.data = data;
    }

    /// Keeps the first `keep` columns and drops the rest.
    pub fn truncate_columns(&mut self, keep: usize) {
        debug_assert!(keep <= self.cols);
        let mut data = Vec::with_capacity(self.rows * keep);
        for r in 0..self.rows {
            data.extend_from_slice(&self.row(r)[..keep]);
        }
        self.cols = keep;
        self.data = data;
    }

    /// Selects the given columns, in order, into a new matrix.
    pub fn select_columns(&self, indexes: &[usize]) -> Matrix {
        let mut out = Matrix::zeros(self.rows, indexes.len());
        for (j, &c) in indexes.iter().enumerate() {
            for r in 0..self.rows {
                out.set(r, j, self.get(r, c));
            }
        }
        out
    }

    /// A · v for a column vector v.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols);
        (0..self.rows).map(|r| dot(self.row(r), v)).collect()
    }

    /// vᵀ · A for a row vector v.
    pub fn vec_mul(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        (0..self.cols)
            .map(|c| (0..self.rows).map(|r| v[r] * self.get(r, c)).sum())
            .collect()
    }

    /// Gauss-Jordan inversion with partial pivoting. Square matrices only.
    pub fn inverse(&self) -> Result<Matrix, SingularMatrix> {
        debug_assert_eq!(self.rows, self.cols);
        let n = self.rows;
        let mut work = self.clone();
        let mut inv = Matrix::identity(n);

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot_abs = work.get(col, col).abs();
            for r in (col + 1)..n {
                let abs = work.get(r, col).abs();
                if abs > pivot_abs {
                    pivot_abs = abs;
                    pivot_row = r;
                }
            }
            if pivot_abs <= PIVOT_EPSILON {
                return Err(SingularMatrix);
            }
            if pivot_row != col {
                work.swap_rows(col, pivot_row);
                inv.swap_rows(col, pivot_row);
            }

            let pivot = work.get(col, col);
            for c in 0..n {
                work.set(col, c, work.get(col, c) / pivot);
                inv.set(col, c, inv.get(col, c) / pivot);
            }

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = work.get(r, col);
                if factor == 0.0 {
                    continue;
                }
                for c in 0..n {
                    work.set(r, c, work.get(r, c) - factor * work.get(col, c));
                    inv.set(r, c, inv.get(r, c) - factor * inv.get(col, c));
                }
            }
        }

        Ok(inv)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            let tmp = self.get(a, c);
            self.set(a, c, self.get(b, c));
            self.set(b, c, tmp);
        }
    }
}

const PIVOT_EPSILON: f64 = 1e-12;

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_of_identity_is_identity() {
        let inv = Matrix::identity(3).inverse().unwrap();
        assert_eq!(inv, Matrix::identity(3));
    }

    #[test]
    fn inverse_of_upper_triangular() {
        let m = Matrix::from_rows(vec![vec![1.0, 1.0], vec![0.0, 3.0]], 2);
        let inv = m.inverse().unwrap();
        assert!((inv.get(0, 0) - 1.0).abs() < 1e-12);
        assert!((inv.get(0, 1) + 1.0 / 3.0).abs() < 1e-12);
        assert!((inv.get(1, 0) - 0.0).abs() < 1e-12);
        assert!((inv.get(1, 1) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_needs_row_swaps() {
        let m = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]], 2);
        let inv = m.inverse().unwrap();
        let product = inv.mul_vec(&[2.0, 5.0]);
        assert_eq!(product, vec![5.0, 2.0]);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]], 2);
        assert_eq!(m.inverse(), Err(SingularMatrix));
    }

    #[test]
    fn empty_matrix_inverts_to_empty() {
        let m = Matrix::zeros(0, 0);
        assert_eq!(m.inverse().unwrap().rows(), 0);
    }

    #[test]
    fn vector_products() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 2);
        assert_eq!(m.mul_vec(&[1.0, 1.0]), vec![3.0, 7.0]);
        assert_eq!(m.vec_mul(&[1.0, 1.0]), vec![4.0, 6.0]);
    }

    #[test]
    fn column_editing() {
        let mut m = Matrix::zeros(2, 1);
        m.push_column(&[1.0, -1.0]);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.column(1), vec![1.0, -1.0]);
        let selected = m.select_columns(&[1, 0]);
        assert_eq!(selected.row(0), &[1.0, 0.0]);
        m.truncate_columns(1);
        assert_eq!(m.cols(), 1);
    }
}
