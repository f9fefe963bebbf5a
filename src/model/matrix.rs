//! Dense row-major matrix shared by the estimators

use std::ops::{Index, IndexMut};

use faer::Mat;

use super::ModelError;

/// Row-major `f64` matrix. Rows are samples, columns are features or targets.
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

    /// Build from a list of rows of equal length
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ModelError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ModelError::ShapeMismatch {
                    expected: format!("{} columns", cols),
                    actual: format!("{} columns in row {}", row.len(), i),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build from a list of columns of equal length
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self, ModelError> {
        let rows = columns.first().map(|c| c.len()).unwrap_or(0);
        if let Some((j, c)) = columns.iter().enumerate().find(|(_, c)| c.len() != rows) {
            return Err(ModelError::ShapeMismatch {
                expected: format!("{} rows", rows),
                actual: format!("{} rows in column {}", c.len(), j),
            });
        }
        let cols = columns.len();
        let mut m = Self::zeros(rows, cols);
        for (j, column) in columns.iter().enumerate() {
            for (i, &v) in column.iter().enumerate() {
                m[(i, j)] = v;
            }
        }
        Ok(m)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self[(i, j)]).collect()
    }

    /// Copy the given rows (in the given order) into a new matrix
    pub fn select_rows(&self, indices: &[usize]) -> Matrix {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &i in indices {
            data.extend_from_slice(self.row(i));
        }
        Matrix {
            rows: indices.len(),
            cols: self.cols,
            data,
        }
    }

    pub fn to_faer(&self) -> Mat<f64> {
        Mat::from_fn(self.rows, self.cols, |i, j| self[(i, j)])
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_columns_agree() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        let b = Matrix::from_columns(&[vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shape(), (3, 2));
        assert_eq!(a.row(1), &[3.0, 4.0]);
        assert_eq!(a.column(1), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(ModelError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_select_rows_keeps_order() {
        let m = Matrix::from_rows(&[vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let s = m.select_rows(&[2, 0, 2]);
        assert_eq!(s.column(0), vec![3.0, 1.0, 3.0]);
    }

    #[test]
    fn test_to_faer_copies_values() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let f = m.to_faer();
        assert_eq!(f.nrows(), 2);
        assert_eq!(f[(1, 0)], 3.0);
    }
}
