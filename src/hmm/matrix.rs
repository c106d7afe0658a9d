use std::{
    fmt,
    ops::{Index, IndexMut},
};

use crate::error::{Error, Result};

/// A dense, row-major matrix.
///
/// Element `(r, c)` lives at `data[cols * r + c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Matrix<T> {
    pub fn new(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Builds a matrix from its rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or_default();
        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(Error::DimensionMismatch(format!(
                "row {} has {} columns, expected {}",
                i,
                r.len(),
                cols
            )));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, r: usize) -> &[T] {
        &self.data[self.cols * r..self.cols * (r + 1)]
    }

    pub fn column(&self, c: usize) -> impl Iterator<Item = T> + '_ {
        assert!(c < self.cols, "column {} out of bounds ({} columns)", c, self.cols);
        (0..self.rows).map(move |r| self.data[self.cols * r + c])
    }

    /// Element `(r, c)`, or `None` outside of the matrix.
    pub fn get(&self, r: usize, c: usize) -> Option<&T> {
        if r < self.rows && c < self.cols {
            self.data.get(self.cols * r + c)
        } else {
            None
        }
    }
}

impl Matrix<f64> {
    pub fn sum_row(&self, r: usize) -> f64 {
        self.row(r).iter().sum()
    }

    pub fn sum_col(&self, c: usize) -> f64 {
        self.column(c).sum()
    }

    /// Largest value in column `c`, never below 0.
    pub fn max_col(&self, c: usize) -> f64 {
        self.column(c).fold(0.0, f64::max)
    }

    /// Row index of the largest value in column `c`. On ties the lowest index
    /// wins. Returns `None` only for a matrix without rows.
    pub fn argmax_col(&self, c: usize) -> Option<usize> {
        let mut best = None;
        let mut max = f64::NEG_INFINITY;
        for (r, x) in self.column(c).enumerate() {
            if x > max {
                max = x;
                best = Some(r);
            }
        }
        best
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T {
        assert!(
            r < self.rows && c < self.cols,
            "index ({}, {}) out of bounds for a {}x{} matrix",
            r,
            c,
            self.rows,
            self.cols
        );
        &self.data[self.cols * r + c]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        assert!(
            r < self.rows && c < self.cols,
            "index ({}, {}) out of bounds for a {}x{} matrix",
            r,
            c,
            self.rows,
            self.cols
        );
        &mut self.data[self.cols * r + c]
    }
}

impl fmt::Display for Matrix<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for x in self.row(r) {
                write!(f, "{:<7.4}   ", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Matrix<i32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for x in self.row(r) {
                write!(f, "{:>2}   ", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<f64> {
        Matrix::from_rows(vec![
            vec![0.1, 0.5, 0.0],
            vec![0.3, 0.5, 0.0],
            vec![0.2, 0.1, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn sums() {
        let m = sample();
        assert!((m.sum_row(0) - 0.6).abs() < 1e-12);
        assert!((m.sum_col(0) - 0.6).abs() < 1e-12);
        assert_eq!(m.sum_col(2), 0.0);
    }

    #[test]
    fn max_and_argmax() {
        let m = sample();
        assert_eq!(m.max_col(0), 0.3);
        assert_eq!(m.argmax_col(0), Some(1));
    }

    #[test]
    fn argmax_first_max_wins() {
        let m = sample();
        assert_eq!(m.argmax_col(1), Some(0));
        assert_eq!(m.argmax_col(2), Some(0));
    }

    #[test]
    fn argmax_without_rows() {
        let m: Matrix<f64> = Matrix::new(0, 3, 0.0);
        assert_eq!(m.argmax_col(0), None);
        assert_eq!(m.max_col(0), 0.0);
    }

    #[test]
    fn index_is_row_major() {
        let mut m = Matrix::new(2, 3, 0);
        m[(1, 2)] = 7;
        assert_eq!(m.row(1), &[0, 0, 7]);
        assert_eq!(m.column(2).collect::<Vec<_>>(), vec![0, 7]);
    }

    #[test]
    fn display() {
        let m = Matrix::from_rows(vec![vec![-1, 2]]).unwrap();
        assert_eq!(m.to_string(), "-1    2   \n");
    }

    #[test]
    fn ragged_rows() {
        match Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5]]) {
            Err(Error::DimensionMismatch(msg)) => assert!(msg.contains("row 1"), "{msg}"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn get_is_bounds_checked() {
        let m = Matrix::from_rows(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
        assert_eq!(m.get(1, 1), Some(&4.0));
        // (0, 4) would be (1, 1) in the flat buffer
        assert_eq!(m.get(0, 4), None);
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_past_last_column_panics() {
        let m = Matrix::from_rows(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
        let _ = m[(0, 4)];
    }
}
