use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Range, Sub};

use crate::error::{NetworkError, Result};

/// Range used to initialize weights and biases of a fresh network.
pub const INIT_RANGE: Range<f64> = -1.0..1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Fills a `rows x cols` matrix with values drawn uniformly from `range`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, range: Range<f64>, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for row in res.data.iter_mut() {
            for x in row.iter_mut() {
                *x = rng.gen_range(range.clone());
            }
        }

        res
    }

    /// Wraps a slice as a `(len, 1)` column vector.
    pub fn column(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&x| vec![x]).collect(),
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, Vec::len),
            data
        }
    }

    /// Row-major copy of every element.
    pub fn flatten(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    /// Rebuilds a matrix from a row-major sequence. Fails if `data.len() != rows * cols`.
    pub fn unflatten(rows: usize, cols: usize, data: &[f64]) -> Result<Matrix> {
        if data.len() != rows * cols {
            return Err(NetworkError::Corrupt(format!(
                "matrix declared as {rows}x{cols} carries {} values",
                data.len()
            )));
        }
        let data = if cols == 0 {
            vec![Vec::new(); rows]
        } else {
            data.chunks(cols).map(|row| row.to_vec()).collect()
        };
        Ok(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Matrix product `self · rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.cols, rhs.rows, "dot: {}x{} · {}x{}", self.rows, self.cols, rhs.rows, rhs.cols);

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, |a, b| a * b)
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// In-place `self += rhs * factor`.
    pub fn add_scaled(&mut self, rhs: &Matrix, factor: f64) {
        assert_eq!(self.shape(), rhs.shape(), "add_scaled: shape mismatch");
        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (x, y) in row.iter_mut().zip(rhs_row.iter()) {
                *x += y * factor;
            }
        }
    }

    fn zip_with<F>(&self, rhs: &Matrix, functor: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_eq!(self.shape(), rhs.shape(), "Matrices are of incorrect sizes");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(rhs.data.iter())
                .map(|(row_a, row_b)| {
                    row_a.iter().zip(row_b.iter()).map(|(&a, &b)| functor(a, b)).collect()
                })
                .collect(),
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add<&Matrix> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub<&Matrix> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}
