use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data,
        }
    }

    /// He initialization: samples from N(0, sqrt(2 / cols)).
    ///
    /// Used before ReLU layers. The variance 2/fan_in accounts for ReLU
    /// zeroing half of its inputs on average.
    ///
    /// Shape: (rows, cols). `cols` is the fan-in (number of input connections).
    pub fn he(rows: usize, cols: usize, rng: &mut StdRng) -> Matrix {
        let dist = Normal::new(0.0, (2.0 / cols as f64).sqrt()).unwrap();
        Matrix::sampled(rows, cols, &dist, rng)
    }

    /// Xavier (Glorot) initialization: samples from N(0, sqrt(1 / cols)).
    ///
    /// Used before Sigmoid/Identity layers. Keeps the variance of activations
    /// and gradients roughly equal across layers.
    pub fn xavier(rows: usize, cols: usize, rng: &mut StdRng) -> Matrix {
        let dist = Normal::new(0.0, (1.0 / cols as f64).sqrt()).unwrap();
        Matrix::sampled(rows, cols, &dist, rng)
    }

    fn sampled(rows: usize, cols: usize, dist: &Normal<f64>, rng: &mut StdRng) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = dist.sample(rng);
            }
        }
        res
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
        Matrix::from_data(
            self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        )
    }

    /// Element-wise combination of two same-shape matrices.
    pub fn zip_map<F>(&self, rhs: &Matrix, functor: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_eq!(self.rows, rhs.rows, "zip_map: row count mismatch");
        assert_eq!(self.cols, rhs.cols, "zip_map: column count mismatch");
        Matrix::from_data(
            self.data
                .iter()
                .zip(rhs.data.iter())
                .map(|(row_a, row_b)| {
                    row_a
                        .iter()
                        .zip(row_b.iter())
                        .map(|(&a, &b)| functor(a, b))
                        .collect()
                })
                .collect(),
        )
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        self.zip_map(rhs, |a, b| a * b)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix {
            rows: 0,
            cols: 0,
            data: vec![],
        }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_map(&rhs, |a, b| a + b)
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_map(&rhs, |a, b| a - b)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

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
}
