use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Dense row-major matrix of `f64`.
///
/// `data[r * cols + c]` holds the entry at row `r`, column `c`. Dimensions are
/// fixed for the lifetime of the value; all products check them and panic on a
/// mismatch, so callers validate vector lengths first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from row-major data. Returns `None` when
    /// `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Option<Matrix> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Matrix { rows, cols, data })
    }

    /// Samples every entry independently from N(0, 1/sqrt(cols)).
    ///
    /// `cols` is the fan-in (number of incoming connections per unit), so the
    /// variance of each weighted sum stays near 1 whatever the layer width.
    pub fn fan_in_normal<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Matrix, rand_distr::NormalError> {
        let std_dev = (cols as f64).powf(-0.5);
        let normal = Normal::new(0.0, std_dev)?;
        let data = (0..rows * cols).map(|_| normal.sample(rng)).collect();
        Ok(Matrix { rows, cols, data })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                res.data[c * self.rows + r] = self.get(r, c);
            }
        }
        res
    }

    /// `self · v`, with `v.len() == cols`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.cols, "mul_vec: vector length must equal cols");
        (0..self.rows)
            .map(|r| self.row(r).iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// `selfᵀ · v`, with `v.len() == rows`. Avoids materialising the transpose.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "transpose_mul_vec: vector length must equal rows");
        let mut res = vec![0.0; self.cols];
        for (r, &scale) in v.iter().enumerate() {
            for (acc, w) in res.iter_mut().zip(self.row(r)) {
                *acc += w * scale;
            }
        }
        res
    }

    /// In-place `self += scale · (left ⊗ right)` where the outer product has
    /// shape `left.len() × right.len()`.
    pub fn add_scaled_outer(&mut self, scale: f64, left: &[f64], right: &[f64]) {
        assert_eq!(left.len(), self.rows, "add_scaled_outer: left length must equal rows");
        assert_eq!(right.len(), self.cols, "add_scaled_outer: right length must equal cols");
        for (r, &l) in left.iter().enumerate() {
            let start = r * self.cols;
            for (w, &x) in self.data[start..start + self.cols].iter_mut().zip(right) {
                *w += scale * l * x;
            }
        }
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}
