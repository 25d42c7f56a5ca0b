//! Per-feature standardization (z-scores).
//!
//! ```text
//! z = (x - μ) / σ
//! ```
//!
//! μ and σ are population statistics (divide by n, not n - 1) over the batch
//! being clustered. A feature whose σ is zero, or numerically indistinguishable
//! from zero relative to μ, gets σ = 1 so it maps to a constant 0 instead of
//! NaN.

use crate::error::{Error, Result};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Fitted mean/scale pair for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl Standardizer {
    /// Fit on a row-major matrix (rows = samples).
    pub fn fit(data: &Array2<f64>) -> Result<Self> {
        let mean = data.mean_axis(Axis(0)).ok_or(Error::EmptyInput)?;
        let std = data.std_axis(Axis(0), 0.0);

        let scale = mean
            .iter()
            .zip(std.iter())
            .map(|(&m, &s)| {
                if !s.is_finite() || s < 10.0 * f64::EPSILON * m.abs().max(1.0) {
                    1.0
                } else {
                    s
                }
            })
            .collect();

        Ok(Self {
            mean: mean.to_vec(),
            scale,
        })
    }

    /// Fit on rows.
    pub fn fit_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::fit(&super::to_matrix(rows)?)
    }

    /// Per-feature mean.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Per-feature scale (σ, or 1 for constant features).
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Number of features.
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// Standardize one vector.
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.check_dim(x.len())?;
        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    /// Standardize every row of a matrix.
    pub fn transform_matrix(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_dim(data.ncols())?;
        let mut out = data.clone();
        for mut row in out.rows_mut() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (*v - self.mean[j]) / self.scale[j];
            }
        }
        Ok(out)
    }

    /// Map a standardized vector back to raw units.
    pub fn inverse_transform(&self, z: &[f64]) -> Result<Vec<f64>> {
        self.check_dim(z.len())?;
        Ok(z.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| v * s + m)
            .collect())
    }

    fn check_dim(&self, found: usize) -> Result<()> {
        if found != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found,
            });
        }
        Ok(())
    }
}
