use ndarray::Array2;

use crate::color::Rgb;
use crate::error::{Result, SpatqError};

/// A small square reconstruction filter with per-channel weights.
///
/// The side length is 2r+1 with radius r in {0, 1, 2}. Weights must be
/// non-negative; normalization is left to the caller. Channels usually
/// carry identical weights but are stored independently.
#[derive(Clone, Debug)]
pub struct FilterKernel {
    weights: Array2<Rgb>,
}

impl FilterKernel {
    pub fn new(weights: Array2<Rgb>) -> Result<Self> {
        let (h, w) = weights.dim();
        if h != w || !matches!(w, 1 | 3 | 5) {
            return Err(SpatqError::UnsupportedFilterSize(w.max(h)));
        }
        if weights
            .iter()
            .any(|c| c.channels().iter().any(|&v| v < 0.0))
        {
            return Err(SpatqError::NegativeFilterWeights);
        }
        Ok(Self { weights })
    }

    /// Build a kernel from a scalar table, replicating each weight
    /// across the three channels.
    pub fn from_scalars(table: &Array2<f64>) -> Result<Self> {
        Self::new(table.mapv(Rgb::splat))
    }

    /// Side length (1, 3, or 5).
    pub fn side(&self) -> usize {
        self.weights.ncols()
    }

    /// Kernel radius r, so that the side is 2r+1.
    pub fn radius(&self) -> usize {
        (self.side() - 1) / 2
    }

    pub fn weights(&self) -> &Array2<Rgb> {
        &self.weights
    }
}
