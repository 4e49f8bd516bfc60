use serde::{Deserialize, Serialize};

use crate::error::CultureError;
use crate::grid::GridShape;

/// Fixed shape and binning parameters of a culture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CultureParams {
    /// Number of bins along each axis; one entry per feature column.
    pub dimensions: Vec<usize>,
    /// Fraction of the observed range added below the minimum and above the maximum.
    pub bin_padding: f64,
}

impl Default for CultureParams {
    fn default() -> Self {
        Self {
            dimensions: vec![12; 4],
            bin_padding: 0.1,
        }
    }
}

impl CultureParams {
    pub fn with_dimensions(dimensions: &[usize]) -> Self {
        Self {
            dimensions: dimensions.to_vec(),
            ..Default::default()
        }
    }

    /// Validate and build the grid shape these parameters describe.
    pub fn shape(&self) -> Result<GridShape, CultureError> {
        if !(self.bin_padding.is_finite() && self.bin_padding >= 0.0) {
            return Err(CultureError::InvalidConfig("bin_padding must be a non-negative number"));
        }
        GridShape::new(self.dimensions.clone())
    }
}
