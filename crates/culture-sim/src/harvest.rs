use culture_types::{CultureError, Species, UNMAPPED};
use tracing::warn;

use crate::Culture;

impl Culture {
    /// Predict one species per row by reading the resident at its bin.
    ///
    /// Rows landing on an empty bin, or containing `NaN`, yield [`UNMAPPED`]
    /// and a warning; the rest of the batch is unaffected.
    pub fn harvest<R: AsRef<[f64]>>(&self, data: &[R]) -> Result<Vec<Species>, CultureError> {
        self.ensure_healthy()?;
        let binner = self.binner.as_ref().ok_or(CultureError::NotInoculated)?;
        let ndim = self.shape.ndim();

        let mut predictions = Vec::with_capacity(data.len());
        let mut unmapped = 0usize;
        for (row, features) in data.iter().enumerate() {
            let features = features.as_ref();
            if features.len() != ndim {
                return Err(CultureError::FeatureCountMismatch {
                    row,
                    expected: ndim,
                    actual: features.len(),
                });
            }
            if features.iter().any(|v| v.is_nan()) {
                warn!(row, "observation has NaN features; reporting unmapped");
                unmapped += 1;
                predictions.push(UNMAPPED);
                continue;
            }

            let coord = binner.bin(features);
            match self.residents.get(&coord) {
                Some(cell) => predictions.push(cell.species),
                None => {
                    warn!(row, ?coord, "observation binned to an unreached coordinate");
                    unmapped += 1;
                    predictions.push(UNMAPPED);
                }
            }
        }

        if unmapped > 0 {
            warn!(unmapped, total = data.len(), "harvest left observations unmapped");
        }
        Ok(predictions)
    }
}
