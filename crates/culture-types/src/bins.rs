use crate::error::CultureError;
use crate::grid::{Coord, GridShape};

/// Maps continuous feature vectors onto grid coordinates.
///
/// `edges[axis][i]` is the inclusive upper bound of bin `i` on that axis.
/// Each axis has exactly one edge per bin and the last edge closes the
/// padded data range.
#[derive(Debug, Clone, PartialEq)]
pub struct Binner {
    edges: Vec<Vec<f64>>,
}

impl Binner {
    /// Build equal-width bins spanning the observed range of every axis,
    /// widened by `padding * range` on both sides.
    pub fn fit<R: AsRef<[f64]>>(
        data: &[R],
        shape: &GridShape,
        padding: f64,
    ) -> Result<Self, CultureError> {
        if data.is_empty() {
            return Err(CultureError::EmptyTrainingSet);
        }
        let ndim = shape.ndim();
        for (row, features) in data.iter().enumerate() {
            let features = features.as_ref();
            if features.len() != ndim {
                return Err(CultureError::FeatureCountMismatch {
                    row,
                    expected: ndim,
                    actual: features.len(),
                });
            }
            if let Some(axis) = features.iter().position(|v| !v.is_finite()) {
                return Err(CultureError::NonFiniteFeature { row, axis });
            }
        }

        let mut edges = Vec::with_capacity(ndim);
        for (axis, &size) in shape.dims().iter().enumerate() {
            let (min, max) = data
                .iter()
                .map(|row| row.as_ref()[axis])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
            let range = max - min;
            let lower = min - padding * range;
            let upper = max + padding * range;
            let delta = (upper - lower) / size as f64;
            if !(delta > 0.0 && delta.is_finite()) {
                return Err(CultureError::DegenerateAxis { axis, value: min });
            }

            let mut axis_edges: Vec<f64> = (1..=size).map(|i| lower + i as f64 * delta).collect();
            if let Some(last) = axis_edges.last_mut() {
                *last = upper;
            }
            edges.push(axis_edges);
        }

        Ok(Self { edges })
    }

    /// Use prepared per-axis upper edges.
    pub fn from_edges(edges: Vec<Vec<f64>>) -> Result<Self, CultureError> {
        if edges.is_empty() {
            return Err(CultureError::InvalidConfig("binner needs at least one axis"));
        }
        for (axis, axis_edges) in edges.iter().enumerate() {
            let ascending = axis_edges.windows(2).all(|w| w[0] <= w[1]);
            if axis_edges.is_empty() || !ascending {
                return Err(CultureError::InvalidEdges { axis });
            }
        }
        Ok(Self { edges })
    }

    pub fn ndim(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self, axis: usize) -> &[f64] {
        &self.edges[axis]
    }

    /// Number of bins per axis.
    pub fn dims(&self) -> Vec<usize> {
        self.edges.iter().map(Vec::len).collect()
    }

    /// Smallest bin whose upper edge is `>= value`; values past the last
    /// edge fall into the last bin.
    #[inline]
    pub fn bin_value(&self, axis: usize, value: f64) -> usize {
        let edges = &self.edges[axis];
        edges.partition_point(|&edge| edge < value).min(edges.len() - 1)
    }

    /// Bin a full feature vector. `features` must have one value per axis.
    pub fn bin(&self, features: &[f64]) -> Coord {
        features
            .iter()
            .enumerate()
            .map(|(axis, &v)| self.bin_value(axis, v))
            .collect()
    }
}
