use thiserror::Error;

use crate::cell::Species;

/// Errors raised while configuring, seeding or reading a culture.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CultureError {
    /// A configuration value that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("grid axis {axis} has zero size")]
    ZeroSizedAxis { axis: usize },
    #[error("training set is empty")]
    EmptyTrainingSet,
    #[error("{rows} observations were given with {labels} labels")]
    LabelCountMismatch { rows: usize, labels: usize },
    #[error("row {row} has {actual} features but the grid has {expected} axes")]
    FeatureCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("row {row} has a non-finite value on axis {axis}")]
    NonFiniteFeature { row: usize, axis: usize },
    /// Every observation shares one value on this axis, so its bins would have zero width.
    #[error("axis {axis} is degenerate: every observation equals {value}")]
    DegenerateAxis { axis: usize, value: f64 },
    #[error("label {0} is reserved for unmapped predictions")]
    ReservedLabel(Species),
    #[error("bin edges for axis {axis} are empty or not ascending")]
    InvalidEdges { axis: usize },
    /// Reproduction targeted a coordinate outside the grid. Fatal for the culture.
    #[error("coordinate {coord:?} lies outside grid {dims:?}")]
    OutOfBounds { coord: Vec<usize>, dims: Vec<usize> },
    #[error("culture has already been inoculated")]
    AlreadyInoculated,
    #[error("culture has not been inoculated")]
    NotInoculated,
    #[error("culture was poisoned by an earlier fatal error")]
    Poisoned,
}
