use culture_types::{Species, UNMAPPED};
use serde::Serialize;

/// Outcome of harvesting a labeled held-out set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub predictions: Vec<Species>,
    pub correct: usize,
    pub unmapped: usize,
    /// Fraction of exact matches; unmapped predictions count as misses.
    pub accuracy: f64,
}

/// Score `predictions` against `labels`, which must have the same length.
pub fn score(predictions: Vec<Species>, labels: &[Species]) -> Evaluation {
    debug_assert_eq!(predictions.len(), labels.len());
    let correct = predictions.iter().zip(labels).filter(|(p, l)| p == l).count();
    let unmapped = predictions.iter().filter(|&&p| p == UNMAPPED).count();
    let accuracy = if predictions.is_empty() {
        0.0
    } else {
        correct as f64 / predictions.len() as f64
    };
    Evaluation {
        predictions,
        correct,
        unmapped,
        accuracy,
    }
}
