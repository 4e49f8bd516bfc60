/// Category id of a training label.
pub type Species = i32;

/// Prediction emitted for observations whose bin holds no resident.
/// Never valid as a training label.
pub const UNMAPPED: Species = -1;

/// A candidate or resident occupying one grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub species: Species,
    pub fitness: f64,
}

impl Cell {
    pub fn new(species: Species, fitness: f64) -> Self {
        Self { species, fitness }
    }

    /// A fresh cell seeded from one training observation.
    pub fn seed(species: Species) -> Self {
        Self::new(species, 1.0)
    }
}
