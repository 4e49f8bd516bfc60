use std::collections::BTreeMap;

use culture_types::Species;

use crate::buffers::ResidentGrid;

/// Occupied-coordinate count per species.
pub type Abundance = BTreeMap<Species, usize>;

/// Count residents per species.
pub fn abundance(grid: &ResidentGrid) -> Abundance {
    let mut counts = Abundance::new();
    for (_, cell) in grid.occupied() {
        *counts.entry(cell.species).or_insert(0) += 1;
    }
    counts
}

/// Summary of a resident grid for logs and diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CultureStats {
    pub population: usize,
    pub total_fitness: f64,
    pub species_count: usize,
    /// Largest resident fitness, if any coordinate is occupied.
    pub max_fitness: Option<f64>,
    /// `(species, count)` sorted by count descending, then species ascending.
    pub species_histogram: Vec<(Species, usize)>,
}

impl CultureStats {
    pub fn from_grid(grid: &ResidentGrid) -> Self {
        let mut population = 0;
        let mut total_fitness = 0.0;
        let mut max_fitness: Option<f64> = None;
        for (_, cell) in grid.occupied() {
            population += 1;
            total_fitness += cell.fitness;
            max_fitness = Some(max_fitness.map_or(cell.fitness, |m| m.max(cell.fitness)));
        }

        let mut species_histogram: Vec<(Species, usize)> = abundance(grid).into_iter().collect();
        species_histogram.sort_by(|a, b| b.1.cmp(&a.1));

        CultureStats {
            population,
            total_fitness,
            species_count: species_histogram.len(),
            max_fitness,
            species_histogram,
        }
    }
}
