use std::collections::BTreeMap;

use culture_types::{Cell, Species};
use tracing::debug;

use crate::buffers::{ProposalBuffer, ResidentGrid};

/// Collapse the candidates at one coordinate into a single resident.
///
/// Fitness is summed per species; the species with the greatest sum wins,
/// with ties going to the smallest species id. The winner keeps its margin
/// over every competitor combined: `2 * winner_sum - total_sum`.
pub fn collapse(candidates: &[Cell]) -> Option<Cell> {
    if candidates.is_empty() {
        return None;
    }

    let mut sums: BTreeMap<Species, f64> = BTreeMap::new();
    for c in candidates {
        *sums.entry(c.species).or_insert(0.0) += c.fitness;
    }
    let total: f64 = sums.values().sum();

    let mut winner: Option<(Species, f64)> = None;
    for (&species, &sum) in &sums {
        match winner {
            Some((_, best)) if sum <= best => {}
            _ => winner = Some((species, sum)),
        }
    }

    winner.map(|(species, sum)| Cell::new(species, 2.0 * sum - total))
}

/// Merge the current residents with every pending proposal and collapse
/// each coordinate. The residents go first in each candidate list.
pub fn compete(residents: &ResidentGrid, proposals: &mut ProposalBuffer) -> ResidentGrid {
    let shape = residents.shape().clone();
    let incoming = proposals.drain();
    let mut contested = 0usize;

    let cells: Vec<Option<Cell>> = incoming
        .into_iter()
        .enumerate()
        .map(|(i, mut proposed)| {
            if let Some(resident) = residents.get_index(i) {
                proposed.insert(0, *resident);
            }
            if proposed.len() > 1 {
                contested += 1;
            }
            collapse(&proposed)
        })
        .collect();

    let settled = ResidentGrid::from_cells(shape, cells);
    debug!(contested, population = settled.population(), "competition settled");
    settled
}

/// Fitness totals derived from a resident grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitnessLedger {
    pub total: f64,
    pub by_species: BTreeMap<Species, f64>,
}

impl FitnessLedger {
    /// Full recount over the grid; never updated incrementally.
    pub fn tally(grid: &ResidentGrid) -> Self {
        let mut ledger = Self::default();
        for (_, cell) in grid.occupied() {
            ledger.total += cell.fitness;
            *ledger.by_species.entry(cell.species).or_insert(0.0) += cell.fitness;
        }
        ledger
    }
}
