use culture_types::{Cell, CultureError};
use tracing::debug;

use crate::buffers::{ProposalBuffer, ResidentGrid};
use crate::repulsion::{direction, gradient_fitness, normalize};
use crate::stats::Abundance;
use crate::Culture;

impl Culture {
    /// Advance one growth step followed by competition.
    ///
    /// Returns the abundance of the grid as it stood before this step's growth.
    pub fn ferment(&mut self) -> Result<Abundance, CultureError> {
        self.ensure_healthy()?;
        let grown = grow(&self.residents, &mut self.proposals);
        let abundance = match grown {
            Ok(abundance) => abundance,
            Err(err) => return Err(self.poison(err)),
        };
        self.compete();
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = self.residents.population(),
            total_fitness = self.ledger.total,
            ?abundance,
            "fermented"
        );
        Ok(abundance)
    }
}

/// Growth pass over every resident of `snapshot`.
///
/// Repulsion only considers same-species von Neumann neighbors. A resident
/// grows one step along each axis where it is pushed and strictly interior,
/// with fitness scaled by the resident on the opposite side of that axis.
/// All lookups go to `snapshot`; new candidates land in `proposals` and are
/// invisible until competition.
pub fn grow(snapshot: &ResidentGrid, proposals: &mut ProposalBuffer) -> Result<Abundance, CultureError> {
    let shape = snapshot.shape();
    let ndim = shape.ndim();
    let mut abundance = Abundance::new();

    for (coord, cell) in snapshot.occupied() {
        *abundance.entry(cell.species).or_insert(0) += 1;

        let mut push = vec![0.0; ndim];
        for (axis, step, neighbor) in shape.von_neumann_neighbors(&coord) {
            if let Some(peer) = snapshot.get(&neighbor).filter(|p| p.species == cell.species) {
                // coord - neighbor is -step along `axis`
                push[axis] -= f64::from(step) * cell.fitness * peer.fitness;
            }
        }
        if !normalize(&mut push) {
            continue;
        }

        for axis in 0..ndim {
            let dir = direction(push[axis]);
            if dir == 0 || !shape.is_interior(&coord, axis) {
                continue;
            }
            let (Some(target), Some(opposite)) =
                (shape.step(&coord, axis, dir), shape.step(&coord, axis, -dir))
            else {
                continue;
            };
            let fitness = snapshot
                .get(&opposite)
                .map_or(0.0, |o| gradient_fitness(push[axis], cell.fitness, o.fitness));
            proposals.reproduce(&target, Cell::new(cell.species, fitness))?;
        }
    }

    Ok(abundance)
}
