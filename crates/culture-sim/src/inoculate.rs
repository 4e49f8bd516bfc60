use std::collections::BTreeMap;

use culture_types::{Binner, Cell, Coord, CultureError, GridShape, Species, UNMAPPED};
use tracing::info;

use crate::buffers::{ProposalBuffer, ResidentGrid};
use crate::repulsion::{coulomb, diagonal_weight, direction, normalize};
use crate::Culture;

impl Culture {
    /// Seed the grid from labeled training data.
    ///
    /// Builds the bin edges, reproduces one unit-fitness cell per
    /// observation, runs competition, performs the initial growth pass and
    /// competes again.
    pub fn inoculate<R: AsRef<[f64]>>(
        &mut self,
        data: &[R],
        labels: &[Species],
    ) -> Result<(), CultureError> {
        self.ensure_healthy()?;
        if self.binner.is_some() {
            return Err(CultureError::AlreadyInoculated);
        }
        if data.len() != labels.len() {
            return Err(CultureError::LabelCountMismatch {
                rows: data.len(),
                labels: labels.len(),
            });
        }
        if labels.contains(&UNMAPPED) {
            return Err(CultureError::ReservedLabel(UNMAPPED));
        }

        let binner = Binner::fit(data, &self.shape, self.params.bin_padding)?;
        for (row, &label) in data.iter().zip(labels) {
            let coord = binner.bin(row.as_ref());
            self.reproduce(&coord, Cell::seed(label))?;
        }
        self.binner = Some(binner);
        self.compete();
        let seeded = self.residents.population();

        let grown = seed_growth(&self.residents, &mut self.proposals);
        if let Err(err) = grown {
            return Err(self.poison(err));
        }
        self.compete();

        info!(
            observations = data.len(),
            seeded,
            population = self.residents.population(),
            total_fitness = self.ledger.total,
            "culture inoculated"
        );
        Ok(())
    }
}

/// Divisor for a species with a single resident, which spreads evenly
/// to every Moore neighbor. One axis has two neighbors and no `n^3 - 1`.
fn isolated_divisor(ndim: usize) -> f64 {
    if ndim > 1 {
        (ndim.pow(3) - 1) as f64
    } else {
        2.0
    }
}

/// Initial growth pass over the freshly seeded residents.
///
/// Species with one resident spread equally into all Moore neighbors.
/// Otherwise each resident is pushed away from its same-species peers and
/// spreads into the neighbors that push points at.
pub fn seed_growth(
    residents: &ResidentGrid,
    proposals: &mut ProposalBuffer,
) -> Result<(), CultureError> {
    let shape = residents.shape();
    let snapshot: Vec<(Coord, Cell)> = residents.occupied().map(|(c, cell)| (c, *cell)).collect();

    let mut counts: BTreeMap<Species, usize> = BTreeMap::new();
    for (_, cell) in &snapshot {
        *counts.entry(cell.species).or_insert(0) += 1;
    }
    let divisor = isolated_divisor(shape.ndim());

    for (i, (coord, cell)) in snapshot.iter().enumerate() {
        if counts[&cell.species] <= 1 {
            let share = Cell::new(cell.species, cell.fitness / divisor);
            for neighbor in shape.moore_neighbors(coord) {
                proposals.reproduce(&neighbor, share)?;
            }
            continue;
        }

        let peers = snapshot
            .iter()
            .enumerate()
            .filter(|(j, (_, other))| *j != i && other.species == cell.species)
            .map(|(_, (c, other))| (c.as_slice(), other.fitness));
        let mut push = coulomb(coord, cell.fitness, peers);
        if !normalize(&mut push) {
            continue;
        }
        spread_along(shape, coord, cell, &push, proposals)?;
    }
    Ok(())
}

/// Reproduce into the Moore neighbors lying in the direction of `push`.
///
/// Each pushed axis gets one step weighted by its component, followed by
/// a diagonal through that step for every other pushed axis, weighted by
/// the 45° projection. A two-axis diagonal is therefore reached once from
/// each of its axes and receives two candidates.
fn spread_along(
    shape: &GridShape,
    coord: &[usize],
    cell: &Cell,
    push: &[f64],
    proposals: &mut ProposalBuffer,
) -> Result<(), CultureError> {
    let ndim = shape.ndim();
    let steps: Vec<i32> = push.iter().map(|&c| direction(c)).collect();
    let diagonal = Cell::new(cell.species, cell.fitness * diagonal_weight(push));

    for a in 0..ndim {
        if steps[a] == 0 {
            continue;
        }
        let Some(axial) = shape.step(coord, a, steps[a]) else {
            continue;
        };
        proposals.reproduce(&axial, Cell::new(cell.species, cell.fitness * push[a].abs()))?;

        for b in (0..ndim).filter(|&b| b != a && steps[b] != 0) {
            if let Some(target) = shape.step(&axial, b, steps[b]) {
                proposals.reproduce(&target, diagonal)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn fitness_at(c: &Culture, coord: &[usize]) -> Option<f64> {
        c.cell_at(coord).map(|cell| cell.fitness)
    }

    #[test]
    fn isolated_species_spread_evenly_to_moore_neighbors() {
        let mut c = Culture::with_dimensions(&[7, 7]).unwrap();
        c.inoculate(&[[0.0, 0.0], [5.0, 5.0], [10.0, 10.0]], &[0, 2, 1]).unwrap();
        let share = 1.0 / 7.0;

        // Corner resident: only three in-bounds neighbors.
        assert_eq!(fitness_at(&c, &[0, 0]), Some(1.0));
        for coord in [[0, 1], [1, 0], [1, 1]] {
            assert_eq!(c.cell_at(&coord), Some(&Cell::new(0, share)), "{coord:?}");
        }
        // Interior resident: all eight neighbors.
        assert_eq!(fitness_at(&c, &[3, 3]), Some(1.0));
        for neighbor in c.shape().moore_neighbors(&[3, 3]) {
            assert_eq!(c.cell_at(&neighbor), Some(&Cell::new(2, share)), "{neighbor:?}");
        }
        for coord in [[5, 5], [5, 6], [6, 5]] {
            assert_eq!(c.cell_at(&coord), Some(&Cell::new(1, share)), "{coord:?}");
        }
        assert_eq!(c.grid().population(), 3 + 3 + 8 + 3);
        assert!(close(c.total_fitness(), 3.0 + 14.0 * share));
    }

    #[test]
    fn single_axis_isolated_spread_halves() {
        let mut c = Culture::with_dimensions(&[6]).unwrap();
        c.inoculate(&[[0.0], [1.0], [10.0]], &[3, 3, 4]).unwrap();
        // 0.0 and 1.0 share bin 0, so species 3 has one resident of fitness 2.
        assert_eq!(c.cell_at(&[0]), Some(&Cell::new(3, 2.0)));
        assert_eq!(c.cell_at(&[1]), Some(&Cell::new(3, 1.0)));
        assert_eq!(c.cell_at(&[4]), Some(&Cell::new(4, 0.5)));
        assert_eq!(c.cell_at(&[5]), Some(&Cell::new(4, 1.0)));
        assert_eq!(c.cell_at(&[2]), None);
    }

    #[test]
    fn repulsion_spreads_away_from_peers() {
        let shape = GridShape::new(vec![5, 5]).unwrap();
        let mut proposals = ProposalBuffer::new(shape.clone());
        proposals.reproduce(&[1, 1], Cell::seed(0)).unwrap();
        proposals.reproduce(&[2, 2], Cell::seed(0)).unwrap();
        let residents = crate::compete::compete(&ResidentGrid::new(shape), &mut proposals);

        seed_growth(&residents, &mut proposals).unwrap();
        let s = FRAC_1_SQRT_2;
        // [1,1] is pushed toward the origin, [2,2] away from it.
        for coord in [[0, 1], [1, 0], [3, 2], [2, 3]] {
            let got = proposals.candidates_at(&coord);
            assert_eq!(got.len(), 1, "{coord:?}");
            assert!(close(got[0].fitness, s), "{coord:?}: {}", got[0].fitness);
        }
        // Each diagonal is reached through both of its axial steps.
        for coord in [[0, 0], [3, 3]] {
            let got = proposals.candidates_at(&coord);
            assert_eq!(got.len(), 2, "{coord:?}");
            let weight: f64 = got.iter().map(|cell| cell.fitness).sum();
            assert!(close(weight, 2.0 * s), "{coord:?}: {weight}");
        }
        assert_eq!(proposals.pending(), 8);
    }

    #[test]
    fn diagonals_off_the_grid_are_dropped() {
        // [0,1] is pushed toward [-1,0]: only its axis-1 step stays on the grid.
        let shape = GridShape::new(vec![4, 4]).unwrap();
        let mut proposals = ProposalBuffer::new(shape.clone());
        proposals.reproduce(&[0, 1], Cell::seed(0)).unwrap();
        proposals.reproduce(&[1, 2], Cell::seed(0)).unwrap();
        let residents = crate::compete::compete(&ResidentGrid::new(shape), &mut proposals);

        seed_growth(&residents, &mut proposals).unwrap();
        assert_eq!(proposals.candidates_at(&[0, 0]).len(), 1);
        // [1,2] spreads to [2,2], [1,3] and twice to [2,3].
        assert_eq!(proposals.candidates_at(&[2, 3]).len(), 2);
        assert_eq!(proposals.pending(), 1 + 4);
    }

    #[test]
    fn repulsion_along_one_axis_skips_diagonals() {
        let shape = GridShape::new(vec![5, 5]).unwrap();
        let mut proposals = ProposalBuffer::new(shape.clone());
        proposals.reproduce(&[1, 1], Cell::seed(0)).unwrap();
        proposals.reproduce(&[1, 3], Cell::seed(0)).unwrap();
        let residents = crate::compete::compete(&ResidentGrid::new(shape), &mut proposals);

        seed_growth(&residents, &mut proposals).unwrap();
        assert_eq!(proposals.candidates_at(&[1, 0]), &[Cell::new(0, 1.0)]);
        assert_eq!(proposals.candidates_at(&[1, 4]), &[Cell::new(0, 1.0)]);
        assert_eq!(proposals.pending(), 2);
    }

    #[test]
    fn repulsion_off_the_grid_is_dropped() {
        let shape = GridShape::new(vec![3]).unwrap();
        let mut proposals = ProposalBuffer::new(shape.clone());
        proposals.reproduce(&[0], Cell::seed(1)).unwrap();
        proposals.reproduce(&[2], Cell::seed(1)).unwrap();
        let residents = crate::compete::compete(&ResidentGrid::new(shape), &mut proposals);

        seed_growth(&residents, &mut proposals).unwrap();
        assert!(proposals.is_empty(), "both residents push outward past the edges");
    }

    #[test]
    fn inoculate_validates_input() {
        let mut c = Culture::with_dimensions(&[4, 4]).unwrap();
        assert_eq!(
            c.inoculate(&[[0.0, 1.0], [2.0, 3.0]], &[0]),
            Err(CultureError::LabelCountMismatch { rows: 2, labels: 1 })
        );
        assert_eq!(
            c.inoculate(&[[0.0, 1.0], [2.0, 3.0]], &[0, UNMAPPED]),
            Err(CultureError::ReservedLabel(UNMAPPED))
        );
        assert_eq!(
            c.inoculate(&[[0.0, 1.0], [0.0, 3.0]], &[0, 1]),
            Err(CultureError::DegenerateAxis { axis: 0, value: 0.0 })
        );
        assert!(!c.is_inoculated());
        assert!(!c.is_poisoned(), "input errors are not fatal to the culture");

        c.inoculate(&[[0.0, 1.0], [2.0, 3.0]], &[0, 1]).unwrap();
        assert_eq!(
            c.inoculate(&[[0.0, 1.0], [2.0, 3.0]], &[0, 1]),
            Err(CultureError::AlreadyInoculated)
        );
    }

    #[test]
    fn ledger_matches_grid_after_inoculation() {
        let mut c = Culture::with_dimensions(&[8, 8]).unwrap();
        let data: Vec<[f64; 2]> = (0..30).map(|i| [(i % 6) as f64, (i / 6) as f64 * 1.7]).collect();
        let labels: Vec<Species> = (0..30).map(|i| if i % 6 < 3 { 0 } else { 1 }).collect();
        c.inoculate(&data, &labels).unwrap();

        let total: f64 = c.grid().occupied().map(|(_, cell)| cell.fitness).sum();
        assert!(close(c.total_fitness(), total));
        let species_sum: f64 = c.fitness_by_species().values().sum();
        assert!((species_sum - total).abs() < 1e-9);
    }
}
