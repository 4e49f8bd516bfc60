use std::mem;

use culture_types::{Cell, Coord, CultureError, GridShape};

/// Settled grid state: at most one resident cell per coordinate.
///
/// Only competition produces a new `ResidentGrid`; growth reads it as the
/// immutable snapshot of the previous step.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidentGrid {
    shape: GridShape,
    cells: Vec<Option<Cell>>,
}

impl ResidentGrid {
    pub fn new(shape: GridShape) -> Self {
        let cells = vec![None; shape.len()];
        Self { shape, cells }
    }

    pub(crate) fn from_cells(shape: GridShape, cells: Vec<Option<Cell>>) -> Self {
        debug_assert_eq!(cells.len(), shape.len());
        Self { shape, cells }
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    pub fn get(&self, coord: &[usize]) -> Option<&Cell> {
        self.shape.grid_index(coord).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_index(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Occupied coordinates in linear order.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|c| (self.shape.grid_coords(i), c)))
    }

    /// Number of occupied coordinates.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Candidate cells written during one pass, waiting for competition.
#[derive(Debug, Clone)]
pub struct ProposalBuffer {
    shape: GridShape,
    candidates: Vec<Vec<Cell>>,
}

impl ProposalBuffer {
    pub fn new(shape: GridShape) -> Self {
        let candidates = vec![Vec::new(); shape.len()];
        Self { shape, candidates }
    }

    /// Append a candidate at `coord`. An out-of-range coordinate is an error
    /// the caller must treat as fatal.
    pub fn reproduce(&mut self, coord: &[usize], daughter: Cell) -> Result<(), CultureError> {
        let index = self
            .shape
            .grid_index(coord)
            .ok_or_else(|| CultureError::OutOfBounds {
                coord: coord.to_vec(),
                dims: self.shape.dims().to_vec(),
            })?;
        self.candidates[index].push(daughter);
        Ok(())
    }

    pub fn candidates_at(&self, coord: &[usize]) -> &[Cell] {
        match self.shape.grid_index(coord) {
            Some(i) => self.candidates[i].as_slice(),
            None => &[],
        }
    }

    /// Total number of pending candidates.
    pub fn pending(&self) -> usize {
        self.candidates.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.iter().all(Vec::is_empty)
    }

    /// Hand the candidate lists to competition, leaving the buffer empty.
    pub(crate) fn drain(&mut self) -> Vec<Vec<Cell>> {
        let empty = vec![Vec::new(); self.shape.len()];
        mem::replace(&mut self.candidates, empty)
    }
}
