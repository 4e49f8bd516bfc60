//! Grid-based pseudo-cellular-automaton classifier.
//!
//! Labeled observations are binned into an n-dimensional grid, seeded as
//! cells of their label's species, and grown across neighboring bins over
//! repeated fermentation steps. Each step reads the previous resident grid,
//! writes candidate cells into a proposal buffer, and collapses both through
//! competition into the next resident grid.

pub mod buffers;
pub mod compete;
pub mod ferment;
pub mod harvest;
pub mod inoculate;
pub mod repulsion;
pub mod stats;

use std::collections::BTreeMap;

pub use buffers::{ProposalBuffer, ResidentGrid};
pub use compete::FitnessLedger;
pub use stats::{Abundance, CultureStats};

use culture_types::{Binner, Cell, CultureError, CultureParams, GridShape, Species};
use tracing::error;

/// Simulation state of one classifier.
#[derive(Debug, Clone)]
pub struct Culture {
    params: CultureParams,
    shape: GridShape,
    binner: Option<Binner>,
    residents: ResidentGrid,
    proposals: ProposalBuffer,
    ledger: FitnessLedger,
    generation: u32,
    poisoned: bool,
}

impl Culture {
    pub fn try_new(params: CultureParams) -> Result<Self, CultureError> {
        let shape = params.shape()?;
        Ok(Self {
            residents: ResidentGrid::new(shape.clone()),
            proposals: ProposalBuffer::new(shape.clone()),
            shape,
            params,
            binner: None,
            ledger: FitnessLedger::default(),
            generation: 0,
            poisoned: false,
        })
    }

    pub fn with_dimensions(dimensions: &[usize]) -> Result<Self, CultureError> {
        Self::try_new(CultureParams::with_dimensions(dimensions))
    }

    /// Propose `daughter` at `coord` for the next competition.
    ///
    /// An out-of-range coordinate poisons the culture: this and every later
    /// operation fails.
    pub fn reproduce(&mut self, coord: &[usize], daughter: Cell) -> Result<(), CultureError> {
        self.ensure_healthy()?;
        match self.proposals.reproduce(coord, daughter) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.poison(err)),
        }
    }

    /// Collapse residents and pending proposals to one cell per coordinate
    /// and recount the fitness ledger.
    pub fn compete(&mut self) {
        self.residents = compete::compete(&self.residents, &mut self.proposals);
        self.ledger = FitnessLedger::tally(&self.residents);
    }

    pub fn params(&self) -> &CultureParams {
        &self.params
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    pub fn dimensions(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Bin edges, once inoculated.
    pub fn binner(&self) -> Option<&Binner> {
        self.binner.as_ref()
    }

    pub fn is_inoculated(&self) -> bool {
        self.binner.is_some()
    }

    pub fn grid(&self) -> &ResidentGrid {
        &self.residents
    }

    pub fn cell_at(&self, coord: &[usize]) -> Option<&Cell> {
        self.residents.get(coord)
    }

    /// Candidates proposed at `coord` since the last competition.
    pub fn pending_at(&self, coord: &[usize]) -> &[Cell] {
        self.proposals.candidates_at(coord)
    }

    pub fn total_fitness(&self) -> f64 {
        self.ledger.total
    }

    pub fn fitness_by_species(&self) -> &BTreeMap<Species, f64> {
        &self.ledger.by_species
    }

    pub fn stats(&self) -> CultureStats {
        CultureStats::from_grid(&self.residents)
    }

    /// Number of completed fermentation steps.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn ensure_healthy(&self) -> Result<(), CultureError> {
        if self.poisoned {
            return Err(CultureError::Poisoned);
        }
        Ok(())
    }

    fn poison(&mut self, err: CultureError) -> CultureError {
        error!(%err, "fatal reproduction error; culture can no longer be used");
        self.poisoned = true;
        err
    }
}
