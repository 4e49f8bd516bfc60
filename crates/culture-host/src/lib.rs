//! Training loop around a [`Culture`]: configuration, the fermentation
//! schedule, timing and accuracy scoring.

pub mod config;
pub mod error;
pub mod evaluate;
pub mod timing;

use std::time::Instant;

use culture_sim::{Abundance, Culture};
use culture_types::{CultureError, Species};
use tracing::{debug, info};

pub use config::TrainingConfig;
pub use error::HostError;
pub use evaluate::{score, Evaluation};
pub use timing::RunTiming;

/// Drives one culture through inoculation and a fixed number of
/// fermentation steps.
#[derive(Debug)]
pub struct Trainer {
    config: TrainingConfig,
    culture: Culture,
    history: Vec<Abundance>,
    timing: RunTiming,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Result<Self, HostError> {
        config.validate()?;
        let culture = Culture::try_new(config.culture.clone())?;
        Ok(Self {
            config,
            culture,
            history: Vec::new(),
            timing: RunTiming::new(),
        })
    }

    /// Inoculate with the training set, then ferment `config.iterations` times.
    pub fn fit<R: AsRef<[f64]>>(&mut self, data: &[R], labels: &[Species]) -> Result<(), HostError> {
        let started = Instant::now();
        self.culture.inoculate(data, labels)?;
        self.timing.record_inoculation(started.elapsed());

        for _ in 0..self.config.iterations {
            self.step()?;
        }

        let stats = self.culture.stats();
        info!(
            iterations = self.timing.iteration_count,
            population = stats.population,
            total_fitness = stats.total_fitness,
            species = stats.species_count,
            elapsed_ms = self.timing.elapsed().as_millis() as u64,
            "training finished"
        );
        Ok(())
    }

    /// Run one timed fermentation step and record its abundance.
    pub fn step(&mut self) -> Result<Abundance, HostError> {
        if !self.culture.is_inoculated() {
            return Err(CultureError::NotInoculated.into());
        }
        let started = Instant::now();
        let abundance = self.culture.ferment()?;
        self.timing.record_iteration(started.elapsed());

        debug!(
            iteration = self.timing.iteration_count,
            ?abundance,
            step_us = self.timing.last.as_micros() as u64,
            "iteration complete"
        );
        self.history.push(abundance.clone());
        Ok(abundance)
    }

    pub fn predict<R: AsRef<[f64]>>(&self, data: &[R]) -> Result<Vec<Species>, HostError> {
        Ok(self.culture.harvest(data)?)
    }

    /// Harvest `data` and score it against `labels`.
    pub fn evaluate<R: AsRef<[f64]>>(
        &self,
        data: &[R],
        labels: &[Species],
    ) -> Result<Evaluation, HostError> {
        if data.len() != labels.len() {
            return Err(CultureError::LabelCountMismatch {
                rows: data.len(),
                labels: labels.len(),
            }
            .into());
        }
        let evaluation = score(self.predict(data)?, labels);
        info!(
            observations = labels.len(),
            correct = evaluation.correct,
            unmapped = evaluation.unmapped,
            accuracy = evaluation.accuracy,
            "evaluation"
        );
        Ok(evaluation)
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Pre-step abundance of every fermentation step so far, oldest first.
    pub fn history(&self) -> &[Abundance] {
        &self.history
    }

    pub fn timing(&self) -> &RunTiming {
        &self.timing
    }
}
