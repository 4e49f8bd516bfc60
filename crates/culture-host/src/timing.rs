use std::time::Duration;

/// Wall-clock accounting of a training run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunTiming {
    pub iteration_count: u32,
    pub last: Duration,
    pub slowest: Duration,
    /// Time spent in fermentation steps only.
    pub iterations_total: Duration,
    /// Time spent seeding the grid.
    pub inoculation: Duration,
}

impl RunTiming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_inoculation(&mut self, dt: Duration) {
        self.inoculation = dt;
    }

    pub fn record_iteration(&mut self, dt: Duration) {
        self.iteration_count += 1;
        self.last = dt;
        self.slowest = self.slowest.max(dt);
        self.iterations_total += dt;
    }

    /// Mean fermentation step duration, zero before the first step.
    pub fn mean_iteration(&self) -> Duration {
        if self.iteration_count == 0 {
            return Duration::ZERO;
        }
        self.iterations_total / self.iteration_count
    }

    pub fn elapsed(&self) -> Duration {
        self.inoculation + self.iterations_total
    }
}
