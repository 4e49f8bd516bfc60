use culture_types::CultureParams;
use serde::{Deserialize, Serialize};

use crate::HostError;

/// Settings for one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub culture: CultureParams,
    /// Fermentation steps run by [`crate::Trainer::fit`] after inoculation.
    pub iterations: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            culture: CultureParams::default(),
            iterations: 50,
        }
    }
}

impl TrainingConfig {
    pub fn from_json(raw: &str) -> Result<Self, HostError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), HostError> {
        self.culture.shape()?;
        Ok(())
    }
}
