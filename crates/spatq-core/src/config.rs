//! Tunable run parameters, loadable from TOML by the CLI.

use serde::{Deserialize, Serialize};

use crate::anneal::Schedule;
use crate::error::{Result, SpatqError};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuantizeConfig {
    /// Reconstruction filter side length (1, 3, or 5).
    #[serde(default = "default_filter_size")]
    pub filter_size: usize,
    /// Seed for palette and assignment initialization. Omit for a
    /// different result on every run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub schedule: Schedule,
}

fn default_filter_size() -> usize {
    3
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            filter_size: default_filter_size(),
            seed: None,
            schedule: Schedule::default(),
        }
    }
}

impl QuantizeConfig {
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.filter_size, 1 | 3 | 5) {
            return Err(SpatqError::UnsupportedFilterSize(self.filter_size));
        }
        self.schedule.validate()
    }
}
