//! Search budget configuration.
//!
//! The UCB1 exploration constant is fixed at the classical value and is not
//! part of this configuration.

use crate::{Result, SquavaError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Select/expand/simulate/backpropagate cycles per move
    /// Default: 25000
    pub iterations: usize,

    /// Wall-clock cap checked between iterations, in milliseconds
    /// Default: none
    pub max_duration_ms: Option<u64>,

    /// Seed for the search RNG; a fresh OS seed is drawn when unset
    /// Default: none
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 25_000,
            max_duration_ms: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SquavaError::ZeroIterations);
        }
        if self.max_duration_ms == Some(0) {
            return Err(SquavaError::Config(
                "max_duration_ms must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads and validates a JSON config. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.max_duration_ms.map(Duration::from_millis)
    }

    pub fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
