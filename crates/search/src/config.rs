//! Search configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tetrad_eval::{EvalWeights, GradingMode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lookahead must be at least 1")]
    ZeroLookahead,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Pieces placed per chain: the falling piece plus `lookahead - 1` known followers.
    pub lookahead: usize,
    pub mode: GradingMode,
    pub weights: EvalWeights,
    /// Cap shifts and rotations between drops by the level's frames per step.
    pub frame_limited: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lookahead: 2,
            mode: GradingMode::Tetris,
            weights: EvalWeights::default(),
            frame_limited: false,
        }
    }
}

impl SearchConfig {
    /// Falling piece only.
    pub fn greedy() -> Self {
        Self {
            lookahead: 1,
            ..Self::default()
        }
    }

    /// Clear whatever is available rather than holding out for four rows.
    pub fn survival() -> Self {
        Self {
            mode: GradingMode::Survival,
            ..Self::default()
        }
    }

    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead == 0 {
            return Err(ConfigError::ZeroLookahead);
        }
        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
