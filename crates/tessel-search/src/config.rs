//! Search configuration and its validation.

use std::error::Error;
use std::fmt;

/// How a board's children are generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpansionMode {
    /// Each matching placement, applied alone, is one child.
    #[default]
    One,
    /// Each maximal set of non-overlapping placements, applied together,
    /// is one child.
    All,
}

/// Parameters of a [`Search`](crate::Search) run.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Child generation policy. Default: [`ExpansionMode::One`].
    pub mode: ExpansionMode,
    /// Maximum number of boards to create, root included. `None` =
    /// unbounded. Default: `None`.
    pub limit: Option<usize>,
    /// Weight of depth against remaining cost in the board rank.
    /// Negative values rank by depth alone. Default: 0.5.
    pub depth_coefficient: f64,
    /// Seed for rank jitter and state hashing. Default: 0.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: ExpansionMode::One,
            limit: None,
            depth_coefficient: 0.5,
            seed: 0,
        }
    }
}

impl SearchConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == Some(0) {
            return Err(ConfigError::ZeroLimit);
        }
        if !self.depth_coefficient.is_finite() {
            return Err(ConfigError::InvalidDepthCoefficient {
                value: self.depth_coefficient,
            });
        }
        Ok(())
    }
}

/// Errors detected by [`SearchConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The board limit is zero, which would forbid even the root.
    ZeroLimit,
    /// `depth_coefficient` is NaN or infinite.
    InvalidDepthCoefficient {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLimit => write!(f, "board limit must be at least 1"),
            Self::InvalidDepthCoefficient { value } => {
                write!(f, "depth_coefficient must be finite, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}
