//! Errors from search setup and execution.

use std::error::Error;
use std::fmt;

use tessel_core::{PotentialError, MAX_VALUES};

use crate::config::ConfigError;

/// Errors from [`Search`](crate::Search).
///
/// An unreachable child is not an error: it is pruned. Only a root that
/// cannot reach the goal fails the whole run.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Direct rewriting only supports single-layer grids.
    NotPlanar {
        /// Depth of the rejected grid.
        mz: u16,
    },
    /// The value count is zero or exceeds [`MAX_VALUES`].
    ValueCount {
        /// The rejected value count.
        values: usize,
    },
    /// The initial state cannot reach the goal.
    Infeasible {
        /// Backward score of the initial state (`None` = unreachable).
        root_bd: Option<u32>,
        /// Forward score of the initial state (`None` = unreachable).
        root_fd: Option<u32>,
    },
    /// An observed value never occurs in the initial state.
    MissingObservedValue,
    /// Potential propagation rejected its inputs.
    Potential(PotentialError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::NotPlanar { mz } => write!(f, "search needs a planar grid, got mz = {mz}"),
            Self::ValueCount { values } => {
                write!(f, "value count {values} must be in 1..={MAX_VALUES}")
            }
            Self::Infeasible { root_bd, root_fd } => write!(
                f,
                "goal unreachable from the initial state (bd = {root_bd:?}, fd = {root_fd:?})"
            ),
            Self::MissingObservedValue => {
                write!(f, "an observed value does not occur in the initial state")
            }
            Self::Potential(e) => write!(f, "potential: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Potential(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PotentialError> for SearchError {
    fn from(e: PotentialError) -> Self {
        Self::Potential(e)
    }
}
