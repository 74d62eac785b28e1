//! Counters and estimates collected during a search run.

/// What a [`Search`](crate::Search) run did.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default)]
pub struct SearchMetrics {
    /// Boards created, root included.
    pub boards: usize,
    /// Boards popped from the frontier and expanded.
    pub expansions: usize,
    /// Children discarded because some cell could not reach the goal.
    pub pruned: usize,
    /// Visited boards moved under a shallower parent.
    pub reparents: usize,
    /// Backward score of the initial state.
    pub root_bd: Option<u32>,
    /// Forward score of the initial state.
    pub root_fd: Option<u32>,
    /// Lowest `bd + fd` seen on any board.
    pub best_estimate: Option<u32>,
    /// State of the board holding `best_estimate`.
    pub best_state: Option<Vec<u8>>,
    /// Whether the run stopped on the board limit rather than an empty
    /// frontier or a goal.
    pub hit_limit: bool,
    /// Wall-clock time of the run, in microseconds.
    pub total_us: u64,
}
