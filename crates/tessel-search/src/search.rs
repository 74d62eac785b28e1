//! Best-first search over rewrite trajectories.
//!
//! The driver scores the initial state with one backward pass (fixed for
//! the whole run) and one forward pass, then repeatedly expands the
//! lowest-rank board on the frontier. Every new child costs one forward
//! pass. A child whose forward score is 0 already satisfies the goal and
//! ends the run with the path from the root.
//!
//! States are deduplicated through a Zobrist-keyed visited map. Reaching
//! a known state by a shorter path moves its board under the new parent
//! and re-queues it; the stale heap entry stays and is expanded again
//! when popped, which only costs time.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::ControlFlow;
use std::time::Instant;

use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use tessel_core::{BoardId, GridDims, PotentialError, RuleId, MAX_VALUES};
use tessel_potential::{
    backward_score, forward_score, ObservationSet, PotentialField, PotentialPropagator,
};
use tessel_rule::Rule;
use tracing::{debug, info, warn};

use crate::board::BoardArena;
use crate::config::{ExpansionMode, SearchConfig};
use crate::direct::Amounts;
use crate::error::SearchError;
use crate::expand::{for_each_maximal_child, for_each_single_child};
use crate::metrics::SearchMetrics;
use crate::zobrist::{states_equal, ZobristTable};

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// States from the initial state to the first goal-satisfying state,
    /// both inclusive. `Some(vec![])` if the initial state already
    /// satisfies the goal; `None` if the frontier emptied or the board
    /// limit was reached first.
    pub trajectory: Option<Vec<Vec<u8>>>,
    /// Counters and estimates from the run.
    pub metrics: SearchMetrics,
}

impl SearchOutcome {
    /// Whether a goal-satisfying trajectory was found.
    pub fn is_solved(&self) -> bool {
        self.trajectory.is_some()
    }
}

/// A best-first search over one planar grid and rule set.
///
/// Scratch buffers are allocated once in [`new`](Self::new) and reused
/// by every [`run`](Self::run).
///
/// # Examples
///
/// ```
/// use tessel_core::{Extent, GridDims};
/// use tessel_rule::Rule;
/// use tessel_search::{Search, SearchConfig};
///
/// let dims = GridDims::planar(3, 1).unwrap();
/// let grow = Rule::builder()
///     .values(2)
///     .in_place(Extent::new(2, 1, 1))
///     .input_values(&[1, 0])
///     .output(vec![1, 1])
///     .build()
///     .unwrap();
/// let rules = [grow];
///
/// let mut search = Search::new(dims, 2, &rules, SearchConfig::default()).unwrap();
/// let outcome = search.run(&[1, 0, 0], &[0b10; 3]).unwrap();
/// let path = outcome.trajectory.unwrap();
/// assert_eq!(path.first().unwrap(), &vec![1, 0, 0]);
/// assert_eq!(path.last().unwrap(), &vec![1, 1, 1]);
/// ```
#[derive(Debug)]
pub struct Search<'r> {
    dims: GridDims,
    values: usize,
    rules: &'r [Rule],
    config: SearchConfig,
    propagator: PotentialPropagator,
}

impl<'r> Search<'r> {
    /// Prepare a search over `dims` with `values` values.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid, the grid has more than one layer,
    /// the value count is outside `1..=32`, or a rule was built for a
    /// different value count.
    pub fn new(
        dims: GridDims,
        values: usize,
        rules: &'r [Rule],
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        if !dims.is_planar() {
            return Err(SearchError::NotPlanar { mz: dims.mz() });
        }
        if values == 0 || values > MAX_VALUES {
            return Err(SearchError::ValueCount { values });
        }
        if let Some((r, rule)) = rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.values() != values)
        {
            return Err(PotentialError::RuleValueCount {
                rule: RuleId(r as u32),
                expected: values,
                actual: rule.values(),
            }
            .into());
        }
        let propagator = PotentialPropagator::new(dims, values, rules.len())?;
        Ok(Self {
            dims,
            values,
            rules,
            config,
            propagator,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for a trajectory from `present` to a state consistent with
    /// the goal mask `future`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Infeasible`] if the initial state cannot
    /// reach the goal, and [`SearchError::Potential`] if `present` or
    /// `future` do not fit the grid.
    pub fn run(&mut self, present: &[u8], future: &[u32]) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        let cells = self.dims.cell_count();

        let mut bd_field = PotentialField::new(self.values, cells);
        let mut fd_field = PotentialField::new(self.values, cells);
        self.propagator
            .compute_backward(&mut bd_field, future, self.rules)?;
        self.propagator
            .compute_forward(&mut fd_field, present, self.rules)?;
        let root_bd = backward_score(&bd_field, present);
        let root_fd = forward_score(&fd_field, future);

        info!(
            event = "search_start",
            cells,
            rules = self.rules.len(),
            mode = ?self.config.mode,
            limit = ?self.config.limit,
            root_bd = ?root_bd,
            root_fd = ?root_fd,
        );

        let (Some(bd), Some(fd)) = (root_bd, root_fd) else {
            warn!(event = "search_infeasible", root_bd = ?root_bd, root_fd = ?root_fd);
            return Err(SearchError::Infeasible { root_bd, root_fd });
        };

        let mut metrics = SearchMetrics {
            boards: 1,
            root_bd,
            root_fd,
            best_estimate: Some(bd + fd),
            best_state: Some(present.to_vec()),
            ..SearchMetrics::default()
        };
        if bd == 0 {
            metrics.total_us = started.elapsed().as_micros() as u64;
            info!(event = "search_end", solved = true, steps = 0, boards = 1);
            return Ok(SearchOutcome {
                trajectory: Some(Vec::new()),
                metrics,
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let zobrist = ZobristTable::new(self.values, cells, &mut rng);
        let mut run = Run {
            rules: self.rules,
            future,
            coeff: self.config.depth_coefficient,
            propagator: &mut self.propagator,
            bd_field,
            fd_field,
            arena: BoardArena::new(cells),
            visited: IndexMap::new(),
            frontier: BinaryHeap::new(),
            rng,
            zobrist,
            metrics,
        };
        let root = run.arena.insert(present, None, bd, fd);
        run.remember(root, present);
        run.push(root);

        let mut parent_state = Vec::with_capacity(cells);
        let mut scratch = Vec::with_capacity(cells);
        let mut amounts = Amounts::new(self.dims);
        let mut goal = None;
        loop {
            if self.config.limit.is_some_and(|l| run.arena.len() >= l) {
                run.metrics.hit_limit = true;
                break;
            }
            let Some(next) = run.frontier.pop() else {
                break;
            };
            run.metrics.expansions += 1;
            let parent = next.board;
            parent_state.clear();
            parent_state.extend_from_slice(run.arena.state(parent));

            let flow = match self.config.mode {
                ExpansionMode::One => for_each_single_child(
                    self.rules,
                    self.dims,
                    &parent_state,
                    &mut scratch,
                    |child| run.consider(parent, child),
                ),
                ExpansionMode::All => for_each_maximal_child(
                    self.rules,
                    self.dims,
                    &parent_state,
                    &mut amounts,
                    &mut scratch,
                    |child| run.consider(parent, child),
                ),
            };
            if let ControlFlow::Break(found) = flow {
                goal = Some(found?);
                break;
            }
        }

        let trajectory = goal.map(|id| run.arena.trajectory(id));
        let mut metrics = run.metrics;
        metrics.boards = run.arena.len();
        metrics.total_us = started.elapsed().as_micros() as u64;
        info!(
            event = "search_end",
            solved = trajectory.is_some(),
            steps = trajectory.as_ref().map_or(0, |t| t.len().saturating_sub(1)),
            boards = metrics.boards,
            expansions = metrics.expansions,
            reparents = metrics.reparents,
            pruned = metrics.pruned,
            hit_limit = metrics.hit_limit,
            total_us = metrics.total_us,
        );
        Ok(SearchOutcome {
            trajectory,
            metrics,
        })
    }

    /// Canonicalize `state` through `observations`, then [`run`](Self::run)
    /// towards the goal they describe.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingObservedValue`] if an observed value
    /// does not occur in `state`, plus everything [`run`](Self::run)
    /// returns.
    pub fn run_observed(
        &mut self,
        state: &[u8],
        observations: &ObservationSet,
    ) -> Result<SearchOutcome, SearchError> {
        let mut present = state.to_vec();
        let mut future = vec![0u32; present.len()];
        if !observations.compute_future_set_present(&mut present, &mut future) {
            return Err(SearchError::MissingObservedValue);
        }
        self.run(&present, &future)
    }
}

/// Frontier entry. Orders so that `BinaryHeap` pops the lowest rank,
/// then the oldest board.
#[derive(Clone, Copy, Debug)]
struct Ranked {
    rank: f64,
    board: BoardId,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .total_cmp(&self.rank)
            .then_with(|| other.board.cmp(&self.board))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Mutable state of one run, borrowed by the child visitor.
struct Run<'a> {
    rules: &'a [Rule],
    future: &'a [u32],
    coeff: f64,
    propagator: &'a mut PotentialPropagator,
    bd_field: PotentialField,
    fd_field: PotentialField,
    arena: BoardArena,
    visited: IndexMap<u64, SmallVec<[BoardId; 2]>>,
    frontier: BinaryHeap<Ranked>,
    rng: ChaCha8Rng,
    zobrist: ZobristTable,
    metrics: SearchMetrics,
}

impl Run<'_> {
    fn push(&mut self, board: BoardId) {
        let jitter = self.rng.random::<f64>();
        let rank = self.arena.board(board).rank(jitter, self.coeff);
        self.frontier.push(Ranked { rank, board });
    }

    fn remember(&mut self, board: BoardId, state: &[u8]) {
        let hash = self.zobrist.hash(state);
        self.visited.entry(hash).or_default().push(board);
    }

    fn lookup(&self, hash: u64, state: &[u8]) -> Option<BoardId> {
        self.visited
            .get(&hash)?
            .iter()
            .copied()
            .find(|&b| states_equal(self.arena.state(b), state))
    }

    /// Handle one generated child of `parent`. Breaks with the child's
    /// board once it satisfies the goal.
    fn consider(
        &mut self,
        parent: BoardId,
        child: &[u8],
    ) -> ControlFlow<Result<BoardId, SearchError>> {
        let hash = self.zobrist.hash(child);
        if let Some(seen) = self.lookup(hash, child) {
            let depth = self.arena.board(parent).depth() + 1;
            if depth < self.arena.board(seen).depth() {
                self.arena.set_parent(seen, parent);
                self.metrics.reparents += 1;
                debug!(event = "reparent", board = %seen, parent = %parent, depth);
                self.push(seen);
            }
            return ControlFlow::Continue(());
        }

        let Some(bd) = backward_score(&self.bd_field, child) else {
            self.metrics.pruned += 1;
            return ControlFlow::Continue(());
        };
        if let Err(e) = self
            .propagator
            .compute_forward(&mut self.fd_field, child, self.rules)
        {
            return ControlFlow::Break(Err(e.into()));
        }
        let Some(fd) = forward_score(&self.fd_field, self.future) else {
            self.metrics.pruned += 1;
            return ControlFlow::Continue(());
        };

        let board = self.arena.insert(child, Some(parent), bd, fd);
        self.visited.entry(hash).or_default().push(board);
        if fd == 0 {
            return ControlFlow::Break(Ok(board));
        }

        let estimate = bd + fd;
        if self.metrics.best_estimate.is_none_or(|best| estimate < best) {
            self.metrics.best_estimate = Some(estimate);
            self.metrics.best_state = Some(child.to_vec());
            debug!(
                event = "best_estimate",
                board = %board,
                bd,
                fd,
                depth = self.arena.board(board).depth(),
            );
        }
        self.push(board);
        ControlFlow::Continue(())
    }
}
