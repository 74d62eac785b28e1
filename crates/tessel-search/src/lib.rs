//! Search over rewrite trajectories for the Tessel engine.
//!
//! - [`board`]: search-tree nodes in an append-only [`BoardArena`], and
//!   the [`rank`] that orders exploration.
//! - [`direct`]: matching and applying rules on concrete planar grids,
//!   plus placement overlap bookkeeping ([`Amounts`]).
//! - [`expand`]: child generation, one placement at a time or maximal
//!   non-overlapping placement sets.
//! - [`zobrist`]: state hashing for the visited map.
//! - [`search`]: the best-first [`Search`] driver, configured by
//!   [`SearchConfig`] and reporting [`SearchMetrics`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod board;
pub mod config;
pub mod direct;
pub mod error;
pub mod expand;
pub mod metrics;
pub mod search;
pub mod zobrist;

pub use board::{rank, Board, BoardArena};
pub use config::{ConfigError, ExpansionMode, SearchConfig};
pub use direct::{
    apply_rule, inside_rule, match_and_apply, match_rule, output_fits, rule_overlap, write_output,
    Amounts,
};
pub use error::SearchError;
pub use expand::{for_each_maximal_child, for_each_single_child, matching_placements, Placement};
pub use metrics::SearchMetrics;
pub use search::{Search, SearchOutcome};
pub use zobrist::{states_equal, ZobristTable};
