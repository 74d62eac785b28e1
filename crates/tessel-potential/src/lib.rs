//! Potential propagation for the Tessel rewrite engine.
//!
//! A [`PotentialField`] holds, for every `(value, cell)` pair, the least
//! number of rule applications separating it from a seed set. The
//! [`PotentialPropagator`] fills it with a multi-source, multi-label BFS:
//!
//! - **forward**: seeded from the current state, a potential is the
//!   number of steps needed to *produce* that value at that cell;
//! - **backward**: seeded from a goal mask, a potential is the number
//!   of steps from that value at that cell to a goal-consistent one.
//!
//! [`forward_score`] and [`backward_score`] reduce a field to a single
//! cost estimate, or `None` when the goal is unreachable.
//! [`ObservationSet`] turns a raw state into a canonical state plus the
//! goal mask the backward pass is seeded from.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;
pub mod observation;
pub mod propagate;
pub mod role;
pub mod score;

pub use field::{PotentialField, UNREACHED};
pub use observation::{is_goal_reached, Observation, ObservationSet};
pub use propagate::{PassStats, PotentialPropagator};
pub use role::{Direction, PatternRoles};
pub use score::{backward_score, forward_score};
