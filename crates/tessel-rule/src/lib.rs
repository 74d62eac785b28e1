//! Rewrite rule descriptors for the Tessel engine.
//!
//! A [`Rule`] is an immutable pair of patterns over a bounding box: an
//! input pattern that must match and an output pattern that is written.
//! Each rule carries two [`ShiftIndex`]es mapping every value to the
//! box-local offsets where that value occurs in the input (forward
//! seeding) or output (backward seeding) pattern. Propagation uses them
//! to revisit only those placements a newly discovered `(value, cell)`
//! pair could complete.
//!
//! Rules are built once per rule set and borrowed read-only by the
//! propagator and the search driver.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod rule;
pub mod shift;

pub use rule::{Rule, RuleBuilder, RuleParts};
pub use shift::{Shift, ShiftIndex};
