//! Core types for the Tessel rewrite engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other Tessel crate: strongly-typed
//! identifiers, grid geometry, the wildcard value, and the error enums
//! for each subsystem.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dims;
pub mod error;
pub mod id;

pub use dims::{Extent, GridDims, Pos};
pub use error::{BufferError, GridError, PotentialError, RuleError};
pub use id::{all_values_mask, BoardId, RuleId, Value, MAX_VALUES, WILDCARD};
