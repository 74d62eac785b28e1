//! Tessel: potential-guided search over grid rewrite rules.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tessel sub-crates. For most users, adding `tessel` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessel::prelude::*;
//!
//! // Value 1 spreads right over value 0.
//! let grow = Rule::builder()
//!     .values(2)
//!     .in_place(Extent::new(2, 1, 1))
//!     .input_values(&[1, 0])
//!     .output(vec![1, 1])
//!     .build()
//!     .unwrap();
//! let rules = [grow];
//!
//! let dims = GridDims::planar(4, 1).unwrap();
//! let mut search = Search::new(dims, 2, &rules, SearchConfig::default()).unwrap();
//! let outcome = search.run(&[1, 0, 0, 0], &[0b10; 4]).unwrap();
//! assert_eq!(outcome.trajectory.unwrap().len(), 4);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessel-core` | IDs, grid geometry, error enums |
//! | [`buffer`] | `tessel-buffer` | Ring queue and bit-packed mask |
//! | [`rule`] | `tessel-rule` | Rewrite rules and shift indexes |
//! | [`potential`] | `tessel-potential` | Potential fields, propagation, scoring, observations |
//! | [`search`] | `tessel-search` | Board tree, direct rewriting, best-first search |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and errors (`tessel-core`).
pub use tessel_core as types;

/// Fixed-capacity work queue and bit mask (`tessel-buffer`).
pub use tessel_buffer as buffer;

/// Rewrite rules (`tessel-rule`).
///
/// Build rules with [`rule::Rule::builder`], or from precomputed tables
/// with [`rule::Rule::from_parts`].
pub use tessel_rule as rule;

/// Potential propagation and scoring (`tessel-potential`).
///
/// [`potential::PotentialPropagator`] fills a [`potential::PotentialField`]
/// in either direction; [`potential::forward_score`] and
/// [`potential::backward_score`] reduce it to a distance estimate.
pub use tessel_potential as potential;

/// Direct rewriting and best-first search (`tessel-search`).
pub use tessel_search as search;

/// Common imports for typical Tessel usage.
///
/// ```rust
/// use tessel::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tessel_core::{Extent, GridDims, RuleId, WILDCARD};

    // Errors
    pub use tessel_core::{PotentialError, RuleError};

    // Rules
    pub use tessel_rule::{Rule, RuleBuilder};

    // Potentials
    pub use tessel_potential::{
        backward_score, forward_score, Direction, ObservationSet, PotentialField,
        PotentialPropagator, UNREACHED,
    };

    // Search
    pub use tessel_search::{
        ExpansionMode, Search, SearchConfig, SearchError, SearchMetrics, SearchOutcome,
    };
}
