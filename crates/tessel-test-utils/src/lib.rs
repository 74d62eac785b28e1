//! Test fixtures for Tessel development.
//!
//! Small rule sets with hand-checkable potentials, plus helpers for
//! building grid states. Fixtures panic on invalid input; they are for
//! tests and benches only.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;
