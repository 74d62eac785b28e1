//! Fixed-capacity scratch buffers for potential propagation.
//!
//! Both buffers are allocated once per generation session and reset at
//! the start of every propagation pass:
//!
//! - [`RingQueue`]: bounded FIFO used as the BFS frontier.
//! - [`BitMask2D`]: dense bitset addressed by `(cell, rule)`, recording
//!   which rule placements already fired during the current pass.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bitmask;
pub mod ring;

pub use bitmask::BitMask2D;
pub use ring::RingQueue;
