//! Error types for the Tessel rewrite engine.
//!
//! Organised by subsystem: grid geometry, scratch buffers, rule
//! construction, and potential propagation. Construction errors are
//! caller contract violations surfaced as typed results; infeasibility
//! and non-matches are not errors and never appear here.

use std::error::Error;
use std::fmt;

use crate::id::RuleId;

/// Errors from [`GridDims`](crate::GridDims) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// An axis length is zero.
    EmptyDimension {
        /// Axis name (`"mx"`, `"my"`, or `"mz"`).
        name: &'static str,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimension { name } => write!(f, "grid axis {name} must be positive"),
        }
    }
}

impl Error for GridError {}

/// Errors from scratch buffer construction (queues and bit masks).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// Queue capacity is zero.
    ZeroCapacity,
    /// Queue element type is zero-sized.
    ZeroElementSize,
    /// A bit-mask dimension is zero.
    EmptyDimension {
        /// Dimension name (`"width"` or `"height"`).
        name: &'static str,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "queue capacity must be positive"),
            Self::ZeroElementSize => write!(f, "queue element size must be positive"),
            Self::EmptyDimension { name } => write!(f, "mask {name} must be positive"),
        }
    }
}

impl Error for BufferError {}

/// Errors from rule construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// A bounding-box axis is zero.
    EmptyDimension {
        /// `"input"` or `"output"`.
        side: &'static str,
        /// Axis name (`"x"`, `"y"`, or `"z"`).
        axis: &'static str,
    },
    /// The value count is zero or exceeds [`MAX_VALUES`](crate::MAX_VALUES).
    ValueCount {
        /// The rejected value count.
        values: usize,
    },
    /// A pattern's length does not match its bounding box volume.
    PatternLength {
        /// Which pattern (`"input"`, `"binput"`, or `"output"`).
        pattern: &'static str,
        /// Box volume.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A non-wildcard pattern byte names a value outside `0..values`.
    ValueOutOfRange {
        /// Which pattern.
        pattern: &'static str,
        /// Flat index within the pattern.
        index: usize,
        /// The offending value.
        value: u8,
        /// The rule's value count.
        values: usize,
    },
    /// An input bitmask is empty (matches nothing).
    EmptyMask {
        /// Flat index within the input pattern.
        index: usize,
    },
    /// A shift offset table violates its layout invariants.
    OffsetTable {
        /// `"input"` or `"output"`.
        table: &'static str,
        /// What went wrong.
        reason: String,
    },
    /// A shift lies outside the rule's bounding box.
    ShiftOutOfBounds {
        /// `"input"` or `"output"`.
        table: &'static str,
        /// Index into the shift array.
        index: usize,
    },
    /// A required builder field was not set.
    MissingField {
        /// The missing field.
        field: &'static str,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimension { side, axis } => {
                write!(f, "{side} box axis {axis} must be positive")
            }
            Self::ValueCount { values } => {
                write!(
                    f,
                    "value count {values} must be in 1..={}",
                    crate::MAX_VALUES
                )
            }
            Self::PatternLength {
                pattern,
                expected,
                actual,
            } => write!(
                f,
                "{pattern} pattern has {actual} cells, bounding box has {expected}"
            ),
            Self::ValueOutOfRange {
                pattern,
                index,
                value,
                values,
            } => write!(
                f,
                "{pattern} pattern cell {index} holds value {value}, rule has {values} values"
            ),
            Self::EmptyMask { index } => write!(f, "input mask at cell {index} is empty"),
            Self::OffsetTable { table, reason } => {
                write!(f, "invalid {table} shift offset table: {reason}")
            }
            Self::ShiftOutOfBounds { table, index } => {
                write!(f, "{table} shift {index} lies outside the bounding box")
            }
            Self::MissingField { field } => write!(f, "{field} is required"),
        }
    }
}

impl Error for RuleError {}

/// Errors from potential propagation and scoring setup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PotentialError {
    /// The value count is zero or exceeds [`MAX_VALUES`](crate::MAX_VALUES).
    ValueCount {
        /// The rejected value count.
        values: usize,
    },
    /// A state or goal buffer does not have one entry per cell.
    StateLength {
        /// Cell count of the grid.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A state cell holds a value outside `0..values`.
    ValueOutOfRange {
        /// Flat cell index.
        cell: usize,
        /// The offending value.
        value: u8,
        /// Value count of the field.
        values: usize,
    },
    /// A rule was built for a different value count.
    RuleValueCount {
        /// The offending rule.
        rule: RuleId,
        /// Value count of the field.
        expected: usize,
        /// Value count of the rule.
        actual: usize,
    },
    /// The potential field shape does not match the propagator.
    FieldShape {
        /// `(values, cells)` the propagator was built for.
        expected: (usize, usize),
        /// `(values, cells)` of the supplied field.
        actual: (usize, usize),
    },
    /// The rule slice is longer than the visited mask was sized for.
    RuleCount {
        /// Rules the mask can track.
        capacity: usize,
        /// Rules supplied.
        actual: usize,
    },
    /// An observation names values outside the field's value range.
    InvalidObservation {
        /// The observed value.
        value: u8,
        /// Canonical value the observation rewrites to.
        from: u8,
        /// Goal bitmask of the observation.
        to: u32,
        /// Value count of the set.
        values: usize,
    },
    /// Scratch buffer construction failed.
    Buffer(BufferError),
}

impl fmt::Display for PotentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueCount { values } => {
                write!(
                    f,
                    "potential value count {values} must be in 1..={}",
                    crate::MAX_VALUES
                )
            }
            Self::StateLength { expected, actual } => {
                write!(f, "state has {actual} cells, grid has {expected}")
            }
            Self::ValueOutOfRange {
                cell,
                value,
                values,
            } => write!(
                f,
                "cell {cell} holds value {value}, field has {values} values"
            ),
            Self::RuleValueCount {
                rule,
                expected,
                actual,
            } => write!(
                f,
                "rule {rule} has {actual} values, field has {expected}"
            ),
            Self::FieldShape { expected, actual } => write!(
                f,
                "potential field is {}x{}, propagator expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::RuleCount { capacity, actual } => {
                write!(f, "{actual} rules supplied, mask sized for {capacity}")
            }
            Self::InvalidObservation {
                value,
                from,
                to,
                values,
            } => write!(
                f,
                "observation {value} -> ({from}, {to:#b}) is invalid for {values} values"
            ),
            Self::Buffer(e) => write!(f, "buffer: {e}"),
        }
    }
}

impl Error for PotentialError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Buffer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BufferError> for PotentialError {
    fn from(e: BufferError) -> Self {
        Self::Buffer(e)
    }
}
