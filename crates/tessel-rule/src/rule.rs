//! Immutable rewrite rule descriptor.
//!
//! Patterns are flattened in x-major order over their bounding box.
//! Input cells are value bitmasks (`input`) with a byte projection
//! (`binput`: the single required value, or [`WILDCARD`] if every value
//! is accepted). Output cells are bytes, [`WILDCARD`] meaning "leave
//! unchanged".
//!
//! Construct via [`Rule::builder`] (derives `binput` and both shift
//! indexes from the patterns) or [`Rule::from_parts`] (caller supplies
//! everything precomputed; layout invariants are still checked).

use crate::shift::{Shift, ShiftIndex};
use tessel_core::{all_values_mask, Extent, RuleError, MAX_VALUES, WILDCARD};

/// A rewrite rule over a 2D or 3D bounding box.
///
/// # Construction
///
/// ```
/// use tessel_core::Extent;
/// use tessel_rule::Rule;
///
/// // 1x1 rule turning value 0 into value 1.
/// let rule = Rule::builder()
///     .values(2)
///     .in_place(Extent::new(1, 1, 1))
///     .input_values(&[0])
///     .output(vec![1])
///     .build()
///     .unwrap();
/// assert_eq!(rule.binput(), &[0]);
/// assert_eq!(rule.input_shifts().for_value(0).len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    input_extent: Extent,
    output_extent: Extent,
    values: usize,
    input: Vec<u32>,
    binput: Vec<u8>,
    output: Vec<u8>,
    ishift: ShiftIndex,
    oshift: ShiftIndex,
}

/// Precomputed rule data for [`Rule::from_parts`].
#[derive(Clone, Debug, Default)]
pub struct RuleParts {
    /// Input bounding box.
    pub input_extent: Option<Extent>,
    /// Output bounding box.
    pub output_extent: Option<Extent>,
    /// Value count `c`.
    pub values: usize,
    /// Input bitmask per cell.
    pub input: Vec<u32>,
    /// Input byte per cell, [`WILDCARD`] = any.
    pub binput: Vec<u8>,
    /// Output byte per cell, [`WILDCARD`] = unchanged.
    pub output: Vec<u8>,
    /// Input shift offset table (`values + 1` entries).
    pub ishift_offsets: Vec<u32>,
    /// Input shift array.
    pub ishifts: Vec<Shift>,
    /// Output shift offset table (`values + 1` entries).
    pub oshift_offsets: Vec<u32>,
    /// Output shift array.
    pub oshifts: Vec<Shift>,
}

/// Builder for [`Rule`].
///
/// Required: `values`, both extents (or [`in_place`](Self::in_place)),
/// the input pattern, and the output pattern.
#[derive(Clone, Debug, Default)]
pub struct RuleBuilder {
    values: Option<usize>,
    input_extent: Option<Extent>,
    output_extent: Option<Extent>,
    input: Option<Vec<u32>>,
    output: Option<Vec<u8>>,
}

fn check_extent(side: &'static str, e: Extent) -> Result<(), RuleError> {
    for (axis, len) in [("x", e.x), ("y", e.y), ("z", e.z)] {
        if len == 0 {
            return Err(RuleError::EmptyDimension { side, axis });
        }
    }
    Ok(())
}

fn check_values(values: usize) -> Result<(), RuleError> {
    if values == 0 || values > MAX_VALUES {
        return Err(RuleError::ValueCount { values });
    }
    Ok(())
}

fn check_len(pattern: &'static str, expected: usize, actual: usize) -> Result<(), RuleError> {
    if expected != actual {
        return Err(RuleError::PatternLength {
            pattern,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_bytes(pattern: &'static str, bytes: &[u8], values: usize) -> Result<(), RuleError> {
    match bytes
        .iter()
        .enumerate()
        .find(|&(_, &b)| b != WILDCARD && b as usize >= values)
    {
        Some((index, &value)) => Err(RuleError::ValueOutOfRange {
            pattern,
            index,
            value,
            values,
        }),
        None => Ok(()),
    }
}

impl Rule {
    /// Create a new builder.
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Assemble a rule from precomputed patterns and shift indexes.
    ///
    /// Every bounding-box axis must be positive, pattern lengths must
    /// match their boxes, and both offset tables must be non-decreasing
    /// with a final entry equal to their shift count.
    pub fn from_parts(parts: RuleParts) -> Result<Self, RuleError> {
        let input_extent = parts.input_extent.ok_or(RuleError::MissingField {
            field: "input_extent",
        })?;
        let output_extent = parts.output_extent.ok_or(RuleError::MissingField {
            field: "output_extent",
        })?;
        check_extent("input", input_extent)?;
        check_extent("output", output_extent)?;
        check_values(parts.values)?;
        check_len("input", input_extent.volume(), parts.input.len())?;
        check_len("binput", input_extent.volume(), parts.binput.len())?;
        check_len("output", output_extent.volume(), parts.output.len())?;
        check_bytes("binput", &parts.binput, parts.values)?;
        check_bytes("output", &parts.output, parts.values)?;

        let ishift = ShiftIndex::from_parts(
            "input",
            parts.ishift_offsets,
            parts.ishifts,
            parts.values,
            input_extent,
        )?;
        let oshift = ShiftIndex::from_parts(
            "output",
            parts.oshift_offsets,
            parts.oshifts,
            parts.values,
            output_extent,
        )?;

        Ok(Self {
            input_extent,
            output_extent,
            values: parts.values,
            input: parts.input,
            binput: parts.binput,
            output: parts.output,
            ishift,
            oshift,
        })
    }

    /// Input bounding box `(imx, imy, imz)`.
    pub fn input_extent(&self) -> Extent {
        self.input_extent
    }

    /// Output bounding box `(omx, omy, omz)`.
    pub fn output_extent(&self) -> Extent {
        self.output_extent
    }

    /// Value count `c`.
    pub fn values(&self) -> usize {
        self.values
    }

    /// Whether the input and output boxes coincide. Only such rules
    /// take part in potential propagation.
    pub fn is_in_place(&self) -> bool {
        self.input_extent == self.output_extent
    }

    /// Input bitmask pattern.
    pub fn input(&self) -> &[u32] {
        &self.input
    }

    /// Input byte pattern.
    pub fn binput(&self) -> &[u8] {
        &self.binput
    }

    /// Output byte pattern.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Offsets where each value occurs in the input pattern.
    pub fn input_shifts(&self) -> &ShiftIndex {
        &self.ishift
    }

    /// Offsets where each value occurs (or may be left) in the output
    /// pattern. Empty when the rule is not in place.
    pub fn output_shifts(&self) -> &ShiftIndex {
        &self.oshift
    }
}

impl RuleBuilder {
    /// Set the value count `c` (`1..=32`).
    pub fn values(mut self, values: usize) -> Self {
        self.values = Some(values);
        self
    }

    /// Set the input bounding box.
    pub fn input_extent(mut self, extent: Extent) -> Self {
        self.input_extent = Some(extent);
        self
    }

    /// Set the output bounding box.
    pub fn output_extent(mut self, extent: Extent) -> Self {
        self.output_extent = Some(extent);
        self
    }

    /// Set both bounding boxes to `extent`.
    pub fn in_place(self, extent: Extent) -> Self {
        self.input_extent(extent).output_extent(extent)
    }

    /// Set the input pattern as one value bitmask per cell.
    pub fn input(mut self, masks: Vec<u32>) -> Self {
        self.input = Some(masks);
        self
    }

    /// Set the input pattern as one value per cell, [`WILDCARD`]
    /// accepting any value.
    ///
    /// Wildcards expand to the full mask at [`build`](Self::build) time,
    /// so `values` may be set before or after this call.
    pub fn input_values(mut self, values: &[u8]) -> Self {
        self.input = Some(
            values
                .iter()
                .map(|&v| match v {
                    WILDCARD => u32::MAX,
                    v => 1u32.checked_shl(u32::from(v)).unwrap_or(0),
                })
                .collect(),
        );
        self
    }

    /// Set the output pattern, [`WILDCARD`] leaving the cell unchanged.
    pub fn output(mut self, output: Vec<u8>) -> Self {
        self.output = Some(output);
        self
    }

    /// Build the rule, deriving `binput` and both shift indexes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a required field is missing, a box axis is zero,
    /// the value count is outside `1..=32`, a pattern length disagrees
    /// with its box, an input mask is empty, or a pattern names a value
    /// outside `0..values`.
    pub fn build(self) -> Result<Rule, RuleError> {
        let values = self.values.ok_or(RuleError::MissingField { field: "values" })?;
        let input_extent = self.input_extent.ok_or(RuleError::MissingField {
            field: "input_extent",
        })?;
        let output_extent = self.output_extent.ok_or(RuleError::MissingField {
            field: "output_extent",
        })?;
        let input = self.input.ok_or(RuleError::MissingField { field: "input" })?;
        let output = self.output.ok_or(RuleError::MissingField { field: "output" })?;

        check_extent("input", input_extent)?;
        check_extent("output", output_extent)?;
        check_values(values)?;
        check_len("input", input_extent.volume(), input.len())?;
        check_len("output", output_extent.volume(), output.len())?;
        check_bytes("output", &output, values)?;

        let full = all_values_mask(values);
        let mut masks = Vec::with_capacity(input.len());
        for (index, mask) in input.into_iter().enumerate() {
            if mask == u32::MAX {
                masks.push(full);
                continue;
            }
            if mask & !full != 0 {
                return Err(RuleError::ValueOutOfRange {
                    pattern: "input",
                    index,
                    value: (31 - (mask & !full).leading_zeros()) as u8,
                    values,
                });
            }
            if mask == 0 {
                return Err(RuleError::EmptyMask { index });
            }
            masks.push(mask);
        }

        let binput = masks
            .iter()
            .map(|&m| {
                if m == full {
                    WILDCARD
                } else {
                    m.trailing_zeros() as u8
                }
            })
            .collect();

        let ishift = ShiftIndex::collect(input_extent, values, |i| masks[i]);
        let oshift = if input_extent == output_extent {
            ShiftIndex::collect(output_extent, values, |i| match output[i] {
                WILDCARD => full,
                o => 1u32 << o,
            })
        } else {
            ShiftIndex::empty(values)
        };

        Ok(Rule {
            input_extent,
            output_extent,
            values,
            input: masks,
            binput,
            output,
            ishift,
            oshift,
        })
    }
}
