//! Reusable rule and state fixtures.
//!
//! - [`unit_rewrite`]: 1×1 rule `from -> to`.
//! - [`pair_rewrite`]: 2×1 horizontal rule.
//! - [`growth_rules`]: a value spreading into its four neighbours.
//! - [`state_with`]: a filled grid with a few cells overridden.

use tessel_core::{Extent, GridDims, WILDCARD};
use tessel_rule::Rule;

/// A 1×1 in-place rule rewriting `from` into `to`.
pub fn unit_rewrite(values: usize, from: u8, to: u8) -> Rule {
    Rule::builder()
        .values(values)
        .in_place(Extent::new(1, 1, 1))
        .input_values(&[from])
        .output(vec![to])
        .build()
        .expect("valid unit rule")
}

/// A 2×1 in-place rule rewriting `input` into `output`.
///
/// Either side may use [`WILDCARD`].
pub fn pair_rewrite(values: usize, input: [u8; 2], output: [u8; 2]) -> Rule {
    Rule::builder()
        .values(values)
        .in_place(Extent::new(2, 1, 1))
        .input_values(&input)
        .output(output.to_vec())
        .build()
        .expect("valid pair rule")
}

/// A 1×2 (vertical) in-place rule rewriting `input` into `output`.
pub fn column_rewrite(values: usize, input: [u8; 2], output: [u8; 2]) -> Rule {
    Rule::builder()
        .values(values)
        .in_place(Extent::new(1, 2, 1))
        .input_values(&input)
        .output(output.to_vec())
        .build()
        .expect("valid column rule")
}

/// Value `grow` spreading over value `into` in all four directions.
///
/// Order: right, left, down, up.
pub fn growth_rules(values: usize, grow: u8, into: u8) -> Vec<Rule> {
    vec![
        pair_rewrite(values, [grow, into], [grow, grow]),
        pair_rewrite(values, [into, grow], [grow, grow]),
        column_rewrite(values, [grow, into], [grow, grow]),
        column_rewrite(values, [into, grow], [grow, grow]),
    ]
}

/// A rule that paints any cell `to`, ignoring what was there.
pub fn paint_anything(values: usize, to: u8) -> Rule {
    Rule::builder()
        .values(values)
        .in_place(Extent::new(1, 1, 1))
        .input_values(&[WILDCARD])
        .output(vec![to])
        .build()
        .expect("valid paint rule")
}

/// A grid of `fill` with `(x, y, value)` overrides on layer 0.
pub fn state_with(dims: GridDims, fill: u8, cells: &[(u16, u16, u8)]) -> Vec<u8> {
    let mut state = vec![fill; dims.cell_count()];
    for &(x, y, v) in cells {
        state[dims.index(x, y, 0)] = v;
    }
    state
}

/// One goal mask per cell, each allowing only `value`.
pub fn uniform_goal(dims: GridDims, value: u8) -> Vec<u32> {
    vec![1 << value; dims.cell_count()]
}

/// Planar dimensions, panicking on zero axes.
pub fn planar(mx: u16, my: u16) -> GridDims {
    GridDims::planar(mx, my).expect("positive dimensions")
}
