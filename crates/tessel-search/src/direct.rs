//! Direct rewriting of concrete planar grids.
//!
//! Unlike potential propagation, these functions test and mutate actual
//! cell values. Anchors are the top-left corner of a rule's box on layer
//! 0. Input patterns are matched through their bitmasks, so a cell
//! matches when `mask & (1 << value) != 0`.
//!
//! [`Amounts`] counts, per cell, how many candidate placements cover it.
//! The all-placements expansion uses it to pick the most contested cell
//! and branch over the placements covering that cell.
//!
//! A placement's footprint is the union of its input and output boxes,
//! both anchored at the same corner. Overlap and coverage are measured
//! on footprints, so two placements that write the same cell always
//! conflict.

use tessel_core::{GridDims, WILDCARD};
use tessel_rule::Rule;

/// Whether `rule`'s input pattern matches `state` anchored at `(x, y)`.
///
/// Returns `false` if the input box does not fit inside the grid.
pub fn match_rule(rule: &Rule, x: u16, y: u16, state: &[u8], dims: GridDims) -> bool {
    let extent = rule.input_extent();
    if !dims.fits(x as i32, y as i32, 0, extent) {
        return false;
    }
    let input = rule.input();
    extent.offsets().all(|(dx, dy, dz)| {
        let value = state[dims.index(x + dx, y + dy, dz)];
        let bit = 1u32.checked_shl(u32::from(value)).unwrap_or(0);
        input[extent.index(dx, dy, dz)] & bit != 0
    })
}

/// Write `rule`'s output pattern into `dst` anchored at `(x, y)`,
/// leaving wildcard cells untouched.
///
/// The output box must fit inside the grid.
pub fn write_output(rule: &Rule, x: u16, y: u16, dst: &mut [u8], dims: GridDims) {
    let extent = rule.output_extent();
    debug_assert!(dims.fits(x as i32, y as i32, 0, extent));
    let output = rule.output();
    for (dx, dy, dz) in extent.offsets() {
        let value = output[extent.index(dx, dy, dz)];
        if value != WILDCARD {
            dst[dims.index(x + dx, y + dy, dz)] = value;
        }
    }
}

/// Copy `src` into `dst`, then write `rule`'s output at `(x, y)`.
pub fn apply_rule(rule: &Rule, x: u16, y: u16, src: &[u8], dst: &mut [u8], dims: GridDims) {
    dst.copy_from_slice(src);
    write_output(rule, x, y, dst, dims);
}

/// Match `rule` at `(x, y)` on `input` and, on success, write the
/// rewritten grid into `output`.
///
/// `input` is never modified. On failure `output` is left untouched and
/// `false` is returned. A placement whose output box would leave the
/// grid does not match.
pub fn match_and_apply(
    rule: &Rule,
    x: u16,
    y: u16,
    input: &[u8],
    output: &mut [u8],
    dims: GridDims,
) -> bool {
    if !match_rule(rule, x, y, input, dims) || !output_fits(rule, x, y, dims) {
        return false;
    }
    apply_rule(rule, x, y, input, output, dims);
    true
}

/// Whether `rule`'s output box fits inside the grid anchored at `(x, y)`.
pub fn output_fits(rule: &Rule, x: u16, y: u16, dims: GridDims) -> bool {
    dims.fits(x as i32, y as i32, 0, rule.output_extent())
}

/// Width and height of the union of `rule`'s input and output boxes.
fn footprint(rule: &Rule) -> (u32, u32) {
    let (i, o) = (rule.input_extent(), rule.output_extent());
    (i.x.max(o.x) as u32, i.y.max(o.y) as u32)
}

/// Whether the footprints of two placements intersect.
pub fn rule_overlap(r1: &Rule, x1: u16, y1: u16, r2: &Rule, x2: u16, y2: u16) -> bool {
    let ((w1, h1), (w2, h2)) = (footprint(r1), footprint(r2));
    let (x1, y1, x2, y2) = (x1 as u32, y1 as u32, x2 as u32, y2 as u32);
    x1 < x2 + w2 && x2 < x1 + w1 && y1 < y2 + h2 && y2 < y1 + h1
}

/// Whether cell `(px, py)` lies inside `rule`'s footprint anchored at
/// `(x, y)`.
pub fn inside_rule(rule: &Rule, px: u16, py: u16, x: u16, y: u16) -> bool {
    let (w, h) = footprint(rule);
    let (px, py, x, y) = (px as u32, py as u32, x as u32, y as u32);
    px >= x && px < x + w && py >= y && py < y + h
}

/// Per-cell count of placements covering each cell of a planar grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Amounts {
    dims: GridDims,
    counts: Vec<i32>,
}

impl Amounts {
    /// All-zero counts for `dims`.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            counts: vec![0; dims.cell_count()],
        }
    }

    /// Reset every count to zero.
    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    /// Count one more placement of `rule` at `(x, y)`.
    pub fn incre(&mut self, rule: &Rule, x: u16, y: u16) {
        self.add(rule, x, y, 1);
    }

    /// Count one fewer placement of `rule` at `(x, y)`.
    pub fn decre(&mut self, rule: &Rule, x: u16, y: u16) {
        self.add(rule, x, y, -1);
    }

    fn add(&mut self, rule: &Rule, x: u16, y: u16, delta: i32) {
        let (w, h) = footprint(rule);
        let (mx, my) = (self.dims.mx() as u32, self.dims.my() as u32);
        for cy in (y as u32..y as u32 + h).take_while(|&cy| cy < my) {
            for cx in (x as u32..x as u32 + w).take_while(|&cx| cx < mx) {
                self.counts[self.dims.index(cx as u16, cy as u16, 0)] += delta;
            }
        }
    }

    /// Count at flat cell index `cell`.
    pub fn get(&self, cell: usize) -> i32 {
        self.counts[cell]
    }

    /// The first cell with the largest positive count, or `None` if no
    /// count is positive.
    pub fn max_pos_index(&self) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (i, &c) in self.counts.iter().enumerate() {
            if c > 0 && best.is_none_or(|(_, b)| c > b) {
                best = Some((i, c));
            }
        }
        best.map(|(i, _)| i)
    }
}
