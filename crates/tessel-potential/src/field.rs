//! Dense `(value, cell)` distance array.

/// Potential of a `(value, cell)` pair no pass has reached.
pub const UNREACHED: i32 = -1;

/// A `values × cells` array of potentials.
///
/// Row `v` holds the potentials of value `v` over every cell, so the
/// entry for `(v, i)` sits at `v * cells + i`. Entries are either
/// [`UNREACHED`] or a non-negative step count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PotentialField {
    values: usize,
    cells: usize,
    data: Vec<i32>,
}

impl PotentialField {
    /// Create a field with every entry unreached.
    pub fn new(values: usize, cells: usize) -> Self {
        Self {
            values,
            cells,
            data: vec![UNREACHED; values * cells],
        }
    }

    /// Number of value rows.
    pub fn values(&self) -> usize {
        self.values
    }

    /// Number of cells per row.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// `(values, cells)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.values, self.cells)
    }

    /// Raw potential of `value` at `cell`: [`UNREACHED`] or a step count.
    #[inline]
    pub fn get(&self, value: usize, cell: usize) -> i32 {
        self.data[value * self.cells + cell]
    }

    /// Overwrite the potential of `value` at `cell`.
    #[inline]
    pub fn set(&mut self, value: usize, cell: usize, potential: i32) {
        self.data[value * self.cells + cell] = potential;
    }

    /// Step count of `value` at `cell`, or `None` if unreached or the
    /// value lies outside the field.
    pub fn distance(&self, value: usize, cell: usize) -> Option<u32> {
        if value >= self.values || cell >= self.cells {
            return None;
        }
        u32::try_from(self.get(value, cell)).ok()
    }

    /// Potentials of `value` over every cell.
    pub fn row(&self, value: usize) -> &[i32] {
        &self.data[value * self.cells..(value + 1) * self.cells]
    }

    /// Set every entry to `potential`.
    pub fn fill(&mut self, potential: i32) {
        self.data.fill(potential);
    }

    /// Flat view in row order.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }
}
