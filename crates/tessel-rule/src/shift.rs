//! Value-partitioned offset index over a rule's bounding box.
//!
//! Storage is one flat [`Shift`] array sorted by value plus an offset
//! table of length `values + 1`: the shifts for value `v` occupy
//! `shifts[offsets[v]..offsets[v + 1]]`. The table is non-decreasing and
//! its last entry equals the shift count.

use smallvec::SmallVec;
use tessel_core::{Extent, RuleError};

/// A box-local offset `(dx, dy, dz)` inside a rule's bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shift {
    /// Offset along x.
    pub dx: u16,
    /// Offset along y.
    pub dy: u16,
    /// Offset along z.
    pub dz: u16,
}

impl Shift {
    /// Construct a shift.
    pub const fn new(dx: u16, dy: u16, dz: u16) -> Self {
        Self { dx, dy, dz }
    }
}

/// Offsets within a rule's box, grouped by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftIndex {
    offsets: Vec<u32>,
    shifts: Vec<Shift>,
}

impl ShiftIndex {
    /// An index with no shifts for any of `values` values.
    pub fn empty(values: usize) -> Self {
        Self {
            offsets: vec![0; values + 1],
            shifts: Vec::new(),
        }
    }

    /// Flatten one shift list per value into an index.
    pub fn from_lists<L: AsRef<[Shift]>>(lists: &[L]) -> Self {
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut shifts = Vec::new();
        for list in lists {
            offsets.push(shifts.len() as u32);
            shifts.extend_from_slice(list.as_ref());
        }
        offsets.push(shifts.len() as u32);
        Self { offsets, shifts }
    }

    /// Build from a precomputed offset table and shift array, validating
    /// both against the value count and the bounding box.
    ///
    /// `table` names the index (`"input"` or `"output"`) in errors.
    pub fn from_parts(
        table: &'static str,
        offsets: Vec<u32>,
        shifts: Vec<Shift>,
        values: usize,
        extent: Extent,
    ) -> Result<Self, RuleError> {
        if offsets.len() != values + 1 {
            return Err(RuleError::OffsetTable {
                table,
                reason: format!(
                    "expected {} entries, got {}",
                    values + 1,
                    offsets.len()
                ),
            });
        }
        if let Some(w) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(RuleError::OffsetTable {
                table,
                reason: format!("entry {} decreases", w + 1),
            });
        }
        let last = offsets[values] as usize;
        if last != shifts.len() {
            return Err(RuleError::OffsetTable {
                table,
                reason: format!("last entry {last} != shift count {}", shifts.len()),
            });
        }
        if let Some(index) = shifts
            .iter()
            .position(|s| !extent.contains(s.dx, s.dy, s.dz))
        {
            return Err(RuleError::ShiftOutOfBounds { table, index });
        }
        Ok(Self { offsets, shifts })
    }

    /// Group box positions by value from a per-cell value set.
    ///
    /// `values_at(i)` returns the bitmask of values that index position
    /// `i` (flat box order). Positions are visited in `z, y, x` order, so
    /// each value's shifts come out in flat-index order.
    pub(crate) fn collect(
        extent: Extent,
        values: usize,
        values_at: impl Fn(usize) -> u32,
    ) -> Self {
        let mut lists: Vec<SmallVec<[Shift; 8]>> = vec![SmallVec::new(); values];
        for (dx, dy, dz) in extent.offsets() {
            let mut w = values_at(extent.index(dx, dy, dz));
            for list in lists.iter_mut() {
                if w & 1 == 1 {
                    list.push(Shift::new(dx, dy, dz));
                }
                w >>= 1;
            }
        }
        Self::from_lists(&lists)
    }

    /// Shifts at which `value` occurs. Empty for out-of-range values.
    pub fn for_value(&self, value: usize) -> &[Shift] {
        if value + 1 >= self.offsets.len() {
            return &[];
        }
        let start = self.offsets[value] as usize;
        let end = self.offsets[value + 1] as usize;
        &self.shifts[start..end]
    }

    /// Number of values the index is partitioned over.
    pub fn values(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of shifts across all values.
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Whether the index has no shifts at all.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// The offset table (`values + 1` entries).
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// The flat shift array.
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ext(x: u16, y: u16, z: u16) -> Extent {
        Extent::new(x, y, z)
    }

    #[test]
    fn from_lists_partitions_by_value() {
        let idx = ShiftIndex::from_lists(&[
            vec![Shift::new(0, 0, 0)],
            vec![],
            vec![Shift::new(1, 0, 0), Shift::new(0, 1, 0)],
        ]);
        assert_eq!(idx.offsets(), &[0, 1, 1, 3]);
        assert_eq!(idx.values(), 3);
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.for_value(0), &[Shift::new(0, 0, 0)]);
        assert!(idx.for_value(1).is_empty());
        assert_eq!(idx.for_value(2).len(), 2);
        assert!(idx.for_value(3).is_empty());
    }

    #[test]
    fn empty_index_has_zeroed_table() {
        let idx = ShiftIndex::empty(4);
        assert_eq!(idx.offsets(), &[0; 5]);
        assert!(idx.is_empty());
        assert!(idx.for_value(2).is_empty());
    }

    #[test]
    fn from_parts_accepts_valid_layout() {
        let idx = ShiftIndex::from_parts(
            "input",
            vec![0, 1, 2],
            vec![Shift::new(0, 0, 0), Shift::new(1, 0, 0)],
            2,
            ext(2, 1, 1),
        )
        .unwrap();
        assert_eq!(idx.for_value(1), &[Shift::new(1, 0, 0)]);
    }

    #[test]
    fn from_parts_rejects_wrong_table_length() {
        let err = ShiftIndex::from_parts("input", vec![0, 0], vec![], 2, ext(1, 1, 1)).unwrap_err();
        assert!(matches!(err, RuleError::OffsetTable { table: "input", .. }));
    }

    #[test]
    fn from_parts_rejects_decreasing_table() {
        let err = ShiftIndex::from_parts(
            "output",
            vec![0, 2, 1],
            vec![Shift::new(0, 0, 0), Shift::new(0, 0, 0)],
            2,
            ext(1, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::OffsetTable { table: "output", .. }));
    }

    #[test]
    fn from_parts_rejects_mismatched_last_entry() {
        let err = ShiftIndex::from_parts(
            "input",
            vec![0, 1, 1],
            vec![Shift::new(0, 0, 0), Shift::new(0, 0, 0)],
            2,
            ext(1, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::OffsetTable { .. }));
    }

    #[test]
    fn from_parts_rejects_shift_outside_box() {
        let err = ShiftIndex::from_parts(
            "input",
            vec![0, 1],
            vec![Shift::new(2, 0, 0)],
            1,
            ext(2, 1, 1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::ShiftOutOfBounds {
                table: "input",
                index: 0
            }
        );
    }

    #[test]
    fn collect_scans_in_flat_order() {
        // 2x2 box: value 0 everywhere, value 1 on the diagonal.
        let masks = [0b11u32, 0b01, 0b01, 0b11];
        let idx = ShiftIndex::collect(ext(2, 2, 1), 2, |i| masks[i]);
        assert_eq!(
            idx.for_value(0),
            &[
                Shift::new(0, 0, 0),
                Shift::new(1, 0, 0),
                Shift::new(0, 1, 0),
                Shift::new(1, 1, 0)
            ]
        );
        assert_eq!(idx.for_value(1), &[Shift::new(0, 0, 0), Shift::new(1, 1, 0)]);
        let table = idx.offsets();
        assert!(table.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*table.last().unwrap() as usize, idx.len());
    }

    proptest! {
        #[test]
        fn collect_keeps_table_invariants(
            (x, y, masks) in (1u16..4, 1u16..4).prop_flat_map(|(x, y)| {
                (Just(x), Just(y), proptest::collection::vec(0u32..16, (x * y) as usize))
            }),
        ) {
            let extent = ext(x, y, 1);
            let idx = ShiftIndex::collect(extent, 4, |i| masks[i]);
            let table = idx.offsets();
            prop_assert_eq!(table.len(), 5);
            prop_assert!(table.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(*table.last().unwrap() as usize, idx.len());
            for v in 0..4 {
                let expected = masks.iter().filter(|&&m| m & (1 << v) != 0).count();
                prop_assert_eq!(idx.for_value(v).len(), expected);
                for s in idx.for_value(v) {
                    prop_assert!(extent.contains(s.dx, s.dy, s.dz));
                    prop_assert!(masks[extent.index(s.dx, s.dy, s.dz)] & (1 << v) != 0);
                }
            }
        }
    }
}
