//! Multi-source, multi-label BFS over `(value, cell)` pairs.
//!
//! Every rule application costs one step. A pass seeds potential 0 at
//! its sources and repeatedly pops a discovered `(value, cell)` pair at
//! potential `t`. For each rule it visits only the placements whose
//! matching pattern holds that value at that cell (via the rule's shift
//! index). A placement fires when every non-wildcard matching cell is
//! reached at potential `<= t`; it then writes `t + 1` into every still
//! unreached producing cell. The FIFO queue keeps layers in order, so
//! the first write to an entry is its minimum.
//!
//! Each `(anchor, rule)` pair fires at most once per pass (tracked in a
//! [`BitMask2D`]) and each `(value, cell)` pair is pushed at most once
//! (it is written before it is pushed). A queue of `values × cells`
//! records therefore never overflows.
//!
//! Only rules whose input and output boxes coincide take part; resizing
//! rules have no per-cell correspondence between their two patterns.

use tessel_buffer::{BitMask2D, RingQueue};
use tessel_core::{
    all_values_mask, Extent, GridDims, PotentialError, RuleId, MAX_VALUES, WILDCARD,
};
use tessel_rule::Rule;
use tracing::trace;

use crate::field::{PotentialField, UNREACHED};
use crate::role::Direction;

/// A queued discovery. Eight bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct QueueItem {
    value: u16,
    x: u16,
    y: u16,
    z: u16,
}

/// Counters from one propagation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Seeds pushed before the BFS started.
    pub seeds: usize,
    /// Queue records popped (equals the number of reached entries).
    pub pops: usize,
    /// Rule placements that fired.
    pub applications: usize,
}

/// Reusable scratch state for potential passes over one grid.
///
/// Owns the BFS queue (sized `values × cells`) and the visited mask
/// (`cells × rules`). Both are reset at the start of every pass; nothing
/// carries over between passes.
///
/// # Examples
///
/// ```
/// use tessel_core::{Extent, GridDims};
/// use tessel_potential::{forward_score, PotentialField, PotentialPropagator};
/// use tessel_rule::Rule;
///
/// let dims = GridDims::new(1, 1, 1).unwrap();
/// let rule = Rule::builder()
///     .values(2)
///     .in_place(Extent::new(1, 1, 1))
///     .input_values(&[0])
///     .output(vec![1])
///     .build()
///     .unwrap();
/// let rules = [rule];
///
/// let mut prop = PotentialPropagator::new(dims, 2, rules.len()).unwrap();
/// let mut field = PotentialField::new(2, 1);
/// prop.compute_forward(&mut field, &[0], &rules).unwrap();
/// assert_eq!(field.get(1, 0), 1);
/// assert_eq!(forward_score(&field, &[1 << 1]), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct PotentialPropagator {
    dims: GridDims,
    values: usize,
    queue: RingQueue<QueueItem>,
    mask: BitMask2D,
}

impl PotentialPropagator {
    /// Create scratch buffers for a `dims` grid with `values` values and
    /// up to `rule_count` rules.
    ///
    /// # Errors
    ///
    /// Returns `Err(PotentialError::ValueCount)` if `values` is outside
    /// `1..=MAX_VALUES`.
    pub fn new(dims: GridDims, values: usize, rule_count: usize) -> Result<Self, PotentialError> {
        if values == 0 || values > MAX_VALUES {
            return Err(PotentialError::ValueCount { values });
        }
        let cells = dims.cell_count();
        Ok(Self {
            dims,
            values,
            queue: RingQueue::new(values * cells)?,
            mask: BitMask2D::new(cells, rule_count.max(1))?,
        })
    }

    /// Grid dimensions the propagator was built for.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Value count the propagator was built for.
    pub fn values(&self) -> usize {
        self.values
    }

    /// Most rules a single pass accepts.
    pub fn rule_capacity(&self) -> usize {
        self.mask.height()
    }

    /// Fill `field` with forward potentials seeded from `state`.
    ///
    /// Afterwards `field.get(state[i], i) == 0` for every cell, and any
    /// other entry is the least number of rule applications that can
    /// place that value at that cell, or [`UNREACHED`].
    pub fn compute_forward(
        &mut self,
        field: &mut PotentialField,
        state: &[u8],
        rules: &[Rule],
    ) -> Result<PassStats, PotentialError> {
        self.check(field, state.len(), rules)?;
        for (cell, &value) in state.iter().enumerate() {
            if value as usize >= self.values {
                return Err(PotentialError::ValueOutOfRange {
                    cell,
                    value,
                    values: self.values,
                });
            }
        }

        self.reset(field);
        for (cell, &value) in state.iter().enumerate() {
            self.seed(field, value as usize, cell);
        }
        Ok(self.run(field, rules, Direction::Forward))
    }

    /// Fill `field` with backward potentials seeded from a goal mask.
    ///
    /// Every value whose bit is set in `future[i]` gets potential 0 at
    /// cell `i`. Bits at or above the value count are ignored.
    pub fn compute_backward(
        &mut self,
        field: &mut PotentialField,
        future: &[u32],
        rules: &[Rule],
    ) -> Result<PassStats, PotentialError> {
        self.check(field, future.len(), rules)?;

        self.reset(field);
        let full = all_values_mask(self.values);
        for value in 0..self.values {
            for (cell, &goal) in future.iter().enumerate() {
                if goal & full & (1 << value) != 0 {
                    self.seed(field, value, cell);
                }
            }
        }
        Ok(self.run(field, rules, Direction::Backward))
    }

    fn check(
        &self,
        field: &PotentialField,
        len: usize,
        rules: &[Rule],
    ) -> Result<(), PotentialError> {
        let cells = self.dims.cell_count();
        if field.shape() != (self.values, cells) {
            return Err(PotentialError::FieldShape {
                expected: (self.values, cells),
                actual: field.shape(),
            });
        }
        if len != cells {
            return Err(PotentialError::StateLength {
                expected: cells,
                actual: len,
            });
        }
        if rules.len() > self.mask.height() {
            return Err(PotentialError::RuleCount {
                capacity: self.mask.height(),
                actual: rules.len(),
            });
        }
        if let Some((r, rule)) = rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.values() != self.values)
        {
            return Err(PotentialError::RuleValueCount {
                rule: RuleId(r as u32),
                expected: self.values,
                actual: rule.values(),
            });
        }
        Ok(())
    }

    fn reset(&mut self, field: &mut PotentialField) {
        self.queue.clear();
        self.mask.clear();
        field.fill(UNREACHED);
    }

    fn seed(&mut self, field: &mut PotentialField, value: usize, cell: usize) {
        field.set(value, cell, 0);
        let pos = self.dims.pos(cell);
        self.queue.push(QueueItem {
            value: value as u16,
            x: pos.x,
            y: pos.y,
            z: pos.z,
        });
    }

    fn run(&mut self, field: &mut PotentialField, rules: &[Rule], direction: Direction) -> PassStats {
        let mut stats = PassStats {
            seeds: self.queue.len(),
            ..PassStats::default()
        };
        let dims = self.dims;

        while let Some(item) = self.queue.try_pop() {
            stats.pops += 1;
            let value = item.value as usize;
            let t = field.get(value, dims.index(item.x, item.y, item.z));

            for (r, rule) in rules.iter().enumerate() {
                if !rule.is_in_place() {
                    continue;
                }
                let extent = rule.input_extent();
                let roles = direction.roles(rule);
                for shift in roles.shifts.for_value(value) {
                    let sx = item.x as i32 - shift.dx as i32;
                    let sy = item.y as i32 - shift.dy as i32;
                    let sz = item.z as i32 - shift.dz as i32;
                    if !dims.fits(sx, sy, sz, extent) {
                        continue;
                    }
                    let (sx, sy, sz) = (sx as u16, sy as u16, sz as u16);
                    let anchor = dims.index(sx, sy, sz);
                    if self.mask.get(anchor, r) {
                        continue;
                    }
                    if !satisfied(field, dims, (sx, sy, sz), extent, roles.matching, t) {
                        continue;
                    }
                    self.mask.set(anchor, r, true);
                    stats.applications += 1;
                    produce(
                        field,
                        &mut self.queue,
                        dims,
                        (sx, sy, sz),
                        extent,
                        roles.producing,
                        t + 1,
                    );
                }
            }
        }

        trace!(
            event = "potential_pass",
            direction = %direction,
            seeds = stats.seeds,
            pops = stats.pops,
            applications = stats.applications,
        );
        stats
    }
}

/// Whether every non-wildcard cell of `pattern` anchored at `anchor` is
/// reached at potential `<= t`.
fn satisfied(
    field: &PotentialField,
    dims: GridDims,
    anchor: (u16, u16, u16),
    extent: Extent,
    pattern: &[u8],
    t: i32,
) -> bool {
    extent.offsets().all(|(dx, dy, dz)| {
        let value = pattern[extent.index(dx, dy, dz)];
        if value == WILDCARD {
            return true;
        }
        let cell = dims.index(anchor.0 + dx, anchor.1 + dy, anchor.2 + dz);
        let p = field.get(value as usize, cell);
        p != UNREACHED && p <= t
    })
}

/// Write `next` into every unreached non-wildcard cell of `pattern`
/// anchored at `anchor`, queueing each new entry.
fn produce(
    field: &mut PotentialField,
    queue: &mut RingQueue<QueueItem>,
    dims: GridDims,
    anchor: (u16, u16, u16),
    extent: Extent,
    pattern: &[u8],
    next: i32,
) {
    for (dx, dy, dz) in extent.offsets() {
        let value = pattern[extent.index(dx, dy, dz)];
        if value == WILDCARD {
            continue;
        }
        let (x, y, z) = (anchor.0 + dx, anchor.1 + dy, anchor.2 + dz);
        let cell = dims.index(x, y, z);
        if field.get(value as usize, cell) == UNREACHED {
            field.set(value as usize, cell, next);
            queue.push(QueueItem {
                value: value as u16,
                x,
                y,
                z,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_rule(values: usize, from: u8, to: u8) -> Rule {
        Rule::builder()
            .values(values)
            .in_place(Extent::new(1, 1, 1))
            .input_values(&[from])
            .output(vec![to])
            .build()
            .unwrap()
    }

    fn grow_right() -> Rule {
        // "1 0" -> "1 1"
        Rule::builder()
            .values(2)
            .in_place(Extent::new(2, 1, 1))
            .input_values(&[1, 0])
            .output(vec![1, 1])
            .build()
            .unwrap()
    }

    #[test]
    fn zero_values_is_rejected() {
        let dims = GridDims::planar(2, 2).unwrap();
        assert_eq!(
            PotentialPropagator::new(dims, 0, 1).unwrap_err(),
            PotentialError::ValueCount { values: 0 }
        );
    }

    #[test]
    fn too_many_values_is_rejected() {
        let dims = GridDims::planar(1, 1).unwrap();
        assert_eq!(
            PotentialPropagator::new(dims, MAX_VALUES + 1, 0).unwrap_err(),
            PotentialError::ValueCount { values: 33 }
        );
        let mut prop = PotentialPropagator::new(dims, MAX_VALUES, 0).unwrap();
        let mut field = PotentialField::new(MAX_VALUES, 1);
        prop.compute_backward(&mut field, &[1 << 31], &[]).unwrap();
        assert_eq!(field.get(31, 0), 0);
        assert_eq!(field.get(0, 0), UNREACHED);
    }

    #[test]
    fn rule_slice_may_be_empty() {
        let dims = GridDims::planar(2, 1).unwrap();
        let mut prop = PotentialPropagator::new(dims, 2, 0).unwrap();
        let mut field = PotentialField::new(2, 2);
        let stats = prop.compute_forward(&mut field, &[0, 1], &[]).unwrap();
        assert_eq!(stats.applications, 0);
        assert_eq!(field.row(0), &[0, UNREACHED]);
        assert_eq!(field.row(1), &[UNREACHED, 0]);
    }

    #[test]
    fn rejects_mismatched_inputs() {
        let dims = GridDims::planar(2, 1).unwrap();
        let rules = [unit_rule(2, 0, 1)];
        let mut prop = PotentialPropagator::new(dims, 2, 1).unwrap();

        let mut wrong = PotentialField::new(3, 2);
        assert!(matches!(
            prop.compute_forward(&mut wrong, &[0, 0], &rules),
            Err(PotentialError::FieldShape { .. })
        ));

        let mut field = PotentialField::new(2, 2);
        assert_eq!(
            prop.compute_forward(&mut field, &[0], &rules),
            Err(PotentialError::StateLength {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            prop.compute_forward(&mut field, &[0, 4], &rules),
            Err(PotentialError::ValueOutOfRange {
                cell: 1,
                value: 4,
                values: 2
            })
        );

        let two = [unit_rule(2, 0, 1), unit_rule(2, 1, 0)];
        assert!(matches!(
            prop.compute_forward(&mut field, &[0, 0], &two),
            Err(PotentialError::RuleCount {
                capacity: 1,
                actual: 2
            })
        ));

        let foreign = [unit_rule(3, 0, 1)];
        assert!(matches!(
            prop.compute_backward(&mut field, &[1, 1], &foreign),
            Err(PotentialError::RuleValueCount { expected: 2, actual: 3, .. })
        ));
    }

    #[test]
    fn unit_chain_counts_steps() {
        let dims = GridDims::planar(1, 1).unwrap();
        let rules = [unit_rule(4, 0, 1), unit_rule(4, 1, 2), unit_rule(4, 2, 3)];
        let mut prop = PotentialPropagator::new(dims, 4, rules.len()).unwrap();
        let mut field = PotentialField::new(4, 1);
        let stats = prop.compute_forward(&mut field, &[0], &rules).unwrap();
        assert_eq!(field.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(stats.seeds, 1);
        assert_eq!(stats.pops, 4);
        assert_eq!(stats.applications, 3);
    }

    #[test]
    fn growth_spreads_one_cell_per_step() {
        let dims = GridDims::planar(5, 1).unwrap();
        let rules = [grow_right()];
        let mut prop = PotentialPropagator::new(dims, 2, 1).unwrap();
        let mut field = PotentialField::new(2, 5);
        prop.compute_forward(&mut field, &[1, 0, 0, 0, 0], &rules)
            .unwrap();
        assert_eq!(field.row(1), &[0, 1, 2, 3, 4]);
        assert_eq!(field.row(0), &[UNREACHED, 0, 0, 0, 0]);
    }

    #[test]
    fn backward_growth_marks_cells_one_step_from_goal() {
        let dims = GridDims::planar(5, 1).unwrap();
        let rules = [grow_right()];
        let mut prop = PotentialPropagator::new(dims, 2, 1).unwrap();
        let mut field = PotentialField::new(2, 5);
        prop.compute_backward(&mut field, &[0b10; 5], &rules)
            .unwrap();
        assert_eq!(field.row(1), &[0; 5]);
        // A 0 can only become a 1 as the right half of a placement.
        assert_eq!(field.row(0), &[UNREACHED, 1, 1, 1, 1]);
    }

    #[test]
    fn backward_ignores_bits_above_value_count() {
        let dims = GridDims::planar(1, 1).unwrap();
        let rules = [unit_rule(2, 0, 1)];
        let mut prop = PotentialPropagator::new(dims, 2, 1).unwrap();
        let mut field = PotentialField::new(2, 1);
        let stats = prop
            .compute_backward(&mut field, &[0b110], &rules)
            .unwrap();
        assert_eq!(stats.seeds, 1);
        assert_eq!(field.as_slice(), &[1, 0]);
    }

    #[test]
    fn resizing_rules_do_not_propagate() {
        let dims = GridDims::planar(2, 1).unwrap();
        let resize = Rule::builder()
            .values(2)
            .input_extent(Extent::new(1, 1, 1))
            .output_extent(Extent::new(2, 1, 1))
            .input_values(&[0])
            .output(vec![1, 1])
            .build()
            .unwrap();
        let mut prop = PotentialPropagator::new(dims, 2, 1).unwrap();
        let mut field = PotentialField::new(2, 2);
        let stats = prop.compute_forward(&mut field, &[0, 0], &[resize]).unwrap();
        assert_eq!(stats.applications, 0);
        assert_eq!(field.row(1), &[UNREACHED, UNREACHED]);
    }

    #[test]
    fn passes_do_not_carry_state() {
        let dims = GridDims::planar(3, 1).unwrap();
        let rules = [grow_right()];
        let mut prop = PotentialPropagator::new(dims, 2, 1).unwrap();
        let mut a = PotentialField::new(2, 3);
        prop.compute_forward(&mut a, &[1, 0, 0], &rules).unwrap();
        let mut b = PotentialField::new(2, 3);
        prop.compute_forward(&mut b, &[0, 0, 1], &rules).unwrap();
        prop.compute_forward(&mut b, &[1, 0, 0], &rules).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn three_dimensional_grids_propagate_along_z() {
        // "1 above 0" -> "1 above 1" along z.
        let rule = Rule::builder()
            .values(2)
            .in_place(Extent::new(1, 1, 2))
            .input_values(&[1, 0])
            .output(vec![1, 1])
            .build()
            .unwrap();
        let dims = GridDims::new(1, 1, 3).unwrap();
        let mut prop = PotentialPropagator::new(dims, 2, 1).unwrap();
        let mut field = PotentialField::new(2, 3);
        prop.compute_forward(&mut field, &[1, 0, 0], &[rule]).unwrap();
        assert_eq!(field.row(1), &[0, 1, 2]);
    }

    proptest! {
        #[test]
        fn own_value_is_always_zero(
            state in proptest::collection::vec(0u8..3, 12),
        ) {
            let dims = GridDims::planar(4, 3).unwrap();
            let rules = [unit_rule(3, 0, 1), unit_rule(3, 1, 2)];
            let mut prop = PotentialPropagator::new(dims, 3, 2).unwrap();
            let mut field = PotentialField::new(3, 12);
            prop.compute_forward(&mut field, &state, &rules).unwrap();
            for (cell, &v) in state.iter().enumerate() {
                prop_assert_eq!(field.get(v as usize, cell), 0);
            }
        }

        #[test]
        fn unit_chain_matches_closed_form(
            state in proptest::collection::vec(0u8..4, 6),
        ) {
            let dims = GridDims::planar(3, 2).unwrap();
            let rules = [unit_rule(4, 0, 1), unit_rule(4, 1, 2), unit_rule(4, 2, 3)];
            let mut prop = PotentialPropagator::new(dims, 4, 3).unwrap();
            let mut field = PotentialField::new(4, 6);
            prop.compute_forward(&mut field, &state, &rules).unwrap();
            for (cell, &s) in state.iter().enumerate() {
                for v in 0..4u8 {
                    let expected = if v >= s { (v - s) as i32 } else { UNREACHED };
                    prop_assert_eq!(field.get(v as usize, cell), expected);
                }
            }
        }
    }
}
