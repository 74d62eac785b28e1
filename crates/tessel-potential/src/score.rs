//! Reduce a potential field to a single cost estimate.
//!
//! Both scores return `None` when some cell cannot reach the goal at all.
//! Infeasibility is an ordinary outcome: callers use it to discard a
//! candidate state.

use crate::field::PotentialField;

/// Sum over cells of the cheapest goal-consistent forward potential.
///
/// For cell `i`, the candidates are the values whose bit is set in
/// `future[i]`; unreached candidates are ignored. Returns `None` if some
/// cell has no reached candidate.
///
/// `future` must hold one mask per cell of `field`.
pub fn forward_score(field: &PotentialField, future: &[u32]) -> Option<u32> {
    debug_assert_eq!(future.len(), field.cells());
    let mut sum = 0u32;
    for (cell, &goal) in future.iter().enumerate() {
        let best = (0..field.values())
            .filter(|&v| goal & 1u32.checked_shl(v as u32).unwrap_or(0) != 0)
            .filter_map(|v| field.distance(v, cell))
            .min()?;
        sum += best;
    }
    Some(sum)
}

/// Sum over cells of the backward potential of each cell's present value.
///
/// Returns `None` if any present value is unreached.
///
/// `present` must hold one value per cell of `field`.
pub fn backward_score(field: &PotentialField, present: &[u8]) -> Option<u32> {
    debug_assert_eq!(present.len(), field.cells());
    present
        .iter()
        .enumerate()
        .try_fold(0u32, |sum, (cell, &v)| {
            field.distance(v as usize, cell).map(|d| sum + d)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::UNREACHED;
    use proptest::prelude::*;

    fn field(values: usize, rows: &[&[i32]]) -> PotentialField {
        let cells = rows[0].len();
        let mut f = PotentialField::new(values, cells);
        for (v, row) in rows.iter().enumerate() {
            for (i, &p) in row.iter().enumerate() {
                f.set(v, i, p);
            }
        }
        f
    }

    #[test]
    fn forward_takes_cheapest_goal_value_per_cell() {
        let f = field(3, &[&[0, 4], &[2, UNREACHED], &[1, 3]]);
        // Cell 0 may be 1 or 2 (best 1); cell 1 may be 0, 1 or 2 (best 3).
        assert_eq!(forward_score(&f, &[0b110, 0b110]), Some(1 + 3));
        assert_eq!(forward_score(&f, &[0b001, 0b111]), Some(3));
    }

    #[test]
    fn forward_is_none_when_a_cell_has_no_reached_candidate() {
        let f = field(2, &[&[0, 0], &[1, UNREACHED]]);
        assert_eq!(forward_score(&f, &[0b10, 0b10]), None);
        assert_eq!(forward_score(&f, &[0b10, 0b00]), None);
    }

    #[test]
    fn forward_ignores_rows_beyond_the_mask_width() {
        let mut f = PotentialField::new(40, 1);
        f.set(35, 0, 0);
        f.set(1, 0, 2);
        assert_eq!(forward_score(&f, &[0b10]), Some(2));
    }

    #[test]
    fn backward_sums_present_values() {
        let f = field(2, &[&[2, UNREACHED], &[0, 0]]);
        assert_eq!(backward_score(&f, &[0, 1]), Some(2));
        assert_eq!(backward_score(&f, &[1, 1]), Some(0));
        assert_eq!(backward_score(&f, &[1, 0]), None);
    }

    #[test]
    fn backward_treats_out_of_range_values_as_unreached() {
        let f = field(2, &[&[0], &[0]]);
        assert_eq!(backward_score(&f, &[7]), None);
    }

    proptest! {
        #[test]
        fn forward_is_none_iff_some_cell_lacks_a_candidate(
            data in proptest::collection::vec(-1i32..5, 12),
            future in proptest::collection::vec(0u32..8, 4),
        ) {
            let mut f = PotentialField::new(3, 4);
            for v in 0..3 {
                for i in 0..4 {
                    f.set(v, i, data[v * 4 + i]);
                }
            }
            let infeasible = (0..4).any(|i| {
                (0..3).all(|v| future[i] & (1 << v) == 0 || f.get(v, i) < 0)
            });
            let score = forward_score(&f, &future);
            prop_assert_eq!(score.is_none(), infeasible);
            if let Some(s) = score {
                let expected: i32 = (0..4)
                    .map(|i| {
                        (0..3)
                            .filter(|&v| future[i] & (1 << v) != 0 && f.get(v, i) >= 0)
                            .map(|v| f.get(v, i))
                            .min()
                            .unwrap()
                    })
                    .sum();
                prop_assert_eq!(s as i32, expected);
            }
        }
    }
}
