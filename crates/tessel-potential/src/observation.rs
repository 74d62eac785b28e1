//! Observations: map visible values to a canonical value plus a goal set.
//!
//! An observed value `v` with `Observation { from, to }` means: a cell
//! currently showing `v` is rewritten to `from` in the working state,
//! and must end in one of the values of the `to` bitmask. Unobserved
//! values must stay as they are.

use tessel_core::{all_values_mask, PotentialError};

/// What a visible value stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Canonical value written into the working state.
    pub from: u8,
    /// Bitmask of goal-consistent values.
    pub to: u32,
}

/// One optional [`Observation`] per value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservationSet {
    entries: Vec<Option<Observation>>,
}

impl ObservationSet {
    /// A set over `values` values with nothing observed.
    pub fn new(values: usize) -> Self {
        Self {
            entries: vec![None; values],
        }
    }

    /// Record an observation for `value`.
    ///
    /// # Errors
    ///
    /// Returns `Err(PotentialError::InvalidObservation)` if `value` or
    /// `from` lies outside the value range, or `to` is empty or names
    /// values outside it.
    pub fn observe(&mut self, value: u8, from: u8, to: u32) -> Result<&mut Self, PotentialError> {
        let values = self.entries.len();
        let full = all_values_mask(values);
        if value as usize >= values || from as usize >= values || to == 0 || to & !full != 0 {
            return Err(PotentialError::InvalidObservation {
                value,
                from,
                to,
                values,
            });
        }
        self.entries[value as usize] = Some(Observation { from, to });
        Ok(self)
    }

    /// The observation for `value`, if any.
    pub fn get(&self, value: u8) -> Option<Observation> {
        self.entries.get(value as usize).copied().flatten()
    }

    /// Value count.
    pub fn values(&self) -> usize {
        self.entries.len()
    }

    /// Whether no value is observed.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Build the goal mask and canonicalize `state` in place.
    ///
    /// For each cell holding an observed value, `future[i]` becomes the
    /// observation's `to` and `state[i]` its `from`; other cells get
    /// `future[i] = 1 << state[i]`. Returns `false` if some observed
    /// value occurs nowhere in `state`, in which case the goal is not
    /// meaningful.
    pub fn compute_future_set_present(&self, state: &mut [u8], future: &mut [u32]) -> bool {
        debug_assert_eq!(state.len(), future.len());
        let mut seen = vec![false; self.entries.len()];
        for (cell, goal) in state.iter_mut().zip(future.iter_mut()) {
            let value = *cell;
            if let Some(flag) = seen.get_mut(value as usize) {
                *flag = true;
            }
            match self.get(value) {
                Some(obs) => {
                    *cell = obs.from;
                    *goal = obs.to;
                }
                None => *goal = 1u32.checked_shl(u32::from(value)).unwrap_or(0),
            }
        }
        self.entries
            .iter()
            .zip(&seen)
            .all(|(obs, &seen)| obs.is_none() || seen)
    }
}

/// Whether every cell's present value is in its goal mask.
pub fn is_goal_reached(present: &[u8], future: &[u32]) -> bool {
    present
        .iter()
        .zip(future)
        .all(|(&v, &goal)| goal & 1u32.checked_shl(u32::from(v)).unwrap_or(0) != 0)
}
