//! Pattern roles per propagation direction.
//!
//! Forward passes match a rule's input and produce its output; backward
//! passes do the opposite. Rather than branching on the direction inside
//! the BFS, the propagator asks [`Direction::roles`] once per rule for
//! the pattern to check, the pattern to write, and the shift index that
//! seeds candidate placements.

use std::fmt;

use tessel_rule::{Rule, ShiftIndex};

/// Which way a propagation pass runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Seeded from the current state; input matches, output produces.
    Forward,
    /// Seeded from the goal mask; output matches, input produces.
    Backward,
}

/// The patterns a rule plays in one direction.
#[derive(Clone, Copy, Debug)]
pub struct PatternRoles<'r> {
    /// Cells whose potentials must all be reached, and not exceed the
    /// current layer, for a placement to fire.
    pub matching: &'r [u8],
    /// Cells whose unreached potentials a firing placement sets.
    pub producing: &'r [u8],
    /// Offsets at which a discovered value can complete `matching`.
    pub shifts: &'r ShiftIndex,
}

impl Direction {
    /// Select the pattern roles of `rule` for this direction.
    pub fn roles(self, rule: &Rule) -> PatternRoles<'_> {
        match self {
            Self::Forward => PatternRoles {
                matching: rule.binput(),
                producing: rule.output(),
                shifts: rule.input_shifts(),
            },
            Self::Backward => PatternRoles {
                matching: rule.output(),
                producing: rule.binput(),
                shifts: rule.output_shifts(),
            },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::Extent;

    #[test]
    fn roles_swap_between_directions() {
        let rule = Rule::builder()
            .values(3)
            .in_place(Extent::new(1, 1, 1))
            .input_values(&[0])
            .output(vec![2])
            .build()
            .unwrap();
        let fwd = Direction::Forward.roles(&rule);
        assert_eq!(fwd.matching, &[0]);
        assert_eq!(fwd.producing, &[2]);
        assert_eq!(fwd.shifts.for_value(0).len(), 1);

        let bwd = Direction::Backward.roles(&rule);
        assert_eq!(bwd.matching, &[2]);
        assert_eq!(bwd.producing, &[0]);
        assert_eq!(bwd.shifts.for_value(2).len(), 1);
        assert!(bwd.shifts.for_value(0).is_empty());
    }

    #[test]
    fn direction_displays_lowercase() {
        assert_eq!(Direction::Forward.to_string(), "forward");
        assert_eq!(Direction::Backward.to_string(), "backward");
    }
}
