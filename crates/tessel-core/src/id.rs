//! Strongly-typed identifiers and the [`Value`] type alias.

use std::fmt;

/// A cell value. Grids store one `Value` per cell.
pub type Value = u8;

/// Pattern byte meaning "any value" in an input pattern and
/// "leave unchanged" in an output pattern.
pub const WILDCARD: Value = 0xFF;

/// Largest supported value count. Value sets are `u32` bitmasks.
pub const MAX_VALUES: usize = 32;

/// Bitmask with one bit set for each of `values` values.
///
/// `values` must be at most [`MAX_VALUES`].
pub fn all_values_mask(values: usize) -> u32 {
    debug_assert!(values <= MAX_VALUES);
    if values >= MAX_VALUES {
        u32::MAX
    } else {
        (1u32 << values) - 1
    }
}

/// Identifies a rule by its position in the caller's rule slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub u32);

impl RuleId {
    /// The rule's index as a `usize`, for slice addressing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RuleId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a board (search-tree node) inside a board arena.
///
/// Boards are never freed individually, so a `BoardId` stays valid
/// for the lifetime of the arena that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardId(pub u32);

impl BoardId {
    /// The board's slot index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BoardId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_inner_value() {
        assert_eq!(RuleId(7).to_string(), "7");
        assert_eq!(BoardId(42).to_string(), "42");
    }

    #[test]
    fn ids_convert_from_u32() {
        assert_eq!(RuleId::from(3).index(), 3);
        assert_eq!(BoardId::from(9).index(), 9);
    }

    #[test]
    fn all_values_mask_covers_exactly_the_values() {
        assert_eq!(all_values_mask(1), 0b1);
        assert_eq!(all_values_mask(3), 0b111);
        assert_eq!(all_values_mask(32), u32::MAX);
    }

    #[test]
    fn board_ids_order_by_slot() {
        assert!(BoardId(1) < BoardId(2));
    }
}
