//! Zobrist hashing of grid states.
//!
//! One random `u64` key per `(value, cell)` pair; a state hashes to the
//! XOR of the keys of its cells. Keys come from the caller's RNG so a
//! seeded search hashes identically on every run.

use rand::Rng;

/// Random keys for every `(value, cell)` pair.
#[derive(Clone, Debug)]
pub struct ZobristTable {
    cells: usize,
    keys: Vec<u64>,
}

impl ZobristTable {
    /// Draw `values × cells` keys from `rng`.
    pub fn new<R: Rng>(values: usize, cells: usize, rng: &mut R) -> Self {
        let keys = (0..values * cells).map(|_| rng.random::<u64>()).collect();
        Self { cells, keys }
    }

    /// Hash of `state`, which must hold one in-range value per cell.
    pub fn hash(&self, state: &[u8]) -> u64 {
        debug_assert_eq!(state.len(), self.cells);
        state
            .iter()
            .enumerate()
            .fold(0, |h, (i, &v)| h ^ self.keys[v as usize * self.cells + i])
    }
}

/// Byte equality of two states, used to resolve hash collisions.
pub fn states_equal(a: &[u8], b: &[u8]) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table() -> ZobristTable {
        ZobristTable::new(3, 4, &mut ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn same_seed_same_hashes() {
        let (a, b) = (table(), table());
        assert_eq!(a.hash(&[0, 1, 2, 0]), b.hash(&[0, 1, 2, 0]));
    }

    #[test]
    fn single_cell_change_changes_hash() {
        let t = table();
        assert_ne!(t.hash(&[0, 1, 2, 0]), t.hash(&[0, 1, 2, 1]));
        assert_ne!(t.hash(&[0, 0, 0, 0]), t.hash(&[1, 0, 0, 0]));
    }

    #[test]
    fn hash_is_position_sensitive() {
        let t = table();
        assert_ne!(t.hash(&[1, 0, 0, 0]), t.hash(&[0, 1, 0, 0]));
    }

    #[test]
    fn equality_is_bytewise() {
        assert!(states_equal(&[1, 2], &[1, 2]));
        assert!(!states_equal(&[1, 2], &[2, 1]));
    }
}
