//! Benchmark profiles for the Tessel rewrite search.
//!
//! - [`growth_profile`]: a square grid where value 1 spreads over value 0
//!   around a few walls of value 2
//! - [`init_seed_cells`]: deterministic seed placement

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessel_core::GridDims;
use tessel_rule::Rule;
use tessel_test_utils::{growth_rules, uniform_goal};

/// Value count used by every profile: empty, grown, wall.
pub const PROFILE_VALUES: usize = 3;

/// A grid, its rules, and a start/goal pair.
#[derive(Clone, Debug)]
pub struct Profile {
    /// Grid dimensions.
    pub dims: GridDims,
    /// Rules over [`PROFILE_VALUES`] values.
    pub rules: Vec<Rule>,
    /// Initial state.
    pub present: Vec<u8>,
    /// Goal mask per cell.
    pub future: Vec<u32>,
}

/// Build a `side`×`side` growth profile.
///
/// `seeds` cells start as value 1 and every tenth cell along the middle
/// row is a wall. The goal accepts 1 on open cells and 2 on walls.
pub fn growth_profile(side: u16, seeds: usize, seed: u64) -> Profile {
    let dims = GridDims::planar(side, side).expect("side must be positive");
    let cells = dims.cell_count();
    let mut present = vec![0u8; cells];
    let wall_row = side / 2;
    for x in (0..side).step_by(10).skip(1) {
        present[dims.index(x, wall_row, 0)] = 2;
    }
    for cell in init_seed_cells(&present, seeds, seed) {
        present[cell] = 1;
    }
    let mut future = uniform_goal(dims, 1);
    for (goal, &v) in future.iter_mut().zip(&present) {
        if v == 2 {
            *goal = 1 << 2;
        }
    }
    Profile {
        dims,
        rules: growth_rules(PROFILE_VALUES, 1, 0),
        present,
        future,
    }
}

/// Pick `n` distinct empty (value 0) cells of `state` from `seed`.
///
/// Returns fewer than `n` cells only if `state` has fewer empty cells.
pub fn init_seed_cells(state: &[u8], n: usize, seed: u64) -> Vec<usize> {
    let cells = state.len();
    let mut picked = Vec::with_capacity(n);
    let empty = state.iter().filter(|&&v| v == 0).count();
    for i in 0..n.min(empty) {
        let mut pos = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i as u64 * 1442695040888963407)
            % cells as u64) as usize;
        // Step forward past walls and earlier picks.
        while state[pos] != 0 || picked.contains(&pos) {
            pos = (pos + 1) % cells;
        }
        picked.push(pos);
    }
    picked
}
