//! Search-tree nodes and their append-only arena.
//!
//! A [`Board`] is a fixed header (scores, depth, parent link). Its grid
//! state lives in the owning [`BoardArena`]'s flat payload buffer at
//! `id * state_len`. Parent links are [`BoardId`]s into the same arena,
//! so no board owns another and the arena frees everything at once.
//!
//! Depth strictly increases along parent links: a child is created at
//! `parent.depth + 1` and reparenting only ever moves a board under a
//! shallower one. Walking parents from any board therefore terminates
//! at a root.

use tessel_core::BoardId;

/// Base of the depth-only rank.
const DEPTH_RANK_BASE: f64 = 1000.0;

/// Weight of the tie-breaking jitter term in [`rank`].
const JITTER_WEIGHT: f64 = 0.0001;

/// A search-tree node header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    bd: u32,
    fd: u32,
    depth: u32,
    parent: Option<BoardId>,
}

impl Board {
    /// Backward score: estimated steps from this state to the goal.
    pub fn bd(&self) -> u32 {
        self.bd
    }

    /// Forward score: estimated steps to produce the goal from here.
    pub fn fd(&self) -> u32 {
        self.fd
    }

    /// Distance from the root along parent links. Roots have depth 0.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The parent board, `None` for a root.
    pub fn parent(&self) -> Option<BoardId> {
        self.parent
    }

    /// Shorthand for [`rank`]`(self, jitter, coeff)`.
    pub fn rank(&self, jitter: f64, coeff: f64) -> f64 {
        rank(self, jitter, coeff)
    }
}

/// Exploration priority of a board; lower is explored first.
///
/// With `coeff < 0` the rank depends on depth alone: it is
/// `1000 - depth`, and since lower rank pops first this favours deeper
/// boards. Otherwise it is `fd + bd + 2 * coeff * depth`, trading
/// remaining cost against path length. `jitter` (in `[0, 1)`) adds at
/// most `0.0001` to break ties between equal ranks.
pub fn rank(board: &Board, jitter: f64, coeff: f64) -> f64 {
    let depth = board.depth as f64;
    let primary = if coeff < 0.0 {
        DEPTH_RANK_BASE - depth
    } else {
        board.fd as f64 + board.bd as f64 + 2.0 * coeff * depth
    };
    primary + JITTER_WEIGHT * jitter
}

/// Append-only storage for boards and their grid states.
#[derive(Clone, Debug)]
pub struct BoardArena {
    boards: Vec<Board>,
    states: Vec<u8>,
    state_len: usize,
}

impl BoardArena {
    /// Create an empty arena for states of `state_len` cells.
    pub fn new(state_len: usize) -> Self {
        Self {
            boards: Vec::new(),
            states: Vec::new(),
            state_len,
        }
    }

    /// Store a board holding `state`, linked under `parent`.
    ///
    /// Depth is `parent.depth + 1`, or 0 without a parent.
    ///
    /// # Panics
    ///
    /// Panics if `state.len()` differs from the arena's state length.
    pub fn insert(&mut self, state: &[u8], parent: Option<BoardId>, bd: u32, fd: u32) -> BoardId {
        assert_eq!(
            state.len(),
            self.state_len,
            "board state has {} cells, arena stores {}",
            state.len(),
            self.state_len
        );
        let depth = parent.map_or(0, |p| self.board(p).depth + 1);
        let id = BoardId(self.boards.len() as u32);
        self.boards.push(Board {
            bd,
            fd,
            depth,
            parent,
        });
        self.states.extend_from_slice(state);
        id
    }

    /// The header of board `id`.
    pub fn board(&self, id: BoardId) -> &Board {
        &self.boards[id.index()]
    }

    /// The grid state of board `id`.
    pub fn state(&self, id: BoardId) -> &[u8] {
        let start = id.index() * self.state_len;
        &self.states[start..start + self.state_len]
    }

    /// Move `id` under `parent`, setting its depth to `parent.depth + 1`.
    ///
    /// Descendants of `id` keep their recorded depths.
    pub fn set_parent(&mut self, id: BoardId, parent: BoardId) {
        let depth = self.board(parent).depth + 1;
        let board = &mut self.boards[id.index()];
        board.parent = Some(parent);
        board.depth = depth;
    }

    /// Board ids from the root down to `id`, inclusive.
    pub fn path(&self, id: BoardId) -> Vec<BoardId> {
        let mut path = vec![id];
        let mut cursor = self.board(id).parent;
        while let Some(p) = cursor {
            path.push(p);
            cursor = self.board(p).parent;
        }
        path.reverse();
        path
    }

    /// Grid states from the root down to `id`, inclusive.
    pub fn trajectory(&self, id: BoardId) -> Vec<Vec<u8>> {
        self.path(id)
            .into_iter()
            .map(|b| self.state(b).to_vec())
            .collect()
    }

    /// Number of boards stored.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Whether the arena holds no boards.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Cells per stored state.
    pub fn state_len(&self) -> usize {
        self.state_len
    }

    /// Payload bytes in use.
    pub fn memory_bytes(&self) -> usize {
        self.states.len() + self.boards.len() * std::mem::size_of::<Board>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn root_has_depth_zero() {
        let mut arena = BoardArena::new(2);
        let root = arena.insert(&[0, 1], None, 3, 4);
        let b = arena.board(root);
        assert_eq!(b.depth(), 0);
        assert_eq!(b.parent(), None);
        assert_eq!((b.bd(), b.fd()), (3, 4));
        assert_eq!(arena.state(root), &[0, 1]);
    }

    #[test]
    fn children_sit_one_below_parent() {
        let mut arena = BoardArena::new(1);
        let root = arena.insert(&[0], None, 2, 2);
        let a = arena.insert(&[1], Some(root), 1, 1);
        let b = arena.insert(&[2], Some(a), 0, 0);
        assert_eq!(arena.board(b).depth(), 2);
        assert_eq!(arena.path(b), vec![root, a, b]);
        assert_eq!(arena.trajectory(b), vec![vec![0], vec![1], vec![2]]);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn reparenting_updates_depth() {
        let mut arena = BoardArena::new(1);
        let root = arena.insert(&[0], None, 0, 0);
        let a = arena.insert(&[1], Some(root), 0, 0);
        let b = arena.insert(&[2], Some(a), 0, 0);
        arena.set_parent(b, root);
        assert_eq!(arena.board(b).depth(), 1);
        assert_eq!(arena.path(b), vec![root, b]);
    }

    #[test]
    #[should_panic(expected = "arena stores 2")]
    fn wrong_state_length_panics() {
        let mut arena = BoardArena::new(2);
        arena.insert(&[0], None, 0, 0);
    }

    #[test]
    fn rank_combines_scores_and_depth() {
        let mut arena = BoardArena::new(1);
        let root = arena.insert(&[0], None, 5, 5);
        let child = arena.insert(&[1], Some(root), 3, 4);
        let b = arena.board(child);
        assert_eq!(b.rank(0.0, 0.5), 3.0 + 4.0 + 1.0);
        assert_eq!(b.rank(0.0, 0.0), 7.0);
        assert_eq!(b.rank(0.0, -1.0), 999.0);
    }

    #[test]
    fn jitter_never_dominates() {
        let mut arena = BoardArena::new(1);
        let a = arena.insert(&[0], None, 1, 1);
        let b = arena.insert(&[0], None, 1, 2);
        assert!(arena.board(a).rank(0.999_999, 0.5) < arena.board(b).rank(0.0, 0.5));
    }

    proptest! {
        #[test]
        fn depth_equals_chain_length(n in 0usize..40) {
            let mut arena = BoardArena::new(1);
            let mut id = arena.insert(&[0], None, 0, 0);
            for _ in 0..n {
                id = arena.insert(&[0], Some(id), 0, 0);
            }
            prop_assert_eq!(arena.board(id).depth() as usize, n);
            prop_assert_eq!(arena.path(id).len(), n + 1);
        }

        #[test]
        fn depth_rank_strictly_decreases_with_depth(
            coeff in -10.0f64..-0.001,
            n in 1usize..30,
        ) {
            let mut arena = BoardArena::new(1);
            let mut prev = arena.insert(&[0], None, 9, 9);
            for _ in 0..n {
                let next = arena.insert(&[0], Some(prev), 0, 0);
                prop_assert!(arena.board(next).rank(0.0, coeff) < arena.board(prev).rank(0.0, coeff));
                prev = next;
            }
        }
    }
}
