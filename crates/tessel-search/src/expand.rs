//! Child-state generation for the search driver.
//!
//! Two expansion policies:
//!
//! - [`for_each_single_child`]: one child per matching placement, in
//!   `y`, `x`, rule order.
//! - [`for_each_maximal_child`]: one child per maximal set of pairwise
//!   non-overlapping matching placements, all applied together.
//!
//! Children are handed to a visitor as a borrowed scratch buffer that is
//! overwritten by the next child. The visitor returns
//! [`ControlFlow::Break`] to stop expansion early.

use std::ops::ControlFlow;

use tessel_core::{GridDims, RuleId};
use tessel_rule::Rule;

use crate::direct::{
    inside_rule, match_and_apply, match_rule, output_fits, rule_overlap, write_output, Amounts,
};

/// A rule anchored at a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Index into the rule slice.
    pub rule: RuleId,
    /// Anchor column.
    pub x: u16,
    /// Anchor row.
    pub y: u16,
}

/// Every placement whose input matches `state` and whose output box fits
/// the grid, in `y`, `x`, rule order.
pub fn matching_placements(rules: &[Rule], dims: GridDims, state: &[u8]) -> Vec<Placement> {
    let mut out = Vec::new();
    for y in 0..dims.my() {
        for x in 0..dims.mx() {
            for (r, rule) in rules.iter().enumerate() {
                if match_rule(rule, x, y, state, dims) && output_fits(rule, x, y, dims) {
                    out.push(Placement {
                        rule: RuleId(r as u32),
                        x,
                        y,
                    });
                }
            }
        }
    }
    out
}

/// Visit each state reachable from `parent` by a single placement.
pub fn for_each_single_child<B, F>(
    rules: &[Rule],
    dims: GridDims,
    parent: &[u8],
    scratch: &mut Vec<u8>,
    mut visit: F,
) -> ControlFlow<B>
where
    F: FnMut(&[u8]) -> ControlFlow<B>,
{
    scratch.resize(parent.len(), 0);
    for y in 0..dims.my() {
        for x in 0..dims.mx() {
            for rule in rules {
                if match_and_apply(rule, x, y, parent, scratch, dims) {
                    visit(scratch)?;
                }
            }
        }
    }
    ControlFlow::Continue(())
}

/// Visit each state reachable from `parent` by applying a maximal set of
/// non-overlapping matching placements at once.
///
/// At every branching step the cell covered by the most remaining
/// placements is chosen ([`Amounts::max_pos_index`]) and the search
/// branches over the placements covering it; each choice removes every
/// placement overlapping it. A branch ends when no placement remains.
/// Nothing is visited when no placement matches.
pub fn for_each_maximal_child<B, F>(
    rules: &[Rule],
    dims: GridDims,
    parent: &[u8],
    amounts: &mut Amounts,
    scratch: &mut Vec<u8>,
    mut visit: F,
) -> ControlFlow<B>
where
    F: FnMut(&[u8]) -> ControlFlow<B>,
{
    amounts.clear();
    let tiles = matching_placements(rules, dims, parent);
    for t in &tiles {
        amounts.incre(&rules[t.rule.index()], t.x, t.y);
    }
    scratch.resize(parent.len(), 0);
    let mut walk = MaximalWalk {
        rules,
        dims,
        parent,
        live: vec![true; tiles.len()],
        tiles,
        solution: Vec::new(),
        amounts,
        scratch,
    };
    walk.enumerate(&mut visit)
}

struct MaximalWalk<'a> {
    rules: &'a [Rule],
    dims: GridDims,
    parent: &'a [u8],
    tiles: Vec<Placement>,
    live: Vec<bool>,
    solution: Vec<Placement>,
    amounts: &'a mut Amounts,
    scratch: &'a mut Vec<u8>,
}

impl MaximalWalk<'_> {
    fn rule(&self, p: Placement) -> &Rule {
        &self.rules[p.rule.index()]
    }

    fn enumerate<B, F>(&mut self, visit: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&[u8]) -> ControlFlow<B>,
    {
        let Some(cell) = self.amounts.max_pos_index() else {
            if self.solution.is_empty() {
                return ControlFlow::Continue(());
            }
            self.scratch.copy_from_slice(self.parent);
            for &p in &self.solution {
                write_output(&self.rules[p.rule.index()], p.x, p.y, self.scratch, self.dims);
            }
            return visit(self.scratch);
        };
        let mx = self.dims.mx() as usize;
        let (cx, cy) = ((cell % mx) as u16, (cell / mx) as u16);

        let cover: Vec<Placement> = self
            .tiles
            .iter()
            .zip(&self.live)
            .filter(|&(&t, &live)| live && inside_rule(self.rule(t), cx, cy, t.x, t.y))
            .map(|(&t, _)| t)
            .collect();

        for chosen in cover {
            self.solution.push(chosen);
            let intersecting: Vec<usize> = (0..self.tiles.len())
                .filter(|&l| {
                    let t = self.tiles[l];
                    self.live[l]
                        && rule_overlap(self.rule(chosen), chosen.x, chosen.y, self.rule(t), t.x, t.y)
                })
                .collect();
            for &l in &intersecting {
                self.live[l] = false;
                let t = self.tiles[l];
                self.amounts.decre(&self.rules[t.rule.index()], t.x, t.y);
            }

            self.enumerate(visit)?;

            for &l in &intersecting {
                self.live[l] = true;
                let t = self.tiles[l];
                self.amounts.incre(&self.rules[t.rule.index()], t.x, t.y);
            }
            self.solution.pop();
        }
        ControlFlow::Continue(())
    }
}
