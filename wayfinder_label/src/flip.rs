// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded flip search over the label conflict graph.
//!
//! Nodes are confirmed labels; a label has an edge to every confirmed label
//! its flipped rectangle would collide with. A label has exactly one
//! alternative (its opposite side), so every conflicting label is forced to
//! flip and the search never branches: it either reaches a consistent set of
//! flips within the depth limit or fails.

use hashbrown::{HashMap, HashSet};
use kurbo::Rect;
use smallvec::SmallVec;

use crate::backend::{Backend, overlaps};
use crate::solver::{LabelSide, Layout};

/// Labels to move, with their new side and rectangle.
pub(crate) type FlipPlan = SmallVec<[(usize, LabelSide, Rect); 4]>;

/// Searches for flips of confirmed labels that free `rect` for `candidate`.
///
/// `rect` must already be clear of hit boxes. Returns `None` when some
/// forced flip is blocked by a hit box, collides with the candidate or
/// another planned flip, or lies deeper than the configured depth.
pub(crate) fn plan_flips<K, B: Backend>(
    layout: &Layout<'_, K, B>,
    candidate: usize,
    rect: Rect,
) -> Option<FlipPlan> {
    let max_depth = layout.config.max_flip_depth;
    let mut planned: HashMap<usize, (LabelSide, Rect)> = HashMap::new();
    let mut visited: HashSet<usize> = HashSet::new();
    visited.insert(candidate);

    // Reversed so the lowest slot is explored first.
    let mut worklist: SmallVec<[(usize, usize); 8]> = layout
        .label_conflicts(rect)
        .into_iter()
        .rev()
        .map(|slot| (slot, 1))
        .collect();

    while let Some((slot, depth)) = worklist.pop() {
        if !visited.insert(slot) {
            continue;
        }
        if depth > max_depth {
            return None;
        }
        let side = layout.sides[slot]?.opposite();
        let moved = layout.label_rect(slot, side);
        if layout.pin_blocked(slot, moved) {
            return None;
        }
        let probe = layout.probe(moved);
        if overlaps(probe, rect) || planned.values().any(|&(_, r)| overlaps(probe, r)) {
            return None;
        }
        for next in layout.label_conflicts(moved).into_iter().rev() {
            if next != slot && !visited.contains(&next) {
                worklist.push((next, depth + 1));
            }
        }
        planned.insert(slot, (side, moved));
    }

    verify(layout, candidate, rect, &planned).then(|| {
        let mut plan: FlipPlan = planned
            .into_iter()
            .map(|(slot, (side, moved))| (slot, side, moved))
            .collect();
        plan.sort_unstable_by_key(|&(slot, _, _)| slot);
        plan
    })
}

/// Checks the final arrangement against hit boxes, unmoved labels and itself.
fn verify<K, B: Backend>(
    layout: &Layout<'_, K, B>,
    candidate: usize,
    rect: Rect,
    planned: &HashMap<usize, (LabelSide, Rect)>,
) -> bool {
    let blocked_by_unmoved = |slot: usize, r: Rect| {
        let mut hit = false;
        layout.labels.visit_rect(layout.probe(r), |other| {
            if other != slot && !planned.contains_key(&other) {
                hit = true;
            }
        });
        hit
    };

    if layout.pin_blocked(candidate, rect) || blocked_by_unmoved(candidate, rect) {
        return false;
    }
    planned.iter().all(|(&slot, &(_, moved))| {
        let probe = layout.probe(moved);
        !layout.pin_blocked(slot, moved)
            && !blocked_by_unmoved(slot, moved)
            && !overlaps(probe, rect)
            && planned
                .iter()
                .all(|(&other, &(_, r))| other == slot || !overlaps(probe, r))
    })
}
