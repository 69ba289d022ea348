// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for the rectangle indexes used during placement.

use core::fmt::Debug;

use kurbo::Rect;
use smallvec::SmallVec;

/// Returns `true` if the interiors of `a` and `b` intersect.
///
/// Rectangles that only share an edge do not overlap.
#[must_use]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Slot-addressed rectangle index.
///
/// Slots are caller-chosen `usize` ids (the solver uses candidate indices).
/// Queries report every slot whose rectangle [`overlaps`] the query, in
/// ascending slot order.
pub trait Backend: Debug {
    /// Inserts or replaces the rectangle of `slot`.
    fn insert(&mut self, slot: usize, rect: Rect);

    /// Replaces the rectangle of an existing slot.
    fn update(&mut self, slot: usize, rect: Rect);

    /// Removes a slot.
    fn remove(&mut self, slot: usize);

    /// Removes all slots.
    fn clear(&mut self);

    /// Visits slots whose rectangle overlaps `rect`.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, f: F);

    /// Collects the slots whose rectangle overlaps `rect`.
    fn query_rect(&self, rect: Rect) -> SmallVec<[usize; 8]> {
        let mut out = SmallVec::new();
        self.visit_rect(rect, |slot| out.push(slot));
        out
    }

    /// Returns `true` if any slot overlaps `rect`.
    fn any_overlap(&self, rect: Rect) -> bool {
        let mut hit = false;
        self.visit_rect(rect, |_| hit = true);
        hit
    }
}
