// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag anchor: the reference frame of an in-flight drag.
//!
//! A drag remembers where it started, where the pointer was last seen, and
//! the view box at press time. Pans and zoom-drags are applied relative to
//! that snapshot, so the same pointer position always yields the same view
//! regardless of how many intermediate moves were coalesced away.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use wayfinder_gesture::drag::DragAnchor;
//! use wayfinder_view::ViewBox;
//!
//! let mut drag = DragAnchor::new(Point::new(10.0, 20.0), ViewBox::new(0.0, 0.0, 100.0, 50.0));
//!
//! // Move to (15, 25) - delta is (5, 5)
//! let delta = drag.update(Point::new(15.0, 25.0));
//! assert_eq!(delta.x, 5.0);
//!
//! // Total offset from the press is also (5, 5)
//! assert_eq!(drag.total_offset().y, 5.0);
//! ```

use kurbo::{Point, Vec2};
use wayfinder_view::ViewBox;

/// Reference frame captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    /// Screen position of the press.
    pub start: Point,
    /// Last screen position seen during the drag.
    pub last: Point,
    /// View box at press time.
    pub view_box: ViewBox,
}

impl DragAnchor {
    /// Starts a drag at `start` over the given view box snapshot.
    #[must_use]
    pub fn new(start: Point, view_box: ViewBox) -> Self {
        Self {
            start,
            last: start,
            view_box,
        }
    }

    /// Records a new position, returning the movement since the last one.
    pub fn update(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        delta
    }

    /// Offset of the last seen position from the press.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.last - self.start
    }

    /// Offset of `pos` from the press.
    #[must_use]
    pub fn offset_to(&self, pos: Point) -> Vec2 {
        pos - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ViewBox {
        ViewBox::new(0.0, 0.0, 100.0, 50.0)
    }

    #[test]
    fn new_anchor_has_no_offset() {
        let drag = DragAnchor::new(Point::new(10.0, 20.0), snapshot());
        assert_eq!(drag.last, drag.start);
        assert_eq!(drag.total_offset(), Vec2::ZERO);
    }

    #[test]
    fn multiple_updates_track_incremental_deltas() {
        let mut drag = DragAnchor::new(Point::ZERO, snapshot());

        assert_eq!(drag.update(Point::new(5.0, 3.0)), Vec2::new(5.0, 3.0));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Vec2::new(3.0, 4.0));
        assert_eq!(drag.update(Point::new(10.0, 10.0)), Vec2::new(2.0, 3.0));
        assert_eq!(drag.total_offset(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn negative_movement_deltas() {
        let mut drag = DragAnchor::new(Point::new(100.0, 100.0), snapshot());
        assert_eq!(drag.update(Point::new(90.0, 85.0)), Vec2::new(-10.0, -15.0));
        assert_eq!(drag.offset_to(Point::new(120.0, 100.0)), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn snapshot_is_kept_across_updates() {
        let mut drag = DragAnchor::new(Point::ZERO, snapshot());
        drag.update(Point::new(40.0, 40.0));
        assert_eq!(drag.view_box, snapshot());
    }
}
