// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Label: collision-free label placement for map markers.
//!
//! Every marker gets a fixed-size text label on its left or right. The
//! solver decides, per marker, whether its label is shown and on which side,
//! such that:
//!
//! - no two visible labels overlap, and
//! - no visible label covers any marker's hit box.
//!
//! Markers that cannot be labeled are hidden rather than clipped.
//!
//! The placement is greedy with a bounded repair step. Candidates are
//! visited in priority order (clusters first, then nearest to the view
//! center) and take the first free side. When both sides are taken only by
//! labels placed earlier, a depth-limited flip search tries to move those
//! labels to their other side.
//!
//! Collision queries go through a small [`Backend`] trait with two
//! implementations in [`backends`]: a linear [`FlatVec`](backends::FlatVec)
//! and a hash-bucketed [`Grid`](backends::Grid) (feature `backend_grid`,
//! enabled by default). Both produce identical placements.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use wayfinder_label::{LabelCandidate, LabelConfig, LabelSide, place_labels};
//!
//! let pin = |key, x, y| {
//!     let anchor = Point::new(x, y);
//!     LabelCandidate::new(key, anchor, Rect::from_center_size(anchor, (24.0, 24.0)))
//! };
//! let candidates = [pin("bakery", 200.0, 150.0), pin("stage", 700.0, 150.0)];
//! let out = place_labels(&candidates, &LabelConfig::default(), Point::new(500.0, 300.0));
//!
//! assert_eq!(out[0].side, Some(LabelSide::Left));
//! assert_eq!(out[1].side, Some(LabelSide::Right));
//! ```

mod backend;
mod flip;
mod solver;

pub mod backends;

pub use backend::{Backend, overlaps};
pub use solver::{
    LabelAssignment, LabelCandidate, LabelConfig, LabelSide, place_labels, place_labels_with,
    place_labels_within,
};

/// Backend used by [`place_labels`].
#[cfg(feature = "backend_grid")]
pub type DefaultBackend = backends::Grid;

/// Backend used by [`place_labels`].
#[cfg(not(feature = "backend_grid"))]
pub type DefaultBackend = backends::FlatVec;
