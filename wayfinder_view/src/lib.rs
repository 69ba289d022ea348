// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder View: the viewport model of a floor-plan map.
//!
//! This crate provides a small, headless model of which part of a fixed
//! floor plan is visible. It focuses on:
//! - The visible rectangle in map-space ([`ViewBox`]).
//! - Pan and zoom with zoom limits; panning is unbounded.
//! - Conversion between screen pixels and map units, including the padding
//!   introduced when the rendering surface and the map have different
//!   aspect ratios ("letterboxing").
//! - Resetting to fit a set of points, and focusing a single point.
//!
//! It does **not** own any scene or rendering backend, and it does not
//! interpret input events; see `wayfinder_gesture` for that.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use wayfinder_view::{ResetMode, Viewport};
//!
//! // A 1000x500 floor plan drawn into a square 800x800 surface.
//! let mut view = Viewport::new(Size::new(1000.0, 500.0), Size::new(800.0, 800.0));
//! view.set_zoom_limits(0.5, 8.0, 1.0);
//! view.reset_view([Point::new(100.0, 100.0), Point::new(400.0, 300.0)], ResetMode::Fit);
//!
//! // Zoom in around the pointer; the map point under it stays put.
//! let pointer = Point::new(400.0, 400.0);
//! let before = view.screen_to_map(pointer);
//! view.zoom(0.5, pointer);
//! let after = view.screen_to_map(pointer);
//! assert!((before - after).hypot() < 1e-6);
//! ```
//!
//! ## Design notes
//!
//! - The view box always keeps the map's aspect ratio; the surface may not.
//! - Zoom factors below `1.0` zoom in (they shrink the view box).
//! - Operations return `false` when they leave the view box unchanged, so
//!   callers can skip downstream recomputation.
//! - A surface with no area never divides by zero: conversions return the
//!   map origin.

mod modes;
mod view_box;
mod viewport;

pub use modes::ResetMode;
pub use view_box::ViewBox;
pub use viewport::{FIT_PADDING, FOCUS_BIAS, Viewport, ViewportDebugInfo};
