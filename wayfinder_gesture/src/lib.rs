// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Gesture: pointer, touch and wheel handling for a map viewport.
//!
//! The central type is [`GestureController`], a small state machine over
//! [`GestureMode`] (`Idle`, `Panning`, `Pinching`, `ZoomDragging`) that
//! consumes [`GestureInput`] events and mutates a [`wayfinder_view::Viewport`].
//! It reports what happened through [`GestureOutcome`], so a host can open or
//! dismiss UI without knowing anything about gesture internals.
//!
//! The building blocks are usable on their own:
//!
//! - [`drag`]: the reference frame of a drag (press position plus view box
//!   snapshot).
//! - [`tap`]: tap and double-tap recognition with spatial and temporal
//!   tolerance.
//! - [`frame`]: at-most-one-pending coalescing of move events per animation
//!   frame.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use wayfinder_gesture::{GestureController, GestureInput, GestureOutcome, PointerButton};
//! use wayfinder_view::Viewport;
//!
//! let mut view = Viewport::new(Size::new(1000.0, 500.0), Size::new(1000.0, 500.0));
//! let mut gestures = GestureController::default();
//!
//! gestures.handle(&mut view, GestureInput::PointerDown {
//!     position: Point::new(100.0, 100.0),
//!     button: PointerButton::Primary,
//!     precision: false,
//!     time_ms: 0,
//! });
//! gestures.handle(&mut view, GestureInput::PointerMove {
//!     position: Point::new(150.0, 100.0),
//!     pressed: true,
//!     time_ms: 16,
//! });
//!
//! // The host calls this from its animation-frame callback.
//! assert!(gestures.on_animation_frame(&mut view));
//! assert_eq!(view.view_box().x, -50.0);
//!
//! let outcome = gestures.handle(&mut view, GestureInput::PointerUp {
//!     position: Point::new(150.0, 100.0),
//!     time_ms: 40,
//! });
//! assert_eq!(outcome, GestureOutcome::Ended);
//! ```

mod controller;
mod input;

pub mod drag;
pub mod frame;
pub mod tap;

pub use controller::{
    DOUBLE_TAP_LEVELS, GestureConfig, GestureController, GestureMode, GestureOutcome, Tap,
};
pub use input::{GestureInput, PointerButton, TouchPhase, Touches};
