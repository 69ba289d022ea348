// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use smallvec::SmallVec;

/// Active touch positions, in screen pixels.
pub type Touches = SmallVec<[Point; 2]>;

/// Mouse or pen button that caused a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button, pen contact.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button and anything else.
    Auxiliary,
}

/// Phase of a touch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// One or more touches began.
    Start,
    /// One or more touches moved.
    Move,
    /// One or more touches ended or were cancelled by the platform.
    End,
}

/// Raw input accepted by [`crate::GestureController`].
///
/// Positions are in screen pixels relative to the rendering surface, and
/// timestamps in milliseconds from any monotonic origin.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureInput {
    /// A button was pressed.
    PointerDown {
        /// Press position.
        position: Point,
        /// Which button.
        button: PointerButton,
        /// Whether the precision-zoom modifier is held.
        precision: bool,
        /// Event time.
        time_ms: u64,
    },
    /// The pointer moved.
    PointerMove {
        /// Current position.
        position: Point,
        /// Whether any button is still held.
        pressed: bool,
        /// Event time.
        time_ms: u64,
    },
    /// The button was released.
    PointerUp {
        /// Release position.
        position: Point,
        /// Event time.
        time_ms: u64,
    },
    /// A wheel or trackpad scroll.
    Wheel {
        /// Pointer position.
        position: Point,
        /// Vertical delta; positive scrolls down (zooms out).
        delta_y: f64,
    },
    /// A touch event.
    Touch {
        /// What happened.
        phase: TouchPhase,
        /// Touches still active after the event.
        touches: Touches,
        /// Event time.
        time_ms: u64,
    },
    /// The gesture was lost (window blur, pointer capture lost).
    Cancel,
}
