// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap and double-tap recognition with spatial and temporal tolerance.
//!
//! A press/release sequence is a tap when the pointer never strays further
//! than the slop from the press position, the release comes before the
//! maximum duration, and no second touch joined in. Anything else is a
//! gesture and must not select anything.
//!
//! ```
//! use kurbo::Point;
//! use wayfinder_gesture::tap::{TapRecognizer, TapResult};
//!
//! let mut taps = TapRecognizer::default();
//! taps.on_down(Point::new(10.0, 10.0), 1000);
//! taps.on_move(Point::new(12.0, 11.0));
//! assert_eq!(taps.on_up(Point::new(12.0, 11.0), 1080), TapResult::Tap(Point::new(12.0, 11.0)));
//! ```

use kurbo::Point;

/// Default maximum travel, in screen pixels, for a tap.
pub const TAP_SLOP: f64 = 10.0;

/// Default maximum press duration, in milliseconds, for a tap.
pub const TAP_MAX_DURATION_MS: u64 = 500;

/// Default maximum interval, in milliseconds, between the two taps of a
/// double-tap.
pub const DOUBLE_TAP_INTERVAL_MS: u64 = 300;

/// Classification of a completed press/release sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapResult {
    /// The sequence moved too far, lasted too long, or involved several
    /// touches.
    Gesture,
    /// A single tap at the release position.
    Tap(Point),
    /// A tap that completes a double-tap at the release position.
    DoubleTap(Point),
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    start: Point,
    last: Point,
    time_ms: u64,
    valid: bool,
}

/// Recognizes taps and double-taps from raw press/move/release input.
#[derive(Clone, Debug)]
pub struct TapRecognizer {
    slop: f64,
    max_duration_ms: u64,
    double_tap_ms: u64,
    candidate: Option<Candidate>,
    last_tap: Option<(Point, u64)>,
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new(TAP_SLOP, TAP_MAX_DURATION_MS, DOUBLE_TAP_INTERVAL_MS)
    }
}

impl TapRecognizer {
    /// Creates a recognizer with explicit tolerances.
    #[must_use]
    pub fn new(slop: f64, max_duration_ms: u64, double_tap_ms: u64) -> Self {
        Self {
            slop,
            max_duration_ms,
            double_tap_ms,
            candidate: None,
            last_tap: None,
        }
    }

    /// Starts a new candidate at `pos`.
    pub fn on_down(&mut self, pos: Point, time_ms: u64) {
        self.candidate = Some(Candidate {
            start: pos,
            last: pos,
            time_ms,
            valid: true,
        });
    }

    /// Tracks movement; returns `true` while the sequence can still be a tap.
    ///
    /// Once the pointer leaves the slop the candidate stays invalid, even if
    /// it comes back.
    pub fn on_move(&mut self, pos: Point) -> bool {
        let slop = self.slop;
        match self.candidate.as_mut() {
            Some(c) => {
                c.last = pos;
                if (pos - c.start).hypot() >= slop {
                    c.valid = false;
                }
                c.valid
            }
            None => false,
        }
    }

    /// Marks the current sequence as a gesture (for example when a second
    /// touch appears).
    pub fn invalidate(&mut self) {
        if let Some(c) = self.candidate.as_mut() {
            c.valid = false;
        }
    }

    /// Returns `true` while a press is being tracked.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.candidate.is_some()
    }

    /// Last position seen for the current press, if any.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.candidate.map(|c| c.last)
    }

    /// Completes the sequence at `pos` and classifies it.
    pub fn on_up(&mut self, pos: Point, time_ms: u64) -> TapResult {
        let still_tap = self.on_move(pos);
        let Some(candidate) = self.candidate.take() else {
            return TapResult::Gesture;
        };
        let duration = time_ms.saturating_sub(candidate.time_ms);
        if !still_tap || duration >= self.max_duration_ms {
            self.last_tap = None;
            return TapResult::Gesture;
        }

        if let Some((prev_pos, prev_time)) = self.last_tap
            && time_ms.saturating_sub(prev_time) <= self.double_tap_ms
            && (pos - prev_pos).hypot() < self.slop
        {
            self.last_tap = None;
            return TapResult::DoubleTap(pos);
        }
        self.last_tap = Some((pos, time_ms));
        TapResult::Tap(pos)
    }

    /// Forgets the current candidate and any pending first tap.
    pub fn reset(&mut self) {
        self.candidate = None;
        self.last_tap = None;
    }
}
