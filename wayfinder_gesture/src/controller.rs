// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use tracing::{debug, trace};
use wayfinder_view::Viewport;

use crate::drag::DragAnchor;
use crate::frame::FrameScheduler;
use crate::input::{GestureInput, PointerButton, TouchPhase};
use crate::tap::{DOUBLE_TAP_INTERVAL_MS, TAP_MAX_DURATION_MS, TAP_SLOP, TapRecognizer, TapResult};

/// Zoom levels visited by successive double-taps.
pub const DOUBLE_TAP_LEVELS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];

const LEVEL_EPSILON: f64 = 1e-6;

/// Tunables for [`GestureController`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Maximum travel of a tap, in screen pixels.
    pub tap_slop: f64,
    /// Maximum duration of a tap.
    pub tap_max_duration_ms: u64,
    /// Maximum interval between the taps of a double-tap.
    pub double_tap_interval_ms: u64,
    /// Relative zoom change per wheel notch.
    pub wheel_step: f64,
    /// Zoom-drag factor is `exp(-dy * sensitivity)` for a vertical drag of
    /// `dy` pixels; dragging down zooms in.
    pub zoom_drag_sensitivity: f64,
    /// Zoom levels cycled through by double-taps.
    pub double_tap_levels: [f64; 4],
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: TAP_SLOP,
            tap_max_duration_ms: TAP_MAX_DURATION_MS,
            double_tap_interval_ms: DOUBLE_TAP_INTERVAL_MS,
            wheel_step: 0.1,
            zoom_drag_sensitivity: 0.01,
            double_tap_levels: DOUBLE_TAP_LEVELS,
        }
    }
}

/// Interaction mode of the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureMode {
    /// No interaction in progress.
    #[default]
    Idle,
    /// A single pointer or touch is dragging the map.
    Panning,
    /// Two touches are pinching.
    Pinching,
    /// A precision-modifier drag is zooming continuously.
    ZoomDragging,
}

/// A recognized tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    /// Screen position of the release.
    pub screen: Point,
    /// The same position in map-space.
    pub map: Point,
}

/// What an input did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// The input was not consumed (overlay hit, unused button, idle move).
    Ignored,
    /// An interaction started; nothing changed yet.
    Pressed,
    /// A move was queued for the next animation frame.
    FrameRequested {
        /// `false` once the sequence has moved too far to be a tap.
        tap_possible: bool,
    },
    /// The viewport changed synchronously.
    ViewChanged,
    /// The sequence was a tap.
    Tap(Tap),
    /// A double-tap changed the zoom level.
    DoubleTap {
        /// Zoom level after the change.
        level: f64,
    },
    /// The interaction ended without a tap.
    Ended,
    /// The interaction was abandoned (blur, stale input).
    Cancelled,
}

impl GestureOutcome {
    /// Returns `true` for outcomes that count as a map gesture, which
    /// dismiss floating cards.
    #[must_use]
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            Self::FrameRequested {
                tap_possible: false
            } | Self::ViewChanged
                | Self::DoubleTap { .. }
        )
    }
}

/// Turns raw pointer, touch and wheel input into viewport changes.
///
/// The controller is a small state machine over [`GestureMode`]. Wheel and
/// pinch input change the viewport synchronously; drag moves are coalesced
/// and applied by [`GestureController::on_animation_frame`].
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    config: GestureConfig,
    mode: GestureMode,
    drag: Option<DragAnchor>,
    separation: Option<f64>,
    taps: TapRecognizer,
    frames: FrameScheduler<Point>,
    overlays: SmallVec<[Rect; 2]>,
}

impl GestureController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            mode: GestureMode::Idle,
            drag: None,
            separation: None,
            taps: TapRecognizer::new(
                config.tap_slop,
                config.tap_max_duration_ms,
                config.double_tap_interval_ms,
            ),
            frames: FrameScheduler::new(),
            overlays: SmallVec::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Reference frame of the current drag, if any.
    #[must_use]
    pub fn drag_anchor(&self) -> Option<&DragAnchor> {
        self.drag.as_ref()
    }

    /// Touch separation recorded by the last pinch event.
    #[must_use]
    pub fn pinch_separation(&self) -> Option<f64> {
        self.separation
    }

    /// Returns `true` while a move is waiting for an animation frame.
    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    /// Registers a screen rectangle whose input belongs to an overlay.
    pub fn register_overlay(&mut self, rect: Rect) {
        self.overlays.push(rect);
    }

    /// Removes all overlay rectangles.
    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
    }

    /// Returns `true` if `pt` falls inside a registered overlay.
    #[must_use]
    pub fn in_overlay(&self, pt: Point) -> bool {
        self.overlays.iter().any(|r| r.contains(pt))
    }

    /// Feeds one input event.
    pub fn handle(&mut self, viewport: &mut Viewport, input: GestureInput) -> GestureOutcome {
        match input {
            GestureInput::PointerDown {
                position,
                button,
                precision,
                time_ms,
            } => {
                if button != PointerButton::Primary {
                    return GestureOutcome::Ignored;
                }
                self.press(viewport, position, precision, time_ms)
            }
            GestureInput::PointerMove {
                position, pressed, ..
            } => {
                if pressed {
                    self.drag_to(position)
                } else {
                    self.drop_stale()
                }
            }
            GestureInput::PointerUp { position, time_ms } => {
                self.release(viewport, position, time_ms)
            }
            GestureInput::Wheel { position, delta_y } => self.wheel(viewport, position, delta_y),
            GestureInput::Touch {
                phase,
                touches,
                time_ms,
            } => match phase {
                TouchPhase::Start => self.touch_start(viewport, &touches, time_ms),
                TouchPhase::Move => self.touch_move(viewport, &touches),
                TouchPhase::End => self.touch_end(viewport, &touches, time_ms),
            },
            GestureInput::Cancel => {
                if self.cancel() {
                    GestureOutcome::Cancelled
                } else {
                    GestureOutcome::Ignored
                }
            }
        }
    }

    /// Applies the latest coalesced move. Returns `true` if the viewport
    /// changed.
    pub fn on_animation_frame(&mut self, viewport: &mut Viewport) -> bool {
        let Some(position) = self.frames.take() else {
            return false;
        };
        let Some(drag) = self.drag else {
            return false;
        };
        match self.mode {
            GestureMode::Panning => viewport.pan_from(drag.view_box, drag.offset_to(position)),
            GestureMode::ZoomDragging => {
                let dy = position.y - drag.start.y;
                let factor = (-dy * self.config.zoom_drag_sensitivity).exp();
                viewport.zoom_from(drag.view_box, factor, drag.start)
            }
            GestureMode::Idle | GestureMode::Pinching => false,
        }
    }

    /// Abandons any interaction and pending frame. Returns `true` if there
    /// was anything to abandon.
    pub fn cancel(&mut self) -> bool {
        let active = self.mode != GestureMode::Idle || self.frames.is_pending();
        if active {
            debug!(mode = ?self.mode, "gesture cancelled");
        }
        self.reset();
        active
    }

    fn reset(&mut self) {
        self.mode = GestureMode::Idle;
        self.drag = None;
        self.separation = None;
        self.frames.cancel();
        self.taps.reset();
    }

    fn press(
        &mut self,
        viewport: &Viewport,
        position: Point,
        precision: bool,
        time_ms: u64,
    ) -> GestureOutcome {
        if self.mode != GestureMode::Idle {
            debug!(mode = ?self.mode, "press during an active gesture, restarting");
            self.reset();
        }
        if self.in_overlay(position) {
            trace!(x = position.x, y = position.y, "press inside overlay ignored");
            return GestureOutcome::Ignored;
        }
        self.mode = if precision {
            GestureMode::ZoomDragging
        } else {
            GestureMode::Panning
        };
        self.drag = Some(DragAnchor::new(position, viewport.view_box()));
        self.taps.on_down(position, time_ms);
        debug!(mode = ?self.mode, x = position.x, y = position.y, "gesture started");
        GestureOutcome::Pressed
    }

    fn drag_to(&mut self, position: Point) -> GestureOutcome {
        match self.mode {
            GestureMode::Panning | GestureMode::ZoomDragging => {
                let Some(drag) = self.drag.as_mut() else {
                    return self.drop_stale();
                };
                drag.update(position);
                let tap_possible = self.taps.on_move(position);
                self.frames.request(position);
                GestureOutcome::FrameRequested { tap_possible }
            }
            GestureMode::Idle | GestureMode::Pinching => GestureOutcome::Ignored,
        }
    }

    fn drop_stale(&mut self) -> GestureOutcome {
        if self.mode == GestureMode::Idle {
            return GestureOutcome::Ignored;
        }
        debug!(mode = ?self.mode, "input without active buttons or touches, returning to idle");
        self.reset();
        GestureOutcome::Cancelled
    }

    fn release(&mut self, viewport: &mut Viewport, position: Point, time_ms: u64) -> GestureOutcome {
        if self.mode == GestureMode::Idle {
            return GestureOutcome::Ignored;
        }
        let moved = self.on_animation_frame(viewport);
        let ended = self.mode;
        self.mode = GestureMode::Idle;
        self.drag = None;
        self.separation = None;

        let result = self.taps.on_up(position, time_ms);
        debug!(mode = ?ended, ?result, "gesture ended");
        match result {
            TapResult::Tap(screen) => GestureOutcome::Tap(Tap {
                screen,
                map: viewport.screen_to_map(screen),
            }),
            TapResult::DoubleTap(screen) => {
                let level = self.next_zoom_level(viewport);
                viewport.zoom_to_level(level, screen);
                GestureOutcome::DoubleTap {
                    level: viewport.zoom_level(),
                }
            }
            TapResult::Gesture if moved => GestureOutcome::ViewChanged,
            TapResult::Gesture => GestureOutcome::Ended,
        }
    }

    fn wheel(&mut self, viewport: &mut Viewport, position: Point, delta_y: f64) -> GestureOutcome {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return GestureOutcome::Ignored;
        }
        if self.mode == GestureMode::Idle && self.in_overlay(position) {
            return GestureOutcome::Ignored;
        }
        let factor = if delta_y > 0.0 {
            1.0 + self.config.wheel_step
        } else {
            1.0 - self.config.wheel_step
        };
        // An active drag replays against its snapshot, so settle the pending
        // move first and re-anchor on the zoomed view box afterwards.
        let moved = self.on_animation_frame(viewport);
        if !viewport.zoom(factor, position) {
            return if moved {
                GestureOutcome::ViewChanged
            } else {
                GestureOutcome::Ignored
            };
        }
        if let Some(drag) = self.drag.as_mut() {
            *drag = DragAnchor::new(drag.last, viewport.view_box());
            trace!("drag re-anchored after wheel zoom");
        }
        GestureOutcome::ViewChanged
    }

    fn touch_start(
        &mut self,
        viewport: &Viewport,
        touches: &[Point],
        time_ms: u64,
    ) -> GestureOutcome {
        match (self.mode, touches) {
            (_, []) => GestureOutcome::Ignored,
            (GestureMode::Idle, [first]) => self.press(viewport, *first, false, time_ms),
            (GestureMode::Idle, [first, second, ..]) => {
                let mid = first.midpoint(*second);
                if self.in_overlay(mid) {
                    return GestureOutcome::Ignored;
                }
                self.taps.on_down(mid, time_ms);
                self.begin_pinch(*first, *second)
            }
            (_, [first, second, ..]) => {
                self.frames.cancel();
                self.begin_pinch(*first, *second)
            }
            (_, [_]) => GestureOutcome::Ignored,
        }
    }

    fn touch_move(&mut self, viewport: &mut Viewport, touches: &[Point]) -> GestureOutcome {
        match (self.mode, touches) {
            (GestureMode::Idle, _) => GestureOutcome::Ignored,
            (_, []) => self.drop_stale(),
            (GestureMode::Pinching, [first, second, ..]) => {
                self.pinch_to(viewport, *first, *second)
            }
            (GestureMode::Pinching, [_]) => GestureOutcome::Ignored,
            (_, [first, ..]) => self.drag_to(*first),
        }
    }

    fn touch_end(
        &mut self,
        viewport: &mut Viewport,
        touches: &[Point],
        time_ms: u64,
    ) -> GestureOutcome {
        match (self.mode, touches) {
            (GestureMode::Idle, _) => GestureOutcome::Ignored,
            (_, []) => {
                let position = self
                    .taps
                    .last_position()
                    .or_else(|| self.drag.map(|d| d.last))
                    .unwrap_or(Point::ZERO);
                self.release(viewport, position, time_ms)
            }
            (GestureMode::Pinching, [remaining]) => {
                // One finger left: keep panning from where it is now.
                self.mode = GestureMode::Panning;
                self.separation = None;
                self.drag = Some(DragAnchor::new(*remaining, viewport.view_box()));
                debug!("pinch reduced to a single touch, panning");
                GestureOutcome::Pressed
            }
            (GestureMode::Pinching, [first, second, ..]) => {
                self.separation = Some(first.distance(*second));
                GestureOutcome::Ignored
            }
            (_, [_, ..]) => GestureOutcome::Ignored,
        }
    }

    fn begin_pinch(&mut self, first: Point, second: Point) -> GestureOutcome {
        self.taps.invalidate();
        self.mode = GestureMode::Pinching;
        self.drag = None;
        self.separation = Some(first.distance(second));
        debug!(separation = ?self.separation, "pinch started");
        GestureOutcome::Pressed
    }

    fn pinch_to(&mut self, viewport: &mut Viewport, first: Point, second: Point) -> GestureOutcome {
        let separation = first.distance(second);
        match self.separation.replace(separation) {
            Some(previous) if previous > 0.0 && separation > 0.0 => {
                if viewport.zoom(previous / separation, first.midpoint(second)) {
                    GestureOutcome::ViewChanged
                } else {
                    GestureOutcome::Ignored
                }
            }
            _ => GestureOutcome::Ignored,
        }
    }

    fn next_zoom_level(&self, viewport: &Viewport) -> f64 {
        let current = viewport.zoom_level();
        let (_, max_zoom) = viewport.zoom_limits();
        let levels = &self.config.double_tap_levels;
        levels
            .iter()
            .copied()
            .find(|&level| level > current + LEVEL_EPSILON && level <= max_zoom + LEVEL_EPSILON)
            .unwrap_or(levels[0])
    }
}
