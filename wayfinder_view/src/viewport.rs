// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::modes::ResetMode;
use crate::view_box::ViewBox;

/// Fraction of the points' bounding box added on each side by [`ResetMode::Fit`].
pub const FIT_PADDING: f64 = 0.2;

/// Largest shift of the view center toward the map center applied by
/// [`Viewport::zoom_to_point`], as a fraction of the view extent.
pub const FOCUS_BIAS: f64 = 0.25;

// Changes smaller than this (in map units) are treated as no-ops.
const VIEW_EPSILON: f64 = 1e-9;

/// Letterbox layout of the view box inside the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    scale: f64,
    padding: Vec2,
}

/// Viewport over a fixed floor plan.
///
/// `Viewport` owns the visible [`ViewBox`] (in map-space), the size of the
/// rendering surface (in screen pixels) and the zoom limits. The view box is
/// drawn into the surface with uniform scaling and centered, so whenever the
/// aspect ratios differ the content is letterboxed on one axis. All
/// conversions between screen and map space account for that padding.
///
/// Zoom levels are expressed relative to the native map extent: at zoom
/// level `z` the view box is `map_width / z` wide.
#[derive(Clone, Debug)]
pub struct Viewport {
    map_size: Size,
    surface: Size,
    view_box: ViewBox,
    min_zoom: f64,
    max_zoom: f64,
    initial_zoom: f64,
    transforms: Option<(Affine, Affine)>,
}

impl Viewport {
    /// Creates a viewport showing the whole map.
    ///
    /// Zoom limits default to `[1.0, 8.0]` with an initial zoom of `1.0`.
    /// Non-positive map dimensions are replaced by `1.0`.
    #[must_use]
    pub fn new(map_size: Size, surface: Size) -> Self {
        let map_size = Size::new(
            positive_or_one(map_size.width),
            positive_or_one(map_size.height),
        );
        let mut vp = Self {
            map_size,
            surface,
            view_box: ViewBox::new(0.0, 0.0, map_size.width, map_size.height),
            min_zoom: 1.0,
            max_zoom: 8.0,
            initial_zoom: 1.0,
            transforms: None,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the native extent of the map.
    #[must_use]
    pub fn map_size(&self) -> Size {
        self.map_size
    }

    /// Returns the rendering surface size in screen pixels.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        self.surface
    }

    /// Sets the rendering surface size.
    ///
    /// The view box is unchanged; only the letterbox layout moves.
    pub fn set_surface_size(&mut self, surface: Size) {
        if self.surface == surface {
            return;
        }
        self.surface = surface;
        self.rebuild_transforms();
    }

    /// Returns the current view box.
    #[must_use]
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Returns the `(min, max)` zoom limits.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Returns the zoom level used by [`Viewport::reset_view`].
    #[must_use]
    pub fn initial_zoom(&self) -> f64 {
        self.initial_zoom
    }

    /// Sets the zoom limits and the initial zoom.
    ///
    /// The limits are normalized so that `min <= max`, and `initial` is
    /// clamped into them. The current view box is re-clamped around its
    /// center.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64, initial_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.initial_zoom = initial_zoom.clamp(min_zoom, max_zoom);

        let (min_w, max_w) = self.width_limits();
        let width = self.view_box.width.clamp(min_w, max_w);
        let size = self.size_for_width(width);
        self.set_view_box(ViewBox::from_center(self.view_box.center(), size));
    }

    /// Current zoom level relative to the native map extent.
    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.map_size.width / self.view_box.width
    }

    /// Screen pixels per map unit in the content area, or `None` when the
    /// surface has no area.
    #[must_use]
    pub fn scale(&self) -> Option<f64> {
        self.layout_for(self.view_box).map(|l| l.scale)
    }

    /// Zooms by `factor` around a screen-space anchor.
    ///
    /// `factor < 1` zooms in. The resulting view box is clamped to the zoom
    /// limits, and the map point under `anchor` stays fixed on screen.
    /// Returns `false` when nothing changed.
    pub fn zoom(&mut self, factor: f64, anchor: Point) -> bool {
        self.zoom_from(self.view_box, factor, anchor)
    }

    /// Like [`Viewport::zoom`], but relative to `origin` instead of the
    /// current view box.
    ///
    /// Gesture controllers use this to apply a continuous zoom against the
    /// view box captured when the gesture started.
    pub fn zoom_from(&mut self, origin: ViewBox, factor: f64, anchor: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 || origin.width <= 0.0 {
            return false;
        }
        let (min_w, max_w) = self.width_limits();
        let width = (origin.width * factor).clamp(min_w, max_w);
        let effective = width / origin.width;

        let pivot = match self.layout_for(origin) {
            Some(layout) => project_to_map(origin, layout, anchor),
            None => origin.center(),
        };
        let next = ViewBox::new(
            pivot.x - (pivot.x - origin.x) * effective,
            pivot.y - (pivot.y - origin.y) * effective,
            width,
            origin.height * effective,
        );
        self.set_view_box(next)
    }

    /// Zooms to an absolute `level` around a screen-space anchor.
    pub fn zoom_to_level(&mut self, level: f64, anchor: Point) -> bool {
        if !level.is_finite() || level <= 0.0 {
            return false;
        }
        self.zoom(self.zoom_level() / level, anchor)
    }

    /// Pans by a screen-space delta.
    ///
    /// The delta is converted with the content-area scale, so it stays
    /// correct under letterboxing. Content follows the pointer: a positive
    /// `delta.x` moves the view box left. Panning is not bounded by the map.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        self.pan_from(self.view_box, delta)
    }

    /// Pans `origin` by a total screen-space delta and makes it current.
    ///
    /// Drag gestures capture the view box at press time and call this with
    /// the offset since the press, which avoids accumulating rounding error.
    pub fn pan_from(&mut self, origin: ViewBox, delta: Vec2) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let Some(layout) = self.layout_for(origin) else {
            return false;
        };
        self.set_view_box(origin.translated(-delta / layout.scale))
    }

    /// Resets the view box from a set of points.
    ///
    /// See [`ResetMode`] for how the target is chosen.
    pub fn reset_view<I>(&mut self, points: I, mode: ResetMode) -> bool
    where
        I: IntoIterator<Item = Point>,
    {
        let base_width = self.map_size.width / self.initial_zoom;
        let target = match (mode, bounding_box(points)) {
            (ResetMode::Fit, Some(bounds)) => {
                let padded = bounds.inflate(
                    bounds.width() * FIT_PADDING,
                    bounds.height() * FIT_PADDING,
                );
                let fit_width = padded.width().max(padded.height() * self.aspect());
                let size = self.size_for_width(self.clamp_width(base_width.max(fit_width)));
                ViewBox::from_center(padded.center(), size)
            }
            _ => {
                let size = self.size_for_width(self.clamp_width(base_width));
                ViewBox::from_center(self.map_center(), size)
            }
        };
        self.set_view_box(target)
    }

    /// Centers the view on a map point at an absolute zoom level.
    ///
    /// The view center is pulled toward the map center by up to
    /// [`FOCUS_BIAS`] of the view extent, so a point near a map edge ends up
    /// with more room on the side facing the interior of the map.
    pub fn zoom_to_point(&mut self, point: Point, level: f64) -> bool {
        if !level.is_finite() || level <= 0.0 || !point.is_finite() {
            return false;
        }
        let size = self.size_for_width(self.clamp_width(self.map_size.width / level));
        let rel_x = (point.x / self.map_size.width).clamp(0.0, 1.0);
        let rel_y = (point.y / self.map_size.height).clamp(0.0, 1.0);
        let bias = Vec2::new(
            (0.5 - rel_x) * 2.0 * FOCUS_BIAS * size.width,
            (0.5 - rel_y) * 2.0 * FOCUS_BIAS * size.height,
        );
        self.set_view_box(ViewBox::from_center(point + bias, size))
    }

    /// Converts a screen-space point into map-space.
    ///
    /// Returns the map origin when the surface has no area.
    #[must_use]
    pub fn screen_to_map(&self, pt: Point) -> Point {
        match self.transforms {
            Some((_, screen_to_map)) => screen_to_map * pt,
            None => Point::ZERO,
        }
    }

    /// Converts a map-space point into screen-space.
    ///
    /// Returns the origin when the surface has no area.
    #[must_use]
    pub fn map_to_screen(&self, pt: Point) -> Point {
        match self.transforms {
            Some((map_to_screen, _)) => map_to_screen * pt,
            None => Point::ZERO,
        }
    }

    /// Screen-space rectangle covered by the view box (the surface minus
    /// letterbox padding).
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        match self.layout_for(self.view_box) {
            Some(layout) => Rect::from_origin_size(
                layout.padding.to_point(),
                (self.view_box.size().to_vec2() * layout.scale).to_size(),
            ),
            None => Rect::ZERO,
        }
    }

    /// Map-space rectangle visible through the whole surface, letterbox
    /// padding included.
    #[must_use]
    pub fn visible_map_rect(&self) -> Rect {
        let surface = self.surface.to_rect();
        Rect::from_points(
            self.screen_to_map(surface.origin()),
            self.screen_to_map(Point::new(surface.x1, surface.y1)),
        )
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            map_size: self.map_size,
            surface: self.surface,
            view_box: self.view_box,
            zoom_level: self.zoom_level(),
            scale: self.scale(),
            content_rect: self.content_rect(),
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            initial_zoom: self.initial_zoom,
        }
    }

    fn set_view_box(&mut self, next: ViewBox) -> bool {
        if !next.x.is_finite() || !next.y.is_finite() || next.width <= 0.0 || next.height <= 0.0
        {
            return false;
        }
        if next.approx_eq(&self.view_box, VIEW_EPSILON) {
            return false;
        }
        self.view_box = next;
        self.rebuild_transforms();
        true
    }

    fn layout_for(&self, view_box: ViewBox) -> Option<Layout> {
        if self.surface.width <= 0.0
            || self.surface.height <= 0.0
            || view_box.width <= 0.0
            || view_box.height <= 0.0
        {
            return None;
        }
        let scale = (self.surface.width / view_box.width).min(self.surface.height / view_box.height);
        let padding = Vec2::new(
            (self.surface.width - view_box.width * scale) * 0.5,
            (self.surface.height - view_box.height * scale) * 0.5,
        );
        Some(Layout { scale, padding })
    }

    fn rebuild_transforms(&mut self) {
        self.transforms = self.layout_for(self.view_box).map(|layout| {
            // Map → screen: move the view box origin to zero, scale, then
            // offset by the letterbox padding.
            let map_to_screen = Affine::translate(layout.padding)
                * Affine::scale(layout.scale)
                * Affine::translate(-self.view_box.origin().to_vec2());
            (map_to_screen, map_to_screen.inverse())
        });
    }

    fn aspect(&self) -> f64 {
        self.map_size.width / self.map_size.height
    }

    fn map_center(&self) -> Point {
        Point::new(self.map_size.width * 0.5, self.map_size.height * 0.5)
    }

    fn width_limits(&self) -> (f64, f64) {
        (
            self.map_size.width / self.max_zoom,
            self.map_size.width / self.min_zoom,
        )
    }

    fn clamp_width(&self, width: f64) -> f64 {
        let (min_w, max_w) = self.width_limits();
        width.clamp(min_w, max_w)
    }

    fn size_for_width(&self, width: f64) -> Size {
        Size::new(width, width / self.aspect())
    }
}

/// Debug snapshot of a [`Viewport`].
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Native map extent.
    pub map_size: Size,
    /// Rendering surface size in screen pixels.
    pub surface: Size,
    /// Current view box.
    pub view_box: ViewBox,
    /// Current zoom level.
    pub zoom_level: f64,
    /// Content-area scale, if the surface has area.
    pub scale: Option<f64>,
    /// Screen rectangle covered by the view box.
    pub content_rect: Rect,
    /// Minimum zoom level.
    pub min_zoom: f64,
    /// Maximum zoom level.
    pub max_zoom: f64,
    /// Zoom level used when resetting.
    pub initial_zoom: f64,
}

fn project_to_map(view_box: ViewBox, layout: Layout, pt: Point) -> Point {
    view_box.origin() + (pt.to_vec2() - layout.padding) / layout.scale
}

fn bounding_box<I: IntoIterator<Item = Point>>(points: I) -> Option<Rect> {
    points
        .into_iter()
        .filter(|p| p.is_finite())
        .fold(None, |acc: Option<Rect>, p| match acc {
            Some(r) => Some(r.union_pt(p)),
            None => Some(Rect::from_points(p, p)),
        })
}

fn positive_or_one(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}
