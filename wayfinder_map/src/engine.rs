// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use tracing::{debug, trace};
use wayfinder_card::{CardKind, resolve_card};
use wayfinder_cluster::{cluster, effective_radius};
use wayfinder_gesture::{GestureController, GestureInput, GestureMode, GestureOutcome, Tap};
use wayfinder_label::{LabelCandidate, overlaps, place_labels_within};
use wayfinder_view::{ViewBox, Viewport};

use crate::config::{MapConfig, MapMode};
use crate::error::ConfigError;
use crate::frame::{CardOutput, Frame, Highlight, LabelOutput, PinOutput, Selection};
use crate::listener::MapListener;
use crate::point::InteractivePoint;

/// Inputs the derived layout depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LayoutKey {
    revision: u64,
    view_box: ViewBox,
    surface: Size,
}

/// Pins and labels for one [`LayoutKey`].
#[derive(Clone, Debug)]
struct Layout {
    key: LayoutKey,
    pins: Vec<PinOutput>,
    labels: Vec<LabelOutput>,
}

impl Layout {
    fn compute<P>(
        key: LayoutKey,
        config: &MapConfig,
        viewport: &Viewport,
        points: &[InteractivePoint<P>],
    ) -> Self {
        let radius = effective_radius(config.cluster_threshold, viewport.zoom_level());
        let clusters = cluster(points, radius);
        let surface = Rect::from_origin_size(Point::ZERO, key.surface);

        let pins: Vec<PinOutput> = clusters
            .iter()
            .map(|c| {
                let screen = viewport.map_to_screen(c.centroid);
                let hit_box = Rect::from_center_size(screen, config.pin_size_for(c.len()));
                PinOutput {
                    id: c.id.clone(),
                    screen,
                    hit_box,
                    visible: overlaps(hit_box, surface),
                    members: c.members.iter().map(|&i| points[i].id.clone()).collect(),
                }
            })
            .collect();

        // Off-surface pins still block, but only pins on the surface get a
        // label, and labels stay on the surface.
        let candidates: Vec<LabelCandidate<&str>> = pins
            .iter()
            .map(|pin| {
                let candidate = LabelCandidate::new(pin.id.as_str(), pin.screen, pin.hit_box)
                    .with_members(pin.members.len());
                if pin.visible {
                    candidate
                } else {
                    candidate.obstacle()
                }
            })
            .collect();
        let labels: Vec<LabelOutput> = place_labels_within(&candidates, &config.label, surface)
            .into_iter()
            .map(|assignment| LabelOutput {
                id: assignment.key.to_owned(),
                visible: assignment.visible,
                side: assignment.side,
                rect: assignment.rect,
            })
            .collect();

        trace!(
            revision = key.revision,
            radius,
            pins = pins.len(),
            shown = pins.iter().filter(|p| p.visible).count(),
            labeled = labels.iter().filter(|l| l.visible).count(),
            "layout recomputed"
        );
        Self { key, pins, labels }
    }
}

/// Interactive floor-plan map.
///
/// Owns the viewport, the gesture controller and the point set, and derives
/// pins, labels and the detail card from them. Pins and labels are
/// recomputed lazily when the point set, the view box or the surface size
/// changed since the last read.
///
/// The engine is headless: the host forwards input through
/// [`MapEngine::handle_input`], drives [`MapEngine::on_animation_frame`]
/// from its frame callback while [`MapEngine::frame_pending`] is set, and
/// draws whatever [`MapEngine::frame`] returns.
#[derive(Clone, Debug)]
pub struct MapEngine<P = ()> {
    config: MapConfig,
    mode: MapMode,
    viewport: Viewport,
    gestures: GestureController,
    points: Vec<InteractivePoint<P>>,
    index: HashMap<String, usize>,
    revision: u64,
    layout: Option<Layout>,
    selection: Option<Selection>,
    hovered: Option<String>,
    overlays: SmallVec<[Rect; 2]>,
}

impl<P> MapEngine<P> {
    /// Creates an engine with no points, showing the initial view for
    /// `mode`.
    pub fn new(config: MapConfig, mode: MapMode, surface: Size) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut viewport = Viewport::new(config.map_size, surface);
        viewport.set_zoom_limits(config.min_zoom, config.max_zoom, config.initial_zoom);
        let mut engine = Self {
            config,
            mode,
            viewport,
            gestures: GestureController::new(config.gesture),
            points: Vec::new(),
            index: HashMap::new(),
            revision: 0,
            layout: None,
            selection: None,
            hovered: None,
            overlays: SmallVec::new(),
        };
        engine.reset_view();
        debug!(?mode, "map engine created");
        Ok(engine)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> MapMode {
        self.mode
    }

    /// The viewport model.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Interaction mode of the gesture controller.
    #[must_use]
    pub fn gesture_mode(&self) -> GestureMode {
        self.gestures.mode()
    }

    /// Returns `true` while a coalesced move waits for
    /// [`MapEngine::on_animation_frame`].
    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.gestures.frame_pending()
    }

    /// Current point set.
    #[must_use]
    pub fn points(&self) -> &[InteractivePoint<P>] {
        &self.points
    }

    /// Looks up a point by id.
    #[must_use]
    pub fn point(&self, id: &str) -> Option<&InteractivePoint<P>> {
        self.index.get(id).map(|&i| &self.points[i])
    }

    /// Counter bumped by every [`MapEngine::set_points`].
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current selection, which is what the detail card shows.
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Id of the pin under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Replaces the point set.
    ///
    /// Points without finite coordinates are kept but never shown. In
    /// [`MapMode::Display`] the view is fitted to the new points. A
    /// selection whose point disappeared, or whose cluster no longer exists
    /// after the refit, is dropped.
    pub fn set_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = InteractivePoint<P>>,
    {
        self.points = points.into_iter().collect();
        self.index = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        self.revision += 1;

        let skipped = self.points.iter().filter(|p| p.location().is_none()).count();
        if skipped > 0 {
            trace!(skipped, "points without coordinates excluded");
        }
        debug!(
            revision = self.revision,
            points = self.points.len(),
            "point set replaced"
        );

        if self.mode == MapMode::Display {
            self.reset_view();
        }
        self.drop_stale_selection();
        self.sync_overlays();
    }

    /// Switches mode.
    ///
    /// Entering [`MapMode::Display`] fits the view to the points; entering
    /// [`MapMode::Detail`] zooms to the highlight once.
    pub fn set_mode(&mut self, mode: MapMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = ?self.mode, to = ?mode, "mode changed");
        self.mode = mode;
        match mode {
            MapMode::Display | MapMode::Detail { .. } => {
                self.reset_view();
            }
            MapMode::Interactive => {}
        }
    }

    /// Resizes the rendering surface.
    pub fn set_surface_size(&mut self, surface: Size) {
        self.viewport.set_surface_size(surface);
        self.sync_overlays();
    }

    /// Restores the initial view for the current mode.
    ///
    /// Detail mode focuses the highlight; the other modes reset from the
    /// located points with the configured [`wayfinder_view::ResetMode`].
    /// Returns `false` when the view was already there.
    pub fn reset_view(&mut self) -> bool {
        let changed = match self.mode {
            MapMode::Detail { highlight } => self
                .viewport
                .zoom_to_point(highlight, self.config.detail_zoom),
            MapMode::Display | MapMode::Interactive => {
                let located = self.points.iter().filter_map(|p| p.location());
                self.viewport.reset_view(located, self.config.reset_mode)
            }
        };
        if changed {
            debug!(mode = ?self.mode, view_box = ?self.viewport.view_box(), "view reset");
            self.drop_stale_selection();
            self.sync_overlays();
        }
        changed
    }

    /// Registers a screen rectangle owned by a host overlay; presses and
    /// wheel input starting there are left to the overlay.
    pub fn register_overlay(&mut self, rect: Rect) {
        self.overlays.push(rect);
        self.sync_overlays();
    }

    /// Removes all host overlays. The detail card stays an overlay.
    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
        self.sync_overlays();
    }

    /// Feeds one input event.
    ///
    /// Gestures dismiss the detail card. A tap on a pin selects it; a tap on
    /// an empty area closes the card and, in [`MapMode::Interactive`],
    /// reports the map coordinate.
    pub fn handle_input(
        &mut self,
        input: GestureInput,
        listener: &mut impl MapListener,
    ) -> GestureOutcome {
        let outcome = self.gestures.handle(&mut self.viewport, input);
        if outcome.is_gesture() {
            self.dismiss_card();
        }
        if let GestureOutcome::Tap(tap) = outcome {
            self.on_tap(tap, listener);
        }
        outcome
    }

    /// Applies the latest coalesced move. Returns `true` if the view changed.
    pub fn on_animation_frame(&mut self) -> bool {
        let changed = self.gestures.on_animation_frame(&mut self.viewport);
        if changed && self.selection.is_some() {
            self.sync_overlays();
        }
        changed
    }

    /// Tracks the pin under a hovering pointer.
    ///
    /// Ignored while a gesture is active; positions over an overlay hover
    /// nothing.
    pub fn pointer_hover(&mut self, position: Point, listener: &mut impl MapListener) {
        if self.gestures.mode() != GestureMode::Idle {
            return;
        }
        let next = if self.gestures.in_overlay(position) {
            None
        } else {
            self.pin_at(position).map(|pin| pin.id)
        };
        self.set_hovered(next, listener);
    }

    /// The pointer left the surface.
    pub fn pointer_left(&mut self, listener: &mut impl MapListener) {
        self.set_hovered(None, listener);
    }

    /// Closes the detail card.
    pub fn clear_selection(&mut self) {
        self.dismiss_card();
    }

    /// Stops all interaction: cancels the pending frame and any gesture, and
    /// drops selection, hover and overlays.
    pub fn teardown(&mut self) {
        let cancelled = self.gestures.cancel();
        self.gestures.clear_overlays();
        self.overlays.clear();
        self.selection = None;
        self.hovered = None;
        self.layout = None;
        debug!(cancelled, "map engine torn down");
    }

    /// Pins, one per cluster, in cluster order.
    pub fn pins(&mut self) -> &[PinOutput] {
        &self.layout().pins
    }

    /// Labels, parallel to [`MapEngine::pins`].
    pub fn labels(&mut self) -> &[LabelOutput] {
        &self.layout().labels
    }

    /// The open detail card, if any.
    pub fn card(&mut self) -> Option<CardOutput> {
        let selection = self.selection.clone()?;
        let (kind, anchor) = match &selection {
            Selection::Point(id) => {
                let location = self.point(id)?.location()?;
                (CardKind::Point, self.viewport.map_to_screen(location))
            }
            Selection::Cluster { id, .. } => {
                let pin = self.layout().pins.iter().find(|pin| &pin.id == id)?;
                (CardKind::Cluster, pin.screen)
            }
        };
        let placement = resolve_card(
            anchor,
            self.viewport.surface_size(),
            kind,
            &self.config.card,
        );
        Some(CardOutput {
            id: selection.id().to_owned(),
            kind,
            anchor,
            placement,
        })
    }

    /// Everything the renderer needs for the current state.
    pub fn frame(&mut self) -> Frame {
        let card = self.card();
        let highlight = match self.mode {
            MapMode::Detail { highlight } => Some(Highlight {
                map: highlight,
                screen: self.viewport.map_to_screen(highlight),
            }),
            MapMode::Display | MapMode::Interactive => None,
        };
        let view_box = self.viewport.view_box();
        let zoom_level = self.viewport.zoom_level();
        let layout = self.layout();
        Frame {
            view_box,
            zoom_level,
            pins: layout.pins.clone(),
            labels: layout.labels.clone(),
            card,
            highlight,
        }
    }

    fn layout(&mut self) -> &Layout {
        let key = LayoutKey {
            revision: self.revision,
            view_box: self.viewport.view_box(),
            surface: self.viewport.surface_size(),
        };
        if self.layout.as_ref().is_some_and(|layout| layout.key != key) {
            self.layout = None;
        }
        let (config, viewport, points) = (&self.config, &self.viewport, &self.points);
        self.layout
            .get_or_insert_with(|| Layout::compute(key, config, viewport, points))
    }

    /// Visible pin whose hit box contains `screen`, nearest first.
    fn pin_at(&mut self, screen: Point) -> Option<PinOutput> {
        self.layout()
            .pins
            .iter()
            .filter(|pin| pin.visible && pin.hit_box.contains(screen))
            .min_by(|a, b| {
                a.screen
                    .distance(screen)
                    .total_cmp(&b.screen.distance(screen))
            })
            .cloned()
    }

    fn on_tap(&mut self, tap: Tap, listener: &mut impl MapListener) {
        match self.pin_at(tap.screen) {
            Some(pin) if pin.is_cluster() => {
                debug!(id = %pin.id, members = pin.members.len(), "cluster selected");
                listener.on_cluster_selected(&pin.members);
                self.selection = Some(Selection::Cluster {
                    id: pin.id,
                    members: pin.members,
                });
            }
            Some(pin) => {
                debug!(id = %pin.id, "point selected");
                listener.on_point_selected(&pin.id);
                self.selection = Some(Selection::Point(pin.id));
            }
            None => {
                self.selection = None;
                if self.mode == MapMode::Interactive {
                    debug!(x = tap.map.x, y = tap.map.y, "map clicked");
                    listener.on_map_clicked(tap.map);
                }
            }
        }
        self.sync_overlays();
    }

    fn dismiss_card(&mut self) {
        if self.selection.take().is_some() {
            debug!("detail card dismissed");
            self.sync_overlays();
        }
    }

    fn set_hovered(&mut self, next: Option<String>, listener: &mut impl MapListener) {
        if next != self.hovered {
            trace!(?next, "hover changed");
            self.hovered = next;
            listener.on_hover_changed(self.hovered.as_deref());
        }
    }

    /// Drops a selection whose point is gone, or whose cluster no longer
    /// exists with the same members at the current zoom.
    fn drop_stale_selection(&mut self) {
        let current = match self.selection.clone() {
            None => return,
            Some(Selection::Point(id)) => self.point(&id).is_some_and(|p| p.location().is_some()),
            Some(Selection::Cluster { id, members }) => self
                .layout()
                .pins
                .iter()
                .any(|pin| pin.id == id && pin.members == members),
        };
        if !current {
            debug!("stale selection dropped");
            self.selection = None;
        }
    }

    /// Re-registers host overlays plus the open card with the gesture
    /// controller.
    fn sync_overlays(&mut self) {
        let card = self.card().map(|card| card.placement.rect);
        self.gestures.clear_overlays();
        for rect in &self.overlays {
            self.gestures.register_overlay(*rect);
        }
        if let Some(rect) = card {
            self.gestures.register_overlay(rect);
        }
    }
}
