// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::DefaultBackend;
use crate::backend::{Backend, overlaps};
use crate::flip::plan_flips;

/// Which side of its pin a label is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelSide {
    /// The label ends `gap` pixels left of the anchor.
    Left,
    /// The label starts `gap` pixels right of the anchor.
    Right,
}

impl LabelSide {
    /// The other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Side facing away from a vertical line at `center_x`.
    ///
    /// Anchors exactly on the line go right.
    #[must_use]
    pub fn away_from(anchor_x: f64, center_x: f64) -> Self {
        if anchor_x < center_x {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Label footprint and placement tunables, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelConfig {
    /// Size of every label rectangle.
    pub label_size: Size,
    /// Horizontal distance between the anchor and the near edge of the label.
    pub gap: f64,
    /// Safety margin added around a label when testing it for collisions.
    pub margin: f64,
    /// Longest chain of confirmed labels the flip search may move.
    pub max_flip_depth: usize,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            label_size: Size::new(120.0, 24.0),
            gap: 14.0,
            margin: 2.0,
            max_flip_depth: 3,
        }
    }
}

impl LabelConfig {
    /// Label rectangle for `anchor` on `side`, vertically centered on it.
    #[must_use]
    pub fn label_rect(&self, anchor: Point, side: LabelSide) -> Rect {
        let Size { width, height } = self.label_size;
        let y0 = anchor.y - height * 0.5;
        match side {
            LabelSide::Left => {
                let x1 = anchor.x - self.gap;
                Rect::new(x1 - width, y0, x1, y0 + height)
            }
            LabelSide::Right => {
                let x0 = anchor.x + self.gap;
                Rect::new(x0, y0, x0 + width, y0 + height)
            }
        }
    }
}

/// One pin or cluster marker asking for a label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelCandidate<K> {
    /// Caller key, echoed in the matching [`LabelAssignment`].
    pub key: K,
    /// Screen position of the marker.
    pub anchor: Point,
    /// Screen hit box of the marker; labels never cover any hit box.
    pub hit_box: Rect,
    /// Number of points behind the marker.
    pub members: usize,
    /// Whether the marker asks for a label. Unlabeled markers only block.
    pub labeled: bool,
}

impl<K> LabelCandidate<K> {
    /// Candidate for a single point.
    pub fn new(key: K, anchor: Point, hit_box: Rect) -> Self {
        Self {
            key,
            anchor,
            hit_box,
            members: 1,
            labeled: true,
        }
    }

    /// Sets the number of points behind the marker.
    #[must_use]
    pub fn with_members(mut self, members: usize) -> Self {
        self.members = members;
        self
    }

    /// Keeps the marker as an obstacle without giving it a label.
    #[must_use]
    pub fn obstacle(mut self) -> Self {
        self.labeled = false;
        self
    }

    /// Returns `true` for markers standing for more than one point.
    #[must_use]
    pub fn is_cluster(&self) -> bool {
        self.members > 1
    }
}

/// Placement decision for one candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelAssignment<K> {
    /// Key of the candidate.
    pub key: K,
    /// Whether the label is drawn.
    pub visible: bool,
    /// Chosen side; `None` when hidden.
    pub side: Option<LabelSide>,
    /// Screen rectangle of the label; `None` when hidden.
    pub rect: Option<Rect>,
}

/// Places labels with the default backend.
///
/// See [`place_labels_with`].
#[must_use]
pub fn place_labels<K: Clone + Ord>(
    candidates: &[LabelCandidate<K>],
    config: &LabelConfig,
    view_center: Point,
) -> Vec<LabelAssignment<K>> {
    place_labels_with::<K, DefaultBackend>(candidates, config, view_center)
}

/// Places labels with the default backend, keeping every label inside
/// `bounds`.
///
/// The vertical center line of `bounds` decides the preferred sides. A side
/// whose label would reach outside `bounds` is treated like a side covered
/// by a hit box.
#[must_use]
pub fn place_labels_within<K: Clone + Ord>(
    candidates: &[LabelCandidate<K>],
    config: &LabelConfig,
    bounds: Rect,
) -> Vec<LabelAssignment<K>> {
    solve::<K, DefaultBackend>(candidates, config, bounds.center(), Some(bounds))
}

/// Places labels for `candidates`, returning one assignment per candidate in
/// input order.
///
/// Multi-point clusters are placed first, then markers by distance to
/// `view_center`, ties broken by key. Each candidate tries the side facing
/// away from the vertical center line, then the opposite side; when both are
/// taken only by already placed labels, a bounded flip search may move those
/// labels to their other side. Candidates that still do not fit are hidden.
///
/// Candidates marked as [obstacles](LabelCandidate::obstacle) are never
/// labeled but still block.
///
/// No two visible labels overlap, and no visible label overlaps any hit box.
#[must_use]
pub fn place_labels_with<K: Clone + Ord, B: Backend + Default>(
    candidates: &[LabelCandidate<K>],
    config: &LabelConfig,
    view_center: Point,
) -> Vec<LabelAssignment<K>> {
    solve::<K, B>(candidates, config, view_center, None)
}

fn solve<K: Clone + Ord, B: Backend + Default>(
    candidates: &[LabelCandidate<K>],
    config: &LabelConfig,
    view_center: Point,
    bounds: Option<Rect>,
) -> Vec<LabelAssignment<K>> {
    let mut layout = Layout::<K, B>::new(candidates, config, bounds);

    let mut order: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].labeled && candidates[i].anchor.is_finite())
        .collect();
    order.sort_by(|&a, &b| {
        let (ca, cb) = (&candidates[a], &candidates[b]);
        cb.is_cluster()
            .cmp(&ca.is_cluster())
            .then_with(|| {
                let da = ca.anchor.distance(view_center);
                let db = cb.anchor.distance(view_center);
                da.total_cmp(&db)
            })
            .then_with(|| ca.key.cmp(&cb.key))
    });

    for index in order {
        let preferred = LabelSide::away_from(candidates[index].anchor.x, view_center.x);
        layout.place(index, [preferred, preferred.opposite()]);
    }

    candidates
        .iter()
        .zip(&layout.sides)
        .map(|(candidate, side)| LabelAssignment {
            key: candidate.key.clone(),
            visible: side.is_some(),
            side: *side,
            rect: side.map(|s| config.label_rect(candidate.anchor, s)),
        })
        .collect()
}

/// Working state of one placement run.
pub(crate) struct Layout<'a, K, B> {
    pub(crate) candidates: &'a [LabelCandidate<K>],
    pub(crate) config: &'a LabelConfig,
    bounds: Option<Rect>,
    pins: B,
    pub(crate) labels: B,
    pub(crate) sides: Vec<Option<LabelSide>>,
}

impl<'a, K, B: Backend + Default> Layout<'a, K, B> {
    fn new(
        candidates: &'a [LabelCandidate<K>],
        config: &'a LabelConfig,
        bounds: Option<Rect>,
    ) -> Self {
        let mut pins = B::default();
        for (slot, candidate) in candidates.iter().enumerate() {
            pins.insert(slot, candidate.hit_box);
        }
        Self {
            candidates,
            config,
            bounds,
            pins,
            labels: B::default(),
            sides: vec![None; candidates.len()],
        }
    }

    fn place(&mut self, index: usize, sides: [LabelSide; 2]) {
        let mut contested: SmallVec<[(LabelSide, Rect); 2]> = SmallVec::new();
        for side in sides {
            let rect = self.label_rect(index, side);
            if self.pin_blocked(index, rect) {
                continue;
            }
            if self.label_conflicts(rect).is_empty() {
                self.confirm(index, side, rect);
                return;
            }
            contested.push((side, rect));
        }
        for (side, rect) in contested {
            if let Some(plan) = plan_flips(self, index, rect) {
                for (moved, moved_side, moved_rect) in plan {
                    self.sides[moved] = Some(moved_side);
                    self.labels.update(moved, moved_rect);
                }
                self.confirm(index, side, rect);
                return;
            }
        }
    }
}

impl<K, B: Backend> Layout<'_, K, B> {
    fn confirm(&mut self, index: usize, side: LabelSide, rect: Rect) {
        self.sides[index] = Some(side);
        self.labels.insert(index, rect);
    }

    pub(crate) fn label_rect(&self, index: usize, side: LabelSide) -> Rect {
        self.config.label_rect(self.candidates[index].anchor, side)
    }

    pub(crate) fn probe(&self, rect: Rect) -> Rect {
        rect.inflate(self.config.margin, self.config.margin)
    }

    /// Returns `true` if the label of `index` at `rect` would cover a hit box
    /// or leave the bounds.
    ///
    /// Other markers are tested against the margin-inflated label, the
    /// candidate's own marker against the bare label.
    pub(crate) fn pin_blocked(&self, index: usize, rect: Rect) -> bool {
        if overlaps(rect, self.candidates[index].hit_box) {
            return true;
        }
        if let Some(b) = self.bounds
            && !(rect.x0 >= b.x0 && rect.y0 >= b.y0 && rect.x1 <= b.x1 && rect.y1 <= b.y1)
        {
            return true;
        }
        let mut blocked = false;
        self.pins.visit_rect(self.probe(rect), |slot| {
            if slot != index {
                blocked = true;
            }
        });
        blocked
    }

    /// Confirmed labels colliding with a label at `rect`, in ascending order.
    pub(crate) fn label_conflicts(&self, rect: Rect) -> SmallVec<[usize; 8]> {
        self.labels.query_rect(self.probe(rect))
    }
}
