// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Card: where to open the detail card of a selected marker.
//!
//! Given the marker's screen position and the container size,
//! [`resolve_card`] picks one of four placements (above, below, left or
//! right of the marker, offset by a fixed distance) or falls back to
//! centering the card in the container.
//!
//! Sides are ranked by where the marker sits:
//!
//! - In the left third the card prefers to open to the right, in the right
//!   third to the left.
//! - In the top third it prefers to open downwards, in the bottom third
//!   upwards.
//! - The remaining sides follow by free room, largest first.
//!
//! A placement is viable when the card stays inside the container shrunk by
//! a margin. The first viable side with more than `min_slack` pixels of
//! clearance wins; otherwise the viable side with the most clearance;
//! otherwise the card is centered.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use wayfinder_card::{CardConfig, CardKind, CardSide, resolve_card};
//!
//! let container = Size::new(1200.0, 800.0);
//! // A marker in the left third opens its card to the right.
//! let placement = resolve_card(Point::new(200.0, 400.0), container, CardKind::Point, &CardConfig::default());
//! assert_eq!(placement.side, CardSide::Right);
//! assert_eq!(placement.rect.x0, 216.0);
//! ```

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

/// What the card shows; clusters list several points and get a larger card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardKind {
    /// A single point.
    #[default]
    Point,
    /// A cluster of points.
    Cluster,
}

/// Card sizes and placement tunables, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardConfig {
    /// Card size for a single point.
    pub point_size: Size,
    /// Card size for a cluster.
    pub cluster_size: Size,
    /// Distance between the anchor and the near edge of the card.
    pub offset: f64,
    /// Inset of the container a viable card must stay within.
    pub margin: f64,
    /// Clearance a preferred side needs to win outright.
    pub min_slack: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            point_size: Size::new(280.0, 160.0),
            cluster_size: Size::new(320.0, 240.0),
            offset: 16.0,
            margin: 12.0,
            min_slack: 24.0,
        }
    }
}

impl CardConfig {
    /// Card size for `kind`.
    #[must_use]
    pub fn card_size(&self, kind: CardKind) -> Size {
        match kind {
            CardKind::Point => self.point_size,
            CardKind::Cluster => self.cluster_size,
        }
    }
}

/// Side of the anchor the card opens on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardSide {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
    /// Centered in the container, ignoring the anchor.
    Center,
}

impl CardSide {
    /// The four directional sides, in tie-break order.
    pub const DIRECTIONS: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];
}

/// Position of a card relative to its anchor point.
///
/// The card's top-left corner is
/// `anchor - fraction * card_size + offset`, which lets a renderer attach the
/// card to a moving anchor without recomputing the placement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorTransform {
    /// Fraction of the card size to shift back by, per axis.
    pub fraction: Vec2,
    /// Extra shift in pixels.
    pub offset: Vec2,
}

impl AnchorTransform {
    /// Top-left corner of a card of `size` attached to `anchor`.
    #[must_use]
    pub fn card_origin(&self, anchor: Point, size: Size) -> Point {
        anchor
            + Vec2::new(
                -self.fraction.x * size.width + self.offset.x,
                -self.fraction.y * size.height + self.offset.y,
            )
    }
}

/// Result of [`resolve_card`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardPlacement {
    /// Chosen side.
    pub side: CardSide,
    /// Card rectangle in container coordinates.
    pub rect: Rect,
    /// Card position relative to the anchor.
    pub anchor_transform: AnchorTransform,
}

/// Resolves the placement of a card of `kind` for a marker at `anchor`
/// inside a container of `container` size.
#[must_use]
pub fn resolve_card(
    anchor: Point,
    container: Size,
    kind: CardKind,
    config: &CardConfig,
) -> CardPlacement {
    let size = config.card_size(kind);
    if !anchor.is_finite() {
        return centered(anchor, container, size);
    }
    let margin = config.margin;
    let inner = Rect::new(margin, margin, container.width - margin, container.height - margin);

    let mut best: Option<(CardPlacement, f64)> = None;
    for side in priorities(anchor, container) {
        let transform = directional_transform(side, config.offset);
        let rect = Rect::from_origin_size(transform.card_origin(anchor, size), size);
        let Some(slack) = slack(rect, inner) else {
            continue;
        };
        let placement = CardPlacement {
            side,
            rect,
            anchor_transform: transform,
        };
        if slack > config.min_slack {
            return placement;
        }
        if best.is_none_or(|(_, s)| slack > s) {
            best = Some((placement, slack));
        }
    }
    best.map_or_else(|| centered(anchor, container, size), |(p, _)| p)
}

/// Directional sides for `anchor`, most preferred first.
#[must_use]
pub fn priorities(anchor: Point, container: Size) -> SmallVec<[CardSide; 4]> {
    let Size { width, height } = container;
    let mut preferred: SmallVec<[CardSide; 4]> = SmallVec::new();
    if anchor.x < width / 3.0 {
        preferred.push(CardSide::Right);
    } else if anchor.x > width * 2.0 / 3.0 {
        preferred.push(CardSide::Left);
    }
    if anchor.y < height / 3.0 {
        preferred.push(CardSide::Bottom);
    } else if anchor.y > height * 2.0 / 3.0 {
        preferred.push(CardSide::Top);
    }

    let room = |side: CardSide| match side {
        CardSide::Top => anchor.y,
        CardSide::Bottom => height - anchor.y,
        CardSide::Left => anchor.x,
        CardSide::Right => width - anchor.x,
        CardSide::Center => 0.0,
    };
    preferred.sort_by(|a, b| room(*b).total_cmp(&room(*a)));
    let mut rest: SmallVec<[CardSide; 4]> = CardSide::DIRECTIONS
        .into_iter()
        .filter(|side| !preferred.contains(side))
        .collect();
    rest.sort_by(|a, b| room(*b).total_cmp(&room(*a)));
    preferred.extend(rest);
    preferred
}

fn directional_transform(side: CardSide, offset: f64) -> AnchorTransform {
    let (fraction, offset) = match side {
        CardSide::Top => (Vec2::new(0.5, 1.0), Vec2::new(0.0, -offset)),
        CardSide::Bottom => (Vec2::new(0.5, 0.0), Vec2::new(0.0, offset)),
        CardSide::Left => (Vec2::new(1.0, 0.5), Vec2::new(-offset, 0.0)),
        CardSide::Right => (Vec2::new(0.0, 0.5), Vec2::new(offset, 0.0)),
        CardSide::Center => (Vec2::new(0.5, 0.5), Vec2::ZERO),
    };
    AnchorTransform { fraction, offset }
}

/// Smallest clearance between `rect` and the edges of `inner`, or `None`
/// when `rect` sticks out.
fn slack(rect: Rect, inner: Rect) -> Option<f64> {
    let clearance = (rect.x0 - inner.x0)
        .min(inner.x1 - rect.x1)
        .min(rect.y0 - inner.y0)
        .min(inner.y1 - rect.y1);
    (clearance >= 0.0).then_some(clearance)
}

fn centered(anchor: Point, container: Size, size: Size) -> CardPlacement {
    let center = Point::new(container.width * 0.5, container.height * 0.5);
    let rect = Rect::from_center_size(center, size);
    let offset = if anchor.is_finite() {
        center - anchor
    } else {
        center.to_vec2()
    };
    let anchor_transform = AnchorTransform {
        fraction: Vec2::new(0.5, 0.5),
        offset,
    };
    CardPlacement {
        side: CardSide::Center,
        rect,
        anchor_transform,
    }
}
