// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame output for the rendering layer.

use kurbo::{Point, Rect};
use wayfinder_card::{CardKind, CardPlacement};
use wayfinder_label::LabelSide;
use wayfinder_view::ViewBox;

/// A pin to draw: a single point or a cluster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinOutput {
    /// Cluster id; equals the point id for single points.
    pub id: String,
    /// Screen position of the point or cluster centroid.
    pub screen: Point,
    /// Screen hit box.
    pub hit_box: Rect,
    /// Whether the pin intersects the rendering surface.
    pub visible: bool,
    /// Ids of the points behind the pin, in input order.
    pub members: Vec<String>,
}

impl PinOutput {
    /// Returns `true` for pins standing for more than one point.
    #[must_use]
    pub fn is_cluster(&self) -> bool {
        self.members.len() > 1
    }
}

/// Label decision for the pin with the same `id`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelOutput {
    /// Pin id.
    pub id: String,
    /// Whether the label is drawn.
    pub visible: bool,
    /// Side of the pin; `None` when hidden.
    pub side: Option<LabelSide>,
    /// Screen rectangle; `None` when hidden.
    pub rect: Option<Rect>,
}

/// The open detail card.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardOutput {
    /// Selected point or cluster id.
    pub id: String,
    /// What the card shows.
    pub kind: CardKind,
    /// Screen position the card is attached to.
    pub anchor: Point,
    /// Where the card goes.
    pub placement: CardPlacement,
}

/// Highlight marker of [`crate::MapMode::Detail`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Highlight {
    /// Map-space position.
    pub map: Point,
    /// Screen position.
    pub screen: Point,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Visible map rectangle, for the drawing transform.
    pub view_box: ViewBox,
    /// Current zoom level.
    pub zoom_level: f64,
    /// Pins, one per cluster.
    pub pins: Vec<PinOutput>,
    /// Labels, parallel to `pins`.
    pub labels: Vec<LabelOutput>,
    /// Open detail card.
    pub card: Option<CardOutput>,
    /// Highlight marker.
    pub highlight: Option<Highlight>,
}

/// What the user has selected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// A single point, by id.
    Point(String),
    /// A cluster, by cluster id, with its member ids.
    Cluster {
        /// Cluster id.
        id: String,
        /// Member point ids.
        members: Vec<String>,
    },
}

impl Selection {
    /// Point or cluster id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Point(id) | Self::Cluster { id, .. } => id,
        }
    }
}
