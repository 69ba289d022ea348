// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use wayfinder_cluster::ClusterItem;

/// A point of interest supplied by the host.
///
/// The engine reads only `id` and `coordinates`; `title`, `category` and
/// `payload` are carried for the host's own rendering.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractivePoint<P = ()> {
    /// Unique within one point set.
    pub id: String,
    /// Map-space position; points without one are not shown.
    pub coordinates: Option<Point>,
    /// Display title.
    pub title: String,
    /// Display category.
    pub category: String,
    /// Host data.
    pub payload: P,
}

impl InteractivePoint {
    /// A point with no title, category or payload.
    pub fn new(id: impl Into<String>, coordinates: impl Into<Option<Point>>) -> Self {
        Self::with_payload(id, coordinates, ())
    }
}

impl<P> InteractivePoint<P> {
    /// A point carrying `payload`.
    pub fn with_payload(
        id: impl Into<String>,
        coordinates: impl Into<Option<Point>>,
        payload: P,
    ) -> Self {
        Self {
            id: id.into(),
            coordinates: coordinates.into(),
            title: String::new(),
            category: String::new(),
            payload,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Map-space position if present and finite.
    #[must_use]
    pub fn location(&self) -> Option<Point> {
        self.coordinates.filter(|p| p.is_finite())
    }
}

impl<P> ClusterItem for InteractivePoint<P> {
    fn key(&self) -> &str {
        &self.id
    }

    fn location(&self) -> Option<Point> {
        Self::location(self)
    }
}
