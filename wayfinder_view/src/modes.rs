// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How [`crate::Viewport::reset_view`] chooses the new view box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResetMode {
    /// Center on the bounding box of the supplied points, padded on each axis.
    ///
    /// The zoom never goes deeper than the viewport's initial zoom, and is
    /// relaxed further when the padded box would not fit. An empty point set
    /// falls back to [`ResetMode::Fixed`].
    #[default]
    Fit,
    /// Center on the map at the initial zoom, ignoring the points.
    Fixed,
}
