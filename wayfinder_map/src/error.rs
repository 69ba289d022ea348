// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Rejected [`crate::MapConfig`].
///
/// Configuration is the only fallible surface of the engine; everything
/// else degrades locally (hidden labels, centered cards, ignored input).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A size is zero, negative or not finite.
    #[error("{what} size must be finite and positive, got {width}x{height}")]
    InvalidSize {
        /// Which size.
        what: &'static str,
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },

    /// A zoom level is zero, negative or not finite.
    #[error("{what} zoom must be finite and positive, got {value}")]
    InvalidZoom {
        /// Which zoom level.
        what: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The minimum zoom is larger than the maximum zoom.
    #[error("minimum zoom {min} exceeds maximum zoom {max}")]
    InvertedZoomLimits {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// The initial zoom lies outside the zoom limits.
    #[error("initial zoom {initial} is outside [{min}, {max}]")]
    InitialZoomOutOfRange {
        /// Configured initial zoom.
        initial: f64,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// The clustering threshold is negative or not finite.
    #[error("cluster threshold must be finite and non-negative, got {0}")]
    InvalidClusterThreshold(f64),
}
