// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use wayfinder_card::CardConfig;
use wayfinder_gesture::GestureConfig;
use wayfinder_label::LabelConfig;
use wayfinder_view::ResetMode;

use crate::error::ConfigError;

/// How the engine behaves toward its host page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapMode {
    /// Fits the view to all points on load and whenever the point set
    /// changes.
    #[default]
    Display,
    /// Zooms once to `highlight` and shows a highlight marker there.
    Detail {
        /// Map-space position to focus.
        highlight: Point,
    },
    /// Reports map-space clicks on empty areas; no highlight marker.
    Interactive,
}

/// Engine configuration.
///
/// Sizes of pins, labels and cards are in screen pixels; the map size and
/// zoom levels are in map units. Checked once by [`MapConfig::validate`]
/// when the engine is built.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    /// Native extent of the floor plan.
    pub map_size: Size,
    /// Smallest zoom level.
    pub min_zoom: f64,
    /// Largest zoom level.
    pub max_zoom: f64,
    /// Zoom level used by resets.
    pub initial_zoom: f64,
    /// Zoom level [`MapMode::Detail`] focuses at.
    pub detail_zoom: f64,
    /// Clustering radius at zoom level `1.0`, in map units.
    pub cluster_threshold: f64,
    /// How resets outside detail mode choose the view.
    pub reset_mode: ResetMode,
    /// Hit box of a single-point pin.
    pub pin_size: Size,
    /// Hit box of a cluster pin.
    pub cluster_pin_size: Size,
    /// Label placement.
    pub label: LabelConfig,
    /// Detail card placement.
    pub card: CardConfig,
    /// Gesture recognition.
    pub gesture: GestureConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            map_size: Size::new(1000.0, 700.0),
            min_zoom: 1.0,
            max_zoom: 8.0,
            initial_zoom: 1.0,
            detail_zoom: 4.0,
            cluster_threshold: 40.0,
            reset_mode: ResetMode::Fit,
            pin_size: Size::new(24.0, 24.0),
            cluster_pin_size: Size::new(32.0, 32.0),
            label: LabelConfig::default(),
            card: CardConfig::default(),
            gesture: GestureConfig::default(),
        }
    }
}

impl MapConfig {
    /// Checks sizes and zoom limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size("map", self.map_size)?;
        check_zoom("minimum", self.min_zoom)?;
        check_zoom("maximum", self.max_zoom)?;
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvertedZoomLimits {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.initial_zoom) {
            return Err(ConfigError::InitialZoomOutOfRange {
                initial: self.initial_zoom,
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        check_zoom("detail", self.detail_zoom)?;
        if !(self.cluster_threshold.is_finite() && self.cluster_threshold >= 0.0) {
            return Err(ConfigError::InvalidClusterThreshold(self.cluster_threshold));
        }
        check_size("pin", self.pin_size)?;
        check_size("cluster pin", self.cluster_pin_size)?;
        check_size("label", self.label.label_size)?;
        check_size("point card", self.card.point_size)?;
        check_size("cluster card", self.card.cluster_size)?;
        Ok(())
    }

    /// Hit box size of a pin standing for `members` points.
    #[must_use]
    pub fn pin_size_for(&self, members: usize) -> Size {
        if members > 1 {
            self.cluster_pin_size
        } else {
            self.pin_size
        }
    }
}

fn check_size(what: &'static str, size: Size) -> Result<(), ConfigError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(size.width) && ok(size.height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSize {
            what,
            width: size.width,
            height: size.height,
        })
    }
}

fn check_zoom(what: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidZoom { what, value })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(MapConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_sizes() {
        let config = MapConfig {
            map_size: Size::new(0.0, 500.0),
            ..MapConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSize { what: "map", .. })
        ));

        let mut config = MapConfig::default();
        config.label.label_size = Size::new(120.0, f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSize { what: "label", .. })
        ));
    }

    #[test]
    fn rejects_bad_zoom_limits() {
        let base = MapConfig::default();
        let check = |min_zoom, max_zoom, initial_zoom| {
            MapConfig {
                min_zoom,
                max_zoom,
                initial_zoom,
                ..base
            }
            .validate()
        };
        assert_eq!(
            check(0.0, 8.0, 1.0),
            Err(ConfigError::InvalidZoom {
                what: "minimum",
                value: 0.0
            })
        );
        assert_eq!(
            check(4.0, 2.0, 3.0),
            Err(ConfigError::InvertedZoomLimits { min: 4.0, max: 2.0 })
        );
        assert_eq!(
            check(1.0, 8.0, 9.0),
            Err(ConfigError::InitialZoomOutOfRange {
                initial: 9.0,
                min: 1.0,
                max: 8.0
            })
        );
        assert!(check(1.0, 8.0, f64::NAN).is_err(), "NaN initial zoom accepted");
        assert_eq!(check(0.5, 0.5, 0.5), Ok(()));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::InvalidSize {
            what: "cluster card",
            width: -1.0,
            height: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "cluster card size must be finite and positive, got -1x2"
        );
    }
}
