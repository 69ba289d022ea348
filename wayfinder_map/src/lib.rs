// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Map: a headless, interactive floor-plan map.
//!
//! [`MapEngine`] composes the Wayfinder building blocks into one object a UI
//! adapter can drive:
//!
//! - `wayfinder_view` keeps the visible rectangle and converts between
//!   screen and map coordinates.
//! - `wayfinder_gesture` turns pointer, touch and wheel input into pans,
//!   zooms, taps and double-taps.
//! - `wayfinder_cluster` merges nearby points depending on the zoom level.
//! - `wayfinder_label` places pin labels without overlaps.
//! - `wayfinder_card` positions the detail card of the selection.
//!
//! The host supplies [`InteractivePoint`]s, forwards input, and receives
//! selection, click and hover events through a [`MapListener`]. Each frame it
//! reads a [`Frame`] describing the view box, pins, labels, the open card and
//! the highlight marker.
//!
//! Nothing here renders, and nothing here fails after construction:
//! points without coordinates are skipped, labels that do not fit are
//! hidden, and cards that do not fit are centered.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use wayfinder_map::{
//!     GestureInput, InteractivePoint, MapConfig, MapEngine, MapListener, MapMode, PointerButton,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     selected: Vec<String>,
//! }
//!
//! impl MapListener for Host {
//!     fn on_point_selected(&mut self, id: &str) {
//!         self.selected.push(id.to_owned());
//!     }
//! }
//!
//! let config = MapConfig {
//!     map_size: Size::new(1000.0, 500.0),
//!     ..MapConfig::default()
//! };
//! let mut map = MapEngine::new(config, MapMode::Interactive, Size::new(1000.0, 500.0))
//!     .expect("valid configuration");
//! map.set_points([InteractivePoint::new("stage", Point::new(300.0, 200.0))]);
//!
//! let mut host = Host::default();
//! let at = Point::new(300.0, 200.0);
//! map.handle_input(
//!     GestureInput::PointerDown { position: at, button: PointerButton::Primary, precision: false, time_ms: 0 },
//!     &mut host,
//! );
//! map.handle_input(GestureInput::PointerUp { position: at, time_ms: 80 }, &mut host);
//!
//! assert_eq!(host.selected, ["stage"]);
//! let frame = map.frame();
//! assert_eq!(frame.pins[0].id, "stage");
//! assert!(frame.card.is_some());
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the configuration, points and
//!   frame output.

mod config;
mod engine;
mod error;
mod frame;
mod listener;
mod point;

pub use config::{MapConfig, MapMode};
pub use engine::MapEngine;
pub use error::ConfigError;
pub use frame::{CardOutput, Frame, Highlight, LabelOutput, PinOutput, Selection};
pub use listener::MapListener;
pub use point::InteractivePoint;

pub use wayfinder_card::{CardConfig, CardKind, CardPlacement, CardSide};
pub use wayfinder_gesture::{
    GestureConfig, GestureInput, GestureMode, GestureOutcome, PointerButton, Tap, TouchPhase,
    Touches,
};
pub use wayfinder_label::{LabelConfig, LabelSide};
pub use wayfinder_view::{ResetMode, ViewBox};
