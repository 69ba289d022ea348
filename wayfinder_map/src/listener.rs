// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Callbacks from the engine to its host. All methods default to no-ops.
///
/// The unit type implements this trait for hosts that only read frames.
pub trait MapListener {
    /// A single point was tapped.
    fn on_point_selected(&mut self, id: &str) {
        let _ = id;
    }

    /// A cluster was tapped; `ids` are its member point ids.
    fn on_cluster_selected(&mut self, ids: &[String]) {
        let _ = ids;
    }

    /// An empty area was tapped in [`crate::MapMode::Interactive`].
    fn on_map_clicked(&mut self, coordinate: Point) {
        let _ = coordinate;
    }

    /// The pin under the pointer changed; `None` when the pointer left all
    /// pins.
    fn on_hover_changed(&mut self, id: Option<&str>) {
        let _ = id;
    }
}

impl MapListener for () {}
