// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Cluster: zoom-dependent grouping of nearby map points.
//!
//! Points closer than an effective radius are merged into a
//! [`PointCluster`] for display. The radius shrinks with the square root of
//! the zoom level, so clusters coalesce when zoomed out and split apart as
//! the user zooms in.
//!
//! The algorithm is a single greedy pass:
//!
//! 1. Walk the points in input order.
//! 2. Each point not yet assigned seeds a new cluster.
//! 3. The seed absorbs every later unassigned point within the radius **of
//!    the seed**. Membership is not chained transitively through other
//!    members.
//!
//! The result is deterministic for a given input order. A cluster's id is
//! built from its sorted member keys, so it does not depend on that order,
//! and a singleton's id is simply its point's key.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use wayfinder_cluster::cluster;
//!
//! let points = [
//!     ("a", Point::new(100.0, 100.0)),
//!     ("b", Point::new(110.0, 105.0)),
//!     ("c", Point::new(500.0, 500.0)),
//! ];
//! let set = cluster(&points, 25.0);
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.clusters()[0].id, "a+b");
//! assert_eq!(set.clusters()[1].id, "c");
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Separator between member keys in a cluster id.
pub const CLUSTER_ID_SEPARATOR: char = '+';

/// Anything that can be clustered: a key plus an optional location.
///
/// Items without a location are skipped.
pub trait ClusterItem {
    /// Unique key of the item within one point set.
    fn key(&self) -> &str;

    /// Map-space location, if known.
    fn location(&self) -> Option<Point>;
}

impl<S: AsRef<str>> ClusterItem for (S, Point) {
    fn key(&self) -> &str {
        self.0.as_ref()
    }

    fn location(&self) -> Option<Point> {
        Some(self.1)
    }
}

impl<S: AsRef<str>> ClusterItem for (S, Option<Point>) {
    fn key(&self) -> &str {
        self.0.as_ref()
    }

    fn location(&self) -> Option<Point> {
        self.1
    }
}

/// Clustering radius in map units for a zoom level.
///
/// `threshold` is the radius at zoom level `1.0`; it is divided by the
/// square root of `zoom_level`. Non-positive or non-finite zoom levels leave
/// the threshold unchanged.
#[must_use]
pub fn effective_radius(threshold: f64, zoom_level: f64) -> f64 {
    if zoom_level.is_finite() && zoom_level > 0.0 {
        threshold / zoom_level.sqrt()
    } else {
        threshold
    }
}

/// A group of points displayed as one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCluster {
    /// Sorted member keys joined with [`CLUSTER_ID_SEPARATOR`].
    pub id: String,
    /// Arithmetic mean of the member locations.
    pub centroid: Point,
    /// Indices of the members in the input slice, seed first.
    pub members: SmallVec<[usize; 4]>,
}

impl PointCluster {
    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Clusters are never empty; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` for a cluster that should render as a plain point.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// The clusters computed for one point set and radius.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterSet {
    clusters: Vec<PointCluster>,
    membership: Vec<Option<usize>>,
}

impl ClusterSet {
    /// Clusters in seed order.
    #[must_use]
    pub fn clusters(&self) -> &[PointCluster] {
        &self.clusters
    }

    /// Number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns `true` if no point had a location.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Iterates over the clusters in seed order.
    pub fn iter(&self) -> core::slice::Iter<'_, PointCluster> {
        self.clusters.iter()
    }

    /// Cluster containing the input item at `index`, if it was located.
    #[must_use]
    pub fn cluster_of(&self, index: usize) -> Option<&PointCluster> {
        self.membership
            .get(index)
            .copied()
            .flatten()
            .map(|c| &self.clusters[c])
    }

    /// Looks up a cluster by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PointCluster> {
        self.clusters.iter().find(|c| c.id == id)
    }
}

impl<'a> IntoIterator for &'a ClusterSet {
    type Item = &'a PointCluster;
    type IntoIter = core::slice::Iter<'a, PointCluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

/// Clusters `items` with a map-space `radius`.
///
/// Distances are compared inclusively (`distance <= radius`), so a zero
/// radius still merges coincident points. A negative or NaN radius yields
/// singletons only.
#[must_use]
pub fn cluster<T: ClusterItem>(items: &[T], radius: f64) -> ClusterSet {
    let located: Vec<Option<Point>> = items
        .iter()
        .map(|item| item.location().filter(|p| p.is_finite()))
        .collect();
    let mut membership: Vec<Option<usize>> = vec![None; items.len()];
    let mut clusters = Vec::new();

    for seed in 0..items.len() {
        let Some(seed_pos) = located[seed] else {
            continue;
        };
        if membership[seed].is_some() {
            continue;
        }
        let cluster_index = clusters.len();
        membership[seed] = Some(cluster_index);
        let mut members: SmallVec<[usize; 4]> = SmallVec::new();
        members.push(seed);
        let mut sum = seed_pos.to_vec2();

        for other in seed + 1..items.len() {
            if membership[other].is_some() {
                continue;
            }
            if let Some(pos) = located[other]
                && seed_pos.distance(pos) <= radius
            {
                membership[other] = Some(cluster_index);
                members.push(other);
                sum += pos.to_vec2();
            }
        }

        let centroid = (sum / members.len() as f64).to_point();
        clusters.push(PointCluster {
            id: cluster_id(items, &members),
            centroid,
            members,
        });
    }

    ClusterSet {
        clusters,
        membership,
    }
}

fn cluster_id<T: ClusterItem>(items: &[T], members: &[usize]) -> String {
    let mut keys: SmallVec<[&str; 4]> = members.iter().map(|&i| items[i].key()).collect();
    keys.sort_unstable();
    let mut id = String::new();
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            id.push(CLUSTER_ID_SEPARATOR);
        }
        id.push_str(key);
    }
    id
}
