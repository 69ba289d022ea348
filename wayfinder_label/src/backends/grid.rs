// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend: rectangles are bucketed into fixed-size cells.

use core::fmt::Debug;

use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;

use crate::backend::{Backend, overlaps};

/// Default cell edge, in screen pixels.
pub const DEFAULT_CELL_SIZE: f64 = 64.0;

// Rectangles spanning more cells than this are kept in a side list instead.
const MAX_CELLS_PER_RECT: i64 = 256;

type CellRange = (i64, i64, i64, i64);

/// Uniform grid backend.
///
/// Good for the typical label layout: many small, similarly sized
/// rectangles spread across the screen.
#[derive(Clone)]
pub struct Grid {
    cell_size: f64,
    entries: Vec<Option<Rect>>,
    cells: HashMap<(i64, i64), SmallVec<[usize; 4]>>,
    oversized: SmallVec<[usize; 4]>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("alive", &alive)
            .field("cells", &self.cells.len())
            .field("oversized", &self.oversized.len())
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Creates an empty grid with the given cell edge.
    ///
    /// Non-positive or non-finite sizes fall back to [`DEFAULT_CELL_SIZE`].
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        Self {
            cell_size,
            entries: Vec::new(),
            cells: HashMap::new(),
            oversized: SmallVec::new(),
        }
    }

    fn cell_range(&self, rect: Rect) -> Option<CellRange> {
        if !(rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite())
        {
            return None;
        }
        let range = (
            cell_coord(rect.x0, self.cell_size),
            cell_coord(rect.y0, self.cell_size),
            cell_coord(rect.x1, self.cell_size),
            cell_coord(rect.y1, self.cell_size),
        );
        let columns = range.2.saturating_sub(range.0).saturating_add(1);
        let rows = range.3.saturating_sub(range.1).saturating_add(1);
        let span = columns.saturating_mul(rows);
        (span <= MAX_CELLS_PER_RECT).then_some(range)
    }

    fn detach(&mut self, slot: usize) {
        let Some(Some(old)) = self.entries.get(slot).copied() else {
            return;
        };
        match self.cell_range(old) {
            Some((cx0, cy0, cx1, cy1)) => {
                for cx in cx0..=cx1 {
                    for cy in cy0..=cy1 {
                        if let Some(bucket) = self.cells.get_mut(&(cx, cy)) {
                            bucket.retain(|s| *s != slot);
                            if bucket.is_empty() {
                                self.cells.remove(&(cx, cy));
                            }
                        }
                    }
                }
            }
            None => self.oversized.retain(|s| *s != slot),
        }
        self.entries[slot] = None;
    }

    fn attach(&mut self, slot: usize, rect: Rect) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some(rect);
        match self.cell_range(rect) {
            Some((cx0, cy0, cx1, cy1)) => {
                for cx in cx0..=cx1 {
                    for cy in cy0..=cy1 {
                        self.cells.entry((cx, cy)).or_default().push(slot);
                    }
                }
            }
            None => self.oversized.push(slot),
        }
    }
}

impl Backend for Grid {
    fn insert(&mut self, slot: usize, rect: Rect) {
        self.detach(slot);
        self.attach(slot, rect);
    }

    fn update(&mut self, slot: usize, rect: Rect) {
        if matches!(self.entries.get(slot), Some(Some(_))) {
            self.detach(slot);
            self.attach(slot, rect);
        }
    }

    fn remove(&mut self, slot: usize) {
        self.detach(slot);
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.cells.clear();
        self.oversized.clear();
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        let mut found: SmallVec<[usize; 16]> = SmallVec::new();
        match self.cell_range(rect) {
            Some((cx0, cy0, cx1, cy1)) => {
                for cx in cx0..=cx1 {
                    for cy in cy0..=cy1 {
                        if let Some(bucket) = self.cells.get(&(cx, cy)) {
                            found.extend_from_slice(bucket);
                        }
                    }
                }
                found.extend_from_slice(&self.oversized);
            }
            // Huge or degenerate query: scan everything.
            None => found.extend((0..self.entries.len()).filter(|&i| self.entries[i].is_some())),
        }
        found.sort_unstable();
        found.dedup();
        for slot in found {
            if let Some(Some(r)) = self.entries.get(slot)
                && overlaps(*r, rect)
            {
                f(slot);
            }
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float-to-int casts saturate, and `cell_range` saturates the span"
)]
fn cell_coord(v: f64, cell_size: f64) -> i64 {
    (v / cell_size).floor() as i64
}
