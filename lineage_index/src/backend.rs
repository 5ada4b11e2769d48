// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for point index implementations.

use kurbo::{Point, Rect};

/// Spatial backend abstraction used by [`IndexGeneric`][crate::IndexGeneric].
///
/// Backends see only slot numbers and positions; payloads and generations
/// live in the index.
pub trait Backend {
    /// Insert a new slot at `point`.
    fn insert(&mut self, slot: usize, point: Point);

    /// Remove a slot.
    fn remove(&mut self, slot: usize);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Visit slots whose point lies inside `rect` (edges included).
    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, f: F);

    /// The slot closest to `point`, with its squared distance.
    ///
    /// Only slots with a squared distance of at most `max_distance_sq` are
    /// considered. Ties go to the lower slot number.
    fn nearest(&self, point: Point, max_distance_sq: f64) -> Option<(usize, f64)>;
}

/// Keep `candidate` if it beats `best`: closer, or equally close with a lower slot.
#[inline]
pub(crate) fn closer(best: Option<(usize, f64)>, candidate: (usize, f64)) -> bool {
    match best {
        None => true,
        Some((slot, d)) => candidate.1 < d || (candidate.1 == d && candidate.0 < slot),
    }
}

/// Closed containment test; `Rect::contains` excludes the far edges.
#[inline]
pub(crate) fn rect_contains(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}
