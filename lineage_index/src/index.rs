// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public index API and generic implementation over a pluggable backend.

use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::backend::Backend;
use crate::backends::{FlatVec, QuadTree};

/// Generational handle for entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are 32-bit; more than u32::MAX live slots is unsupported."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry<P> {
    generation: u32,
    point: Point,
    payload: P,
}

/// A point index parameterized by a spatial backend.
///
/// Changes reach the backend immediately, so queries always see the latest
/// inserts and removals.
#[derive(Debug)]
pub struct IndexGeneric<P: Copy + Debug, B: Backend> {
    entries: Vec<Option<Entry<P>>>,
    /// Generation of the last occupant of each slot, for reuse.
    generations: Vec<u32>,
    free_list: Vec<usize>,
    len: usize,
    backend: B,
}

impl<P, B> IndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<P, B> Default for IndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, B> IndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend,
{
    /// Create an empty index using an explicit backend instance.
    pub fn with_backend(backend: B) -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            backend,
        }
    }

    /// Insert a point with payload. Returns a stable handle `Key`.
    pub fn insert(&mut self, point: Point, payload: P) -> Key {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] += 1;
            idx
        } else {
            self.entries.push(None);
            self.generations.push(1);
            self.entries.len() - 1
        };
        let generation = self.generations[idx];
        self.entries[idx] = Some(Entry {
            generation,
            point,
            payload,
        });
        self.backend.insert(idx, point);
        self.len += 1;
        Key::new(idx, generation)
    }

    /// Insert every `(point, payload)` pair, returning their keys in order.
    pub fn insert_all<I: IntoIterator<Item = (Point, P)>>(&mut self, items: I) -> Vec<Key> {
        items
            .into_iter()
            .map(|(point, payload)| self.insert(point, payload))
            .collect()
    }

    /// Remove an entry, returning its payload. Stale keys are ignored.
    pub fn remove(&mut self, key: Key) -> Option<P> {
        self.entry(key)?;
        let entry = self.entries[key.idx()].take()?;
        self.backend.remove(key.idx());
        self.free_list.push(key.idx());
        self.len -= 1;
        Some(entry.payload)
    }

    /// Remove every entry in `keys`.
    pub fn remove_all<I: IntoIterator<Item = Key>>(&mut self, keys: I) {
        for key in keys {
            self.remove(key);
        }
    }

    /// Move an entry to a new point.
    pub fn update(&mut self, key: Key, point: Point) {
        let idx = key.idx();
        if let Some(e) = self.entry_mut(key) {
            e.point = point;
            self.backend.insert(idx, point);
        }
    }

    /// Clear the index. Keys handed out before stay invalid.
    pub fn clear(&mut self) {
        for (idx, slot) in self.entries.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.len = 0;
        self.backend.clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Point and payload of a live entry.
    pub fn get(&self, key: Key) -> Option<(Point, P)> {
        self.entry(key).map(|e| (e.point, e.payload))
    }

    /// The entry closest to `point`.
    pub fn nearest(&self, point: Point) -> Option<(Key, P)> {
        self.nearest_within(point, f64::INFINITY)
    }

    /// The entry closest to `point`, if one lies within `radius`.
    pub fn nearest_within(&self, point: Point, radius: f64) -> Option<(Key, P)> {
        let (slot, _) = self.backend.nearest(point, radius * radius)?;
        let e = self.entries.get(slot)?.as_ref()?;
        Some((Key::new(slot, e.generation), e.payload))
    }

    /// Query for entries whose point lies inside `rect`.
    pub fn query_rect(&self, rect: Rect) -> impl Iterator<Item = (Key, P)> + '_ {
        let mut out = Vec::new();
        self.visit_rect(rect, |k, p| out.push((k, p)));
        out.into_iter()
    }

    /// Visit entries whose point lies inside `rect` (does not allocate result storage).
    ///
    /// Calls `f(key, payload)` for each match. The order is backend-dependent.
    pub fn visit_rect<F: FnMut(Key, P)>(&self, rect: Rect, mut f: F) {
        self.backend.visit_rect(rect, |i| {
            if let Some(Some(e)) = self.entries.get(i) {
                f(Key::new(i, e.generation), e.payload);
            }
        });
    }

    /// Iterate over every live entry.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Point, P)> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, e)| {
            e.as_ref()
                .map(|e| (Key::new(i, e.generation), e.point, e.payload))
        })
    }

    fn entry(&self, key: Key) -> Option<&Entry<P>> {
        let e = self.entries.get(key.idx())?.as_ref()?;
        (e.generation == key.1).then_some(e)
    }

    fn entry_mut(&mut self, key: Key) -> Option<&mut Entry<P>> {
        let e = self.entries.get_mut(key.idx())?.as_mut()?;
        if e.generation != key.1 {
            return None;
        }
        Some(e)
    }
}

/// Default index using the quadtree backend.
pub type Index<P> = IndexGeneric<P, QuadTree>;

impl<P: Copy + Debug> Index<P> {
    /// Create a linear-scan index; fine for a handful of points.
    pub fn with_flatvec() -> IndexGeneric<P, FlatVec> {
        IndexGeneric::with_backend(FlatVec::default())
    }
}

impl<P: Copy + Debug, B: Backend + Default> FromIterator<(Point, P)> for IndexGeneric<P, B> {
    fn from_iter<I: IntoIterator<Item = (Point, P)>>(iter: I) -> Self {
        let mut idx = Self::new();
        idx.insert_all(iter);
        idx
    }
}
