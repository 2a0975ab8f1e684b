//! # Uniform-Grid Spatial Index
//!
//! Broad-phase structure answering "which tracked objects overlap this
//! region" by bucketing world space into fixed-size square cells. A
//! cheap filter narrowing candidates before the host runs its precise
//! checks; it knows nothing about the objects beyond their handles.
//!
//! # Usage discipline
//!
//! The index does not auto-invalidate stale entries. The intended
//! per-tick cycle is `clear`, re-insert every moved object, then fan
//! out queries. Hosts that track few movers can instead `remove` and
//! re-insert individual objects. Inserting the same object twice
//! without either step duplicates it in the affected cells.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::{TuningError, TuningResult};
use crate::math::Aabb;

/// Integer coordinates of one grid cell.
type CellCoord = (i32, i32);

/// A uniform grid mapping cells to the object handles overlapping them.
///
/// `T` is whatever the host uses to identify objects - typically a
/// pool handle or entity id. It must be cheap to copy and hashable.
#[derive(Clone, Debug)]
pub struct SpatialIndex<T> {
    /// Edge length of one cell, in world units. Immutable.
    cell_size: f32,
    /// Forward map: cell -> objects overlapping it.
    cells: HashMap<CellCoord, Vec<T>>,
    /// Reverse map: object -> cells it was inserted into. Kept in
    /// lockstep with `cells` so removal never leaves strays behind.
    tracked: HashMap<T, Vec<CellCoord>>,
}

impl<T> SpatialIndex<T>
where
    T: Copy + Eq + Hash,
{
    /// Creates an index with the given cell size.
    ///
    /// # Errors
    ///
    /// Rejects a non-finite or non-positive `cell_size`; a silently
    /// degenerate grid would corrupt every query after it.
    pub fn new(cell_size: f32) -> TuningResult<Self> {
        if !cell_size.is_finite() {
            return Err(TuningError::NotFinite { name: "cell_size" });
        }
        if cell_size <= 0.0 {
            return Err(TuningError::NonPositiveCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            cells: HashMap::new(),
            tracked: HashMap::new(),
        })
    }

    /// The configured cell edge length.
    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of tracked objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    /// Returns true if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Number of allocated cell buckets, warm empty ones included.
    ///
    /// Diagnostic only. Bounded by the cells touched over the last two
    /// clear cycles, not by everywhere objects have ever been.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.cells.len()
    }

    /// Empties every bucket and the reverse map.
    ///
    /// Call once per tick before re-inserting moved objects. Buckets
    /// that held objects last tick keep their capacity warm so
    /// steady-state ticks do not reallocate; buckets that stayed empty
    /// through a full cycle are dropped, so the key set does not grow
    /// without bound as objects roam a large world.
    pub fn clear(&mut self) {
        self.cells.retain(|_, bucket| {
            let keep = !bucket.is_empty();
            bucket.clear();
            keep
        });
        self.tracked.clear();
    }

    /// Inserts `object` into every cell overlapped by `bounds`.
    ///
    /// A zero-area AABB still lands in its containing cell. Bounds
    /// exactly on a cell boundary belong to the lower cell under floor
    /// division. Re-inserting without `clear` or `remove` duplicates
    /// the object; that is the documented precondition, not a checked
    /// error.
    pub fn insert(&mut self, object: T, bounds: Aabb) {
        let (min_x, min_y, max_x, max_y) = self.cell_range(&bounds);
        // Capacity hint only. Widened to i64 so a pathological AABB
        // spanning a huge cell range cannot overflow, and capped since
        // real inserts cover a handful of cells.
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let covered_hint = {
            let cols = i64::from(max_x) - i64::from(min_x) + 1;
            let rows = i64::from(max_y) - i64::from(min_y) + 1;
            cols.saturating_mul(rows).min(64) as usize
        };
        let mut covered = Vec::with_capacity(covered_hint);

        for cy in min_y..=max_y {
            for cx in min_x..=max_x {
                self.cells.entry((cx, cy)).or_default().push(object);
                covered.push((cx, cy));
            }
        }

        self.tracked.entry(object).or_default().extend(covered);
    }

    /// Removes `object` from every cell it was inserted into.
    ///
    /// Returns true if the object was tracked. Both maps stay
    /// consistent: after removal no cell retains the object.
    pub fn remove(&mut self, object: &T) -> bool {
        let Some(covered) = self.tracked.remove(object) else {
            return false;
        };
        for coord in covered {
            if let Some(bucket) = self.cells.get_mut(&coord) {
                bucket.retain(|candidate| candidate != object);
            }
        }
        true
    }

    /// Returns every object overlapping `region`, each exactly once.
    ///
    /// Result order is unspecified. Objects straddling several covered
    /// cells are deduplicated.
    #[must_use]
    pub fn query(&self, region: Aabb) -> Vec<T> {
        let (min_x, min_y, max_x, max_y) = self.cell_range(&region);
        let mut seen: HashSet<T> = HashSet::new();
        let mut results = Vec::new();

        for cy in min_y..=max_y {
            for cx in min_x..=max_x {
                let Some(bucket) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &object in bucket {
                    if seen.insert(object) {
                        results.push(object);
                    }
                }
            }
        }

        results
    }

    /// Inclusive cell range covered by an AABB.
    ///
    /// `floor(min / cell_size)` through `floor(max / cell_size)` on
    /// each axis, so a degenerate box maps to exactly one cell.
    fn cell_range(&self, aabb: &Aabb) -> (i32, i32, i32, i32) {
        let min_x = self.cell_of(aabb.min.x);
        let min_y = self.cell_of(aabb.min.y);
        let max_x = self.cell_of(aabb.max.x).max(min_x);
        let max_y = self.cell_of(aabb.max.y).max(min_y);
        (min_x, min_y, max_x, max_y)
    }

    /// Cell coordinate owning a world coordinate. The lower cell owns
    /// exact boundaries.
    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, coordinate: f32) -> i32 {
        (coordinate / self.cell_size).floor() as i32
    }
}
