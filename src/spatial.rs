//! Uniform spatial hashing for 2D proximity queries.
//!
//! The grid maps integer cell coordinates to buckets of particle indices.
//! It is cheap enough to build from scratch every frame, which is how the
//! connection pass uses it: build, query, drop. With `cell_size` equal to the
//! query radius, a query touches at most a 3x3 block of cells, so a full
//! neighbor pass is near-linear for evenly spread particles instead of the
//! O(n²) all-pairs check.
//!
//! At a few dozen particles a rebuild costs next to nothing. An incrementally
//! maintained index only pays off at populations orders of magnitude larger.

use std::collections::HashMap;

use glam::Vec2;

/// Integer cell coordinates.
pub type CellKey = (i32, i32);

/// A uniform bucket grid over particle indices.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
    len: usize,
}

impl SpatialHashGrid {
    /// Create an empty grid.
    ///
    /// Non-positive or non-finite sizes fall back to 1.0 so the key math
    /// never divides by zero.
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            cells: HashMap::new(),
            len: 0,
        }
    }

    /// Build a grid holding `positions[i]` under index `i`.
    pub fn from_positions<I>(cell_size: f32, positions: I) -> Self
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut grid = Self::new(cell_size);
        for (index, position) in positions.into_iter().enumerate() {
            grid.insert(index, position);
        }
        grid
    }

    /// Edge length of one cell.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing `position`.
    #[inline]
    pub fn key(&self, position: Vec2) -> CellKey {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Index `id` under the cell containing `position`.
    pub fn insert(&mut self, id: usize, position: Vec2) {
        let key = self.key(position);
        self.cells.entry(key).or_default().push(id);
        self.len += 1;
    }

    /// Candidates within `radius` of `position`.
    ///
    /// Returns every index stored in a cell overlapping the square of
    /// half-width `radius` around `position`. That is a superset of the
    /// indices within true Euclidean distance: callers filter by distance.
    /// The querying particle itself is included if it was inserted.
    pub fn nearby(&self, position: Vec2, radius: f32) -> Vec<usize> {
        if self.cells.is_empty() || position.is_nan() {
            return Vec::new();
        }
        let radius = if radius.is_nan() { 0.0 } else { radius.max(0.0) };
        let (min_x, min_y) = self.key(position - Vec2::splat(radius));
        let (max_x, max_y) = self.key(position + Vec2::splat(radius));

        // A box wider than the occupied cells scans the buckets instead.
        let span = (max_x as i64 - min_x as i64 + 1).saturating_mul(max_y as i64 - min_y as i64 + 1);
        if span > self.cells.len() as i64 {
            let mut found: Vec<usize> = self
                .cells
                .iter()
                .filter(|((cx, cy), _)| (min_x..=max_x).contains(cx) && (min_y..=max_y).contains(cy))
                .flat_map(|(_, bucket)| bucket.iter().copied())
                .collect();
            found.sort_unstable();
            return found;
        }

        let mut found = Vec::new();
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                if let Some(bucket) = self.cells.get(&(cx, cy)) {
                    found.extend_from_slice(bucket);
                }
            }
        }
        found
    }

    /// Drop every bucket.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }

    /// Number of inserted entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
