//! Spatial Index Module
//!
//! R-tree of point centres in graph space. Point boxes have a fixed pixel size,
//! so their graph-space extent depends on the zoom; the index therefore stores
//! centres only and callers widen their query rectangle by the largest half-size.

use crate::types::{GraphPos, PointId};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A spatial entry representing one point's centre.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub point_id: PointId,
    pub x: f64,
    pub y: f64,
}

impl SpatialEntry {
    pub fn new(point_id: PointId, pos: GraphPos) -> Self {
        Self {
            point_id,
            x: pos.x,
            y: pos.y,
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.point_id == other.point_id
    }
}

/// Spatial index over point centres.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<PointId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert a point, replacing its previous entry if any.
    pub fn insert(&mut self, point_id: PointId, pos: GraphPos) {
        if let Some(old_entry) = self.entries.remove(&point_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(point_id, pos);
        self.tree.insert(entry);
        self.entries.insert(point_id, entry);
    }

    pub fn remove(&mut self, point_id: PointId) -> bool {
        if let Some(entry) = self.entries.remove(&point_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    pub fn update(&mut self, point_id: PointId, pos: GraphPos) {
        self.insert(point_id, pos);
    }

    /// All points whose centre lies inside the rectangle (inclusive).
    pub fn query_rect(&self, min: GraphPos, max: GraphPos) -> Vec<PointId> {
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);

        self.tree
            .locate_in_envelope(&envelope)
            .map(|entry| entry.point_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
