//! R-tree of entity positions, rebuilt each tick.

use hd_core::{EntityId, Point3};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Entry stored in the R-tree: a 3-D point with the owning `EntityId`.
#[derive(Clone)]
struct EntityEntry {
    point: [f32; 3],
    id:    EntityId,
}

impl RTreeObject for EntityEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for EntityEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Read-only snapshot of where every entity is.
pub struct SpatialIndex {
    tree: RTree<EntityEntry>,
}

impl SpatialIndex {
    /// Bulk-load from `(entity, position)` pairs.
    pub fn build<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = (EntityId, Point3)>,
    {
        let entries: Vec<EntityEntry> = entities
            .into_iter()
            .map(|(id, p)| EntityEntry { point: p.to_array(), id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Entities within `radius` of `center` (boundary inclusive), with their
    /// positions, ascending by id.
    pub fn within(&self, center: Point3, radius: f32) -> Vec<(EntityId, Point3)> {
        let mut found: Vec<(EntityId, Point3)> = self
            .tree
            .locate_within_distance(center.to_array(), radius * radius)
            .map(|e| (e.id, Point3::new(e.point[0], e.point[1], e.point[2])))
            .collect();
        found.sort_unstable_by_key(|&(id, _)| id);
        found
    }
}
