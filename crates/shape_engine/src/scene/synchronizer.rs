//! Store-to-graph reconciliation
//!
//! `sync` is a pure diff-and-apply procedure: it compares the store against
//! the live-node cache and makes the minimum set of backend calls to bring
//! them into agreement. It is invoked by the frame loop whenever the store
//! revision moved, never wired to any reactive mechanism.
//!
//! Resource-churn rules:
//! - the stale-node sweep is the only path that releases geometry and
//!   material resources, so leak checking has a single place to look
//! - transform and material parameters are re-applied on every pass; both
//!   are cheap in-place writes
//! - geometry is rebuilt only when the cached (kind, radius, height)
//!   signature differs from the store record, because geometry allocation
//!   is the expensive operation
//! - a pass over an unchanged store allocates nothing and disposes nothing

use slotmap::SecondaryMap;

use crate::backend::{MaterialDesc, SceneBackend};
use crate::foundation::math::Transform;
use crate::geometry::{GeometryFactory, GeometrySignature};
use crate::store::{ObjectId, ObjectStore, ShapeObject};

use super::LiveNode;

/// Outcome counters for one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Nodes created for new store entries
    pub created: usize,
    /// Stale nodes removed and released
    pub removed: usize,
    /// Geometry rebuilds caused by shape-parameter changes
    pub rebuilt: usize,
    /// Nodes updated in place without geometry churn
    pub refreshed: usize,
}

impl SyncStats {
    /// True when the pass changed no graph structure and moved no resources
    pub fn is_quiescent(&self) -> bool {
        self.created == 0 && self.removed == 0 && self.rebuilt == 0
    }
}

/// Reconciles the object store against live render-graph nodes
#[derive(Debug, Default)]
pub struct SceneSynchronizer {
    nodes: SecondaryMap<ObjectId, LiveNode>,
}

impl SceneSynchronizer {
    /// Create a synchronizer with no live nodes
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether an object currently has a live node
    pub fn has_node(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Live node for an object
    pub fn node(&self, id: ObjectId) -> Option<&LiveNode> {
        self.nodes.get(id)
    }

    /// Mutable live node for an object
    pub fn node_mut(&mut self, id: ObjectId) -> Option<&mut LiveNode> {
        self.nodes.get_mut(id)
    }

    /// Iterate live nodes
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &LiveNode)> {
        self.nodes.iter()
    }

    /// Ids that currently have live nodes
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.nodes.keys()
    }

    /// Reconcile the live-node set against the store
    pub fn sync(&mut self, store: &ObjectStore, backend: &mut impl SceneBackend) -> SyncStats {
        let mut stats = SyncStats::default();

        // Phase 1: sweep nodes whose store entry is gone. This is the only
        // place graph resources are released outside of teardown.
        let stale: Vec<ObjectId> = self.nodes.keys().filter(|id| !store.contains(*id)).collect();
        for id in stale {
            if let Some(node) = self.nodes.remove(id) {
                backend.remove_node(node.node());
                backend.dispose_geometry(node.geometry());
                backend.dispose_material(node.material());
                stats.removed += 1;
                log::debug!("scene: released node for {id:?}");
            }
        }

        // Phase 2: create or refresh a node for every store entry
        for (id, object) in store.iter() {
            if let Some(node) = self.nodes.get_mut(id) {
                Self::refresh_node(node, object, backend, &mut stats);
            } else {
                self.create_node(id, object, backend);
                stats.created += 1;
            }
        }

        if !stats.is_quiescent() {
            log::debug!(
                "scene: sync created {}, removed {}, rebuilt {} (live nodes: {})",
                stats.created,
                stats.removed,
                stats.rebuilt,
                self.nodes.len()
            );
        }
        stats
    }

    /// Push every live transform to the backend
    ///
    /// Called once per frame after simulation so the graph sees the latest
    /// working transforms regardless of whether reconciliation ran.
    pub fn push_transforms(&self, backend: &mut impl SceneBackend) {
        for node in self.nodes.values() {
            backend.set_node_transform(node.node(), &node.transform);
        }
    }

    /// Release every live node's resources and clear the cache
    ///
    /// Teardown path; after this the synchronizer can be reused against an
    /// empty graph.
    pub fn teardown(&mut self, backend: &mut impl SceneBackend) {
        let count = self.nodes.len();
        let ids: Vec<ObjectId> = self.nodes.keys().collect();
        for id in ids {
            if let Some(node) = self.nodes.remove(id) {
                backend.remove_node(node.node());
                backend.dispose_geometry(node.geometry());
                backend.dispose_material(node.material());
            }
        }
        if count > 0 {
            log::info!("scene: teardown released {count} node(s)");
        }
    }

    fn create_node(&mut self, id: ObjectId, object: &ShapeObject, backend: &mut impl SceneBackend) {
        let signature = GeometrySignature::of(object);
        let geometry = backend.create_geometry(&GeometryFactory::build_for(object));
        let material = backend.create_material(&MaterialDesc::of(object));
        let node = backend.create_node(geometry, material);
        backend.add_node(node);

        let transform = Self::store_transform(object);
        backend.set_node_transform(node, &transform);

        self.nodes
            .insert(id, LiveNode::new(node, geometry, material, transform, signature));
        log::debug!("scene: created node for {id:?} ({:?})", object.kind);
    }

    fn refresh_node(
        node: &mut LiveNode,
        object: &ShapeObject,
        backend: &mut impl SceneBackend,
        stats: &mut SyncStats,
    ) {
        // Transform and material re-apply unconditionally; both are cheap
        // and keeping them unconditional avoids a field-level diff.
        node.transform = Self::store_transform(object);
        backend.update_material(node.material(), &MaterialDesc::of(object));

        let signature = GeometrySignature::of(object);
        if node.signature() != signature {
            let geometry = backend.create_geometry(&GeometryFactory::build_for(object));
            backend.set_node_geometry(node.node(), geometry);
            backend.dispose_geometry(node.geometry());
            node.replace_geometry(geometry, signature);
            stats.rebuilt += 1;
            log::debug!("scene: rebuilt geometry for {:?}", object.kind);
        } else {
            stats.refreshed += 1;
        }
    }

    fn store_transform(object: &ShapeObject) -> Transform {
        Transform {
            position: object.position,
            rotation: object.rotation,
            scale: object.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::foundation::math::{Color, Vec3};
    use crate::store::{ObjectPatch, ShapeKind, ShapeObject};
    use std::collections::HashSet;

    fn synced_fixture() -> (ObjectStore, SceneSynchronizer, HeadlessBackend) {
        let mut store = ObjectStore::new();
        store.add(ShapeObject::new(ShapeKind::Cube).with_position(Vec3::new(2.0, 0.0, 0.0)));
        store.add(ShapeObject::new(ShapeKind::Torus).with_position(Vec3::new(-2.0, 0.0, 0.0)));

        let mut synchronizer = SceneSynchronizer::new();
        let mut backend = HeadlessBackend::new();
        synchronizer.sync(&store, &mut backend);
        (store, synchronizer, backend)
    }

    #[test]
    fn test_initial_sync_creates_every_node() {
        let (store, synchronizer, backend) = synced_fixture();

        assert_eq!(synchronizer.node_count(), store.len());
        assert_eq!(backend.nodes_in_graph(), store.len());
        assert_eq!(backend.live_geometries(), store.len());
        assert_eq!(backend.live_materials(), store.len());
    }

    #[test]
    fn test_second_pass_is_quiescent() {
        let (store, mut synchronizer, mut backend) = synced_fixture();
        let before = backend.stats();

        let stats = synchronizer.sync(&store, &mut backend);

        assert!(stats.is_quiescent(), "unchanged store must not churn: {stats:?}");
        let after = backend.stats();
        assert_eq!(before.allocations(), after.allocations(), "no allocations on second pass");
        assert_eq!(before.disposals(), after.disposals(), "no disposals on second pass");
    }

    #[test]
    fn test_removal_releases_resources() {
        let (mut store, mut synchronizer, mut backend) = synced_fixture();
        let doomed = store.ids().last().unwrap();

        store.remove(doomed);
        let stats = synchronizer.sync(&store, &mut backend);

        assert_eq!(stats.removed, 1);
        assert!(!synchronizer.has_node(doomed));
        assert_eq!(backend.live_geometries(), store.len());
        assert_eq!(backend.live_materials(), store.len());
        assert_eq!(backend.stats().redundant_disposes, 0);
    }

    #[test]
    fn test_live_ids_match_store_ids_after_arbitrary_edits() {
        let (mut store, mut synchronizer, mut backend) = synced_fixture();

        let added = store.add(ShapeObject::new(ShapeKind::Cone));
        let removed = store.ids().next().unwrap();
        store.remove(removed);
        store.update(added, &ObjectPatch::new().radius(3.0));
        synchronizer.sync(&store, &mut backend);

        let store_ids: HashSet<_> = store.ids().collect();
        let live_ids: HashSet<_> = synchronizer.ids().collect();
        assert_eq!(store_ids, live_ids);
    }

    #[test]
    fn test_color_update_does_not_rebuild_geometry() {
        let (mut store, mut synchronizer, mut backend) = synced_fixture();
        let id = store.ids().next().unwrap();
        let geometry_before = synchronizer.node(id).unwrap().geometry();
        let allocations_before = backend.stats().geometries_created;

        store.update(id, &ObjectPatch::new().color(Color::new(0.9, 0.1, 0.1)));
        let stats = synchronizer.sync(&store, &mut backend);

        assert_eq!(stats.rebuilt, 0);
        assert_eq!(backend.stats().geometries_created, allocations_before);
        assert_eq!(synchronizer.node(id).unwrap().geometry(), geometry_before);

        let material = synchronizer.node(id).unwrap().material();
        let desc = backend.material(material).unwrap();
        assert_eq!(desc.color, Color::new(0.9, 0.1, 0.1), "material re-applied in place");
    }

    #[test]
    fn test_radius_update_rebuilds_geometry_once() {
        let (mut store, mut synchronizer, mut backend) = synced_fixture();
        let id = store.ids().next().unwrap();
        let geometry_before = synchronizer.node(id).unwrap().geometry();

        store.update(id, &ObjectPatch::new().radius(2.5));
        let stats = synchronizer.sync(&store, &mut backend);

        assert_eq!(stats.rebuilt, 1);
        let node = synchronizer.node(id).unwrap();
        assert_ne!(node.geometry(), geometry_before);
        assert!(backend.geometry(geometry_before).is_none(), "old geometry released");
        assert_eq!(backend.node_geometry(node.node()), Some(node.geometry()));

        // Parameters unchanged since the rebuild: next pass is quiet again
        let stats = synchronizer.sync(&store, &mut backend);
        assert!(stats.is_quiescent());
    }

    #[test]
    fn test_kind_change_rebuilds_geometry() {
        let (mut store, mut synchronizer, mut backend) = synced_fixture();
        let id = store.ids().next().unwrap();

        store.update(id, &ObjectPatch::new().kind(ShapeKind::Icosahedron));
        let stats = synchronizer.sync(&store, &mut backend);

        assert_eq!(stats.rebuilt, 1);
        let node = synchronizer.node(id).unwrap();
        assert_eq!(node.signature().kind, ShapeKind::Icosahedron);
    }

    #[test]
    fn test_sync_reapplies_store_transform() {
        let (mut store, mut synchronizer, mut backend) = synced_fixture();
        let id = store.ids().next().unwrap();

        // Simulate live drift, then a store edit that re-applies authority
        synchronizer.node_mut(id).unwrap().transform.position = Vec3::new(99.0, 99.0, 99.0);
        store.update(id, &ObjectPatch::new().position(Vec3::new(1.0, 2.0, 3.0)));
        synchronizer.sync(&store, &mut backend);

        assert_eq!(
            synchronizer.node(id).unwrap().transform.position,
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_push_transforms_uploads_working_copy() {
        let (store, mut synchronizer, mut backend) = synced_fixture();
        let id = store.ids().next().unwrap();

        synchronizer.node_mut(id).unwrap().transform.position = Vec3::new(0.0, 7.0, 0.0);
        synchronizer.push_transforms(&mut backend);

        let handle = synchronizer.node(id).unwrap().node();
        let uploaded = backend.node_transform(handle).unwrap();
        assert_eq!(uploaded.position, Vec3::new(0.0, 7.0, 0.0));
    }

    #[test]
    fn test_teardown_releases_everything() {
        let (_store, mut synchronizer, mut backend) = synced_fixture();

        synchronizer.teardown(&mut backend);

        assert_eq!(synchronizer.node_count(), 0);
        assert_eq!(backend.live_geometries(), 0);
        assert_eq!(backend.live_materials(), 0);
        assert_eq!(backend.nodes_in_graph(), 0);
        assert_eq!(backend.stats().redundant_disposes, 0);
    }
}
