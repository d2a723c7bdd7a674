//! Authoritative object store
//!
//! The store is the single source of truth for scene content. Render nodes,
//! gizmo bindings, and movement state are all derived from it; nothing else
//! owns scene data. All operations are synchronous and run on the one thread
//! that owns the engine, so there is no locking anywhere in this module.
//!
//! Every successful mutation bumps a revision counter. The frame loop
//! compares revisions to decide whether reconciliation needs to run, instead
//! of reconciling unconditionally every tick.

mod command;
mod object;
pub mod presets;

pub use command::{CommandQueue, StoreCommand};
pub use object::{MovementMode, ObjectPatch, ShapeKind, ShapeObject, TextureKind};

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable identifier for an object within the store
    ///
    /// Ids are never reused for a different live object during a session;
    /// the slot map's versioning guarantees that a stale id simply fails to
    /// resolve instead of aliasing a newer object.
    pub struct ObjectId;
}

/// Ordered, authoritative mapping from [`ObjectId`] to [`ShapeObject`]
///
/// Invariants:
/// - the store never becomes empty; removing the last object is a no-op
/// - iteration order is insertion order
/// - operations referencing a missing id are no-ops
#[derive(Debug)]
pub struct ObjectStore {
    objects: SlotMap<ObjectId, ShapeObject>,
    order: Vec<ObjectId>,
    selected: Option<ObjectId>,
    revision: u64,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore {
    /// Create a store seeded with a single default object
    ///
    /// The seed keeps the never-empty invariant structural: there is no way
    /// to construct an empty store through the public API.
    pub fn new() -> Self {
        let mut store = Self {
            objects: SlotMap::with_key(),
            order: Vec::new(),
            selected: None,
            revision: 0,
        };
        store.add(ShapeObject::default());
        store
    }

    /// Create a store from a prepared object list
    ///
    /// An empty list falls back to [`ObjectStore::new`] so the never-empty
    /// invariant holds from the first frame.
    pub fn with_objects(objects: Vec<ShapeObject>) -> Self {
        if objects.is_empty() {
            log::warn!("preset scene was empty, falling back to the starter object");
            return Self::new();
        }

        let mut store = Self {
            objects: SlotMap::with_key(),
            order: Vec::new(),
            selected: None,
            revision: 0,
        };
        for object in objects {
            store.add(object);
        }
        store
    }

    /// Insert a new object and return its id
    pub fn add(&mut self, object: ShapeObject) -> ObjectId {
        let kind = object.kind;
        let id = self.objects.insert(object);
        self.order.push(id);
        self.revision += 1;
        log::debug!("store: added {kind:?} as {id:?}");
        id
    }

    /// Remove an object by id
    ///
    /// Removing the last remaining object or a missing id is a no-op. A
    /// removed object that was selected also clears the selection.
    pub fn remove(&mut self, id: ObjectId) {
        if !self.objects.contains_key(id) {
            return;
        }
        if self.objects.len() == 1 {
            log::debug!("store: refusing to remove the last object {id:?}");
            return;
        }

        self.objects.remove(id);
        self.order.retain(|entry| *entry != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.revision += 1;
        log::debug!("store: removed {id:?}");
    }

    /// Apply a partial update to an object
    ///
    /// Missing ids and empty patches leave the store (and its revision)
    /// untouched.
    pub fn update(&mut self, id: ObjectId, patch: &ObjectPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(object) = self.objects.get_mut(id) {
            patch.apply_to(object);
            self.revision += 1;
        }
    }

    /// Change the selection and return the selection now in effect
    ///
    /// Selecting a missing id leaves the previous selection in place.
    /// Selection is editor state, not scene content, so it does not bump
    /// the revision.
    pub fn select(&mut self, id: Option<ObjectId>) -> Option<ObjectId> {
        match id {
            Some(id) if !self.objects.contains_key(id) => {}
            other => self.selected = other,
        }
        self.selected
    }

    /// Currently selected object, if any
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Look up an object by id
    pub fn get(&self, id: ObjectId) -> Option<&ShapeObject> {
        self.objects.get(id)
    }

    /// Whether the store contains the given id
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of objects in the store (always at least one)
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always false; present for API completeness
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate objects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &ShapeObject)> {
        self.order.iter().filter_map(|id| self.objects.get(*id).map(|object| (*id, object)))
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.order.iter().copied()
    }

    /// Ordered snapshot of the current contents
    pub fn list(&self) -> Vec<(ObjectId, ShapeObject)> {
        self.iter().map(|(id, object)| (id, object.clone())).collect()
    }

    /// Revision counter, bumped by every content mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
