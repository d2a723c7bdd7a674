//! In-memory backend
//!
//! Implements every backend trait with slotmap-backed resource tables and
//! operation counters. Tests assert resource-churn properties against the
//! counters (reconciliation idempotence is literally "counters did not
//! move"); the demo binaries use it to run the full engine without a GPU.

use slotmap::SlotMap;

use crate::environment::EnvironmentSettings;
use crate::foundation::math::{Transform, Vec3};
use crate::geometry::Primitive;
use crate::gizmo::GizmoMode;

use super::{
    CameraRig, GeometryHandle, MaterialDesc, MaterialHandle, NodeHandle, SceneBackend,
    TransformWidget,
};

/// Cumulative operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackendStats {
    /// Geometry resources created
    pub geometries_created: u64,
    /// Geometry resources released
    pub geometries_disposed: u64,
    /// Material resources created
    pub materials_created: u64,
    /// Material resources released
    pub materials_disposed: u64,
    /// Nodes created
    pub nodes_created: u64,
    /// Nodes removed from the graph
    pub nodes_removed: u64,
    /// In-place material parameter updates
    pub material_updates: u64,
    /// Transform uploads
    pub transform_uploads: u64,
    /// Dispose calls that hit an already-released handle
    pub redundant_disposes: u64,
}

impl BackendStats {
    /// Total resource allocations (geometries + materials)
    pub fn allocations(&self) -> u64 {
        self.geometries_created + self.materials_created
    }

    /// Total resource releases (geometries + materials)
    pub fn disposals(&self) -> u64 {
        self.geometries_disposed + self.materials_disposed
    }
}

#[derive(Debug)]
struct NodeRecord {
    geometry: GeometryHandle,
    material: MaterialHandle,
    transform: Transform,
    in_graph: bool,
}

/// In-memory implementation of all backend traits
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    geometries: SlotMap<GeometryHandle, Primitive>,
    materials: SlotMap<MaterialHandle, MaterialDesc>,
    nodes: SlotMap<NodeHandle, NodeRecord>,
    environment: Option<EnvironmentSettings>,
    stats: BackendStats,
    widget_target: Option<NodeHandle>,
    widget_mode: GizmoMode,
    orbit_enabled: bool,
    focus_target: Option<Vec3>,
}

impl HeadlessBackend {
    /// Create an empty backend with orbit input enabled
    pub fn new() -> Self {
        Self {
            orbit_enabled: true,
            ..Default::default()
        }
    }

    /// Operation counters so far
    pub fn stats(&self) -> BackendStats {
        self.stats
    }

    /// Number of live geometry resources
    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    /// Number of live material resources
    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    /// Number of nodes currently in the scene graph
    pub fn nodes_in_graph(&self) -> usize {
        self.nodes.values().filter(|node| node.in_graph).count()
    }

    /// Primitive a live geometry was built from
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Primitive> {
        self.geometries.get(handle)
    }

    /// Current parameters of a live material
    pub fn material(&self, handle: MaterialHandle) -> Option<&MaterialDesc> {
        self.materials.get(handle)
    }

    /// Last uploaded transform of a node
    pub fn node_transform(&self, node: NodeHandle) -> Option<&Transform> {
        self.nodes.get(node).map(|record| &record.transform)
    }

    /// Geometry a node currently references
    pub fn node_geometry(&self, node: NodeHandle) -> Option<GeometryHandle> {
        self.nodes.get(node).map(|record| record.geometry)
    }

    /// Environment settings applied most recently
    pub fn environment(&self) -> Option<&EnvironmentSettings> {
        self.environment.as_ref()
    }

    /// Node the transform widget is bound to
    pub fn widget_target(&self) -> Option<NodeHandle> {
        self.widget_target
    }

    /// Current widget mode
    pub fn widget_mode(&self) -> GizmoMode {
        self.widget_mode
    }

    /// Whether camera-orbit input is currently enabled
    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    /// Point the camera was last asked to focus on
    pub fn focus_target(&self) -> Option<Vec3> {
        self.focus_target
    }
}

impl SceneBackend for HeadlessBackend {
    fn create_geometry(&mut self, primitive: &Primitive) -> GeometryHandle {
        self.stats.geometries_created += 1;
        self.geometries.insert(*primitive)
    }

    fn create_material(&mut self, material: &MaterialDesc) -> MaterialHandle {
        self.stats.materials_created += 1;
        self.materials.insert(material.clone())
    }

    fn create_node(&mut self, geometry: GeometryHandle, material: MaterialHandle) -> NodeHandle {
        self.stats.nodes_created += 1;
        self.nodes.insert(NodeRecord {
            geometry,
            material,
            transform: Transform::identity(),
            in_graph: false,
        })
    }

    fn add_node(&mut self, node: NodeHandle) {
        if let Some(record) = self.nodes.get_mut(node) {
            record.in_graph = true;
        }
    }

    fn remove_node(&mut self, node: NodeHandle) {
        if self.nodes.remove(node).is_some() {
            self.stats.nodes_removed += 1;
            if self.widget_target == Some(node) {
                self.widget_target = None;
            }
        }
    }

    fn dispose_geometry(&mut self, geometry: GeometryHandle) {
        if self.geometries.remove(geometry).is_some() {
            self.stats.geometries_disposed += 1;
        } else {
            self.stats.redundant_disposes += 1;
            log::warn!("dispose_geometry on released handle {geometry:?}");
        }
    }

    fn dispose_material(&mut self, material: MaterialHandle) {
        if self.materials.remove(material).is_some() {
            self.stats.materials_disposed += 1;
        } else {
            self.stats.redundant_disposes += 1;
            log::warn!("dispose_material on released handle {material:?}");
        }
    }

    fn set_node_geometry(&mut self, node: NodeHandle, geometry: GeometryHandle) {
        if let Some(record) = self.nodes.get_mut(node) {
            record.geometry = geometry;
        }
    }

    fn update_material(&mut self, material: MaterialHandle, desc: &MaterialDesc) {
        if let Some(stored) = self.materials.get_mut(material) {
            *stored = desc.clone();
            self.stats.material_updates += 1;
        }
    }

    fn set_node_transform(&mut self, node: NodeHandle, transform: &Transform) {
        if let Some(record) = self.nodes.get_mut(node) {
            record.transform = transform.clone();
            self.stats.transform_uploads += 1;
        }
    }

    fn apply_environment(&mut self, settings: &EnvironmentSettings) {
        self.environment = Some(settings.clone());
    }
}

impl TransformWidget for HeadlessBackend {
    fn attach(&mut self, node: NodeHandle) {
        self.widget_target = Some(node);
    }

    fn detach(&mut self) {
        self.widget_target = None;
    }

    fn set_mode(&mut self, mode: GizmoMode) {
        self.widget_mode = mode;
    }
}

impl CameraRig for HeadlessBackend {
    fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
    }

    fn focus(&mut self, target: Vec3) {
        self.focus_target = Some(target);
    }
}
