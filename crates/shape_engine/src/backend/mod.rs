//! Render backend interfaces
//!
//! The core never talks to a renderer directly. Everything it needs from
//! the outside world is expressed through the three traits in this module:
//! scene-graph and resource management ([`SceneBackend`]), the interactive
//! transform widget ([`TransformWidget`]), and camera-orbit input
//! ([`CameraRig`]). Handles are opaque keys minted by the backend; the core
//! only stores and returns them.
//!
//! [`HeadlessBackend`] implements all three traits in memory and is what
//! the tests and demo binaries run against.

mod headless;

pub use headless::{BackendStats, HeadlessBackend};

use crate::environment::EnvironmentSettings;
use crate::foundation::math::{Color, Transform, Vec3};
use crate::geometry::Primitive;
use crate::gizmo::GizmoMode;
use crate::store::{ShapeObject, TextureKind};

slotmap::new_key_type! {
    /// Opaque handle to a backend geometry resource
    pub struct GeometryHandle;

    /// Opaque handle to a backend material resource
    pub struct MaterialHandle;

    /// Opaque handle to a node in the backend scene graph
    pub struct NodeHandle;
}

/// Material description projected from an object's appearance fields
///
/// The texture is carried by name only; pattern bitmaps are produced by the
/// texture synthesizer and resolved inside the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDesc {
    /// Base surface color
    pub color: Color,
    /// Procedural texture selection
    pub texture: TextureKind,
    /// Metallic factor in [0, 1]
    pub metalness: f32,
    /// Roughness factor in [0, 1]
    pub roughness: f32,
    /// Emissive color
    pub emissive: Color,
    /// Emissive strength in [0, 1]
    pub emissive_intensity: f32,
    /// Opacity in [0, 1]
    pub opacity: f32,
}

impl MaterialDesc {
    /// Project the appearance fields of an object
    pub fn of(object: &ShapeObject) -> Self {
        Self {
            color: object.color,
            texture: object.texture,
            metalness: object.metalness,
            roughness: object.roughness,
            emissive: object.emissive,
            emissive_intensity: object.emissive_intensity,
            opacity: object.opacity,
        }
    }
}

/// Scene-graph and resource operations the core drives
///
/// Implementations must treat disposal of an already-released handle as
/// satisfied: log it if useful, never fail. The core guarantees it disposes
/// each handle at most once per reconciliation pass, but teardown paths may
/// overlap with host-side cleanup.
pub trait SceneBackend {
    /// Build a geometry resource from a primitive description
    fn create_geometry(&mut self, primitive: &Primitive) -> GeometryHandle;

    /// Build a material resource from a material description
    fn create_material(&mut self, material: &MaterialDesc) -> MaterialHandle;

    /// Create a detached node referencing existing resources
    fn create_node(&mut self, geometry: GeometryHandle, material: MaterialHandle) -> NodeHandle;

    /// Insert a node into the visible scene graph
    fn add_node(&mut self, node: NodeHandle);

    /// Remove a node from the scene graph
    ///
    /// Does not release the node's resources; the caller disposes geometry
    /// and material explicitly.
    fn remove_node(&mut self, node: NodeHandle);

    /// Release a geometry resource
    fn dispose_geometry(&mut self, geometry: GeometryHandle);

    /// Release a material resource
    fn dispose_material(&mut self, material: MaterialHandle);

    /// Point a node at a different geometry resource
    fn set_node_geometry(&mut self, node: NodeHandle, geometry: GeometryHandle);

    /// Re-apply material parameters in place, without reallocation
    fn update_material(&mut self, material: MaterialHandle, desc: &MaterialDesc);

    /// Upload a node's transform
    fn set_node_transform(&mut self, node: NodeHandle, transform: &Transform);

    /// Apply an environment preset's values in one shot
    fn apply_environment(&mut self, settings: &EnvironmentSettings);
}

/// Interactive transform widget operations
pub trait TransformWidget {
    /// Bind the widget to a node
    fn attach(&mut self, node: NodeHandle);

    /// Unbind the widget
    fn detach(&mut self);

    /// Switch between translate, rotate, and scale handles
    fn set_mode(&mut self, mode: GizmoMode);
}

/// Camera-orbit input control
pub trait CameraRig {
    /// Enable or disable orbit input
    ///
    /// Disabled while a gizmo drag is in progress; the two are mutually
    /// exclusive consumers of pointer input.
    fn set_orbit_enabled(&mut self, enabled: bool);

    /// Reposition the camera to look toward a world-space point
    fn focus(&mut self, target: Vec3);
}
