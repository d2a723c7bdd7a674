//! Live node representation
//!
//! The cached projection of one store object into the render graph. Live
//! nodes hold real resource handles and the working transform that the
//! simulator and gizmo write between reconciliations. They are disposable:
//! the synchronizer rebuilds them from store data at any time and they must
//! never outlive their store entry.

use crate::backend::{GeometryHandle, MaterialHandle, NodeHandle};
use crate::foundation::math::Transform;
use crate::geometry::GeometrySignature;

/// Cached render-graph state for one object
#[derive(Debug, Clone)]
pub struct LiveNode {
    /// Graph node handle
    node: NodeHandle,

    /// Geometry resource the node currently references
    geometry: GeometryHandle,

    /// Material resource the node currently references
    material: MaterialHandle,

    /// Working transform; the simulator and gizmo write here, the frame
    /// loop pushes it to the backend once per frame
    pub transform: Transform,

    /// Shape parameters the current geometry was built from, used to decide
    /// whether an update needs a geometry rebuild
    signature: GeometrySignature,
}

impl LiveNode {
    /// Create a live node record for freshly allocated resources
    pub fn new(
        node: NodeHandle,
        geometry: GeometryHandle,
        material: MaterialHandle,
        transform: Transform,
        signature: GeometrySignature,
    ) -> Self {
        Self {
            node,
            geometry,
            material,
            transform,
            signature,
        }
    }

    /// Graph node handle
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    /// Current geometry handle
    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    /// Current material handle
    pub fn material(&self) -> MaterialHandle {
        self.material
    }

    /// Shape parameters behind the current geometry
    pub fn signature(&self) -> GeometrySignature {
        self.signature
    }

    /// Record a geometry rebuild: new handle plus the parameters it was
    /// built from
    pub fn replace_geometry(&mut self, geometry: GeometryHandle, signature: GeometrySignature) {
        self.geometry = geometry;
        self.signature = signature;
    }
}
