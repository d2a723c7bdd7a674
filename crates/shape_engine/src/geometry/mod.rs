//! Geometry parameter mapping
//!
//! Maps a shape kind plus its two authored parameters (radius, height) to a
//! concrete primitive description the render backend can build a mesh from.
//! The mapping is pure and total: every kind produces a primitive, nothing
//! here allocates graphics resources, and a kind this table does not
//! recognize in some future revision falls back to a sphere rather than
//! failing the caller.

use crate::store::{ShapeKind, ShapeObject};

/// Segment count used for curved surfaces
const CURVE_SEGMENTS: u32 = 64;

/// Side count that turns a cone into a pyramid
const PYRAMID_SIDES: u32 = 4;

/// Platonic solids the factory can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatonicSolid {
    /// 4 faces
    Tetrahedron,
    /// 12 faces
    Dodecahedron,
    /// 20 faces
    Icosahedron,
}

/// Parametric primitive description
///
/// Carries every parameter a mesh builder needs; segment counts are part of
/// the description so backends produce identical tessellation for identical
/// inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// UV sphere
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Latitudinal segment count
        lat_segments: u32,
        /// Longitudinal segment count
        long_segments: u32,
    },
    /// Cylinder, also used for the prism family via low side counts
    Cylinder {
        /// Radius at the top cap
        top_radius: f32,
        /// Radius at the bottom cap
        bottom_radius: f32,
        /// Cylinder height
        height: f32,
        /// Number of radial sides
        sides: u32,
    },
    /// Axis-aligned box
    Cuboid {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Extent along Z
        depth: f32,
    },
    /// Cone, also used for the pyramid via a side count of 4
    Cone {
        /// Base radius
        radius: f32,
        /// Cone height
        height: f32,
        /// Number of radial sides
        sides: u32,
    },
    /// Torus
    Torus {
        /// Distance from torus center to tube center
        major_radius: f32,
        /// Tube radius
        tube_radius: f32,
        /// Segments around the main ring
        radial_segments: u32,
        /// Segments around the tube
        tubular_segments: u32,
    },
    /// Platonic solid, parameterized by circumscribed radius only
    Platonic {
        /// Which solid
        solid: PlatonicSolid,
        /// Circumscribed radius
        radius: f32,
    },
}

/// The shape parameters that determine geometry
///
/// The synchronizer caches this per live node and rebuilds geometry only
/// when the signature changes; appearance edits never touch it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySignature {
    /// Shape kind
    pub kind: ShapeKind,
    /// Authored radius
    pub radius: f32,
    /// Authored height
    pub height: f32,
}

impl GeometrySignature {
    /// Extract the geometry-determining fields of an object
    pub fn of(object: &ShapeObject) -> Self {
        Self {
            kind: object.kind,
            radius: object.radius,
            height: object.height,
        }
    }
}

/// Factory for primitive descriptions
pub struct GeometryFactory;

impl GeometryFactory {
    /// Map a shape kind and its parameters to a primitive description
    ///
    /// Pure and deterministic; callers guarantee `radius` and `height` are
    /// positive, out-of-range values produce degenerate but valid
    /// descriptions rather than errors.
    pub fn build(kind: ShapeKind, radius: f32, height: f32) -> Primitive {
        match kind {
            ShapeKind::Sphere => Primitive::Sphere {
                radius,
                lat_segments: CURVE_SEGMENTS,
                long_segments: CURVE_SEGMENTS,
            },
            ShapeKind::Cylinder => Primitive::Cylinder {
                top_radius: radius,
                bottom_radius: radius,
                height,
                sides: CURVE_SEGMENTS,
            },
            ShapeKind::Cube => Primitive::Cuboid {
                width: radius * 2.0,
                height: radius * 2.0,
                depth: radius * 2.0,
            },
            ShapeKind::Cone => Primitive::Cone {
                radius,
                height,
                sides: CURVE_SEGMENTS,
            },
            ShapeKind::Torus => Primitive::Torus {
                major_radius: radius,
                tube_radius: radius / 3.0,
                radial_segments: CURVE_SEGMENTS,
                tubular_segments: CURVE_SEGMENTS,
            },
            ShapeKind::Pyramid => Primitive::Cone {
                radius,
                height,
                sides: PYRAMID_SIDES,
            },
            ShapeKind::TriangularPrism => Self::prism(radius, height, 3),
            ShapeKind::PentagonalPrism => Self::prism(radius, height, 5),
            ShapeKind::HexagonalPrism => Self::prism(radius, height, 6),
            ShapeKind::OctagonalPrism => Self::prism(radius, height, 8),
            ShapeKind::Tetrahedron => Primitive::Platonic {
                solid: PlatonicSolid::Tetrahedron,
                radius,
            },
            ShapeKind::Dodecahedron => Primitive::Platonic {
                solid: PlatonicSolid::Dodecahedron,
                radius,
            },
            ShapeKind::Icosahedron => Primitive::Platonic {
                solid: PlatonicSolid::Icosahedron,
                radius,
            },
        }
    }

    /// Convenience wrapper taking the object record
    pub fn build_for(object: &ShapeObject) -> Primitive {
        Self::build(object.kind, object.radius, object.height)
    }

    /// Prisms are cylinders with few sides
    fn prism(radius: f32, height: f32, sides: u32) -> Primitive {
        Primitive::Cylinder {
            top_radius: radius,
            bottom_radius: radius,
            height,
            sides,
        }
    }
}
