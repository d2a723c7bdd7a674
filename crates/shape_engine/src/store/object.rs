//! Shape object data model
//!
//! A `ShapeObject` is the authoritative description of one scene entity:
//! which primitive it is, where it sits, how it looks, and how it moves.
//! Live render nodes are derived from these records and never the other way
//! around, with one exception: a gizmo drag commits the node's transform
//! back into the record when the drag ends.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Color, Vec3};

/// The 13 supported parametric shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    /// UV sphere
    Sphere,
    /// Circular cylinder
    Cylinder,
    /// Axis-aligned box with equal sides
    Cube,
    /// Circular cone
    Cone,
    /// Torus with derived tube radius
    Torus,
    /// Four-sided cone
    Pyramid,
    /// Three-sided prism
    TriangularPrism,
    /// Five-sided prism
    PentagonalPrism,
    /// Six-sided prism
    HexagonalPrism,
    /// Eight-sided prism
    OctagonalPrism,
    /// Platonic solid with 4 faces
    Tetrahedron,
    /// Platonic solid with 12 faces
    Dodecahedron,
    /// Platonic solid with 20 faces
    Icosahedron,
}

impl ShapeKind {
    /// All shape kinds in display order
    pub const ALL: [Self; 13] = [
        Self::Sphere,
        Self::Cylinder,
        Self::Cube,
        Self::Cone,
        Self::Torus,
        Self::Pyramid,
        Self::TriangularPrism,
        Self::PentagonalPrism,
        Self::HexagonalPrism,
        Self::OctagonalPrism,
        Self::Tetrahedron,
        Self::Dodecahedron,
        Self::Icosahedron,
    ];
}

/// Procedural texture selection for a shape's material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextureKind {
    /// Untextured surface
    #[default]
    None,
    /// Alternating light/dark squares
    Checkerboard,
    /// Regular grid of filled circles
    Dots,
    /// Vertical bands
    Stripes,
    /// Deterministic value noise
    Noise,
}

/// Discrete kinematic behavior applied to an object each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovementMode {
    /// Object holds still
    #[default]
    None,
    /// Constant drift along +Z with a wrap-around span
    Straight,
    /// Sinusoidal oscillation along X around home
    LeftRight,
    /// Sinusoidal oscillation along Y around home
    UpDown,
    /// Exponential approach back toward home, then settle
    Returning,
    /// Circular path in the XZ plane around home
    Orbit,
}

/// Authoritative description of one scene entity
///
/// `home` is the reference point that oscillating, orbiting, and returning
/// motion are computed against. It equals the initial position at creation
/// and afterwards changes only through an explicit refresh (a gizmo drag
/// commit), never as a side effect of positional updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeObject {
    /// Which primitive this object is
    pub kind: ShapeKind,

    /// Current authored position
    pub position: Vec3,

    /// Euler rotation in radians
    pub rotation: Vec3,

    /// Per-axis scale
    pub scale: Vec3,

    /// Reference point for movement patterns
    pub home: Vec3,

    /// Base surface color
    pub color: Color,

    /// Procedural texture selection
    pub texture: TextureKind,

    /// Metallic appearance factor in [0, 1]
    pub metalness: f32,

    /// Surface roughness in [0, 1]
    pub roughness: f32,

    /// Emissive color
    pub emissive: Color,

    /// Emissive strength in [0, 1]
    pub emissive_intensity: f32,

    /// Surface opacity in [0, 1]
    pub opacity: f32,

    /// Primary shape radius, must be positive
    pub radius: f32,

    /// Shape height where the primitive has one, must be positive
    pub height: f32,

    /// Continuous self-spin toggle, independent of `movement`
    pub animated: bool,

    /// Active movement pattern
    pub movement: MovementMode,

    /// Speed scalar for the movement pattern, non-negative
    pub movement_speed: f32,

    /// Amplitude/radius scalar for the movement pattern, non-negative
    pub movement_range: f32,
}

impl Default for ShapeObject {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Sphere,
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            home: Vec3::zeros(),
            color: Color::new(0.8, 0.8, 0.8),
            texture: TextureKind::None,
            metalness: 0.1,
            roughness: 0.5,
            emissive: Color::zeros(),
            emissive_intensity: 0.0,
            opacity: 1.0,
            radius: 1.0,
            height: 2.0,
            animated: false,
            movement: MovementMode::None,
            movement_speed: 1.0,
            movement_range: 2.0,
        }
    }
}

impl ShapeObject {
    /// Create an object of the given kind with default parameters
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Builder-style initial position; also sets `home` to match, per the
    /// creation rule that home starts at the initial position
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.home = position;
        self
    }

    /// Builder-style explicit home override
    #[must_use]
    pub fn with_home(mut self, home: Vec3) -> Self {
        self.home = home;
        self
    }

    /// Builder-style rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder-style color
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder-style texture
    #[must_use]
    pub fn with_texture(mut self, texture: TextureKind) -> Self {
        self.texture = texture;
        self
    }

    /// Builder-style shape parameters
    #[must_use]
    pub fn with_shape_params(mut self, radius: f32, height: f32) -> Self {
        self.radius = radius;
        self.height = height;
        self
    }

    /// Builder-style movement pattern
    #[must_use]
    pub fn with_movement(mut self, movement: MovementMode, speed: f32, range: f32) -> Self {
        self.movement = movement;
        self.movement_speed = speed;
        self.movement_range = range;
        self
    }

    /// Builder-style self-spin toggle
    #[must_use]
    pub fn with_spin(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}

/// Partial update applied to a stored object
///
/// Unset fields leave the target untouched. Patching `position` does not
/// move `home`; callers that want both (the gizmo drag commit) set both
/// fields explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    /// New shape kind
    pub kind: Option<ShapeKind>,
    /// New position
    pub position: Option<Vec3>,
    /// New rotation
    pub rotation: Option<Vec3>,
    /// New scale
    pub scale: Option<Vec3>,
    /// New home reference point
    pub home: Option<Vec3>,
    /// New base color
    pub color: Option<Color>,
    /// New texture selection
    pub texture: Option<TextureKind>,
    /// New metalness factor
    pub metalness: Option<f32>,
    /// New roughness factor
    pub roughness: Option<f32>,
    /// New emissive color
    pub emissive: Option<Color>,
    /// New emissive strength
    pub emissive_intensity: Option<f32>,
    /// New opacity
    pub opacity: Option<f32>,
    /// New shape radius
    pub radius: Option<f32>,
    /// New shape height
    pub height: Option<f32>,
    /// New self-spin toggle
    pub animated: Option<bool>,
    /// New movement pattern
    pub movement: Option<MovementMode>,
    /// New movement speed
    pub movement_speed: Option<f32>,
    /// New movement amplitude
    pub movement_range: Option<f32>,
}

impl ObjectPatch {
    /// Empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that only changes the shape kind
    #[must_use]
    pub fn kind(mut self, kind: ShapeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Patch the position
    #[must_use]
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    /// Patch the rotation
    #[must_use]
    pub fn rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Patch the scale
    #[must_use]
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Patch the home reference point
    #[must_use]
    pub fn home(mut self, home: Vec3) -> Self {
        self.home = Some(home);
        self
    }

    /// Patch the base color
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Patch the texture selection
    #[must_use]
    pub fn texture(mut self, texture: TextureKind) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Patch the shape radius
    #[must_use]
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Patch the shape height
    #[must_use]
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Patch the movement mode
    #[must_use]
    pub fn movement(mut self, movement: MovementMode) -> Self {
        self.movement = Some(movement);
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply every set field to the target object
    pub fn apply_to(&self, object: &mut ShapeObject) {
        if let Some(kind) = self.kind {
            object.kind = kind;
        }
        if let Some(position) = self.position {
            object.position = position;
        }
        if let Some(rotation) = self.rotation {
            object.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            object.scale = scale;
        }
        if let Some(home) = self.home {
            object.home = home;
        }
        if let Some(color) = self.color {
            object.color = color;
        }
        if let Some(texture) = self.texture {
            object.texture = texture;
        }
        if let Some(metalness) = self.metalness {
            object.metalness = metalness;
        }
        if let Some(roughness) = self.roughness {
            object.roughness = roughness;
        }
        if let Some(emissive) = self.emissive {
            object.emissive = emissive;
        }
        if let Some(emissive_intensity) = self.emissive_intensity {
            object.emissive_intensity = emissive_intensity;
        }
        if let Some(opacity) = self.opacity {
            object.opacity = opacity;
        }
        if let Some(radius) = self.radius {
            object.radius = radius;
        }
        if let Some(height) = self.height {
            object.height = height;
        }
        if let Some(animated) = self.animated {
            object.animated = animated;
        }
        if let Some(movement) = self.movement {
            object.movement = movement;
        }
        if let Some(movement_speed) = self.movement_speed {
            object.movement_speed = movement_speed;
        }
        if let Some(movement_range) = self.movement_range {
            object.movement_range = movement_range;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_sets_home_to_initial_position() {
        let position = Vec3::new(3.0, 1.0, -2.0);
        let object = ShapeObject::new(ShapeKind::Torus).with_position(position);

        assert_eq!(object.position, position);
        assert_eq!(object.home, position, "home should start at the initial position");
    }

    #[test]
    fn test_explicit_home_override() {
        let object = ShapeObject::new(ShapeKind::Cube)
            .with_position(Vec3::new(1.0, 0.0, 0.0))
            .with_home(Vec3::new(0.0, 5.0, 0.0));

        assert_eq!(object.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(object.home, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_patch_position_leaves_home_untouched() {
        let mut object = ShapeObject::new(ShapeKind::Sphere).with_position(Vec3::new(2.0, 2.0, 2.0));
        let patch = ObjectPatch::new().position(Vec3::new(9.0, 9.0, 9.0));

        patch.apply_to(&mut object);

        assert_eq!(object.position, Vec3::new(9.0, 9.0, 9.0));
        assert_eq!(object.home, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let mut object = ShapeObject::default();
        let before = object.clone();
        let patch = ObjectPatch::new();

        assert!(patch.is_empty());
        patch.apply_to(&mut object);
        assert_eq!(object, before);
    }

    #[test]
    fn test_patch_appearance_and_shape_fields() {
        let mut object = ShapeObject::default();
        let patch = ObjectPatch::new()
            .color(Color::new(0.1, 0.2, 0.3))
            .texture(TextureKind::Stripes)
            .radius(2.5)
            .movement(MovementMode::Orbit);

        patch.apply_to(&mut object);

        assert_eq!(object.color, Color::new(0.1, 0.2, 0.3));
        assert_eq!(object.texture, TextureKind::Stripes);
        assert_eq!(object.radius, 2.5);
        assert_eq!(object.movement, MovementMode::Orbit);
        assert_eq!(object.height, 2.0, "unset fields keep their defaults");
    }

    #[test]
    fn test_all_shape_kinds_listed_once() {
        let mut seen = std::collections::HashSet::new();
        for kind in ShapeKind::ALL {
            assert!(seen.insert(kind), "{kind:?} listed twice");
        }
        assert_eq!(seen.len(), 13);
    }
}
