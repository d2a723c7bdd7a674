//! Bulk scene presets
//!
//! Scripted multi-object scenes used by the demos and as store seeds. These
//! build plain object lists; feeding them through
//! [`ObjectStore::with_objects`](super::ObjectStore::with_objects) assigns
//! ids and enforces the never-empty invariant.

use crate::foundation::math::{constants::TAU, Color, Vec3};
use crate::store::{MovementMode, ShapeKind, ShapeObject, TextureKind};

/// Radius of the showcase ring layout
const SHOWCASE_RING_RADIUS: f32 = 9.0;

/// Fixed palette cycled across showcase objects
const PALETTE: [(f32, f32, f32); 6] = [
    (0.91, 0.30, 0.24),
    (0.95, 0.61, 0.07),
    (0.18, 0.80, 0.44),
    (0.20, 0.60, 0.86),
    (0.61, 0.35, 0.71),
    (0.10, 0.74, 0.61),
];

/// One of every shape kind, laid out in a ring on the XZ plane
///
/// A few objects get textures and movement patterns so the scene exercises
/// the simulator and the texture path without further setup.
pub fn showcase_scene() -> Vec<ShapeObject> {
    let count = ShapeKind::ALL.len();
    let mut objects = Vec::with_capacity(count);

    for (index, kind) in ShapeKind::ALL.into_iter().enumerate() {
        let angle = TAU * index as f32 / count as f32;
        let position = Vec3::new(
            angle.cos() * SHOWCASE_RING_RADIUS,
            0.0,
            angle.sin() * SHOWCASE_RING_RADIUS,
        );
        let (r, g, b) = PALETTE[index % PALETTE.len()];

        let mut object = ShapeObject::new(kind)
            .with_position(position)
            .with_color(Color::new(r, g, b));

        object = match index % 4 {
            0 => object.with_texture(TextureKind::Checkerboard),
            1 => object.with_texture(TextureKind::Stripes),
            2 => object.with_texture(TextureKind::Dots),
            _ => object.with_texture(TextureKind::None),
        };

        object = match kind {
            ShapeKind::Sphere => object.with_movement(MovementMode::Orbit, 1.0, 4.0),
            ShapeKind::Torus => object.with_movement(MovementMode::LeftRight, 1.2, 2.0),
            ShapeKind::Cone => object.with_movement(MovementMode::UpDown, 0.8, 1.5),
            ShapeKind::Icosahedron => object.with_spin(true),
            _ => object,
        };

        objects.push(object);
    }

    objects
}

/// One object per movement mode, spaced along the X axis
///
/// Used by the motion demo: every kinematic path gets a dedicated object so
/// a short headless run shows each behavior, including the returning-mode
/// settle (its object starts displaced from home).
pub fn movement_gallery() -> Vec<ShapeObject> {
    let modes = [
        MovementMode::None,
        MovementMode::Straight,
        MovementMode::LeftRight,
        MovementMode::UpDown,
        MovementMode::Returning,
        MovementMode::Orbit,
    ];

    modes
        .into_iter()
        .enumerate()
        .map(|(index, movement)| {
            let home = Vec3::new(index as f32 * 6.0 - 15.0, 0.0, 0.0);
            let mut object = ShapeObject::new(ShapeKind::Cube)
                .with_position(home)
                .with_movement(movement, 1.0, 3.0)
                .with_spin(movement == MovementMode::None);
            if movement == MovementMode::Returning {
                // Start away from home so there is a settle to observe
                object.position = home + Vec3::new(0.0, 8.0, 0.0);
            }
            object
        })
        .collect()
}
