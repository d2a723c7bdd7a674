//! # Shape Engine
//!
//! A declarative-to-imperative scene synchronization and kinematics engine
//! for parametric 3D shapes.
//!
//! ## Features
//!
//! - **Authoritative Store**: Ordered object list with stable ids and a
//!   revision counter for change detection
//! - **Reconciliation**: Diff-and-apply synchronization that rebuilds
//!   geometry only when shape-defining parameters change
//! - **Kinematics**: Per-frame movement state machine with straight,
//!   oscillating, orbiting, and returning modes
//! - **Selection Gizmo**: Transform-widget binding that commits drag results
//!   back into the store
//! - **Environment Presets**: Named lighting and background bundles applied
//!   in one shot
//! - **Headless Backend**: In-memory scene backend for tests and demos
//!
//! ## Quick Start
//!
//! ```rust
//! use shape_engine::prelude::*;
//!
//! fn main() {
//!     let mut engine = Engine::new(EngineSettings::default(), HeadlessBackend::new());
//!
//!     let id = engine.store_mut().add(
//!         ShapeObject::new(ShapeKind::Torus).with_movement(MovementMode::Orbit, 1.0, 4.0),
//!     );
//!     engine.select(Some(id));
//!
//!     for _ in 0..120 {
//!         engine.frame(1.0 / 60.0);
//!     }
//!
//!     engine.shutdown();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod backend;
pub mod config;
pub mod environment;
pub mod foundation;
pub mod geometry;
pub mod gizmo;
pub mod input;
pub mod motion;
pub mod scene;
pub mod store;
pub mod textures;

mod engine;

pub use engine::{Engine, FrameReport};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        backend::{
            BackendStats, CameraRig, GeometryHandle, HeadlessBackend, MaterialDesc,
            MaterialHandle, NodeHandle, SceneBackend, TransformWidget,
        },
        config::{Config, ConfigError, EngineSettings, SimulationTuning},
        environment::{EnvironmentController, EnvironmentPreset, EnvironmentSettings},
        foundation::{
            math::{Color, Mat4, Transform, Vec3},
            time::{FrameClock, Stopwatch},
        },
        geometry::{GeometryFactory, GeometrySignature, Primitive},
        gizmo::{GizmoMode, SelectionGizmo},
        input::EditorCommand,
        motion::{KineticSimulator, MotionStats},
        scene::{LiveNode, SceneSynchronizer, SyncStats},
        store::{
            CommandQueue, MovementMode, ObjectId, ObjectPatch, ObjectStore, ShapeKind,
            ShapeObject, TextureKind,
        },
        textures::TextureLibrary,
        Engine, FrameReport,
    };
}
