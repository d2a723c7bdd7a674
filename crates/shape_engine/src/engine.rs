//! Engine context and frame loop
//!
//! `Engine` owns every subsystem and fixes the per-tick order:
//! clock advance, simulation pass, deferred-command drain, reconciliation
//! (only when the store revision moved), transform upload, gizmo binding
//! refresh. Everything runs on the caller's thread; the engine is the single
//! writer of the store and the live-node set, so there is no locking.

use crate::backend::{CameraRig, SceneBackend, TransformWidget};
use crate::config::EngineSettings;
use crate::environment::{EnvironmentController, EnvironmentPreset};
use crate::foundation::time::FrameClock;
use crate::gizmo::SelectionGizmo;
use crate::input::EditorCommand;
use crate::motion::{KineticSimulator, MotionStats};
use crate::scene::{SceneSynchronizer, SyncStats};
use crate::store::{CommandQueue, ObjectId, ObjectStore, ShapeObject};

/// What one engine tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation counters for the tick
    pub motion: MotionStats,
    /// Deferred store commits applied after the simulation pass
    pub commits: usize,
    /// Reconciliation counters, `None` when the store was unchanged
    pub sync: Option<SyncStats>,
}

/// Owns the store, live scene, and all per-frame subsystems
///
/// Generic over the backend so tests and headless demos run against
/// [`crate::backend::HeadlessBackend`] while real integrations supply an
/// adapter implementing the same three traits.
pub struct Engine<B>
where
    B: SceneBackend + TransformWidget + CameraRig,
{
    store: ObjectStore,
    scene: SceneSynchronizer,
    simulator: KineticSimulator,
    gizmo: SelectionGizmo,
    environment: EnvironmentController,
    queue: CommandQueue,
    clock: FrameClock,
    settings: EngineSettings,
    backend: B,
    last_synced: Option<u64>,
}

impl<B> Engine<B>
where
    B: SceneBackend + TransformWidget + CameraRig,
{
    /// Create an engine seeded with the starter scene
    pub fn new(settings: EngineSettings, backend: B) -> Self {
        Self::with_scene(settings, backend, Vec::new())
    }

    /// Create an engine from a prepared object list
    ///
    /// An empty list falls back to the starter scene. The initial
    /// reconciliation and environment application happen here, so the engine
    /// is fully consistent before the first [`Engine::frame`] call.
    pub fn with_scene(settings: EngineSettings, backend: B, objects: Vec<ShapeObject>) -> Self {
        log::info!("engine: initializing");

        let store = if objects.is_empty() {
            ObjectStore::new()
        } else {
            ObjectStore::with_objects(objects)
        };

        let mut engine = Self {
            store,
            scene: SceneSynchronizer::new(),
            simulator: KineticSimulator::new(settings.tuning.clone()),
            gizmo: SelectionGizmo::new(),
            environment: EnvironmentController::new(settings.environment),
            queue: CommandQueue::new(),
            clock: FrameClock::new(),
            settings,
            backend,
            last_synced: None,
        };

        engine.environment.apply(engine.settings.environment, &mut engine.backend);
        engine.gizmo.set_mode(engine.settings.gizmo_mode, &mut engine.backend);
        if !engine.settings.gizmo_enabled {
            engine.gizmo.set_enabled(false, &mut engine.backend);
        }
        engine.sync_if_dirty();
        log::info!("engine: ready with {} object(s)", engine.store.len());
        engine
    }

    /// Advance the engine by one tick
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        self.clock.advance(dt);
        let motion = self
            .simulator
            .step(&self.store, &mut self.scene, &self.clock, &mut self.queue);
        let commits = self.queue.drain_into(&mut self.store);
        let sync = self.sync_if_dirty();
        self.scene.push_transforms(&mut self.backend);
        self.gizmo.refresh(&self.store, &self.scene, &mut self.backend);

        FrameReport { motion, commits, sync }
    }

    /// Apply a discrete editor command
    pub fn apply_command(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::SwitchGizmoMode(mode) => {
                self.gizmo.set_mode(mode, &mut self.backend);
                log::info!("engine: gizmo mode set to {mode:?}");
            }
            EditorCommand::CycleGizmoMode => {
                let mode = self.gizmo.cycle_mode(&mut self.backend);
                log::info!("engine: gizmo mode cycled to {mode:?}");
            }
            EditorCommand::DeleteSelected => {
                if let Some(id) = self.store.selected() {
                    self.store.remove(id);
                    self.gizmo.refresh(&self.store, &self.scene, &mut self.backend);
                    log::info!("engine: delete requested for {id:?}");
                }
            }
            EditorCommand::ClearSelection => {
                self.store.select(None);
                self.gizmo.refresh(&self.store, &self.scene, &mut self.backend);
            }
            EditorCommand::FocusSelection => {
                if let Some(id) = self.store.selected() {
                    if let Some(node) = self.scene.node(id) {
                        self.backend.focus(node.transform.position);
                        log::info!("engine: focused camera on {id:?}");
                    }
                }
            }
        }
    }

    /// Change the selection and rebind the gizmo
    pub fn select(&mut self, id: Option<ObjectId>) -> Option<ObjectId> {
        let selection = self.store.select(id);
        self.gizmo.refresh(&self.store, &self.scene, &mut self.backend);
        selection
    }

    /// Switch the environment preset
    pub fn apply_environment(&mut self, preset: EnvironmentPreset) {
        self.environment.apply(preset, &mut self.backend);
    }

    /// Show or hide the selection gizmo
    pub fn set_gizmo_enabled(&mut self, enabled: bool) {
        self.gizmo.set_enabled(enabled, &mut self.backend);
        self.gizmo.refresh(&self.store, &self.scene, &mut self.backend);
    }

    /// Start an interactive gizmo drag
    pub fn begin_gizmo_drag(&mut self) -> bool {
        self.gizmo.begin_drag(&mut self.backend)
    }

    /// Finish an interactive gizmo drag, committing the live transform
    pub fn end_gizmo_drag(&mut self) {
        self.gizmo.end_drag(&mut self.store, &self.scene, &mut self.backend);
    }

    /// Release every live node and detach the gizmo
    pub fn shutdown(&mut self) {
        log::info!("engine: shutting down after {} frame(s)", self.clock.frame_count());
        self.scene.teardown(&mut self.backend);
        self.gizmo.refresh(&self.store, &self.scene, &mut self.backend);
    }

    fn sync_if_dirty(&mut self) -> Option<SyncStats> {
        if self.last_synced == Some(self.store.revision()) {
            return None;
        }
        let stats = self.scene.sync(&self.store, &mut self.backend);
        self.last_synced = Some(self.store.revision());
        Some(stats)
    }

    /// Authoritative object store
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Mutable store access; changes reconcile on the next frame
    pub fn store_mut(&mut self) -> &mut ObjectStore {
        &mut self.store
    }

    /// Live scene state
    pub fn scene(&self) -> &SceneSynchronizer {
        &self.scene
    }

    /// Mutable live scene access, used by interactive widget adapters
    pub fn scene_mut(&mut self) -> &mut SceneSynchronizer {
        &mut self.scene
    }

    /// The render backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend access
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Gizmo binding state
    pub fn gizmo(&self) -> &SelectionGizmo {
        &self.gizmo
    }

    /// Environment controller state
    pub fn environment(&self) -> &EnvironmentController {
        &self.environment
    }

    /// Frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Settings the engine was built with
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::foundation::math::Vec3;
    use crate::gizmo::GizmoMode;
    use crate::store::{MovementMode, ObjectPatch, ShapeKind};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn engine_with(objects: Vec<ShapeObject>) -> Engine<HeadlessBackend> {
        Engine::with_scene(EngineSettings::default(), HeadlessBackend::new(), objects)
    }

    #[test]
    fn test_new_engine_is_reconciled_and_lit() {
        let engine = engine_with(Vec::new());

        assert_eq!(engine.store().len(), 1, "starter scene seeds one object");
        assert_eq!(engine.backend().nodes_in_graph(), 1);
        assert!(engine.backend().environment().is_some(), "preset applied at startup");
    }

    #[test]
    fn test_frame_moves_orbiter_and_uploads_transform() {
        let mut engine = engine_with(vec![
            ShapeObject::new(ShapeKind::Sphere).with_movement(MovementMode::Orbit, 1.0, 5.0),
        ]);
        let id = engine.store().ids().next().unwrap();

        engine.frame(0.0);

        let live = engine.scene().node(id).unwrap();
        assert_relative_eq!(live.transform.position.x, 5.0, epsilon = EPSILON);
        let uploaded = engine.backend().node_transform(live.node()).unwrap();
        assert_relative_eq!(uploaded.position.x, 5.0, epsilon = EPSILON);
    }

    #[test]
    fn test_sync_runs_only_when_revision_moves() {
        let mut engine = engine_with(Vec::new());
        let id = engine.store().ids().next().unwrap();

        let report = engine.frame(0.016);
        assert_eq!(report.sync, None, "static store needs no reconciliation");

        engine.store_mut().update(id, &ObjectPatch::new().radius(2.0));
        let report = engine.frame(0.016);
        let sync = report.sync.expect("store change must trigger reconciliation");
        assert_eq!(sync.rebuilt, 1);
    }

    #[test]
    fn test_returning_motion_settles_through_the_loop() {
        let mut engine = engine_with(vec![
            ShapeObject::new(ShapeKind::Cube)
                .with_position(Vec3::new(10.0, 0.0, 0.0))
                .with_home(Vec3::zeros())
                .with_movement(MovementMode::Returning, 1.0, 0.0),
        ]);
        let id = engine.store().ids().next().unwrap();

        let mut committed = None;
        for frame in 0..300 {
            let report = engine.frame(0.016);
            if report.commits > 0 {
                committed = Some(frame);
                break;
            }
        }

        assert!(committed.is_some(), "settle must commit within 300 frames");
        let object = engine.store().get(id).unwrap();
        assert_eq!(object.movement, MovementMode::None);
        assert_eq!(object.position, Vec3::zeros());
    }

    #[test]
    fn test_delete_selected_respects_last_object() {
        let mut engine = engine_with(Vec::new());
        let id = engine.store().ids().next().unwrap();

        engine.select(Some(id));
        engine.apply_command(EditorCommand::DeleteSelected);
        engine.frame(0.016);

        assert_eq!(engine.store().len(), 1, "last object survives deletion");
        assert_eq!(engine.backend().nodes_in_graph(), 1);
    }

    #[test]
    fn test_delete_selected_removes_node_next_frame() {
        let mut engine = engine_with(vec![
            ShapeObject::new(ShapeKind::Cube),
            ShapeObject::new(ShapeKind::Cone),
        ]);
        let doomed = engine.store().ids().next().unwrap();

        engine.select(Some(doomed));
        engine.apply_command(EditorCommand::DeleteSelected);
        assert_eq!(engine.gizmo().target(), None, "gizmo released the doomed object");

        let report = engine.frame(0.016);
        assert_eq!(report.sync.unwrap().removed, 1);
        assert_eq!(engine.backend().nodes_in_graph(), 1);
    }

    #[test]
    fn test_gizmo_commands_drive_widget_mode() {
        let mut engine = engine_with(Vec::new());

        engine.apply_command(EditorCommand::SwitchGizmoMode(GizmoMode::Scale));
        assert_eq!(engine.backend().widget_mode(), GizmoMode::Scale);

        engine.apply_command(EditorCommand::CycleGizmoMode);
        assert_eq!(engine.backend().widget_mode(), GizmoMode::Translate);
    }

    #[test]
    fn test_focus_selection_points_camera_at_live_position() {
        let mut engine = engine_with(vec![
            ShapeObject::new(ShapeKind::Torus).with_position(Vec3::new(3.0, 1.0, -2.0)),
        ]);
        let id = engine.store().ids().next().unwrap();

        engine.select(Some(id));
        engine.apply_command(EditorCommand::FocusSelection);

        assert_eq!(engine.backend().focus_target(), Some(Vec3::new(3.0, 1.0, -2.0)));
    }

    #[test]
    fn test_drag_commit_keeps_next_frame_quiescent_on_geometry() {
        let mut engine = engine_with(Vec::new());
        let id = engine.store().ids().next().unwrap();
        engine.select(Some(id));

        assert!(engine.begin_gizmo_drag());
        engine.scene_mut().node_mut(id).unwrap().transform.position = Vec3::new(2.0, 0.0, 0.0);
        engine.end_gizmo_drag();

        let report = engine.frame(0.016);
        let sync = report.sync.expect("drag commit bumps the revision");
        assert_eq!(sync.rebuilt, 0, "transform-only commit must not rebuild geometry");
        assert_eq!(engine.store().get(id).unwrap().home, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut engine = engine_with(vec![
            ShapeObject::new(ShapeKind::Cube),
            ShapeObject::new(ShapeKind::Torus),
            ShapeObject::new(ShapeKind::Cone),
        ]);
        engine.frame(0.016);

        engine.shutdown();

        assert_eq!(engine.backend().nodes_in_graph(), 0);
        assert_eq!(engine.backend().live_geometries(), 0);
        assert_eq!(engine.backend().live_materials(), 0);
    }

    #[test]
    fn test_disabled_gizmo_setting_starts_detached() {
        let settings = EngineSettings::default().with_gizmo(false, GizmoMode::Rotate);
        let mut engine = Engine::with_scene(settings, HeadlessBackend::new(), Vec::new());
        let id = engine.store().ids().next().unwrap();

        engine.select(Some(id));

        assert_eq!(engine.gizmo().target(), None);
        assert_eq!(engine.backend().widget_mode(), GizmoMode::Rotate);
    }
}
