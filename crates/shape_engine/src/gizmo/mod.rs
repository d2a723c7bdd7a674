//! Selection gizmo binding
//!
//! Tracks which live node the interactive transform widget is bound to and
//! commits the widget's edits back into the store when a drag ends. During a
//! drag the live node is the source of truth; the store learns about the new
//! transform exactly once, at drag end, together with a `home` refresh so
//! movement patterns anchor to the post-drag location.

use serde::{Deserialize, Serialize};

use crate::backend::{CameraRig, TransformWidget};
use crate::scene::SceneSynchronizer;
use crate::store::{ObjectId, ObjectPatch, ObjectStore};

/// Manipulation mode of the transform widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GizmoMode {
    /// Move the selection
    #[default]
    Translate,
    /// Rotate the selection
    Rotate,
    /// Scale the selection
    Scale,
}

impl GizmoMode {
    /// All modes in cycle order
    pub const ALL: [Self; 3] = [Self::Translate, Self::Rotate, Self::Scale];

    /// Next mode in the translate, rotate, scale cycle
    pub fn next(self) -> Self {
        match self {
            Self::Translate => Self::Rotate,
            Self::Rotate => Self::Scale,
            Self::Scale => Self::Translate,
        }
    }
}

/// Binds the transform widget to the selected object's live node
///
/// The gizmo and camera-orbit input are mutually exclusive consumers of
/// pointer input: starting a drag disables orbit, releasing re-enables it.
#[derive(Debug)]
pub struct SelectionGizmo {
    enabled: bool,
    mode: GizmoMode,
    target: Option<ObjectId>,
    dragging: bool,
}

impl Default for SelectionGizmo {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionGizmo {
    /// Create an enabled gizmo with no binding
    pub fn new() -> Self {
        Self {
            enabled: true,
            mode: GizmoMode::default(),
            target: None,
            dragging: false,
        }
    }

    /// Whether the gizmo is visible and allowed to bind
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current manipulation mode
    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    /// Object the widget is currently bound to
    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Show or hide the gizmo; hiding detaches immediately
    pub fn set_enabled<B>(&mut self, enabled: bool, backend: &mut B)
    where
        B: TransformWidget + CameraRig,
    {
        self.enabled = enabled;
        if !enabled && self.target.is_some() {
            self.cancel_drag(backend);
            backend.detach();
            self.target = None;
            log::debug!("gizmo: hidden, detached");
        }
    }

    /// Switch the widget's manipulation mode
    pub fn set_mode(&mut self, mode: GizmoMode, widget: &mut impl TransformWidget) {
        self.mode = mode;
        widget.set_mode(mode);
    }

    /// Advance to the next manipulation mode and return it
    pub fn cycle_mode(&mut self, widget: &mut impl TransformWidget) -> GizmoMode {
        let next = self.mode.next();
        self.set_mode(next, widget);
        next
    }

    /// Re-evaluate the binding against the current selection
    ///
    /// Attaches to the selected object's live node, detaches when the
    /// selection is cleared or the node is missing, and rebinds when the
    /// selection moved to a different object. A drag in progress is
    /// cancelled whenever the binding changes.
    pub fn refresh<B>(&mut self, store: &ObjectStore, scene: &SceneSynchronizer, backend: &mut B)
    where
        B: TransformWidget + CameraRig,
    {
        let desired = if self.enabled {
            store
                .selected()
                .and_then(|id| scene.node(id).map(|node| (id, node.node())))
        } else {
            None
        };

        match desired {
            Some((id, node)) if self.target != Some(id) => {
                self.cancel_drag(backend);
                backend.attach(node);
                self.target = Some(id);
                log::debug!("gizmo: attached to {id:?}");
            }
            None if self.target.is_some() => {
                self.cancel_drag(backend);
                backend.detach();
                self.target = None;
                log::debug!("gizmo: detached");
            }
            _ => {}
        }
    }

    /// Start an interactive drag; claims pointer input from camera orbit
    ///
    /// Returns false when nothing is bound or a drag is already running.
    pub fn begin_drag(&mut self, camera: &mut impl CameraRig) -> bool {
        if self.target.is_none() || self.dragging {
            return false;
        }
        self.dragging = true;
        camera.set_orbit_enabled(false);
        log::debug!("gizmo: drag started on {:?}", self.target);
        true
    }

    /// Finish a drag: commit the live transform to the store, refresh home,
    /// and hand pointer input back to camera orbit
    pub fn end_drag(
        &mut self,
        store: &mut ObjectStore,
        scene: &SceneSynchronizer,
        camera: &mut impl CameraRig,
    ) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        camera.set_orbit_enabled(true);

        let Some(id) = self.target else { return };
        let Some(node) = scene.node(id) else { return };

        let transform = node.transform.clone();
        let patch = ObjectPatch::new()
            .position(transform.position)
            .rotation(transform.rotation)
            .scale(transform.scale)
            .home(transform.position);
        store.update(id, &patch);
        log::debug!(
            "gizmo: drag ended, committed {id:?} at ({:.2}, {:.2}, {:.2})",
            transform.position.x,
            transform.position.y,
            transform.position.z
        );
    }

    fn cancel_drag(&mut self, camera: &mut impl CameraRig) {
        if self.dragging {
            self.dragging = false;
            camera.set_orbit_enabled(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::foundation::math::Vec3;
    use crate::store::{ShapeKind, ShapeObject};

    fn bound_fixture() -> (ObjectStore, SceneSynchronizer, HeadlessBackend, SelectionGizmo, ObjectId) {
        let mut store = ObjectStore::new();
        let id = store.add(ShapeObject::new(ShapeKind::Cube).with_position(Vec3::new(1.0, 0.0, 0.0)));
        store.select(Some(id));

        let mut scene = SceneSynchronizer::new();
        let mut backend = HeadlessBackend::new();
        scene.sync(&store, &mut backend);

        let mut gizmo = SelectionGizmo::new();
        gizmo.refresh(&store, &scene, &mut backend);
        (store, scene, backend, gizmo, id)
    }

    #[test]
    fn test_refresh_attaches_to_selection() {
        let (_store, scene, backend, gizmo, id) = bound_fixture();

        assert_eq!(gizmo.target(), Some(id));
        let node = scene.node(id).unwrap().node();
        assert_eq!(backend.widget_target(), Some(node));
    }

    #[test]
    fn test_clearing_selection_detaches() {
        let (mut store, scene, mut backend, mut gizmo, _id) = bound_fixture();

        store.select(None);
        gizmo.refresh(&store, &scene, &mut backend);

        assert_eq!(gizmo.target(), None);
        assert_eq!(backend.widget_target(), None);
    }

    #[test]
    fn test_disabled_gizmo_never_binds() {
        let (store, scene, mut backend, mut gizmo, _id) = bound_fixture();

        gizmo.set_enabled(false, &mut backend);
        assert_eq!(backend.widget_target(), None);

        gizmo.refresh(&store, &scene, &mut backend);
        assert_eq!(gizmo.target(), None, "hidden gizmo must not rebind");
    }

    #[test]
    fn test_drag_toggles_camera_orbit() {
        let (_store, _scene, mut backend, mut gizmo, _id) = bound_fixture();
        assert!(backend.orbit_enabled());

        assert!(gizmo.begin_drag(&mut backend));
        assert!(!backend.orbit_enabled(), "drag must claim pointer input");
        assert!(!gizmo.begin_drag(&mut backend), "drag already running");
    }

    #[test]
    fn test_drag_end_commits_transform_and_home() {
        let (mut store, mut scene, mut backend, mut gizmo, id) = bound_fixture();
        assert!(gizmo.begin_drag(&mut backend));

        // The widget edits the live node during the drag
        let live = scene.node_mut(id).unwrap();
        live.transform.position = Vec3::new(4.0, 2.0, -1.0);
        live.transform.rotation = Vec3::new(0.0, 0.5, 0.0);
        live.transform.scale = Vec3::new(2.0, 2.0, 2.0);

        gizmo.end_drag(&mut store, &scene, &mut backend);

        assert!(backend.orbit_enabled(), "orbit restored after drag");
        let object = store.get(id).unwrap();
        assert_eq!(object.position, Vec3::new(4.0, 2.0, -1.0));
        assert_eq!(object.rotation, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(object.scale, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(object.home, Vec3::new(4.0, 2.0, -1.0), "home follows the drag");
    }

    #[test]
    fn test_end_drag_without_begin_is_noop() {
        let (mut store, scene, mut backend, mut gizmo, id) = bound_fixture();
        let before = store.get(id).unwrap().clone();
        let revision = store.revision();

        gizmo.end_drag(&mut store, &scene, &mut backend);

        assert_eq!(store.get(id), Some(&before));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_deleted_target_detaches_on_refresh() {
        let (mut store, mut scene, mut backend, mut gizmo, id) = bound_fixture();

        store.remove(id);
        scene.sync(&store, &mut backend);
        gizmo.refresh(&store, &scene, &mut backend);

        assert_eq!(gizmo.target(), None);
        assert_eq!(backend.widget_target(), None);
    }

    #[test]
    fn test_mode_cycle_order() {
        let (_store, _scene, mut backend, mut gizmo, _id) = bound_fixture();
        assert_eq!(gizmo.mode(), GizmoMode::Translate);

        assert_eq!(gizmo.cycle_mode(&mut backend), GizmoMode::Rotate);
        assert_eq!(gizmo.cycle_mode(&mut backend), GizmoMode::Scale);
        assert_eq!(gizmo.cycle_mode(&mut backend), GizmoMode::Translate);
        assert_eq!(backend.widget_mode(), GizmoMode::Translate);
    }
}
