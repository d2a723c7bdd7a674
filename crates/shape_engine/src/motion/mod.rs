//! Per-frame kinematics
//!
//! Advances every animated object's live node once per frame. Oscillating
//! and orbiting modes are absolute functions of elapsed time around `home`;
//! straight and returning modes are incremental per-frame steps on the live
//! position. The simulator never writes the store directly: when a returning
//! motion arrives home, the settle is queued and committed by the frame loop
//! after this pass, because the pass is still iterating the objects a store
//! write would reshape.

use crate::config::SimulationTuning;
use crate::foundation::time::FrameClock;
use crate::scene::SceneSynchronizer;
use crate::store::{CommandQueue, MovementMode, ObjectPatch, ObjectStore};

/// Outcome counters for one simulation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionStats {
    /// Nodes whose position was advanced this pass
    pub moved: usize,
    /// Returning motions that arrived home and queued their settle commit
    pub settled: usize,
}

/// Advances live-node motion according to each object's movement mode
#[derive(Debug, Default)]
pub struct KineticSimulator {
    tuning: SimulationTuning,
}

impl KineticSimulator {
    /// Create a simulator with the given tuning constants
    pub fn new(tuning: SimulationTuning) -> Self {
        Self { tuning }
    }

    /// Current tuning constants
    pub fn tuning(&self) -> &SimulationTuning {
        &self.tuning
    }

    /// Replace the tuning constants
    pub fn set_tuning(&mut self, tuning: SimulationTuning) {
        self.tuning = tuning;
    }

    /// Advance every object's live node by one frame
    ///
    /// Objects without a live node yet (added since the last reconciliation)
    /// are skipped; they start moving once their node exists. Settle commits
    /// land in `queue`, never in the store, during this pass.
    pub fn step(
        &self,
        store: &ObjectStore,
        scene: &mut SceneSynchronizer,
        clock: &FrameClock,
        queue: &mut CommandQueue,
    ) -> MotionStats {
        let t = clock.total_time();
        let mut stats = MotionStats::default();

        for (id, object) in store.iter() {
            let Some(node) = scene.node_mut(id) else {
                continue;
            };

            let home = object.home;
            let speed = object.movement_speed;
            let range = object.movement_range;
            let position = &mut node.transform.position;

            match object.movement {
                MovementMode::None => {}
                MovementMode::Straight => {
                    position.z += self.tuning.straight_step * speed;
                    if (position.z - home.z).abs() > self.tuning.wrap_span {
                        position.z = home.z - self.tuning.wrap_span;
                    }
                    stats.moved += 1;
                }
                MovementMode::LeftRight => {
                    let phase = t * speed * self.tuning.oscillation_rate;
                    position.x = home.x + phase.sin() * range;
                    stats.moved += 1;
                }
                MovementMode::UpDown => {
                    let phase = t * speed * self.tuning.oscillation_rate;
                    position.y = home.y + phase.sin() * range;
                    stats.moved += 1;
                }
                MovementMode::Orbit => {
                    let radius = if range > 0.0 {
                        range
                    } else {
                        self.tuning.default_orbit_radius
                    };
                    let angle = t * speed * self.tuning.orbit_rate;
                    position.x = home.x + angle.cos() * radius;
                    position.z = home.z + angle.sin() * radius;
                    stats.moved += 1;
                }
                MovementMode::Returning => {
                    let step = self.tuning.return_step * speed;
                    position.x += (home.x - position.x) * step;
                    position.y += (home.y - position.y) * step;
                    position.z += (home.z - position.z) * step;
                    stats.moved += 1;

                    if (*position - home).norm() < self.tuning.snap_epsilon {
                        *position = home;
                        queue.push(id, ObjectPatch::new().position(home).movement(MovementMode::None));
                        stats.settled += 1;
                        log::debug!("motion: {id:?} arrived home, settle queued");
                    }
                }
            }

            // Self-spin is orthogonal to positional movement
            if object.animated {
                node.transform.rotation.x += self.tuning.spin_rate;
                node.transform.rotation.y += self.tuning.spin_rate;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::foundation::math::Vec3;
    use crate::store::{ObjectId, ShapeKind, ShapeObject};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    struct Rig {
        store: ObjectStore,
        scene: SceneSynchronizer,
        backend: HeadlessBackend,
        clock: FrameClock,
        queue: CommandQueue,
        simulator: KineticSimulator,
    }

    impl Rig {
        fn with_object(object: ShapeObject) -> (Self, ObjectId) {
            let mut store = ObjectStore::with_objects(vec![object]);
            let id = store.ids().next().unwrap();

            let mut scene = SceneSynchronizer::new();
            let mut backend = HeadlessBackend::new();
            scene.sync(&store, &mut backend);

            let rig = Self {
                store,
                scene,
                backend,
                clock: FrameClock::new(),
                queue: CommandQueue::new(),
                simulator: KineticSimulator::new(SimulationTuning::default()),
            };
            (rig, id)
        }

        fn step(&mut self) -> MotionStats {
            self.simulator
                .step(&self.store, &mut self.scene, &self.clock, &mut self.queue)
        }

        fn live_position(&self, id: ObjectId) -> Vec3 {
            self.scene.node(id).unwrap().transform.position
        }
    }

    #[test]
    fn test_none_mode_holds_still() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Cube).with_position(Vec3::new(1.0, 2.0, 3.0)),
        );

        rig.clock.advance(0.016);
        let stats = rig.step();

        assert_eq!(stats.moved, 0);
        assert_eq!(rig.live_position(id), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_straight_advances_along_z() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Sphere)
                .with_movement(MovementMode::Straight, 1.0, 0.0),
        );

        rig.step();
        assert_relative_eq!(rig.live_position(id).z, 0.02, epsilon = EPSILON);
        rig.step();
        assert_relative_eq!(rig.live_position(id).z, 0.04, epsilon = EPSILON);
    }

    #[test]
    fn test_straight_wraps_past_span() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Sphere)
                .with_movement(MovementMode::Straight, 1.0, 0.0),
        );

        rig.scene.node_mut(id).unwrap().transform.position.z = 49.99;
        rig.step();

        assert_relative_eq!(rig.live_position(id).z, -50.0, epsilon = EPSILON);
    }

    #[test]
    fn test_left_right_oscillates_around_home() {
        let home = Vec3::new(2.0, 1.0, -3.0);
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Torus)
                .with_position(home)
                .with_movement(MovementMode::LeftRight, 1.0, 1.5),
        );

        rig.clock.advance(0.25);
        rig.step();

        let expected_x = home.x + (0.25_f32 * 2.0).sin() * 1.5;
        let position = rig.live_position(id);
        assert_relative_eq!(position.x, expected_x, epsilon = EPSILON);
        assert_relative_eq!(position.y, home.y, epsilon = EPSILON);
        assert_relative_eq!(position.z, home.z, epsilon = EPSILON);
    }

    #[test]
    fn test_up_down_oscillates_on_y() {
        let home = Vec3::new(0.0, 4.0, 0.0);
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Cone)
                .with_position(home)
                .with_movement(MovementMode::UpDown, 2.0, 1.0),
        );

        rig.clock.advance(0.5);
        rig.step();

        let expected_y = home.y + (0.5_f32 * 2.0 * 2.0).sin();
        assert_relative_eq!(rig.live_position(id).y, expected_y, epsilon = EPSILON);
        assert_relative_eq!(rig.live_position(id).x, home.x, epsilon = EPSILON);
    }

    #[test]
    fn test_orbit_starts_at_positive_x_and_closes_period() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Sphere)
                .with_movement(MovementMode::Orbit, 1.0, 5.0),
        );

        rig.step();
        let start = rig.live_position(id);
        assert_relative_eq!(start.x, 5.0, epsilon = EPSILON);
        assert_relative_eq!(start.z, 0.0, epsilon = EPSILON);

        // One full period at angular rate speed * 0.5
        rig.clock.advance(2.0 * std::f32::consts::PI / 0.5);
        rig.step();
        let end = rig.live_position(id);
        assert_relative_eq!(end.x, 5.0, epsilon = EPSILON);
        assert_relative_eq!(end.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_orbit_zero_range_uses_default_radius() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Sphere)
                .with_movement(MovementMode::Orbit, 1.0, 0.0),
        );

        rig.step();

        assert_relative_eq!(rig.live_position(id).x, 5.0, epsilon = EPSILON);
    }

    #[test]
    fn test_returning_converges_monotonically_and_settles_exactly() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Cube)
                .with_position(Vec3::new(10.0, 0.0, 0.0))
                .with_home(Vec3::zeros())
                .with_movement(MovementMode::Returning, 1.0, 0.0),
        );

        let mut distance = 10.0_f32;
        let mut settled_after = None;
        for frame in 0..300 {
            let stats = rig.step();
            let now = rig.live_position(id).norm();
            assert!(
                now < distance || now == 0.0,
                "distance must shrink every frame (frame {frame}: {now} vs {distance})"
            );
            distance = now;
            if stats.settled > 0 {
                settled_after = Some(frame);
                break;
            }
        }

        let settled_after = settled_after.expect("returning motion should settle within 300 frames");
        assert!(settled_after > 50, "convergence from 10 units takes many frames");
        assert_eq!(rig.live_position(id), Vec3::zeros(), "snap is exact");

        // Commit is deferred: the store still shows the old state until drain
        assert_eq!(rig.store.get(id).unwrap().movement, MovementMode::Returning);
        assert_eq!(rig.queue.len(), 1);

        rig.queue.drain_into(&mut rig.store);
        let object = rig.store.get(id).unwrap();
        assert_eq!(object.movement, MovementMode::None);
        assert_eq!(object.position, Vec3::zeros(), "committed position is exactly home");
    }

    #[test]
    fn test_settled_object_stops_after_commit() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Cube)
                .with_position(Vec3::new(0.005, 0.0, 0.0))
                .with_home(Vec3::zeros())
                .with_movement(MovementMode::Returning, 1.0, 0.0),
        );

        let stats = rig.step();
        assert_eq!(stats.settled, 1);
        rig.queue.drain_into(&mut rig.store);

        let stats = rig.step();
        assert_eq!(stats.moved, 0, "settled object no longer moves");
        assert!(rig.queue.is_empty(), "no repeat settle commands");
    }

    #[test]
    fn test_spin_accumulates_independently_of_movement() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Icosahedron)
                .with_spin(true)
                .with_movement(MovementMode::Orbit, 1.0, 3.0),
        );

        rig.step();
        rig.step();

        let rotation = rig.scene.node(id).unwrap().transform.rotation;
        assert_relative_eq!(rotation.x, 0.02, epsilon = EPSILON);
        assert_relative_eq!(rotation.y, 0.02, epsilon = EPSILON);
        assert_relative_eq!(rotation.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_object_without_live_node_is_skipped() {
        let (mut rig, _id) = Rig::with_object(ShapeObject::default());
        rig.store.add(
            ShapeObject::new(ShapeKind::Cone).with_movement(MovementMode::Straight, 1.0, 0.0),
        );

        // No sync since the add; the new object has no node yet
        let stats = rig.step();
        assert_eq!(stats.moved, 0);
    }

    #[test]
    fn test_speed_scales_straight_step() {
        let (mut rig, id) = Rig::with_object(
            ShapeObject::new(ShapeKind::Sphere)
                .with_movement(MovementMode::Straight, 3.0, 0.0),
        );

        rig.step();

        assert_relative_eq!(rig.live_position(id).z, 0.06, epsilon = EPSILON);
    }
}
