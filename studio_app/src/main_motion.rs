//! Headless motion demo exercising every movement mode
//!
//! Runs the movement gallery for a fixed number of simulated frames, logging
//! live positions as they evolve and the returning-mode settle when it
//! lands. An optional TOML or RON settings path can be passed as the first
//! argument.

use rand::Rng;
use shape_engine::prelude::*;
use shape_engine::store::presets;
use thiserror::Error;

const FRAME_DT: f32 = 1.0 / 60.0;
const SIM_FRAMES: usize = 600;
const REPORT_EVERY: usize = 120;
const EXTRA_ORBITERS: usize = 4;
const SCATTER_SPAN: f32 = 8.0;

#[derive(Debug, Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

struct MotionDemoApp {
    engine: Engine<HeadlessBackend>,
}

impl MotionDemoApp {
    fn new(settings: EngineSettings) -> Self {
        log::info!("Creating motion demo scene...");

        let mut objects = presets::movement_gallery();

        // A few randomly placed orbiters on top of the fixed gallery
        let mut rng = rand::thread_rng();
        for _ in 0..EXTRA_ORBITERS {
            let position = Vec3::new(
                rng.gen_range(-SCATTER_SPAN..SCATTER_SPAN),
                rng.gen_range(1.0..4.0),
                rng.gen_range(-SCATTER_SPAN..SCATTER_SPAN),
            );
            objects.push(
                ShapeObject::new(ShapeKind::Sphere)
                    .with_position(position)
                    .with_shape_params(0.4, 1.0)
                    .with_movement(MovementMode::Orbit, rng.gen_range(0.5..2.0), 2.0),
            );
        }

        let engine = Engine::with_scene(settings, HeadlessBackend::new(), objects);
        Self { engine }
    }

    fn run(&mut self) {
        log::info!(
            "Simulating {SIM_FRAMES} frames at {:.1} ms per frame",
            FRAME_DT * 1000.0
        );

        let mut stopwatch = Stopwatch::new();
        let mut settles = 0;
        for frame in 1..=SIM_FRAMES {
            let report = self.engine.frame(FRAME_DT);
            if report.motion.settled > 0 {
                settles += report.motion.settled;
                log::info!("frame {frame}: returning motion arrived home and settled");
            }
            if frame % REPORT_EVERY == 0 {
                log::info!(
                    "Simulated frames {}..={frame} in {:.1} ms of wall time",
                    frame - REPORT_EVERY + 1,
                    stopwatch.lap_secs() * 1000.0
                );
                self.log_positions(frame);
            }
        }

        let stats = self.engine.backend().stats();
        log::info!(
            "Done in {:.1} ms: {settles} settle(s), {} transform upload(s), {} allocation(s), {} disposal(s)",
            stopwatch.total_secs() * 1000.0,
            stats.transform_uploads,
            stats.allocations(),
            stats.disposals()
        );
        self.engine.shutdown();
    }

    fn log_positions(&self, frame: usize) {
        for (id, object) in self.engine.store().iter() {
            if let Some(node) = self.engine.scene().node(id) {
                let position = node.transform.position;
                log::info!(
                    "frame {frame}: {:?} ({:?}) at ({:.2}, {:.2}, {:.2})",
                    object.kind,
                    object.movement,
                    position.x,
                    position.y,
                    position.z
                );
            }
        }
    }
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting shape studio motion demo");

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading settings from {path}");
            EngineSettings::load_from_file(&path)?
        }
        None => EngineSettings::default(),
    };

    let mut app = MotionDemoApp::new(settings);
    app.run();

    log::info!("Motion demo finished");
    Ok(())
}
