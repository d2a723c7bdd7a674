//! Headless showcase demo: all 13 shapes, presets, and rebuild memoization
//!
//! Builds the showcase ring, cycles every environment preset, then edits one
//! object's appearance and shape parameters to show which updates rebuild
//! geometry and which are applied in place. Pass a TOML or RON settings path
//! as the first argument and an output directory for the procedural texture
//! bitmaps as the second.

use shape_engine::prelude::*;
use shape_engine::store::presets;
use thiserror::Error;

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES_PER_PRESET: usize = 90;

#[derive(Debug, Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("texture export failed: {0}")]
    Export(String),
}

struct ShowcaseApp {
    engine: Engine<HeadlessBackend>,
}

impl ShowcaseApp {
    fn new(settings: EngineSettings) -> Self {
        log::info!("Creating showcase scene...");
        let engine =
            Engine::with_scene(settings, HeadlessBackend::new(), presets::showcase_scene());
        Self { engine }
    }

    fn run(&mut self) {
        let stopwatch = Stopwatch::new();
        self.cycle_presets();
        self.demonstrate_rebuild_memoization();
        self.exercise_editor_commands();

        let stats = self.engine.backend().stats();
        log::info!(
            "Done in {:.1} ms of wall time: {} allocation(s), {} disposal(s), {} node(s) in graph",
            stopwatch.total_secs() * 1000.0,
            stats.allocations(),
            stats.disposals(),
            self.engine.backend().nodes_in_graph()
        );
        self.engine.shutdown();
    }

    fn cycle_presets(&mut self) {
        let mut stopwatch = Stopwatch::new();
        for preset in EnvironmentPreset::ALL {
            self.engine.apply_environment(preset);
            for _ in 0..FRAMES_PER_PRESET {
                self.engine.frame(FRAME_DT);
            }
            log::info!(
                "Ran {FRAMES_PER_PRESET} frames under the {preset:?} preset in {:.1} ms",
                stopwatch.lap_secs() * 1000.0
            );
        }
    }

    fn demonstrate_rebuild_memoization(&mut self) {
        let id = self.engine.store().ids().next().unwrap();

        self.engine
            .store_mut()
            .update(id, &ObjectPatch::new().color(Color::new(1.0, 0.85, 0.1)));
        let report = self.engine.frame(FRAME_DT);
        if let Some(sync) = report.sync {
            log::info!(
                "Color update: {} geometry rebuild(s), {} refreshed in place",
                sync.rebuilt,
                sync.refreshed
            );
        }

        self.engine
            .store_mut()
            .update(id, &ObjectPatch::new().radius(1.8));
        let report = self.engine.frame(FRAME_DT);
        if let Some(sync) = report.sync {
            log::info!("Radius update: {} geometry rebuild(s)", sync.rebuilt);
        }
    }

    fn exercise_editor_commands(&mut self) {
        let last = self.engine.store().ids().last().unwrap();
        self.engine.select(Some(last));

        self.engine.apply_command(EditorCommand::CycleGizmoMode);
        self.engine.apply_command(EditorCommand::FocusSelection);
        self.engine.apply_command(EditorCommand::DeleteSelected);
        self.engine.frame(FRAME_DT);

        log::info!(
            "After delete: {} object(s), {} live node(s)",
            self.engine.store().len(),
            self.engine.backend().nodes_in_graph()
        );
    }

    fn export_textures(&self, dir: &str) -> Result<(), AppError> {
        let resolution = self.engine.settings().texture_resolution;
        let library = TextureLibrary::new(resolution);

        std::fs::create_dir_all(dir).map_err(|e| AppError::Export(e.to_string()))?;
        for (kind, name) in [
            (TextureKind::Checkerboard, "checkerboard"),
            (TextureKind::Dots, "dots"),
            (TextureKind::Stripes, "stripes"),
            (TextureKind::Noise, "noise"),
        ] {
            let bitmap = library.bitmap(kind).expect("patterned kind has a bitmap");
            let path = format!("{dir}/{name}.png");
            bitmap
                .save(&path)
                .map_err(|e| AppError::Export(e.to_string()))?;
            log::info!("Wrote {path}");
        }
        Ok(())
    }
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting shape studio showcase demo");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            log::info!("Loading settings from {path}");
            EngineSettings::load_from_file(&path)?
        }
        None => EngineSettings::default(),
    };
    let texture_dir = args.next();

    let mut app = ShowcaseApp::new(settings);
    if let Some(dir) = &texture_dir {
        app.export_textures(dir)?;
    }
    app.run();

    log::info!("Showcase demo finished");
    Ok(())
}
