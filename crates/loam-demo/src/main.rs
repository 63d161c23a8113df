//! Headless sandbox that generates a terrain, then turns simulated pointer
//! positions into sculpt strokes and reports what each stroke re-uploads.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p loam-demo -- --strokes 16 --log-level debug`.

mod scene;
mod watch;

use clap::Parser;
use glam::Vec2;
use loam_config::{CliArgs, Config, TerrainConfig, default_config_dir};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, error, info, warn};

use crate::scene::TerrainScene;
use crate::watch::ConfigWatch;

/// Fraction of the viewport the simulated pointer wanders over, around the center.
const POINTER_SPREAD: f32 = 0.2;

/// Sample heights at a few fixed anchors, as a prop placer would.
fn report_anchor_heights(scene: &TerrainScene, label: &str) {
    for (x, y) in [(0.25, 0.25), (0.5, 0.5), (0.75, 0.75)] {
        let point = scene.field.surface_point(x, y);
        info!(x, y, z = point.z, "{label} anchor height");
    }
}

/// Apply a reloaded config to the running scene.
fn apply_reload(scene: &mut TerrainScene, terrain: &TerrainConfig, config: &Config) {
    scene.apply_live_settings(config);
    if config.terrain != *terrain {
        warn!("Terrain settings changed on disk; restart to regenerate");
    }
    info!(
        depth = scene.brush.depth,
        radius = scene.brush.radius,
        stamps = scene.brush.stamps.len(),
        "applied reloaded brush and camera"
    );
}

/// Run `strokes` pointer strokes scattered around the viewport center.
///
/// `config.ron` is polled before every stroke so brush edits land mid-session.
fn run_strokes(
    scene: &mut TerrainScene,
    watch: &mut ConfigWatch,
    config: &Config,
    args: &CliArgs,
) {
    let strokes = args.strokes;
    // Fixed seed for a reproducible session
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    let full_bytes = scene.field.as_bytes().len();

    let mut hits = 0u32;
    let mut uploaded = 0usize;

    for i in 0..strokes {
        if let Some(reloaded) = watch.poll(args) {
            apply_reload(scene, &config.terrain, &reloaded);
        }

        let jitter = Vec2::new(
            rng.random_range(-POINTER_SPREAD..=POINTER_SPREAD),
            rng.random_range(-POINTER_SPREAD..=POINTER_SPREAD),
        );
        let pointer = scene.camera.viewport * (Vec2::splat(0.5) + jitter);

        let Some(stroke) = scene.stroke(pointer) else {
            debug!(stroke = i, px = pointer.x, py = pointer.y, "pointer missed the terrain");
            continue;
        };

        hits += 1;
        uploaded += stroke.outcome.upload_bytes();
        info!(
            stroke = i,
            x = stroke.local.x,
            y = stroke.local.y,
            tiles = stroke.outcome.dirty_tiles.len(),
            ranges = stroke.outcome.upload_ranges.len(),
            bytes = stroke.outcome.upload_bytes(),
            "sculpted"
        );
    }

    if hits == 0 {
        warn!(strokes, "no stroke hit the terrain; check the camera settings");
        return;
    }

    info!(
        hits,
        divots = scene.field.ledger().len(),
        uploaded_bytes = uploaded,
        full_rebuild_bytes = full_bytes * hits as usize,
        "sculpt session complete"
    );
}

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => default_config_dir().unwrap_or_else(|e| {
            eprintln!("{e}, using ./loam");
            std::path::PathBuf::from("loam")
        }),
    };

    // Load or create config, then apply CLI overrides
    let on_disk = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = on_disk.clone();
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    loam_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!(
        resolution = config.terrain.resolution,
        tiles_per_side = config.terrain.tiles_per_side,
        seed = config.terrain.seed,
        "generating terrain"
    );

    let mut scene = match TerrainScene::from_config(&config) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Invalid terrain configuration: {e}");
            std::process::exit(1);
        }
    };

    info!(
        tiles = scene.field.layout().tile_count(),
        vertices = scene.field.vertices().len(),
        bytes = scene.field.as_bytes().len(),
        "terrain generated"
    );

    report_anchor_heights(&scene, "initial");
    let mut watch = ConfigWatch::new(config_dir, on_disk);
    run_strokes(&mut scene, &mut watch, &config, &args);
    report_anchor_heights(&scene, "sculpted");
}
