//! Command-line argument parsing for the Loam sandbox.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Loam command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "loam", about = "Sculptable procedural terrain sandbox")]
pub struct CliArgs {
    /// Grid cells per side.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Tiles per side (must divide the resolution).
    #[arg(long)]
    pub tiles_per_side: Option<u32>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Brush depth.
    #[arg(long)]
    pub brush_depth: Option<f32>,

    /// Brush radius in normalized terrain units.
    #[arg(long)]
    pub brush_radius: Option<f32>,

    /// Number of simulated sculpt strokes to run.
    #[arg(long, default_value_t = 8)]
    pub strokes: u32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(r) = args.resolution {
            self.terrain.resolution = r;
        }
        if let Some(t) = args.tiles_per_side {
            self.terrain.tiles_per_side = t;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(depth) = args.brush_depth {
            self.brush.depth = depth;
        }
        if let Some(radius) = args.brush_radius {
            self.brush.radius = radius;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            resolution: Some(200),
            seed: Some(99),
            brush_radius: Some(0.1),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.resolution, 200);
        assert_eq!(config.terrain.seed, 99);
        assert_eq!(config.brush.radius, 0.1);
        // Non-overridden fields retain defaults
        assert_eq!(config.terrain.tiles_per_side, 10);
        assert_eq!(config.brush.depth, 0.02);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "loam",
            "--resolution",
            "50",
            "--tiles-per-side",
            "5",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.resolution, Some(50));
        assert_eq!(args.tiles_per_side, Some(5));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.strokes, 8);
    }
}
