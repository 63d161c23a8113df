//! Configuration for the Loam terrain sandbox.
//!
//! Settings persist to disk as a RON file, tolerate missing and unknown
//! fields, and can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BrushConfig, CameraConfig, Config, DebugConfig, StampConfig, TerrainConfig, default_config_dir,
};
pub use error::ConfigError;
