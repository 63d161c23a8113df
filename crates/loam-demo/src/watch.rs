//! Picks up edits to `config.ron` between strokes.

use std::path::PathBuf;

use loam_config::{CliArgs, Config};
use tracing::warn;

/// Tracks the on-disk config so edits can be applied while the demo runs.
///
/// Comparison happens against the file contents, not the effective config,
/// so CLI overrides never register as a change. They are re-applied on top
/// of every reloaded config.
pub(crate) struct ConfigWatch {
    dir: PathBuf,
    on_disk: Config,
}

impl ConfigWatch {
    pub(crate) fn new(dir: PathBuf, on_disk: Config) -> Self {
        Self { dir, on_disk }
    }

    /// Returns the new effective config if the file changed since the last poll.
    pub(crate) fn poll(&mut self, args: &CliArgs) -> Option<Config> {
        match self.on_disk.reload(&self.dir) {
            Ok(Some(changed)) => {
                self.on_disk = changed.clone();
                let mut effective = changed;
                effective.apply_cli_overrides(args);
                Some(effective)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Config reload failed: {e}");
                None
            }
        }
    }
}
