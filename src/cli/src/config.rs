use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::eyre::WrapErr;
use cube_core::{DEFAULT_SCRAMBLE_LENGTH, transforms::CUBE_SIZE_PX};
use log::info;
use serde::{Deserialize, Serialize};

/// Settings read from `cube.toml`. Every field may be left out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeConfig {
    /// Edge length of the rendered cube
    pub cube_size_px: f64,
    /// Moves in a scramble when `--length` isn't given
    pub scramble_length: usize,
    /// Pause between moves during playback
    pub autoplay_speed_ms: u64,
    /// Where the session is saved between runs. Defaults to the platform's
    /// data directory.
    pub state_dir: Option<PathBuf>,
    pub sound: bool,
}

impl Default for CubeConfig {
    fn default() -> Self {
        CubeConfig {
            cube_size_px: CUBE_SIZE_PX,
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            autoplay_speed_ms: 500,
            state_dir: None,
            sound: true,
        }
    }
}

impl CubeConfig {
    /// Read the configuration at `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> color_eyre::Result<CubeConfig> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(target: "config", "No configuration at {}, using defaults", path.display());
                return Ok(CubeConfig::default());
            }
            Err(err) => {
                return Err(err)
                    .wrap_err_with(|| format!("Failed to read {}", path.display()));
            }
        };

        toml::from_str(&text).wrap_err_with(|| format!("Failed to parse {}", path.display()))
    }

    pub fn autoplay_speed(&self) -> Duration {
        Duration::from_millis(self.autoplay_speed_ms)
    }
}
