//! Narration player configuration
//!
//! Pacing parameters come from a TOML file resolved in priority order:
//! explicit path (CLI argument or environment, merged by clap) first, then
//! the per-user config file, then compiled defaults. A missing file at the
//! default location is fine; an explicit path that cannot be read or
//! parsed is an error.
//!
//! ```toml
//! [pace]
//! base_rate = 0.5
//! label_factor = 2.0
//! summary_factor = 0.8
//! tick_interval_ms = 50
//! ```

use codewave_common::error::{Error, Result};
use codewave_common::params::PaceParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Narration player configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pace: PaceParams,
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        debug!("Configuration loaded from {}", path.display());
        Ok(config.clamped())
    }

    /// Resolve configuration by priority:
    /// 1. Explicit path (CLI argument / environment variable)
    /// 2. Per-user config file (`~/.config/codewave/config.toml`)
    /// 3. Compiled defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load(&path);
            }
            debug!("No config file at {}, using defaults", path.display());
        }

        Ok(Self::default())
    }

    fn clamped(mut self) -> Self {
        self.pace = self.pace.clamped();
        self
    }
}

/// Per-user config file location for the platform
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("codewave").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_file_loads_and_clamps() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[pace]\nbase_rate = 1.0\ntick_interval_ms = 99999"
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.pace.base_rate, 1.0);
        // out-of-range interval clamped to the documented maximum
        assert_eq!(config.pace.tick_interval_ms, 1000);
        // unspecified fields keep their defaults
        assert_eq!(config.pace.label_factor, 2.0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        let result = Config::resolve(Some(&path));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn malformed_explicit_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pace = \"not a table\"").unwrap();
        let result = Config::load(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }
}
