//! # Configuration Module
//!
//! Runtime settings for Moodbox, read from a JSON file in the platform
//! config directory:
//! - Linux: `~/.config/moodbox/config.json`
//! - macOS: `~/Library/Application Support/moodbox/config.json`
//! - Windows: `%APPDATA%\moodbox\config.json`
//!
//! A missing file means defaults. Command-line flags override whatever the
//! file says (see `main.rs`).

use crate::engine::{NoMatchPolicy, DEFAULT_SAMPLE_SIZE};
use crate::loader::LoaderConfig;
use anyhow::{Context, Result};
use log::debug;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the platform-appropriate config file path.
///
/// The `moodbox` directory is not created here; nothing is ever written to
/// it by the application.
///
/// # Errors
///
/// Fails if the platform has no config directory.
///
/// # Examples
///
/// ```no_run
/// use moodbox::config::get_config_path;
///
/// let path = get_config_path()?;
/// println!("Config location: {}", path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config to point at a file explicitly."
        )
    })?;

    Ok(config_dir.join("moodbox").join("config.json"))
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// CSV catalog to load
    pub catalog_path: PathBuf,
    /// How many songs a recommendation shows
    pub sample_size: usize,
    /// What to do when a mood matches nothing
    pub no_match_policy: NoMatchPolicy,
    /// Column aliases for title and artist
    #[serde(flatten)]
    pub loader: LoaderConfig,
    /// Fixed seed for reproducible picks
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("spotify.csv"),
            sample_size: DEFAULT_SAMPLE_SIZE,
            no_match_policy: NoMatchPolicy::default(),
            loader: LoaderConfig::default(),
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Read configuration from `path`, falling back to defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not valid JSON, or
    /// if it sets `sample_size` to zero.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;
        config.validate()?;

        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Load from the platform default location.
    ///
    /// # Errors
    ///
    /// See [`get_config_path`] and [`RuntimeConfig::load`].
    pub fn load_default() -> Result<Self> {
        Self::load(&get_config_path()?)
    }

    /// Create configuration with an explicit catalog path
    #[must_use]
    pub fn with_catalog_path(catalog_path: PathBuf) -> Self {
        Self {
            catalog_path,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Fails when `sample_size` is zero.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.sample_size >= 1, "sample_size must be at least 1");
        Ok(())
    }

    /// Catalog path made absolute against the working directory.
    ///
    /// # Errors
    ///
    /// Fails if the working directory cannot be determined.
    pub fn resolved_catalog_path(&self) -> Result<PathBuf> {
        let absolute = self.catalog_path.absolutize().with_context(|| {
            format!("Failed to resolve catalog path {}", self.catalog_path.display())
        })?;
        Ok(absolute.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_get_config_path_structure() {
        let path = get_config_path().expect("Should get valid path");

        assert!(path.to_string_lossy().ends_with("config.json"));
        let parent = path.parent().expect("Should have parent directory");
        assert_eq!(parent.file_name().unwrap(), "moodbox");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::load(&dir.path().join("absent.json")).unwrap();

        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.sample_size, 5);
        assert_eq!(config.no_match_policy, NoMatchPolicy::Warn);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"sample_size": 3, "no_match_policy": "fallback-random", "artist_columns": ["performer"], "seed": 11}}"#
        )
        .unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert_eq!(config.sample_size, 3);
        assert_eq!(config.no_match_policy, NoMatchPolicy::FallbackRandom);
        assert_eq!(config.loader.artist_columns, vec!["performer".to_string()]);
        assert_eq!(config.loader.title_columns, vec!["track_name".to_string()]);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.catalog_path, PathBuf::from("spotify.csv"));
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"sample_size": 0}"#).unwrap();

        assert!(RuntimeConfig::load(&path).is_err());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = RuntimeConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_resolved_catalog_path_is_absolute() {
        let config = RuntimeConfig::with_catalog_path(PathBuf::from("data/songs.csv"));
        let resolved = config.resolved_catalog_path().unwrap();

        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("data/songs.csv"));
    }
}
