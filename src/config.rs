//! TOML settings for model training and chart layout.
//!
//! Settings live in `settings.toml` inside the application directory. A
//! missing file yields defaults; values are normalized after loading.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};
use crate::charts::ChartSize;
use crate::ml::ForestParams;

/// File name of the settings file inside the app directory.
pub const CONFIG_FILE_NAME: &str = "settings.toml";

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found: {0}")]
    AppDir(#[from] AppDirError),
}

/// All persisted settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub model: ModelSettings,
    pub charts: ChartSettings,
}

/// Random forest and evaluation split settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Number of trees in the forest.
    pub trees: usize,
    /// Seed shared by the split and the forest.
    pub seed: u64,
    /// Fraction of rows held out by the evaluation split.
    pub test_fraction: f64,
    /// Train each tree on a bootstrap sample rather than every row.
    pub bootstrap: bool,
    /// Depth limit per tree; absent means grow until pure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Nodes with fewer samples become leaves.
    pub min_samples_split: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        let forest = ForestParams::default();
        Self {
            trees: forest.n_trees,
            seed: forest.seed,
            test_fraction: 0.2,
            bootstrap: forest.bootstrap,
            max_depth: forest.max_depth,
            min_samples_split: forest.min_samples_split,
        }
    }
}

impl ModelSettings {
    /// Forest hyperparameters derived from these settings.
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.trees,
            seed: self.seed,
            bootstrap: self.bootstrap,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
        }
    }
}

/// Figure dimensions in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        let size = ChartSize::default();
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl ChartSettings {
    pub fn size(&self) -> ChartSize {
        ChartSize {
            width: self.width,
            height: self.height,
        }
    }
}

impl AppSettings {
    /// Clamp values into ranges the trainer and renderer accept.
    pub fn normalized(mut self) -> Self {
        self.model.trees = self.model.trees.max(1);
        self.model.max_depth = self.model.max_depth.map(|depth| depth.max(1));
        self.model.min_samples_split = self.model.min_samples_split.max(2);
        if !(self.model.test_fraction > 0.0 && self.model.test_fraction < 1.0) {
            self.model.test_fraction = ModelSettings::default().test_fraction;
        }
        self.charts.width = self.charts.width.max(1);
        self.charts.height = self.charts.height.max(1);
        self
    }
}

/// Resolve the settings file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from a specific path, returning defaults if missing.
pub fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppSettings>(&text)
        .map(AppSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Load settings from `path`, writing defaults there first if it is missing.
pub fn load_or_init(path: &Path) -> Result<AppSettings, ConfigError> {
    if path.exists() {
        return load_from(path);
    }
    let settings = AppSettings::default();
    save_to_path(&settings, path)?;
    tracing::info!("Wrote default settings to {}", path.display());
    Ok(settings)
}

/// Write settings atomically, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(write_error)?;
    temp.write_all(data.as_bytes()).map_err(write_error)?;
    temp.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

/// Load settings from the app directory, logging and falling back to
/// defaults on failure.
pub fn load_or_warn() -> AppSettings {
    match config_path().and_then(|path| load_or_init(&path)) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Using default settings: {err}");
            AppSettings::default()
        }
    }
}
