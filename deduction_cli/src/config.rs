//! Configuration file support for the `deduce` binary.
//!
//! Every field has a default, so an absent file and an empty file behave the same.

use anyhow::{Context, Result};
use entity_catalog::JsonFileStore;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "deduce.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub images: ImageConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Preferred catalog file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,

    /// Tried when the preferred file does not exist. An empty string disables it.
    #[serde(
        default = "default_fallback_path",
        deserialize_with = "empty_path_as_none"
    )]
    pub fallback_path: Option<PathBuf>,
}

/// Where guessed entities' pictures are looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_image_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/mutants.json")
}

fn default_fallback_path() -> Option<PathBuf> {
    Some(PathBuf::from("mutants.json"))
}

fn empty_path_as_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let path = PathBuf::deserialize(deserializer)?;
    Ok((!path.as_os_str().is_empty()).then_some(path))
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_image_extension() -> String {
    "jpg".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            fallback_path: default_fallback_path(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            dir: default_image_dir(),
            extension: default_image_extension(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration file. Relative paths in it are taken relative to the
    /// file's own directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        if let Some(base) = path.parent().filter(|base| !base.as_os_str().is_empty()) {
            config.rebase(base);
        }
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load the explicit file if given; otherwise the default file if it exists;
    /// otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn rebase(&mut self, base: &Path) {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        rebase(&mut self.catalog.path);
        if let Some(fallback) = self.catalog.fallback_path.as_mut() {
            rebase(fallback);
        }
        rebase(&mut self.images.dir);
    }
}

impl CatalogConfig {
    /// Paths to try, in order.
    pub fn candidates(&self) -> Vec<&Path> {
        std::iter::once(self.path.as_path())
            .chain(self.fallback_path.as_deref())
            .collect()
    }

    /// The store for the first candidate that exists.
    pub fn locate(&self) -> Option<JsonFileStore> {
        JsonFileStore::locate(self.candidates().as_slice())
    }
}
