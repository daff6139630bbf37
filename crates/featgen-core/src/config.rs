//! Configuration management for featgen.
//!
//! This module defines the `Config` struct that controls where features are
//! generated, which root directories are offered, which registry stack is used
//! and where templates come from. The configuration can be loaded from a YAML,
//! JSON or TOML file, created programmatically, or adjusted from command-line
//! arguments.
//!
//! # Examples
//!
//! ```no_run
//! use featgen_core::config::Config;
//! use featgen_core::registry::Stack;
//!
//! # async fn example() -> featgen_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::default();
//! config.stack = Stack::React;
//!
//! // Or load from a config file
//! let config = Config::from_file("featgen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::registry::Stack;
use crate::request::RootDir;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// File names probed by [`Config::discover`], in order
pub const CONFIG_FILE_NAMES: [&str; 4] = ["featgen.yaml", "featgen.yml", "featgen.toml", "featgen.json"];

/// Configuration for feature generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base directory the root directory options are relative to
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Registry table to use
    #[serde(default)]
    pub stack: Stack,

    /// Optional path to a local template tree
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Optional base URL of a remote template tree
    #[serde(default)]
    pub template_base_url: Option<Url>,

    /// Root directory options offered by the first prompt
    #[serde(default = "RootDir::defaults")]
    pub root_dirs: Vec<RootDir>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            stack: Stack::default(),
            template_dir: None,
            template_base_url: None,
            root_dirs: RootDir::defaults(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

impl Config {
    /// Load configuration from a file; the format follows the extension
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config: Self = match Format::of(path) {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
            Format::Yaml => serde_yaml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file; the format follows the extension
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = match Format::of(path) {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
            Format::Yaml => serde_yaml::to_string(self)?,
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load the first config file found in `dir`, or the defaults if there is none
    pub async fn discover<P: AsRef<Path>>(dir: P) -> crate::Result<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.as_ref().join(name);
            if fs::metadata(&path).await.is_ok() {
                log::debug!("Loading configuration from {}", path.display());
                return Self::from_file(&path).await;
            }
        }
        Ok(Self::default())
    }

    /// Reject configurations the selector cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.root_dirs.is_empty() {
            return Err(crate::Error::config("root_dirs must list at least one option"));
        }
        if let Some(root) = self.root_dirs.iter().find(|r| r.path.trim_matches('/').is_empty()) {
            return Err(crate::Error::config(format!(
                "root directory \"{}\" has an empty path",
                root.label
            )));
        }
        Ok(())
    }
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}
