//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.vidl/config.toml` - User-wide defaults
//! - Project: `.vidl/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generate: GenerateConfig,
}

/// Settings for library generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Directory below each interface's module dir holding frozen snapshots
    pub api_dir: String,

    /// Extension of interface-definition files
    pub extension: String,

    /// Build output root; generated headers live below it
    pub out_dir: String,

    /// Host OS on which generated libraries are disabled
    pub disabled_host_os: String,

    /// Whether the in-development version of stable interfaces must be frozen
    pub require_frozen: bool,

    /// Why freezing is required, forwarded to the source generator
    pub require_frozen_reason: String,

    /// Threads used to plan interfaces (None = auto-detect)
    pub jobs: Option<usize>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            api_dir: "aidl_api".to_string(),
            extension: "aidl".to_string(),
            out_dir: "out".to_string(),
            disabled_host_os: "darwin".to_string(),
            require_frozen: false,
            require_frozen_reason: String::new(),
            jobs: None,
        }
    }
}

/// Raw file contents: every key optional so layers can be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    generate: GenerateLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct GenerateLayer {
    api_dir: Option<String>,
    extension: Option<String>,
    out_dir: Option<String>,
    disabled_host_os: Option<String>,
    require_frozen: Option<bool>,
    require_frozen_reason: Option<String>,
    jobs: Option<usize>,
}

impl ConfigLayer {
    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

impl Config {
    /// Parse a config from TOML, defaulting missing keys.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config = Config::default();
        config.apply(toml::from_str(contents).context("failed to parse config")?);
        Ok(config)
    }

    /// Merge a layer into this config (layer takes precedence).
    fn apply(&mut self, layer: ConfigLayer) {
        let gen = &mut self.generate;
        let other = layer.generate;
        if let Some(v) = other.api_dir {
            gen.api_dir = v;
        }
        if let Some(v) = other.extension {
            gen.extension = v;
        }
        if let Some(v) = other.out_dir {
            gen.out_dir = v;
        }
        if let Some(v) = other.disabled_host_os {
            gen.disabled_host_os = v;
        }
        if let Some(v) = other.require_frozen {
            gen.require_frozen = v;
        }
        if let Some(v) = other.require_frozen_reason {
            gen.require_frozen_reason = v;
        }
        if other.jobs.is_some() {
            gen.jobs = other.jobs;
        }
    }

    /// Load merged configuration from global and project locations.
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Project config (.vidl/config.toml)
    /// 2. Global config (~/.vidl/config.toml)
    /// 3. Defaults
    pub fn load(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let mut config = Config::default();

        if let Some(global) = global_path.filter(|p| p.exists()) {
            config.apply(ConfigLayer::load(global)?);
        }

        if project_path.exists() {
            config.apply(ConfigLayer::load(project_path)?);
        }

        Ok(config)
    }

    /// Load configuration for a project rooted at `project_root`.
    pub fn load_for_project(project_root: &Path) -> Result<Self> {
        let global = global_config_path();
        Self::load(global.as_deref(), &project_config_path(project_root))
    }
}

/// Get the global config directory (~/.vidl).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".vidl"))
}

/// Get the global config path (~/.vidl/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.vidl/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".vidl").join("config.toml")
}
