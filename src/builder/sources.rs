//! Source selection for a requested version.
//!
//! The in-development version builds from the interface's live sources. A
//! frozen version builds from its snapshot:
//!
//! ```text
//! <module_dir>/<api_dir>/<interface-name>/<version>/**/*.<extension>
//! ```
//!
//! A snapshot directory that exists but holds no files is a version about to
//! be frozen whose API dump has not been copied yet. That yields an empty
//! selection, which callers treat as "emit nothing".

use crate::core::interface::Interface;
use crate::errors::{ConfigError, ConfigResult};
use crate::util::config::GenerateConfig;
use crate::util::fs::{glob_files, relative_path, to_slash};

/// Sources and include root for one (interface, version).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSources {
    /// Files relative to the interface's module dir
    pub srcs: Vec<String>,
    /// Include root relative to the interface's module dir
    pub root: String,
}

impl SelectedSources {
    pub fn is_empty(&self) -> bool {
        self.srcs.is_empty()
    }
}

/// Locates the sources to generate from.
#[derive(Debug, Clone, Copy)]
pub struct SourceSelector<'a> {
    config: &'a GenerateConfig,
}

impl<'a> SourceSelector<'a> {
    pub fn new(config: &'a GenerateConfig) -> Self {
        SourceSelector { config }
    }

    /// Snapshot root for a frozen version, relative to the module dir.
    pub fn snapshot_root(&self, iface: &Interface, version: &str) -> String {
        format!("{}/{}/{}", self.config.api_dir, iface.name, version)
    }

    /// Select sources for `version` of `iface`.
    pub fn select(&self, iface: &Interface, version: &str) -> ConfigResult<SelectedSources> {
        if iface.is_next_version(version) {
            return Ok(SelectedSources {
                srcs: iface.srcs.clone(),
                root: iface.local_include_dir.clone(),
            });
        }

        let root = self.snapshot_root(iface, version);
        let dir = iface.module_dir.join(&root);
        if !dir.is_dir() {
            return Err(ConfigError::MissingSnapshot {
                interface: iface.name.clone(),
                version: version.to_string(),
                path: dir,
            });
        }

        let pattern = format!("**/*.{}", self.config.extension);
        let files = glob_files(&dir, &[pattern]).map_err(|e| ConfigError::SnapshotGlob {
            interface: iface.name.clone(),
            version: version.to_string(),
            message: format!("{:#}", e),
        })?;

        let srcs = files
            .iter()
            .map(|path| to_slash(&relative_path(&iface.module_dir, path)))
            .collect();

        Ok(SelectedSources { srcs, root })
    }
}
