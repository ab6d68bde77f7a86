//! Version arithmetic for interfaces.
//!
//! Module names follow the version they were built from. Assuming `foo` has
//! frozen versions 1 and 2:
//!
//! | version | module name |
//! |---------|-------------|
//! | `"1"`   | `foo-V1`    |
//! | `"2"`   | `foo-V2`    |
//! | `"3"`   | `foo-V3` (in development) |
//!
//! An unstable interface `bar` has a single unversioned build named `bar`.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::interface::Interface;
use crate::errors::{ConfigError, ConfigResult};

/// Version of an unstable interface's only build.
pub const UNVERSIONED: &str = "";

/// Generator flags added when building the in-development version.
pub const TOT_GEN_FLAGS: &str = "-Weverything -Wno-missing-permission-annotation";

static VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-V\d+$").expect("static regex is valid"));

/// Whether `name` already names a specific version (`foo-V3`).
pub fn has_version_suffix(name: &str) -> bool {
    VERSION_SUFFIX.is_match(name)
}

impl Interface {
    /// Frozen versions, oldest first.
    pub fn frozen_versions(&self) -> Vec<&str> {
        if self.versions_with_info.is_empty() {
            self.versions.iter().map(String::as_str).collect()
        } else {
            self.versions_with_info
                .iter()
                .map(|info| info.version.as_str())
                .collect()
        }
    }

    /// True iff the interface is stable and has at least one frozen version.
    pub fn has_version(&self) -> bool {
        !self.unstable && !self.frozen_versions().is_empty()
    }

    /// The in-development version. Empty for unstable interfaces.
    pub fn next_version(&self) -> String {
        if self.unstable {
            return UNVERSIONED.to_string();
        }
        let latest = self
            .frozen_versions()
            .iter()
            .filter_map(|v| v.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (latest + 1).to_string()
    }

    /// The newest frozen version.
    pub fn latest_version(&self) -> ConfigResult<&str> {
        if self.unstable {
            return Err(ConfigError::NoFrozenVersions {
                interface: self.name.clone(),
            });
        }
        self.frozen_versions()
            .into_iter()
            .max_by_key(|v| v.parse::<u64>().unwrap_or(0))
            .ok_or_else(|| ConfigError::NoFrozenVersions {
                interface: self.name.clone(),
            })
    }

    /// `name` for the unversioned build, `name-V<version>` otherwise.
    pub fn versioned_name(&self, version: &str) -> String {
        if version == UNVERSIONED {
            return self.name.clone();
        }
        format!("{}-V{}", self.name, version)
    }

    /// Whether `version` is the in-development version.
    pub fn is_next_version(&self, version: &str) -> bool {
        version == self.next_version()
    }

    /// Every buildable version: the frozen ones, then the in-development one.
    pub fn all_versions(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .frozen_versions()
            .into_iter()
            .map(str::to_string)
            .collect();
        all.push(self.next_version());
        all
    }

    /// Version handed to the source generator.
    ///
    /// An interface that was never frozen builds its first version exactly
    /// like an unversioned one, so prebuilts cannot block a later switch from
    /// unversioned to versioned.
    pub fn version_for_init_version_compat<'a>(&self, version: &'a str) -> &'a str {
        if !self.has_version() {
            return UNVERSIONED;
        }
        version
    }

    /// Flags for the source-generation rule of `version`.
    pub fn flags_for_gen_rule(&self, version: &str) -> Vec<String> {
        let mut flags = self.flags.clone();
        if self.is_next_version(version) {
            flags.push(TOT_GEN_FLAGS.to_string());
        }
        flags
    }

    /// Whether `version` is the single version allowed into the VNDK.
    pub fn is_module_for_vndk(&self, version: &str) -> ConfigResult<bool> {
        if let Some(ref selected) = self.vndk_use_version {
            let known = self.frozen_versions().contains(&selected.as_str())
                || (!self.has_version() && *selected == self.next_version());
            if !known {
                return Err(ConfigError::UnknownVndkVersion {
                    interface: self.name.clone(),
                    version: selected.clone(),
                });
            }
            return Ok(version == selected);
        }

        if !self.has_version() {
            return Ok(self.is_next_version(version));
        }

        Ok(version == self.latest_version()?)
    }

    /// Imports declared for `version`: the live list for the in-development
    /// version, otherwise the list recorded when that version was frozen.
    pub fn imports_for_version(&self, version: &str) -> Vec<String> {
        if self.is_next_version(version) {
            return self.imports.clone();
        }
        self.versions_with_info
            .iter()
            .find(|info| info.version == version)
            .map(|info| info.imports.clone())
            .unwrap_or_default()
    }

    /// Check that the frozen version list is well formed.
    ///
    /// Stable interfaces need `1, 2, ..., n` in order. Unstable interfaces
    /// may not declare any versions.
    pub fn validate_versions(&self) -> ConfigResult<()> {
        let invalid = |reason: String| ConfigError::InvalidVersions {
            interface: self.name.clone(),
            reason,
        };

        let versions = self.frozen_versions();
        if self.unstable {
            if !versions.is_empty() {
                return Err(invalid("unstable interfaces cannot have versions".to_string()));
            }
            return Ok(());
        }

        if !self.versions.is_empty() && !self.versions_with_info.is_empty() {
            return Err(invalid(
                "`versions` and `versions_with_info` are mutually exclusive".to_string(),
            ));
        }

        for (index, version) in versions.iter().enumerate() {
            let expected = (index + 1).to_string();
            if *version != expected {
                return Err(invalid(format!(
                    "expected version {} at position {}, found `{}`",
                    expected,
                    index + 1,
                    version
                )));
            }
        }

        if let Some(ref selected) = self.vndk_use_version {
            if self.has_version() && !versions.contains(&selected.as_str()) {
                return Err(ConfigError::UnknownVndkVersion {
                    interface: self.name.clone(),
                    version: selected.clone(),
                });
            }
        }

        Ok(())
    }
}
