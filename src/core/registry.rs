//! The set of interfaces taking part in one configuration pass.
//!
//! The registry is passed explicitly to every resolution step; nothing
//! looks interfaces up through global state.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::interface::Interface;
use crate::errors::{ConfigError, ConfigResult};

/// Canonical name of the interfaces manifest.
pub const INTERFACES_MANIFEST: &str = "Interfaces.toml";

#[derive(Debug, Deserialize)]
struct InterfacesFile {
    #[serde(default)]
    interface: Vec<Interface>,
}

/// Interfaces keyed by name.
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    interfaces: BTreeMap<String, Interface>,
}

impl InterfaceRegistry {
    /// Build a registry, validating every interface's versions.
    pub fn new(interfaces: impl IntoIterator<Item = Interface>) -> ConfigResult<Self> {
        let mut map = BTreeMap::new();
        for iface in interfaces {
            iface.validate_versions()?;
            if map.contains_key(&iface.name) {
                return Err(ConfigError::DuplicateInterface { name: iface.name });
            }
            map.insert(iface.name.clone(), iface);
        }
        Ok(InterfaceRegistry { interfaces: map })
    }

    /// Load interfaces from a manifest file.
    ///
    /// Relative `module_dir`s are taken relative to the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read interfaces: {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&contents, base)
            .with_context(|| format!("invalid interfaces manifest: {}", path.display()))
    }

    /// Parse interfaces from TOML text, anchoring relative module dirs at `base`.
    pub fn from_toml_str(contents: &str, base: &Path) -> Result<Self> {
        let file: InterfacesFile = toml::from_str(contents)?;
        let interfaces = file.interface.into_iter().map(|mut iface| {
            if iface.module_dir.is_relative() {
                iface.module_dir = base.join(&iface.module_dir);
            }
            iface
        });

        let registry = Self::new(interfaces)?;
        tracing::debug!("loaded {} interfaces", registry.len());
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }

    /// Look up an interface that another interface imports.
    pub fn imported(&self, importer: &str, import: &str) -> ConfigResult<&Interface> {
        self.interfaces
            .get(import)
            .ok_or_else(|| ConfigError::UnknownInterface {
                interface: importer.to_string(),
                import: import.to_string(),
            })
    }

    /// Iterate interfaces in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{stable_interface, unstable_interface};

    #[test]
    fn test_duplicate_names_rejected() {
        let err = InterfaceRegistry::new([
            stable_interface("foo", &["1"]),
            unstable_interface("foo"),
        ])
        .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateInterface { .. }));
    }

    #[test]
    fn test_invalid_versions_rejected() {
        let err = InterfaceRegistry::new([stable_interface("foo", &["1", "3"])]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVersions { .. }));
    }

    #[test]
    fn test_from_toml_anchors_module_dir() {
        let registry = InterfaceRegistry::from_toml_str(
            r#"
            [[interface]]
            name = "foo"
            module_dir = "hardware/foo"
            srcs = ["IFoo.aidl"]
            versions = ["1", "2"]
            imports = ["bar"]

            [[interface]]
            name = "bar"
            unstable = true
            "#,
            Path::new("/src"),
        )
        .unwrap();

        let foo = registry.get("foo").unwrap();
        assert_eq!(foo.module_dir, Path::new("/src/hardware/foo"));
        assert_eq!(foo.next_version(), "3");
        assert_eq!(registry.imported("foo", "bar").unwrap().name, "bar");
        assert!(registry.imported("foo", "nope").is_err());
        assert_eq!(
            registry.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["bar", "foo"]
        );
    }
}
