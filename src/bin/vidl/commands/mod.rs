//! Command implementations

pub mod plan;
pub mod resolve;
pub mod versions;

use std::path::Path;

use anyhow::Result;

use versioned_idl::util::Config;
use versioned_idl::InterfaceRegistry;

/// Load the interfaces manifest and the configuration of its project.
///
/// The project root is the directory holding the manifest.
pub fn load(manifest: &Path) -> Result<(InterfaceRegistry, Config)> {
    let registry = InterfaceRegistry::load(manifest)?;
    let root = match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    let config = Config::load_for_project(&root)?;
    Ok((registry, config))
}
