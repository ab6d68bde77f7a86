//! Import version resolution.
//!
//! | importing version            | imported interface | resolved import            |
//! |------------------------------|--------------------|----------------------------|
//! | any                          | unstable           | unversioned name           |
//! | in development (or unfrozen) | any                | imported in-development    |
//! | frozen                       | never frozen       | imported in-development    |
//! | frozen                       | frozen             | imported latest frozen     |
//!
//! An import that already names a version (`baz-V2`) is used as written.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::interface::Interface;
use crate::core::registry::InterfaceRegistry;
use crate::core::version::{has_version_suffix, UNVERSIONED};
use crate::errors::{ConfigError, ConfigResult};

/// Split an import reference into the interface name and explicit version.
///
/// `"baz-V5"` gives `("baz", Some("5"))`; `"baz"` gives `("baz", None)`.
pub fn split_import(import: &str) -> (&str, Option<&str>) {
    if has_version_suffix(import) {
        if let Some(pos) = import.rfind("-V") {
            return (&import[..pos], Some(&import[pos + 2..]));
        }
    }
    (import, None)
}

/// Resolve one import of `owner` (built at `owner_version`) to a versioned name.
pub fn resolve_import(
    owner: &Interface,
    owner_version: &str,
    imported: &Interface,
    import: &str,
) -> ConfigResult<String> {
    if has_version_suffix(import) {
        return Ok(import.to_string());
    }
    if imported.unstable {
        return Ok(imported.name.clone());
    }
    // An owner without frozen versions only ever builds its next version,
    // and an import without frozen versions has no latest one.
    if owner.is_next_version(owner_version) || !owner.has_version() || !imported.has_version() {
        return Ok(imported.versioned_name(&imported.next_version()));
    }
    Ok(imported.versioned_name(imported.latest_version()?))
}

/// Resolve every import `owner` declares for `version`, paired with the
/// imported interface.
///
/// `version` must be one of `owner`'s frozen versions or its next version.
pub fn resolve_imports<'a>(
    registry: &'a InterfaceRegistry,
    owner: &Interface,
    version: &str,
) -> ConfigResult<Vec<(&'a Interface, String)>> {
    if !owner.all_versions().iter().any(|v| v == version) {
        return Err(ConfigError::UnknownVersion {
            interface: owner.name.clone(),
            version: version.to_string(),
        });
    }

    owner
        .imports_for_version(version)
        .iter()
        .map(|import| {
            let (name, _) = split_import(import);
            let imported = registry.imported(&owner.name, name)?;
            Ok((imported, resolve_import(owner, version, imported, import)?))
        })
        .collect()
}

/// Resolve every import `owner` declares for `version` to a versioned name.
pub fn imports_with_version(
    registry: &InterfaceRegistry,
    owner: &Interface,
    version: &str,
) -> ConfigResult<Vec<String>> {
    Ok(resolve_imports(registry, owner, version)?
        .into_iter()
        .map(|(_, name)| name)
        .collect())
}

/// Reject any (interface, version) that transitively imports itself.
pub fn check_import_cycles(registry: &InterfaceRegistry) -> ConfigResult<()> {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

    let mut node_for = |graph: &mut DiGraph<String, ()>, name: String| -> NodeIndex {
        *nodes
            .entry(name.clone())
            .or_insert_with(|| graph.add_node(name))
    };

    for iface in registry.iter() {
        let versions = if iface.unstable {
            vec![UNVERSIONED.to_string()]
        } else {
            iface.all_versions()
        };

        for version in versions {
            let from = node_for(&mut graph, iface.versioned_name(&version));
            for resolved in imports_with_version(registry, iface, &version)? {
                let to = node_for(&mut graph, resolved);
                graph.update_edge(from, to, ());
            }
        }
    }

    for component in tarjan_scc(&graph) {
        let is_cycle = component.len() > 1
            || component
                .first()
                .is_some_and(|&node| graph.contains_edge(node, node));
        if is_cycle {
            let mut cycle: Vec<String> = component.iter().map(|&n| graph[n].clone()).collect();
            cycle.sort();
            cycle.push(cycle[0].clone());
            return Err(ConfigError::ImportCycle { cycle });
        }
    }

    Ok(())
}
