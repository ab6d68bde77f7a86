//! Second phase: complete implementation placeholders.
//!
//! Import versions depend on which versions every other interface declares,
//! so they can only be filled in once the whole graph has been declared.

use crate::builder::graph::BuildGraph;
use crate::builder::module::{ModuleId, ModuleKind};
use crate::core::import::resolve_imports;
use crate::core::registry::InterfaceRegistry;
use crate::errors::{ConfigError, ConfigResult};

/// Resolve the imports of one placeholder and materialize its library.
pub fn finish_placeholder(
    registry: &InterfaceRegistry,
    graph: &mut dyn BuildGraph,
    id: &ModuleId,
) -> ConfigResult<ModuleId> {
    let placeholder = graph
        .placeholder(id)
        .cloned()
        .ok_or_else(|| ConfigError::NotAPlaceholder {
            name: id.to_string(),
        })?;

    let in_request = |e: ConfigError| {
        e.in_request(
            &placeholder.interface,
            &placeholder.version,
            placeholder.backend,
        )
    };

    let owner = registry
        .get(&placeholder.interface)
        .ok_or_else(|| ConfigError::UnknownInterface {
            interface: placeholder.name.clone(),
            import: placeholder.interface.clone(),
        })
        .map_err(in_request)?;

    // Resolve against the version this library was requested for, not the
    // imported interface's own default.
    let imports: Vec<String> = resolve_imports(registry, owner, &placeholder.version)
        .map_err(in_request)?
        .into_iter()
        .map(|(imported, name)| {
            if !imported.backend_enabled(placeholder.backend) {
                return Err(in_request(ConfigError::ImportBackendDisabled {
                    interface: owner.name.clone(),
                    import: imported.name.clone(),
                    backend: placeholder.backend,
                }));
            }
            Ok(format!("{}-{}", name, placeholder.backend))
        })
        .collect::<ConfigResult<_>>()?;

    let mut library = placeholder.library.clone();
    match library.kind {
        ModuleKind::NativeLibrary(ref mut cc) => {
            cc.shared_libs.extend(imports.iter().cloned());
            cc.export_shared_lib_headers.extend(imports);
            cc.must_use_vendor_variant = true;
        }
        ModuleKind::ManagedLibrary(ref mut java) => {
            java.static_libs = imports;
        }
        ModuleKind::MemorySafeLibrary(ref mut rust) => {
            rust.rustlibs = imports;
        }
        ModuleKind::SourceGenerator(_) | ModuleKind::AnalyzerBinary(_) => {
            return Err(ConfigError::NotAPlaceholder {
                name: library.name,
            });
        }
    }

    graph.finish(id, library)
}

/// Finish every pending placeholder, in name order.
pub fn finish_all(
    registry: &InterfaceRegistry,
    graph: &mut dyn BuildGraph,
) -> ConfigResult<Vec<ModuleId>> {
    graph
        .pending_placeholders()
        .iter()
        .map(|id| finish_placeholder(registry, graph, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::dispatch::Dispatcher;
    use crate::builder::graph::{ImplementationState, ModuleGraph};
    use crate::core::backend::Backend;
    use crate::core::interface::VersionInfo;
    use crate::test_support::{stable_interface, unstable_interface, SnapshotTree};
    use crate::util::config::GenerateConfig;

    /// `foo` (frozen 1, 2) imports `baz` (frozen 1..5, rust enabled) and
    /// unstable `bar` (rust disabled).
    fn setup(tree: &SnapshotTree) -> InterfaceRegistry {
        let mut foo = stable_interface("foo", &[]);
        foo.versions_with_info = vec![
            VersionInfo {
                version: "1".to_string(),
                imports: vec!["baz-V1".to_string()],
            },
            VersionInfo {
                version: "2".to_string(),
                imports: vec!["baz".to_string(), "bar".to_string()],
            },
        ];
        foo.imports = vec!["baz".to_string(), "bar".to_string()];
        foo.srcs = vec!["IFoo.aidl".to_string()];
        foo.module_dir = tree.root().to_path_buf();
        tree.add_file("aidl_api/foo/1/IFoo.aidl");
        tree.add_file("aidl_api/foo/2/IFoo.aidl");

        let mut baz = stable_interface("baz", &["1", "2", "3", "4", "5"]);
        baz.backend.rust.enabled = Some(true);
        let bar = unstable_interface("bar");
        InterfaceRegistry::new([foo, baz, bar]).unwrap()
    }

    fn declare(registry: &InterfaceRegistry, graph: &mut ModuleGraph, version: &str, backend: Backend) {
        let config = GenerateConfig::default();
        let foo = registry.get("foo").unwrap();
        Dispatcher::new(&config)
            .dispatch(graph, foo, version, backend, false, "")
            .unwrap()
            .unwrap();
    }

    #[test]
    fn test_frozen_build_links_latest_imports() {
        let tree = SnapshotTree::new();
        let registry = setup(&tree);
        let mut graph = ModuleGraph::new();
        declare(&registry, &mut graph, "2", Backend::Cpp);

        finish_all(&registry, &mut graph).unwrap();

        match &graph.module("foo-V2-cpp").unwrap().kind {
            ModuleKind::NativeLibrary(cc) => {
                assert_eq!(
                    cc.shared_libs,
                    vec!["libbinder", "libutils", "baz-V5-cpp", "bar-cpp"]
                );
                assert_eq!(
                    cc.export_shared_lib_headers,
                    vec!["libbinder", "libutils", "baz-V5-cpp", "bar-cpp"]
                );
                assert!(cc.must_use_vendor_variant);
            }
            other => panic!("unexpected module {:?}", other),
        }
        assert!(graph.is_complete());
    }

    #[test]
    fn test_in_development_build_links_next_imports() {
        let tree = SnapshotTree::new();
        let registry = setup(&tree);
        let mut graph = ModuleGraph::new();
        declare(&registry, &mut graph, "3", Backend::Java);

        finish_all(&registry, &mut graph).unwrap();

        match &graph.module("foo-V3-java").unwrap().kind {
            ModuleKind::ManagedLibrary(java) => {
                assert_eq!(java.static_libs, vec!["baz-V6-java", "bar-java"]);
            }
            other => panic!("unexpected module {:?}", other),
        }
    }

    #[test]
    fn test_pinned_import_and_rust() {
        let tree = SnapshotTree::new();
        let registry = setup(&tree);
        let mut graph = ModuleGraph::new();
        declare(&registry, &mut graph, "1", Backend::Rust);

        let finished = finish_all(&registry, &mut graph).unwrap();
        assert_eq!(finished.len(), 1);

        match &graph.module("foo-V1-rust").unwrap().kind {
            ModuleKind::MemorySafeLibrary(rust) => {
                assert_eq!(rust.rustlibs, vec!["baz-V1-rust"]);
            }
            other => panic!("unexpected module {:?}", other),
        }
        match graph.state("foo-V1-rust-generator").unwrap() {
            ImplementationState::Finished { library } => assert_eq!(library.as_str(), "foo-V1-rust"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_import_without_backend_is_rejected() {
        let tree = SnapshotTree::new();
        let registry = setup(&tree);
        let mut graph = ModuleGraph::new();
        // Version 2 imports `bar`, which has no rust library to link.
        declare(&registry, &mut graph, "2", Backend::Rust);

        let err = finish_all(&registry, &mut graph).unwrap_err();
        match err {
            ConfigError::Request {
                interface,
                version,
                backend,
                source,
            } => {
                assert_eq!((interface.as_str(), version.as_str(), backend), ("foo", "2", Backend::Rust));
                match *source {
                    ConfigError::ImportBackendDisabled {
                        interface,
                        import,
                        backend,
                    } => {
                        assert_eq!(interface, "foo");
                        assert_eq!(import, "bar");
                        assert_eq!(backend, Backend::Rust);
                    }
                    other => panic!("unexpected source {:?}", other),
                }
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(graph.module("foo-V2-rust").is_none());
        assert!(!graph.is_complete());
    }

    #[test]
    fn test_finishing_twice_fails() {
        let tree = SnapshotTree::new();
        let registry = setup(&tree);
        let mut graph = ModuleGraph::new();
        declare(&registry, &mut graph, "2", Backend::Ndk);

        let id = graph.pending_placeholders().remove(0);
        finish_placeholder(&registry, &mut graph, &id).unwrap();

        let err = finish_placeholder(&registry, &mut graph, &id).unwrap_err();
        assert!(matches!(err, ConfigError::NotAPlaceholder { .. }));
    }
}
