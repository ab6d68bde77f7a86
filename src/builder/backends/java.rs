//! Managed-language backend.

use crate::builder::graph::BuildGraph;
use crate::builder::module::{JavaProps, ModuleId, ModuleKind, ModuleSpec, Placeholder};
use crate::builder::sources::SelectedSources;
use crate::core::backend::Backend;
use crate::errors::ConfigResult;

use super::{Assembler, BackendRequest};

/// SDK used when neither an SDK version nor platform APIs are requested.
pub const DEFAULT_JAVA_SDK_VERSION: &str = "system_current";

pub const JAVA_MODULE_DEFAULTS: &str = "aidl-java-module-defaults";

/// API level named by an SDK spec.
///
/// `current`, `system_current`, `module_current` and friends name the
/// in-development level `current`; `system_31` and `31` name level 31.
pub fn api_level_from_sdk(sdk: &str) -> String {
    let level = sdk.rsplit('_').next().unwrap_or(sdk);
    if level.is_empty() || level == "current" {
        return "current".to_string();
    }
    level.to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaAssembler;

impl Assembler for JavaAssembler {
    fn backend(&self) -> Backend {
        Backend::Java
    }

    fn assemble(
        &self,
        request: &BackendRequest<'_>,
        sources: SelectedSources,
        graph: &mut dyn BuildGraph,
    ) -> ConfigResult<ModuleId> {
        let iface = request.interface;
        let java = &iface.backend.java;
        let source_gen = request.source_gen_name();

        let sdk_version = match java.sdk_version {
            Some(ref sdk) => Some(sdk.clone()),
            None if !java.platform_apis => Some(DEFAULT_JAVA_SDK_VERSION.to_string()),
            None => None,
        };
        let min_sdk_version = iface
            .min_sdk_version(Backend::Java)
            .or_else(|| sdk_version.as_deref().map(api_level_from_sdk));

        let mut gen = request.base_source_gen(sources);
        gen.min_sdk_version = min_sdk_version;
        gen.platform_apis = java.platform_apis;
        gen.gen_rpc = java.gen_rpc;
        gen.gen_trace = iface.gen_trace(Backend::Java);
        // Unlike the other backends, java always sees the real version.
        gen.version = request.version.to_string();
        graph.create_module(ModuleSpec::new(&source_gen, ModuleKind::SourceGenerator(gen)))?;

        let props = JavaProps {
            installable: true,
            defaults: vec![JAVA_MODULE_DEFAULTS.to_string()],
            sdk_version,
            platform_apis: java.platform_apis,
            srcs: vec![format!(":{}", source_gen)],
            static_libs: Vec::new(),
            apex_available: java.apex_available.clone(),
            min_sdk_version: iface.min_sdk_version(Backend::Java),
            lint: java.lint.clone(),
        };

        let library = ModuleSpec::new(request.library_name(), ModuleKind::ManagedLibrary(props));
        graph.declare_placeholder(Placeholder::new(
            Backend::Java,
            &iface.name,
            request.version,
            library,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::graph::ModuleGraph;
    use crate::builder::module::SourceGenProps;
    use crate::test_support::{request_for, stable_interface};
    use crate::util::config::GenerateConfig;

    fn run(iface: &crate::core::interface::Interface) -> (SourceGenProps, JavaProps) {
        let config = GenerateConfig::default();
        let mut graph = ModuleGraph::new();
        let sources = SelectedSources {
            srcs: vec!["IFoo.aidl".to_string()],
            root: String::new(),
        };
        let id = JavaAssembler
            .assemble(&request_for(iface, "1", Backend::Java, &config), sources, &mut graph)
            .unwrap();

        let gen = match &graph.module("foo-V1-java-source").unwrap().kind {
            ModuleKind::SourceGenerator(gen) => gen.clone(),
            other => panic!("unexpected module {:?}", other),
        };
        let lib = match &graph.placeholder(&id).unwrap().library.kind {
            ModuleKind::ManagedLibrary(props) => props.clone(),
            other => panic!("unexpected module {:?}", other),
        };
        (gen, lib)
    }

    #[test]
    fn test_api_level_from_sdk() {
        assert_eq!(api_level_from_sdk("system_current"), "current");
        assert_eq!(api_level_from_sdk("current"), "current");
        assert_eq!(api_level_from_sdk("module_current"), "current");
        assert_eq!(api_level_from_sdk("system_31"), "31");
        assert_eq!(api_level_from_sdk("29"), "29");
    }

    #[test]
    fn test_default_sdk_backfills_min_sdk() {
        let foo = stable_interface("foo", &["1"]);
        let (gen, lib) = run(&foo);

        assert_eq!(lib.sdk_version.as_deref(), Some("system_current"));
        assert_eq!(gen.min_sdk_version.as_deref(), Some("current"));
        // The library itself only carries an explicit min SDK.
        assert_eq!(lib.min_sdk_version, None);
        assert_eq!(lib.srcs, vec![":foo-V1-java-source"]);
        assert!(lib.installable);
    }

    #[test]
    fn test_platform_apis_has_no_default_sdk() {
        let mut foo = stable_interface("foo", &["1"]);
        foo.backend.java.platform_apis = true;
        let (gen, lib) = run(&foo);

        assert_eq!(lib.sdk_version, None);
        assert_eq!(gen.min_sdk_version, None);
        assert!(gen.platform_apis);
    }

    #[test]
    fn test_explicit_min_sdk_wins() {
        let mut foo = stable_interface("foo", &["1"]);
        foo.backend.java.sdk_version = Some("system_31".to_string());
        foo.backend.java.min_sdk_version = Some("29".to_string());
        foo.backend.java.gen_rpc = true;
        let (gen, lib) = run(&foo);

        assert_eq!(gen.min_sdk_version.as_deref(), Some("29"));
        assert_eq!(lib.min_sdk_version.as_deref(), Some("29"));
        assert!(gen.gen_rpc);
        assert!(!gen.gen_trace);
    }

    #[test]
    fn test_sdk_backfill_uses_level() {
        let mut foo = stable_interface("foo", &["1"]);
        foo.backend.java.sdk_version = Some("system_31".to_string());
        let (gen, _) = run(&foo);

        assert_eq!(gen.min_sdk_version.as_deref(), Some("31"));
    }
}
