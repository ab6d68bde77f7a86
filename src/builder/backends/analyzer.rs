//! Analyzer tool backend.
//!
//! The analyzer is a developer binary linked against the cpp library of the
//! same version. Its module names are unversioned, so it is only built for
//! one version per interface.

use crate::builder::graph::BuildGraph;
use crate::builder::module::{CcProps, ModuleId, ModuleKind, ModuleSpec, TargetOverrides};
use crate::builder::sources::SelectedSources;
use crate::core::backend::Backend;
use crate::core::version::UNVERSIONED;
use crate::errors::ConfigResult;

use super::{
    native_cflags, tidy_checks_as_errors, Assembler, BackendRequest, CPP_MODULE_DEFAULTS,
};

const ANALYZER_IMPORT_EXPORT_LIBS: [&str; 2] = ["libbinder", "libutils"];

/// Static library providing the analyzer's entry point.
pub const ANALYZER_MAIN_LIB: &str = "aidl-analyzer-main";

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerAssembler;

impl Assembler for AnalyzerAssembler {
    fn backend(&self) -> Backend {
        Backend::CppAnalyzer
    }

    fn assemble(
        &self,
        request: &BackendRequest<'_>,
        sources: SelectedSources,
        graph: &mut dyn BuildGraph,
    ) -> ConfigResult<ModuleId> {
        let iface = request.interface;
        let base = iface.versioned_name(UNVERSIONED);
        let source_gen = format!("{}-cpp-analyzer-source", base);
        let binary = format!("{}-cpp-analyzer", base);

        let mut gen = request.base_source_gen(sources);
        gen.headers.clear();
        gen.min_sdk_version = iface.min_sdk_version(Backend::Cpp);
        graph.create_module(ModuleSpec::new(&source_gen, ModuleKind::SourceGenerator(gen)))?;

        let import_export: Vec<String> = ANALYZER_IMPORT_EXPORT_LIBS
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut shared_libs = import_export.clone();
        shared_libs.push(format!(
            "{}-{}",
            iface.versioned_name(request.version),
            Backend::Cpp
        ));

        let mut availability = iface.availability.clone();
        availability.product_available = None;

        // Backend cflags are not inherited by the analyzer.
        let props = CcProps {
            availability,
            host_supported: iface.host_supported,
            defaults: vec![CPP_MODULE_DEFAULTS.to_string()],
            double_loadable: iface.double_loadable,
            installable: Some(true),
            generated_sources: vec![source_gen.clone()],
            generated_headers: vec![source_gen.clone()],
            export_generated_headers: vec![source_gen],
            shared_libs,
            static_libs: vec![ANALYZER_MAIN_LIB.to_string()],
            export_shared_lib_headers: import_export,
            cflags: native_cflags(&[]),
            min_sdk_version: iface.min_sdk_version(Backend::Cpp),
            target: TargetOverrides {
                disabled_host_os: Some(request.config.disabled_host_os.clone()),
                ..Default::default()
            },
            tidy: true,
            tidy_flags: request.tidy_flags(),
            tidy_checks_as_errors: tidy_checks_as_errors(Backend::CppAnalyzer),
            ..Default::default()
        };

        graph.create_module(ModuleSpec::new(binary, ModuleKind::AnalyzerBinary(props)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::graph::ModuleGraph;
    use crate::test_support::{request_for, stable_interface};
    use crate::util::config::GenerateConfig;

    #[test]
    fn test_analyzer_links_cpp_library() {
        let config = GenerateConfig::default();
        let mut foo = stable_interface("foo", &["1"]);
        foo.backend.cpp.common.cflags = vec!["-DIGNORED".to_string()];
        foo.availability.product_available = Some(true);
        foo.headers = vec!["foo_headers".to_string()];
        let mut graph = ModuleGraph::new();

        let sources = SelectedSources {
            srcs: vec!["IFoo.aidl".to_string()],
            root: String::new(),
        };
        let id = AnalyzerAssembler
            .assemble(
                &request_for(&foo, "2", Backend::CppAnalyzer, &config),
                sources,
                &mut graph,
            )
            .unwrap();

        assert_eq!(id.as_str(), "foo-cpp-analyzer");
        match &graph.module("foo-cpp-analyzer-source").unwrap().kind {
            ModuleKind::SourceGenerator(gen) => {
                assert_eq!(gen.lang, Some(Backend::CppAnalyzer));
                assert!(gen.headers.is_empty());
            }
            other => panic!("unexpected module {:?}", other),
        }
        match &graph.module("foo-cpp-analyzer").unwrap().kind {
            ModuleKind::AnalyzerBinary(props) => {
                assert_eq!(props.shared_libs, vec!["libbinder", "libutils", "foo-V2-cpp"]);
                assert_eq!(props.static_libs, vec![ANALYZER_MAIN_LIB]);
                assert_eq!(props.installable, Some(true));
                assert_eq!(props.availability.product_available, None);
                assert!(!props.cflags.contains(&"-DIGNORED".to_string()));
                assert!(props.vndk.is_empty());
            }
            other => panic!("unexpected module {:?}", other),
        }
    }
}
