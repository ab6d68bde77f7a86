//! Native shared (libbinder) backend.

use crate::builder::graph::BuildGraph;
use crate::builder::module::{
    CcProps, ModuleId, ModuleKind, ModuleSpec, Placeholder, TargetOverrides,
};
use crate::builder::sources::SelectedSources;
use crate::core::backend::Backend;
use crate::core::interface::VndkProperties;
use crate::errors::ConfigResult;

use super::{
    native_cflags, tidy_checks_as_errors, Assembler, BackendRequest, CPP_MODULE_DEFAULTS,
};

/// Libraries every cpp library links and re-exports.
const CPP_IMPORT_EXPORT_LIBS: [&str; 2] = ["libbinder", "libutils"];

#[derive(Debug, Clone, Copy, Default)]
pub struct CppAssembler;

/// VNDK override for a native library at `request.version`.
///
/// Only one version of an interface may be in the VNDK; every other version
/// is removed from it.
pub(super) fn vndk_override(request: &BackendRequest<'_>) -> ConfigResult<VndkProperties> {
    let mut vndk = VndkProperties::default();
    if !request.interface.is_module_for_vndk(request.version)? {
        vndk.enabled = Some(false);
        vndk.support_system_process = Some(false);
    }
    Ok(vndk)
}

impl Assembler for CppAssembler {
    fn backend(&self) -> Backend {
        Backend::Cpp
    }

    fn assemble(
        &self,
        request: &BackendRequest<'_>,
        sources: SelectedSources,
        graph: &mut dyn BuildGraph,
    ) -> ConfigResult<ModuleId> {
        let iface = request.interface;
        let common = &iface.backend.cpp.common;
        let gen_trace = iface.gen_trace(Backend::Cpp);
        let source_gen = request.source_gen_name();

        let mut gen = request.base_source_gen(sources);
        gen.gen_log = common.gen_log;
        gen.gen_trace = gen_trace;
        graph.create_module(ModuleSpec::new(&source_gen, ModuleKind::SourceGenerator(gen)))?;

        let import_export: Vec<String> =
            CPP_IMPORT_EXPORT_LIBS.iter().map(|s| s.to_string()).collect();
        let mut shared_libs = import_export.clone();
        shared_libs.extend(common.additional_shared_libraries.iter().cloned());
        if gen_trace {
            shared_libs.push("libcutils".to_string());
        }

        let mut vndk_override = vndk_override(request)?;
        // The libbinder backend is not stable across the system/vendor
        // boundary, so a vintf interface keeps this library VNDK-private.
        if iface.is_vintf() {
            vndk_override.private = Some(true);
        }

        let mut availability = iface.availability.clone();
        // libbinder is not available to product processes.
        availability.product_available = None;

        let props = CcProps {
            availability,
            host_supported: iface.host_supported,
            defaults: vec![CPP_MODULE_DEFAULTS.to_string()],
            double_loadable: iface.double_loadable,
            generated_sources: vec![source_gen.clone()],
            generated_headers: vec![source_gen.clone()],
            export_generated_headers: vec![source_gen],
            shared_libs,
            export_shared_lib_headers: import_export,
            cflags: native_cflags(&common.cflags),
            apex_available: common.apex_available.clone(),
            min_sdk_version: iface.min_sdk_version(Backend::Cpp),
            target: TargetOverrides {
                disabled_host_os: Some(request.config.disabled_host_os.clone()),
                ..Default::default()
            },
            tidy: true,
            tidy_flags: request.tidy_flags(),
            tidy_checks_as_errors: tidy_checks_as_errors(Backend::Cpp),
            include_build_directory: Some(false),
            vndk: iface.vndk.merged(&common.vndk).merged(&vndk_override),
            ..Default::default()
        };

        let library = ModuleSpec::new(request.library_name(), ModuleKind::NativeLibrary(props));
        graph.declare_placeholder(Placeholder::new(
            Backend::Cpp,
            &iface.name,
            request.version,
            library,
        ))
    }
}
