//! Native platform-minimal (libbinder_ndk) backend.

use crate::builder::graph::BuildGraph;
use crate::builder::module::{
    CcProps, ImageOverrides, ModuleId, ModuleKind, ModuleSpec, Placeholder, TargetOverrides,
};
use crate::builder::sources::SelectedSources;
use crate::core::backend::Backend;
use crate::errors::ConfigResult;

use super::cpp::vndk_override;
use super::{
    native_cflags, tidy_checks_as_errors, Assembler, BackendRequest, CPP_MODULE_DEFAULTS,
};

const NDK_IMPORT_EXPORT_LIBS: [&str; 1] = ["libbinder_ndk"];

/// SDK floor of the app-facing variant when none is given.
pub const DEFAULT_NDK_SDK_VERSION: &str = "current";

/// Standard library of the app-facing variant; maps to libc++.so on the platform.
pub const NDK_STL: &str = "c++_shared";

#[derive(Debug, Clone, Copy, Default)]
pub struct NdkAssembler;

impl NdkAssembler {
    /// Overrides for the platform, vendor and product images.
    ///
    /// Outside apps, tracing goes through libcutils instead of libandroid.
    fn image_overrides(gen_trace: bool) -> ImageOverrides {
        let mut image = ImageOverrides {
            cflags: vec!["-DBINDER_STABILITY_SUPPORT".to_string()],
            ..Default::default()
        };
        if gen_trace {
            image.exclude_shared_libs = vec!["libandroid".to_string()];
            image.header_libs = vec!["libandroid_aidltrace".to_string()];
            image.shared_libs = vec!["libcutils".to_string()];
        }
        image
    }
}

impl Assembler for NdkAssembler {
    fn backend(&self) -> Backend {
        Backend::Ndk
    }

    fn assemble(
        &self,
        request: &BackendRequest<'_>,
        sources: SelectedSources,
        graph: &mut dyn BuildGraph,
    ) -> ConfigResult<ModuleId> {
        let iface = request.interface;
        let common = &iface.backend.ndk.common;
        let gen_trace = iface.gen_trace(Backend::Ndk);
        let source_gen = request.source_gen_name();

        let mut gen = request.base_source_gen(sources);
        gen.gen_log = common.gen_log;
        gen.gen_trace = gen_trace;
        graph.create_module(ModuleSpec::new(&source_gen, ModuleKind::SourceGenerator(gen)))?;

        let import_export: Vec<String> =
            NDK_IMPORT_EXPORT_LIBS.iter().map(|s| s.to_string()).collect();
        let mut shared_libs = import_export.clone();
        shared_libs.extend(common.additional_shared_libraries.iter().cloned());
        if gen_trace {
            shared_libs.push("libandroid".to_string());
        }

        let image = Self::image_overrides(gen_trace);
        let target = TargetOverrides {
            disabled_host_os: Some(request.config.disabled_host_os.clone()),
            platform: Some(image.clone()),
            vendor: Some(image.clone()),
            product: Some(image),
        };

        let (sdk_version, stl) = if iface.should_generate_app_ndk_backend() {
            let sdk = iface
                .backend
                .ndk
                .sdk_version
                .clone()
                .unwrap_or_else(|| DEFAULT_NDK_SDK_VERSION.to_string());
            (Some(sdk), Some(NDK_STL.to_string()))
        } else {
            (None, None)
        };

        let props = CcProps {
            availability: iface.availability.clone(),
            host_supported: iface.host_supported,
            defaults: vec![CPP_MODULE_DEFAULTS.to_string()],
            double_loadable: iface.double_loadable,
            generated_sources: vec![source_gen.clone()],
            generated_headers: vec![source_gen.clone()],
            export_generated_headers: vec![source_gen],
            shared_libs,
            export_shared_lib_headers: import_export,
            sdk_version,
            stl,
            cflags: native_cflags(&common.cflags),
            apex_available: common.apex_available.clone(),
            min_sdk_version: iface.min_sdk_version(Backend::Ndk),
            target,
            tidy: true,
            tidy_flags: request.tidy_flags(),
            tidy_checks_as_errors: tidy_checks_as_errors(Backend::Ndk),
            include_build_directory: Some(false),
            vndk: iface
                .vndk
                .merged(&common.vndk)
                .merged(&vndk_override(request)?),
            ..Default::default()
        };

        let library = ModuleSpec::new(request.library_name(), ModuleKind::NativeLibrary(props));
        graph.declare_placeholder(Placeholder::new(
            Backend::Ndk,
            &iface.name,
            request.version,
            library,
        ))
    }
}
