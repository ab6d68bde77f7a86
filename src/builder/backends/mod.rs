//! Per-language library assembly.
//!
//! Every backend emits a source-generation module and an implementation
//! library. Libraries whose dependency list includes imports are declared as
//! placeholders and finished later; the analyzer tool needs no imports and is
//! created directly.

use crate::builder::graph::BuildGraph;
use crate::builder::module::{ModuleId, SourceGenProps};
use crate::builder::sources::SelectedSources;
use crate::core::backend::Backend;
use crate::core::interface::Interface;
use crate::errors::ConfigResult;
use crate::util::config::GenerateConfig;

mod analyzer;
mod cpp;
mod java;
mod ndk;
mod rust;

pub use analyzer::AnalyzerAssembler;
pub use cpp::CppAssembler;
pub use java::{api_level_from_sdk, JavaAssembler};
pub use ndk::NdkAssembler;
pub use rust::{fix_rust_name, RustAssembler};

/// Warning flags added to every generated native module.
pub const NATIVE_WARNING_FLAGS: [&str; 4] = ["-Wextra", "-Wall", "-Werror", "-Wextra-semi"];

/// Defaults module applied to native libraries and the analyzer.
pub const CPP_MODULE_DEFAULTS: &str = "aidl-cpp-module-defaults";

/// One (interface, version, backend) library request.
#[derive(Debug, Clone, Copy)]
pub struct BackendRequest<'a> {
    pub interface: &'a Interface,
    pub version: &'a str,
    pub backend: Backend,
    /// Whether this build is provisional (in-development, not yet frozen)
    pub not_frozen: bool,
    /// Why freezing is required, for diagnostics only
    pub require_frozen_reason: &'a str,
    pub config: &'a GenerateConfig,
}

impl<'a> BackendRequest<'a> {
    /// `<versioned name>-<lang>`
    pub fn library_name(&self) -> String {
        format!(
            "{}-{}",
            self.interface.versioned_name(self.version),
            self.backend
        )
    }

    /// `<versioned name>-<lang>-source`
    pub fn source_gen_name(&self) -> String {
        format!("{}-source", self.library_name())
    }

    /// Source-generation properties shared by every backend.
    ///
    /// Backends adjust language-specific fields (trace, rpc, log, SDK floor)
    /// on the returned value.
    pub fn base_source_gen(&self, sources: SelectedSources) -> SourceGenProps {
        let iface = self.interface;
        SourceGenProps {
            srcs: sources.srcs,
            aidl_root: sources.root,
            imports: iface.imports_for_version(self.version),
            headers: iface.headers.clone(),
            stability: iface.stability.clone(),
            min_sdk_version: iface.min_sdk_version(self.backend),
            platform_apis: false,
            lang: Some(self.backend),
            base_name: iface.name.clone(),
            gen_log: false,
            gen_rpc: false,
            gen_trace: false,
            version: iface
                .version_for_init_version_compat(self.version)
                .to_string(),
            unstable: iface.unstable,
            not_frozen: self.not_frozen,
            require_frozen_reason: self.require_frozen_reason.to_string(),
            flags: iface.flags_for_gen_rule(self.version),
        }
    }

    /// Clang-tidy flags restricting checks to generated headers.
    pub fn tidy_flags(&self) -> Vec<String> {
        vec![format!("--header-filter={}.*", self.config.out_dir)]
    }
}

/// Assembles the modules of one backend.
pub trait Assembler: Send + Sync {
    fn backend(&self) -> Backend;

    /// Emit modules for `request` from non-empty `sources`.
    ///
    /// Returns the implementation module (or its placeholder) id.
    fn assemble(
        &self,
        request: &BackendRequest<'_>,
        sources: SelectedSources,
        graph: &mut dyn BuildGraph,
    ) -> ConfigResult<ModuleId>;
}

/// Tidy checks treated as errors, per backend.
///
/// | backend       | exempted checks                                     |
/// |---------------|-----------------------------------------------------|
/// | cpp, ndk      | dead stores, new/delete leaks, padding              |
/// | cpp-analyzer  | the above plus deprecated declarations              |
///
/// The analyzer's extra exemption is deliberately not applied to the
/// libraries.
pub fn tidy_checks_as_errors(backend: Backend) -> Vec<String> {
    let mut checks = vec!["*".to_string()];
    if backend == Backend::CppAnalyzer {
        checks.push("-clang-diagnostic-deprecated-declarations".to_string());
    }
    checks.extend(
        [
            "-clang-analyzer-deadcode.DeadStores",
            "-clang-analyzer-cplusplus.NewDeleteLeaks",
            "-clang-analyzer-optin.performance.Padding",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    checks
}

/// Native cflags: backend cflags (if the backend inherits them) followed by
/// the warning flags.
pub fn native_cflags(extra: &[String]) -> Vec<String> {
    extra
        .iter()
        .cloned()
        .chain(NATIVE_WARNING_FLAGS.iter().map(|s| s.to_string()))
        .collect()
}
