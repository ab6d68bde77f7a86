//! Module definitions handed to the build graph.
//!
//! Each module kind carries only the properties meaningful to it. The JSON
//! form is tagged by `kind`:
//!
//! - `source_generator`: runs the interface compiler for one language
//! - `native_library`: cpp / ndk implementation library
//! - `managed_library`: java implementation library
//! - `memory_safe_library`: rust implementation library
//! - `analyzer_binary`: cpp analyzer tool

use serde::Serialize;

use crate::core::backend::Backend;
use crate::core::interface::{Availability, LintOptions, VndkProperties};

/// Identifier of a module in the build graph (its unique name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleId(pub String);

impl ModuleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named module definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: ModuleKind,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>, kind: ModuleKind) -> Self {
        ModuleSpec {
            name: name.into(),
            kind,
        }
    }

    pub fn id(&self) -> ModuleId {
        ModuleId(self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleKind {
    SourceGenerator(SourceGenProps),
    NativeLibrary(CcProps),
    ManagedLibrary(JavaProps),
    MemorySafeLibrary(RustProps),
    AnalyzerBinary(CcProps),
}

impl ModuleKind {
    /// The `kind` tag of the JSON form.
    pub fn name(&self) -> &'static str {
        match self {
            ModuleKind::SourceGenerator(_) => "source_generator",
            ModuleKind::NativeLibrary(_) => "native_library",
            ModuleKind::ManagedLibrary(_) => "managed_library",
            ModuleKind::MemorySafeLibrary(_) => "memory_safe_library",
            ModuleKind::AnalyzerBinary(_) => "analyzer_binary",
        }
    }
}

/// Source-generation rule inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceGenProps {
    pub srcs: Vec<String>,
    pub aidl_root: String,
    /// Imports as declared for this version; resolved by the generator itself
    pub imports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sdk_version: Option<String>,
    pub platform_apis: bool,
    pub lang: Option<Backend>,
    pub base_name: String,
    pub gen_log: bool,
    pub gen_rpc: bool,
    pub gen_trace: bool,
    pub version: String,
    pub unstable: bool,
    pub not_frozen: bool,
    pub require_frozen_reason: String,
    pub flags: Vec<String>,
}

/// Per-image overrides applied to platform, vendor and product variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageOverrides {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cflags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_shared_libs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub header_libs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shared_libs: Vec<String>,
}

/// Target-specific overrides of a native module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetOverrides {
    /// Host OS on which the module is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_host_os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<ImageOverrides>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<ImageOverrides>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ImageOverrides>,
}

/// Native library or binary properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CcProps {
    #[serde(flatten)]
    pub availability: Availability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_supported: Option<bool>,
    pub defaults: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_loadable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installable: Option<bool>,
    pub generated_sources: Vec<String>,
    pub generated_headers: Vec<String>,
    pub export_generated_headers: Vec<String>,
    pub shared_libs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub static_libs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub header_libs: Vec<String>,
    pub export_shared_lib_headers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stl: Option<String>,
    pub cflags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apex_available: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sdk_version: Option<String>,
    pub target: TargetOverrides,
    pub tidy: bool,
    pub tidy_flags: Vec<String>,
    pub tidy_checks_as_errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_build_directory: Option<bool>,
    #[serde(skip_serializing_if = "VndkProperties::is_empty")]
    pub vndk: VndkProperties,
    /// Set on finished libraries: generated native code cannot cross the
    /// system/vendor boundary
    pub must_use_vendor_variant: bool,
}

/// Managed library properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JavaProps {
    pub installable: bool,
    pub defaults: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
    pub platform_apis: bool,
    pub srcs: Vec<String>,
    pub static_libs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apex_available: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sdk_version: Option<String>,
    pub lint: LintOptions,
}

/// Memory-safe library properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RustProps {
    pub crate_name: String,
    pub stem: String,
    pub source_stem: String,
    pub source_gen: String,
    pub defaults: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_available: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apex_available: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sdk_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_host_os: Option<String>,
    pub rustlibs: Vec<String>,
}

/// An implementation library declared before its import versions are known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    /// Name of the placeholder itself (`<library>-generator`)
    pub name: String,
    pub backend: Backend,
    pub interface: String,
    /// Version this library was requested for
    pub version: String,
    /// The library to materialize once imports are injected
    pub library: ModuleSpec,
}

impl Placeholder {
    pub fn new(backend: Backend, interface: &str, version: &str, library: ModuleSpec) -> Self {
        Placeholder {
            name: format!("{}-generator", library.name),
            backend,
            interface: interface.to_string(),
            version: version.to_string(),
            library,
        }
    }

    pub fn id(&self) -> ModuleId {
        ModuleId(self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_json_is_tagged_by_kind() {
        let spec = ModuleSpec::new(
            "foo-V1-java",
            ModuleKind::ManagedLibrary(JavaProps {
                installable: true,
                srcs: vec![":foo-V1-java-source".to_string()],
                ..Default::default()
            }),
        );

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "managed_library");
        assert_eq!(json["name"], "foo-V1-java");
        assert_eq!(json["srcs"][0], ":foo-V1-java-source");
        assert!(json.get("sdk_version").is_none());
    }

    #[test]
    fn test_placeholder_name() {
        let library = ModuleSpec::new("foo-V2-cpp", ModuleKind::NativeLibrary(CcProps::default()));
        let placeholder = Placeholder::new(Backend::Cpp, "foo", "2", library);
        assert_eq!(placeholder.id().as_str(), "foo-V2-cpp-generator");
    }
}
