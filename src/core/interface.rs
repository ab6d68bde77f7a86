//! Interface declarations as loaded from an interfaces manifest.
//!
//! An `Interface` is read-only input to planning. Its shape mirrors the
//! `[[interface]]` tables of `Interfaces.toml`:
//!
//! ```toml
//! [[interface]]
//! name = "android.hardware.foo"
//! srcs = ["android/hardware/foo/IFoo.aidl"]
//! versions = ["1", "2"]
//! imports = ["android.hardware.common"]
//! stability = "vintf"
//!
//! [interface.backend.rust]
//! enabled = true
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::backend::Backend;

/// Stability mode that forces the native-shared library out of the VNDK.
pub const STABILITY_VINTF: &str = "vintf";

/// A frozen version together with the imports it was frozen against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub imports: Vec<String>,
}

/// Partition availability flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Availability {
    pub vendor_available: Option<bool>,
    pub odm_available: Option<bool>,
    pub product_available: Option<bool>,
    pub recovery_available: Option<bool>,
}

/// VNDK participation of a native library.
///
/// Several layers are applied in order (interface, backend, override); a
/// later `Some` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VndkProperties {
    pub enabled: Option<bool>,
    pub support_system_process: Option<bool>,
    pub private: Option<bool>,
}

impl VndkProperties {
    /// Layer `other` on top of `self`.
    pub fn merged(&self, other: &VndkProperties) -> VndkProperties {
        VndkProperties {
            enabled: other.enabled.or(self.enabled),
            support_system_process: other
                .support_system_process
                .or(self.support_system_process),
            private: other.private.or(self.private),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.support_system_process.is_none() && self.private.is_none()
    }
}

/// Options shared by the cpp and ndk backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeBackendOptions {
    pub enabled: Option<bool>,
    pub gen_log: bool,
    pub gen_trace: bool,
    pub additional_shared_libraries: Vec<String>,
    pub cflags: Vec<String>,
    pub apex_available: Vec<String>,
    pub min_sdk_version: Option<String>,
    pub vndk: VndkProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CppBackendOptions {
    #[serde(flatten)]
    pub common: NativeBackendOptions,
    /// Also build the analyzer tool for this interface
    pub analyzer: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NdkBackendOptions {
    #[serde(flatten)]
    pub common: NativeBackendOptions,
    /// Build the app-facing (SDK) variant; defaults to true
    pub apps_enabled: Option<bool>,
    pub sdk_version: Option<String>,
}

/// Lint options forwarded untouched to the managed library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintOptions {
    pub strict_updatability_linting: Option<bool>,
    pub baseline_filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaBackendOptions {
    pub enabled: Option<bool>,
    pub platform_apis: bool,
    pub sdk_version: Option<String>,
    pub gen_rpc: bool,
    pub gen_trace: bool,
    pub apex_available: Vec<String>,
    pub min_sdk_version: Option<String>,
    pub lint: LintOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RustBackendOptions {
    pub enabled: Option<bool>,
    pub apex_available: Vec<String>,
    pub min_sdk_version: Option<String>,
}

/// Per-backend configuration block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendOptions {
    pub cpp: CppBackendOptions,
    pub ndk: NdkBackendOptions,
    pub java: JavaBackendOptions,
    pub rust: RustBackendOptions,
}

/// A versioned (or unstable) interface declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub name: String,

    /// Directory the interface is declared in; snapshots live below it
    pub module_dir: PathBuf,

    /// Live (in-development) sources, relative to `module_dir`
    pub srcs: Vec<String>,
    pub local_include_dir: String,

    /// Frozen versions, oldest first
    pub versions: Vec<String>,
    /// Frozen versions with the imports each was frozen against.
    /// Takes precedence over `versions` when non-empty.
    pub versions_with_info: Vec<VersionInfo>,

    /// Imports of the in-development version
    pub imports: Vec<String>,

    /// Never versioned; has exactly one implicit build
    pub unstable: bool,
    pub stability: Option<String>,
    pub vndk_use_version: Option<String>,
    /// Whether the in-development version is declared identical to the latest frozen one
    pub frozen: Option<bool>,

    pub headers: Vec<String>,
    /// Extra flags for the source generator
    pub flags: Vec<String>,
    pub min_sdk_version: Option<String>,
    pub host_supported: Option<bool>,
    pub double_loadable: Option<bool>,

    #[serde(flatten)]
    pub availability: Availability,
    pub vndk: VndkProperties,
    pub backend: BackendOptions,
}

impl Interface {
    /// Create an interface with only a name; everything else defaulted.
    pub fn new(name: impl Into<String>) -> Self {
        Interface {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether this interface uses the strict wire-stability mode.
    pub fn is_vintf(&self) -> bool {
        self.stability.as_deref() == Some(STABILITY_VINTF)
    }

    /// Whether libraries should be generated for `backend`.
    ///
    /// cpp, ndk and java are on unless disabled; rust is opt-in; the analyzer
    /// rides on the cpp backend and must be requested.
    pub fn backend_enabled(&self, backend: Backend) -> bool {
        let opts = &self.backend;
        match backend {
            Backend::Cpp => opts.cpp.common.enabled.unwrap_or(true),
            Backend::Ndk => opts.ndk.common.enabled.unwrap_or(true),
            Backend::Java => opts.java.enabled.unwrap_or(true),
            Backend::Rust => opts.rust.enabled.unwrap_or(false),
            Backend::CppAnalyzer => opts.cpp.common.enabled.unwrap_or(true) && opts.cpp.analyzer,
        }
    }

    /// Whether the ndk backend also builds its app-facing variant.
    pub fn should_generate_app_ndk_backend(&self) -> bool {
        self.backend_enabled(Backend::Ndk) && self.backend.ndk.apps_enabled.unwrap_or(true)
    }

    /// Whether tracing code is generated for `backend`.
    pub fn gen_trace(&self, backend: Backend) -> bool {
        match backend {
            Backend::Cpp => self.backend.cpp.common.gen_trace,
            Backend::Ndk => self.backend.ndk.common.gen_trace,
            Backend::Java => self.backend.java.gen_trace,
            Backend::Rust | Backend::CppAnalyzer => false,
        }
    }

    /// Minimum platform version for `backend`: the backend override, else the
    /// interface-wide value.
    pub fn min_sdk_version(&self, backend: Backend) -> Option<String> {
        let specific = match backend {
            Backend::Cpp | Backend::CppAnalyzer => &self.backend.cpp.common.min_sdk_version,
            Backend::Ndk => &self.backend.ndk.common.min_sdk_version,
            Backend::Java => &self.backend.java.min_sdk_version,
            Backend::Rust => &self.backend.rust.min_sdk_version,
        };
        specific.clone().or_else(|| self.min_sdk_version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        let iface = Interface::new("foo");
        assert!(iface.backend_enabled(Backend::Cpp));
        assert!(iface.backend_enabled(Backend::Ndk));
        assert!(iface.backend_enabled(Backend::Java));
        assert!(!iface.backend_enabled(Backend::Rust));
        assert!(!iface.backend_enabled(Backend::CppAnalyzer));
        assert!(iface.should_generate_app_ndk_backend());
    }

    #[test]
    fn test_min_sdk_override() {
        let mut iface = Interface::new("foo");
        iface.min_sdk_version = Some("29".to_string());
        iface.backend.rust.min_sdk_version = Some("31".to_string());

        assert_eq!(iface.min_sdk_version(Backend::Rust).as_deref(), Some("31"));
        assert_eq!(iface.min_sdk_version(Backend::Cpp).as_deref(), Some("29"));
        assert_eq!(iface.min_sdk_version(Backend::CppAnalyzer).as_deref(), Some("29"));
    }

    #[test]
    fn test_gen_trace_is_per_backend() {
        let mut iface = Interface::new("foo");
        iface.backend.java.gen_trace = true;

        assert!(iface.gen_trace(Backend::Java));
        assert!(!iface.gen_trace(Backend::Cpp));
        assert!(!iface.gen_trace(Backend::Rust));
    }

    #[test]
    fn test_vndk_layering() {
        let base = VndkProperties {
            enabled: Some(true),
            support_system_process: Some(true),
            private: None,
        };
        let over = VndkProperties {
            enabled: Some(false),
            ..Default::default()
        };

        let merged = base.merged(&over);
        assert_eq!(merged.enabled, Some(false));
        assert_eq!(merged.support_system_process, Some(true));
        assert_eq!(merged.private, None);
    }

    #[test]
    fn test_deserialize_backend_block() {
        let iface: Interface = toml::from_str(
            r#"
            name = "foo"
            versions = ["1"]
            vendor_available = true

            [backend.ndk]
            gen_trace = true
            apps_enabled = false

            [backend.cpp]
            analyzer = true
            cflags = ["-DFOO"]
            "#,
        )
        .unwrap();

        assert_eq!(iface.availability.vendor_available, Some(true));
        assert!(iface.backend.ndk.common.gen_trace);
        assert!(!iface.should_generate_app_ndk_backend());
        assert!(iface.backend_enabled(Backend::CppAnalyzer));
        assert_eq!(iface.backend.cpp.common.cflags, vec!["-DFOO"]);
    }
}
