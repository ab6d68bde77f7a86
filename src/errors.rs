//! Configuration error types and diagnostics.
//!
//! Every error here aborts the configuration pass. None are retried: a failure
//! is a defect in the interface definitions, not a transient condition.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::backend::Backend;
use crate::util::diagnostic::Diagnostic;

/// Error raised while resolving versions or emitting modules.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigError {
    #[error("unsupported language backend `{backend}`")]
    #[diagnostic(code(vidl::config::unsupported_backend))]
    UnsupportedBackend { backend: String },

    #[error("interface `{interface}` has no frozen versions")]
    #[diagnostic(code(vidl::config::no_frozen_versions))]
    NoFrozenVersions { interface: String },

    #[error("interface `{interface}` has invalid versions: {reason}")]
    #[diagnostic(
        code(vidl::config::invalid_versions),
        help("frozen versions must be 1, 2, 3, ... with no gaps")
    )]
    InvalidVersions { interface: String, reason: String },

    #[error("unrecognized vndk_use_version `{version}` for `{interface}`")]
    #[diagnostic(code(vidl::config::unknown_vndk_version))]
    UnknownVndkVersion { interface: String, version: String },

    #[error("interface `{name}` is declared twice")]
    #[diagnostic(code(vidl::config::duplicate_interface))]
    DuplicateInterface { name: String },

    #[error("interface `{interface}` imports unknown interface `{import}`")]
    #[diagnostic(code(vidl::config::unknown_interface))]
    UnknownInterface { interface: String, import: String },

    #[error("interface `{interface}` imports `{import}`, which does not enable the {backend} backend")]
    #[diagnostic(
        code(vidl::config::import_backend_disabled),
        help("enable the backend on the imported interface or disable it on the importing one")
    )]
    ImportBackendDisabled {
        interface: String,
        import: String,
        backend: Backend,
    },

    #[error("interface `{interface}` has no version {version}")]
    #[diagnostic(code(vidl::config::unknown_version))]
    UnknownVersion { interface: String, version: String },

    #[error("import cycle detected: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(vidl::config::import_cycle),
        help("an interface version cannot transitively import itself")
    )]
    ImportCycle { cycle: Vec<String> },

    #[error("snapshot directory for `{interface}` version {version} is missing: {}", .path.display())]
    #[diagnostic(
        code(vidl::config::missing_snapshot),
        help("freeze the API dump for this version or remove it from `versions`")
    )]
    MissingSnapshot {
        interface: String,
        version: String,
        path: PathBuf,
    },

    #[error("cannot list snapshot for `{interface}` version {version}: {message}")]
    #[diagnostic(code(vidl::config::snapshot_glob))]
    SnapshotGlob {
        interface: String,
        version: String,
        message: String,
    },

    #[error("module `{name}` is declared twice")]
    #[diagnostic(code(vidl::graph::duplicate_module))]
    DuplicateModule { name: String },

    #[error("module `{name}` was already finished")]
    #[diagnostic(code(vidl::graph::already_finished))]
    AlreadyFinished { name: String },

    #[error("module `{name}` is not an implementation placeholder")]
    #[diagnostic(code(vidl::graph::not_a_placeholder))]
    NotAPlaceholder { name: String },

    #[error("failed to generate `{interface}` version `{version}` for the {backend} backend")]
    #[diagnostic(code(vidl::config::request))]
    Request {
        interface: String,
        version: String,
        backend: Backend,
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Attach the failing (interface, version, backend) triple.
    pub fn in_request(self, interface: &str, version: &str, backend: Backend) -> Self {
        if let ConfigError::Request { .. } = self {
            return self;
        }
        ConfigError::Request {
            interface: interface.to_string(),
            version: version.to_string(),
            backend,
            source: Box::new(self),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        if let ConfigError::Request {
            interface,
            version,
            backend,
            source,
        } = self
        {
            let version = if version.is_empty() { "(unversioned)" } else { version };
            return source.to_diagnostic().with_context(format!(
                "while generating `{}` version {} for the {} backend",
                interface, version, backend
            ));
        }

        let diag = Diagnostic::error(self.to_string());

        match self {
            ConfigError::UnsupportedBackend { .. } => diag
                .with_context("supported backends: java, cpp, ndk, rust, cpp-analyzer"),

            ConfigError::NoFrozenVersions { interface } => diag.with_suggestion(format!(
                "Freeze a first version of `{}` before depending on its latest version",
                interface
            )),

            ConfigError::InvalidVersions { interface, .. } => diag.with_suggestion(format!(
                "Check the `versions` list of `{}`",
                interface
            )),

            ConfigError::UnknownVndkVersion { interface, .. } => diag.with_suggestion(format!(
                "Set `vndk_use_version` of `{}` to one of its frozen versions",
                interface
            )),

            ConfigError::DuplicateInterface { name } => diag
                .with_suggestion(format!("Rename one of the interfaces called `{}`", name)),

            ConfigError::UnknownInterface { import, .. } => diag
                .with_suggestion(format!("Declare an interface named `{}`", import))
                .with_suggestion("Check that the import is spelled correctly"),

            ConfigError::ImportBackendDisabled {
                interface,
                import,
                backend,
            } => diag
                .with_suggestion(format!("Enable the {} backend of `{}`", backend, import))
                .with_suggestion(format!("Disable the {} backend of `{}`", backend, interface)),

            ConfigError::UnknownVersion { interface, .. } => diag.with_suggestion(format!(
                "Run `vidl versions` to list the frozen and next versions of `{}`",
                interface
            )),

            ConfigError::ImportCycle { cycle } => diag
                .with_context(format!("cycle: {}", cycle.join(" -> ")))
                .with_suggestion("Break the cycle by pinning one import to an explicit version"),

            ConfigError::MissingSnapshot { path, .. } => diag
                .with_location(path.clone())
                .with_suggestion("Restore the frozen API dump directory"),

            ConfigError::SnapshotGlob { .. } => diag,

            ConfigError::DuplicateModule { .. }
            | ConfigError::AlreadyFinished { .. }
            | ConfigError::NotAPlaceholder { .. } => {
                diag.with_context("this indicates a planning defect, not an interface defect")
            }

            ConfigError::Request { .. } => diag,
        }
    }
}

/// Result alias for configuration steps.
pub type ConfigResult<T> = Result<T, ConfigError>;
