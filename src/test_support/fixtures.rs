//! Test fixtures for common test scenarios.

use crate::builder::backends::BackendRequest;
use crate::builder::graph::{BuildGraph, ModuleGraph};
use crate::builder::module::{CcProps, ModuleId, ModuleKind};
use crate::core::backend::Backend;
use crate::core::interface::Interface;
use crate::util::config::GenerateConfig;

/// A stable interface with the given frozen versions and one live source.
pub fn stable_interface(name: &str, versions: &[&str]) -> Interface {
    let mut iface = Interface::new(name);
    iface.versions = versions.iter().map(|v| v.to_string()).collect();
    iface.srcs = vec![format!("{}.aidl", name)];
    iface
}

/// An unstable interface with one live source.
pub fn unstable_interface(name: &str) -> Interface {
    let mut iface = Interface::new(name);
    iface.unstable = true;
    iface.srcs = vec![format!("{}.aidl", name)];
    iface
}

/// A request for a frozen, reasonless build.
pub fn request_for<'a>(
    iface: &'a Interface,
    version: &'a str,
    backend: Backend,
    config: &'a GenerateConfig,
) -> BackendRequest<'a> {
    BackendRequest {
        interface: iface,
        version,
        backend,
        not_frozen: false,
        require_frozen_reason: "",
        config,
    }
}

/// Native library properties declared by placeholder `id`.
pub fn native_library(graph: &ModuleGraph, id: &ModuleId) -> CcProps {
    let placeholder = graph.placeholder(id).expect("not a pending placeholder");
    match &placeholder.library.kind {
        ModuleKind::NativeLibrary(props) => props.clone(),
        other => panic!("expected a native library, got {:?}", other),
    }
}
