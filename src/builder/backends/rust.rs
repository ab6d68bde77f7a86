//! Memory-safe systems (Rust) backend.

use crate::builder::graph::BuildGraph;
use crate::builder::module::{ModuleId, ModuleKind, ModuleSpec, Placeholder, RustProps};
use crate::builder::sources::SelectedSources;
use crate::core::backend::Backend;
use crate::errors::ConfigResult;

use super::{Assembler, BackendRequest};

pub const RUST_MODULE_DEFAULTS: &str = "aidl-rust-module-defaults";

/// Turn a module name into a valid crate identifier.
pub fn fix_rust_name(name: &str) -> String {
    name.replace(['-', '.'], "_")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RustAssembler;

impl Assembler for RustAssembler {
    fn backend(&self) -> Backend {
        Backend::Rust
    }

    fn assemble(
        &self,
        request: &BackendRequest<'_>,
        sources: SelectedSources,
        graph: &mut dyn BuildGraph,
    ) -> ConfigResult<ModuleId> {
        let iface = request.interface;
        let rust = &iface.backend.rust;
        let source_gen = request.source_gen_name();

        let gen = request.base_source_gen(sources);
        graph.create_module(ModuleSpec::new(&source_gen, ModuleKind::SourceGenerator(gen)))?;

        let versioned = fix_rust_name(&iface.versioned_name(request.version));
        let props = RustProps {
            crate_name: fix_rust_name(&iface.name),
            stem: format!("lib{}", versioned),
            source_stem: versioned,
            source_gen,
            defaults: vec![RUST_MODULE_DEFAULTS.to_string()],
            host_supported: iface.host_supported,
            vendor_available: iface.availability.vendor_available,
            product_available: iface.availability.product_available,
            apex_available: rust.apex_available.clone(),
            min_sdk_version: iface.min_sdk_version(Backend::Rust),
            disabled_host_os: Some(request.config.disabled_host_os.clone()),
            rustlibs: Vec::new(),
        };

        let library =
            ModuleSpec::new(request.library_name(), ModuleKind::MemorySafeLibrary(props));
        graph.declare_placeholder(Placeholder::new(
            Backend::Rust,
            &iface.name,
            request.version,
            library,
        ))
    }
}
