//! Single entry point for library requests.

use crate::builder::backends::{
    AnalyzerAssembler, Assembler, BackendRequest, CppAssembler, JavaAssembler, NdkAssembler,
    RustAssembler,
};
use crate::builder::graph::BuildGraph;
use crate::builder::module::ModuleId;
use crate::builder::sources::SourceSelector;
use crate::core::backend::Backend;
use crate::core::interface::Interface;
use crate::errors::ConfigResult;
use crate::util::config::GenerateConfig;

/// The assembler for `backend`.
pub fn assembler_for(backend: Backend) -> &'static dyn Assembler {
    match backend {
        Backend::Cpp => &CppAssembler,
        Backend::Ndk => &NdkAssembler,
        Backend::CppAnalyzer => &AnalyzerAssembler,
        Backend::Java => &JavaAssembler,
        Backend::Rust => &RustAssembler,
    }
}

/// Routes library requests to backend assemblers.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    config: &'a GenerateConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a GenerateConfig) -> Self {
        Dispatcher { config }
    }

    /// Emit the modules for one (interface, version, backend).
    ///
    /// Returns `None` when the version has no sources yet; nothing is
    /// emitted in that case.
    pub fn dispatch(
        &self,
        graph: &mut dyn BuildGraph,
        interface: &Interface,
        version: &str,
        backend: Backend,
        not_frozen: bool,
        require_frozen_reason: &str,
    ) -> ConfigResult<Option<ModuleId>> {
        let request = BackendRequest {
            interface,
            version,
            backend,
            not_frozen,
            require_frozen_reason,
            config: self.config,
        };

        self.dispatch_request(graph, &request)
            .map_err(|e| e.in_request(&interface.name, version, backend))
    }

    /// Like [`Dispatcher::dispatch`], with the backend given by name.
    pub fn dispatch_named(
        &self,
        graph: &mut dyn BuildGraph,
        interface: &Interface,
        version: &str,
        backend: &str,
        not_frozen: bool,
        require_frozen_reason: &str,
    ) -> ConfigResult<Option<ModuleId>> {
        let backend: Backend = backend.parse()?;
        self.dispatch(
            graph,
            interface,
            version,
            backend,
            not_frozen,
            require_frozen_reason,
        )
    }

    fn dispatch_request(
        &self,
        graph: &mut dyn BuildGraph,
        request: &BackendRequest<'_>,
    ) -> ConfigResult<Option<ModuleId>> {
        let sources = SourceSelector::new(self.config).select(request.interface, request.version)?;
        if sources.is_empty() {
            // The version directory exists but its API dump has not been
            // copied yet: the version is about to be frozen.
            tracing::warn!(
                "no sources for {}, skipping {} library",
                request.interface.versioned_name(request.version),
                request.backend
            );
            return Ok(None);
        }

        let id = assembler_for(request.backend).assemble(request, sources, graph)?;
        tracing::debug!("assembled {}", id);
        Ok(Some(id))
    }
}
