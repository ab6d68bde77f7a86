//! Generation plan.
//!
//! Planning runs in three steps:
//!
//! 1. every (interface, version, backend) request is dispatched, one
//!    interface per rayon task, each into its own graph
//! 2. the per-interface graphs are merged in name order and import cycles are
//!    rejected
//! 3. every implementation placeholder is finished

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::builder::dispatch::Dispatcher;
use crate::builder::finish::finish_all;
use crate::builder::graph::ModuleGraph;
use crate::builder::module::ModuleKind;
use crate::core::backend::Backend;
use crate::core::import::check_import_cycles;
use crate::core::interface::Interface;
use crate::core::registry::InterfaceRegistry;
use crate::core::version::UNVERSIONED;
use crate::errors::ConfigResult;
use crate::util::config::GenerateConfig;

/// Reason recorded on every frozen version.
pub const KNOWN_FROZEN_REASON: &str = "this is a known frozen version";

/// A request that produced no modules because its snapshot is still empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRequest {
    pub interface: String,
    pub version: String,
    pub backend: Backend,
    /// Name the library would have had
    pub library: String,
}

/// The complete output of planning a registry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationPlan {
    pub graph: ModuleGraph,
    pub skipped: Vec<SkippedRequest>,
}

/// Freeze metadata handed to the source generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeState {
    pub not_frozen: bool,
    pub require_frozen_reason: String,
}

/// Freeze metadata of `version` of `iface`.
pub fn freeze_state(iface: &Interface, version: &str, config: &GenerateConfig) -> FreezeState {
    if iface.unstable {
        return FreezeState {
            not_frozen: false,
            require_frozen_reason: String::new(),
        };
    }
    if iface.is_next_version(version) {
        let reason = if config.require_frozen {
            config.require_frozen_reason.clone()
        } else {
            String::new()
        };
        return FreezeState {
            not_frozen: !iface.frozen.unwrap_or(false),
            require_frozen_reason: reason,
        };
    }
    FreezeState {
        not_frozen: false,
        require_frozen_reason: KNOWN_FROZEN_REASON.to_string(),
    }
}

/// The (version, backend) requests generated for `iface`.
///
/// The analyzer has unversioned names, so only the in-development version
/// gets one.
pub fn requests_for(iface: &Interface) -> Vec<(String, Backend)> {
    let versions = if iface.unstable {
        vec![UNVERSIONED.to_string()]
    } else {
        iface.all_versions()
    };

    let mut requests = Vec::new();
    for backend in Backend::ALL {
        if !iface.backend_enabled(backend) {
            continue;
        }
        for version in &versions {
            if backend == Backend::CppAnalyzer && !iface.is_next_version(version) {
                continue;
            }
            requests.push((version.clone(), backend));
        }
    }
    requests
}

/// Declare every library of one interface into a fresh graph.
fn plan_interface(
    iface: &Interface,
    config: &GenerateConfig,
) -> ConfigResult<(ModuleGraph, Vec<SkippedRequest>)> {
    let dispatcher = Dispatcher::new(config);
    let mut graph = ModuleGraph::new();
    let mut skipped = Vec::new();

    for (version, backend) in requests_for(iface) {
        let freeze = freeze_state(iface, &version, config);
        let emitted = dispatcher.dispatch(
            &mut graph,
            iface,
            &version,
            backend,
            freeze.not_frozen,
            &freeze.require_frozen_reason,
        )?;
        if emitted.is_none() {
            skipped.push(SkippedRequest {
                interface: iface.name.clone(),
                library: format!("{}-{}", iface.versioned_name(&version), backend),
                version,
                backend,
            });
        }
    }

    Ok((graph, skipped))
}

/// Libraries that link a library whose request was skipped, as
/// `(linking library, skipped library)` pairs in name order.
pub fn links_to_skipped(plan: &GenerationPlan) -> Vec<(String, String)> {
    let skipped: BTreeSet<&str> = plan.skipped.iter().map(|s| s.library.as_str()).collect();

    let mut links = Vec::new();
    for module in plan.graph.modules() {
        let deps: &[String] = match &module.kind {
            ModuleKind::NativeLibrary(cc) | ModuleKind::AnalyzerBinary(cc) => &cc.shared_libs,
            ModuleKind::ManagedLibrary(java) => &java.static_libs,
            ModuleKind::MemorySafeLibrary(rust) => &rust.rustlibs,
            ModuleKind::SourceGenerator(_) => continue,
        };
        for dep in deps {
            if skipped.contains(dep.as_str()) {
                links.push((module.name.clone(), dep.clone()));
            }
        }
    }
    links
}

/// Plan every interface of `registry`.
pub fn plan(registry: &InterfaceRegistry, config: &GenerateConfig) -> ConfigResult<GenerationPlan> {
    if let Some(j) = config.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(j)
            .build_global()
            .ok(); // Ignore if already set
    }

    let interfaces: Vec<&Interface> = registry.iter().collect();
    tracing::info!("Planning {} interfaces", interfaces.len());

    // Collecting keeps registry (name) order.
    let planned: Vec<ConfigResult<(ModuleGraph, Vec<SkippedRequest>)>> = interfaces
        .par_iter()
        .map(|iface| plan_interface(iface, config))
        .collect();

    let mut result = GenerationPlan::default();
    for planned in planned {
        let (graph, skipped) = planned?;
        result.graph.merge(graph)?;
        result.skipped.extend(skipped);
    }

    check_import_cycles(registry)?;

    let finished = finish_all(registry, &mut result.graph)?;
    for (library, dep) in links_to_skipped(&result) {
        tracing::warn!(
            "{} links {}, which was skipped because its snapshot is empty",
            library,
            dep
        );
    }
    tracing::info!(
        "Planned {} modules ({} libraries finished, {} requests skipped)",
        result.graph.len(),
        finished.len(),
        result.skipped.len()
    );

    Ok(result)
}
