//! Library generation.
//!
//! This module turns (interface, version, backend) requests into modules of a
//! build graph and completes implementation libraries once every import
//! version is known.

pub mod backends;
pub mod dispatch;
pub mod finish;
pub mod graph;
pub mod module;
pub mod plan;
pub mod sources;

pub use backends::{Assembler, BackendRequest};
pub use dispatch::Dispatcher;
pub use finish::{finish_all, finish_placeholder};
pub use graph::{BuildGraph, ImplementationState, ModuleGraph};
pub use module::{ModuleId, ModuleKind, ModuleSpec, Placeholder};
pub use plan::{plan, GenerationPlan, SkippedRequest};
pub use sources::{SelectedSources, SourceSelector};
