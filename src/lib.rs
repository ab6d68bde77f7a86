//! versioned-idl - Build-graph generation for versioned interface libraries
//!
//! This crate turns a set of interface declarations into the source-generation
//! modules and per-language libraries a build system needs, one set per
//! frozen or in-development version, with imports pinned to matching
//! versions of the interfaces they depend on.

pub mod builder;
pub mod core;
pub mod errors;
pub mod util;

/// Test utilities for versioned-idl unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides interface fixtures and temporary snapshot
/// trees.
#[cfg(test)]
pub mod test_support;

pub use builder::{plan, GenerationPlan, ModuleGraph};
pub use core::{Backend, Interface, InterfaceRegistry};
pub use errors::{ConfigError, ConfigResult};
