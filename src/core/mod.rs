//! Core data structures for versioned-idl.
//!
//! This module contains the foundational types:
//! - Interface declarations and their registry
//! - Version arithmetic
//! - Import resolution

pub mod backend;
pub mod import;
pub mod interface;
pub mod registry;
pub mod version;

pub use backend::Backend;
pub use import::{check_import_cycles, imports_with_version, resolve_import, resolve_imports};
pub use interface::Interface;
pub use registry::{InterfaceRegistry, INTERFACES_MANIFEST};
pub use version::UNVERSIONED;
