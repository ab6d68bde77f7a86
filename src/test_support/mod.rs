//! Test utilities for versioned-idl unit tests.
//!
//! Provides interface fixtures and an on-disk snapshot tree for tests that
//! exercise source selection.
//!
//! # Example
//!
//! ```rust,ignore
//! use versioned_idl::test_support::{stable_interface, SnapshotTree};
//!
//! #[test]
//! fn test_example() {
//!     let tree = SnapshotTree::new();
//!     tree.add_file("aidl_api/foo/1/IFoo.aidl");
//!
//!     let mut foo = stable_interface("foo", &["1"]);
//!     foo.module_dir = tree.root().to_path_buf();
//! }
//! ```

pub mod fixtures;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

// Re-export fixtures for convenience
pub use fixtures::*;

/// A temporary module directory with snapshot files.
#[derive(Debug)]
pub struct SnapshotTree {
    dir: TempDir,
}

impl SnapshotTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        SnapshotTree {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Root of the tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Add an interface file (and its parent directories).
    pub fn add_file(&self, rel: impl AsRef<Path>) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create dir");
        }
        fs::write(&path, "interface Placeholder {}\n").expect("failed to write file");
    }

    /// Add an empty directory.
    pub fn add_dir(&self, rel: impl AsRef<Path>) {
        fs::create_dir_all(self.root().join(rel)).expect("failed to create dir");
    }
}

impl Default for SnapshotTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_tree() {
        let tree = SnapshotTree::new();
        tree.add_file("aidl_api/foo/1/IFoo.aidl");
        tree.add_dir("aidl_api/foo/2");

        assert!(tree.root().join("aidl_api/foo/1/IFoo.aidl").is_file());
        assert!(tree.root().join("aidl_api/foo/2").is_dir());
    }
}
