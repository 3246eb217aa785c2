//! [`PluginTree`] builder for plugin source directories.

use std::fs;
use std::path::{Path, PathBuf};

use carcass_meta::PluginReference;
use tempfile::TempDir;

/// A temporary directory of plugin jars and data folders.
///
/// # Example
///
/// ```rust,no_run
/// use carcass_test_utils::PluginTree;
///
/// let tree = PluginTree::new();
/// tree.file("jars/worldedit-7.2.jar", "we").dir("data/WorldEdit");
/// let pattern = tree.reference("jars/worldedit*");
/// ```
pub struct PluginTree {
    temp_dir: TempDir,
}

impl Default for PluginTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginTree {
    /// Create an empty temporary directory.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new()
                .unwrap_or_else(|e| panic!("PluginTree::new: failed to create temp dir: {e}")),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file, creating parent directories.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("PluginTree::file: {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("PluginTree::file: {}: {e}", path.display()));
        self
    }

    /// Create a directory and its parents.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn dir(&self, relative: &str) -> &Self {
        let path = self.path(relative);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("PluginTree::dir: {}: {e}", path.display()));
        self
    }

    /// A plugin reference to `relative`, written as an absolute path.
    pub fn reference(&self, relative: &str) -> PluginReference {
        let root = self.root().to_string_lossy().replace('\\', "/");
        PluginReference::new(format!("{}/{relative}", root.trim_end_matches('/')))
    }
}
