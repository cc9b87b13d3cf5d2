//! Temporary directory trees of settings files.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use testbed_settings::DEFAULT_SETTINGS_FILE_NAME;

/// A temporary project tree with settings files at chosen depths.
pub struct SettingsTree {
    pub root: TempDir,
    file_name: String,
}

impl SettingsTree {
    /// Create an empty tree using the default settings file name.
    pub fn new() -> Self {
        Self::with_file_name(DEFAULT_SETTINGS_FILE_NAME)
    }

    /// Create an empty tree whose settings files use `file_name`.
    pub fn with_file_name(file_name: &str) -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
            file_name: file_name.to_string(),
        }
    }

    /// Get the tree root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// The settings file name used by this tree.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Create (if needed) and return the directory at `rel`, relative to the root.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let dir = self.path().join(rel);
        fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Write a settings file into the directory at `rel`.
    ///
    /// # Arguments
    /// * `rel` - Directory relative to the root ("" for the root itself)
    /// * `contents` - Properties text
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir(rel).join(&self.file_name);
        fs::write(&path, contents).expect("Failed to write settings file");
        path
    }
}

impl Default for SettingsTree {
    fn default() -> Self {
        Self::new()
    }
}
