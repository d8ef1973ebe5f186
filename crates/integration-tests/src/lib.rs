//! Integration tests for Wildflour.
//!
//! These tests exercise the file-backed persistence path end to end: stores
//! are opened over real directories, mutated, dropped, and reopened.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wildflour-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart round trips and fallback behavior
//! - `favorites_persistence` - Favorites round trips, timestamps, ordering

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A unique state directory under the system temp dir, removed on drop.
pub struct TempStateDir {
    path: PathBuf,
}

impl TempStateDir {
    /// Create a fresh directory for one test.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("wildflour-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("failed to create temp state dir");
        Self { path }
    }

    /// Path to the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TempStateDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempStateDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
