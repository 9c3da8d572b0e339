//! Core types for the generation domain

use std::path::{Path, PathBuf};

use super::naming::DEFAULT_GROUP;

/// File name of the interface declarations of a module
pub const TYPES_FILE: &str = "types.ts";
/// File name of the request functions of a module
pub const INDEX_FILE: &str = "index.ts";

/// A named interface declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInterface {
    pub name: String,
    pub body: String,
}

/// Generated text of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Group key, `/`-separated
    pub key: String,
    pub types_file: String,
    pub index_file: String,
}

impl GeneratedModule {
    /// Directory of the module below the output root.
    ///
    /// Empty, `.` and `..` segments are dropped so a key taken from a tag or
    /// a mapping can never leave the output root.
    pub fn relative_dir(&self) -> PathBuf {
        let dir: PathBuf = self
            .key
            .split(['/', '\\'])
            .filter(|segment| !matches!(*segment, "" | "." | ".."))
            .collect();
        if dir.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_GROUP)
        } else {
            dir
        }
    }

    /// Files to write under `base_dir`. An empty types file is skipped.
    pub fn artifacts(&self, base_dir: &Path) -> Vec<Artifact> {
        let dir = base_dir.join(self.relative_dir());
        let mut artifacts = Vec::with_capacity(2);
        if !self.types_file.trim().is_empty() {
            artifacts.push(Artifact {
                path: dir.join(TYPES_FILE),
                content: self.types_file.clone(),
            });
        }
        artifacts.push(Artifact {
            path: dir.join(INDEX_FILE),
            content: self.index_file.clone(),
        });
        artifacts
    }
}

/// A file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}
