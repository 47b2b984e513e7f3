//! Batch-scoped extraction cache

use crate::extractor::FileFacts;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Facts for every file imported in the current batch, keyed by path.
/// Ordered so the linking pass visits files deterministically.
#[derive(Debug, Clone, Default)]
pub struct ExtractionCache {
    files: BTreeMap<PathBuf, FileFacts>,
}

impl ExtractionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the facts for `path`, replacing an earlier import of the same path.
    pub fn insert(&mut self, path: PathBuf, facts: FileFacts) -> Option<FileFacts> {
        self.files.insert(path, facts)
    }

    pub fn get(&self, path: &Path) -> Option<&FileFacts> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &FileFacts)> {
        self.files.iter().map(|(p, f)| (p.as_path(), f))
    }
}
