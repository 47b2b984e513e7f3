//! Symbol index for cross-file resolution

use crate::cache::ExtractionCache;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Maps a function name to every file in the batch that defines it.
pub struct SymbolIndex<'a> {
    definitions: BTreeMap<&'a str, BTreeSet<&'a Path>>,
}

impl<'a> SymbolIndex<'a> {
    pub fn build(cache: &'a ExtractionCache) -> Self {
        let mut definitions: BTreeMap<&str, BTreeSet<&Path>> = BTreeMap::new();
        for (path, facts) in cache.iter() {
            for name in facts.function_names() {
                definitions.entry(name).or_default().insert(path);
            }
        }
        SymbolIndex { definitions }
    }

    /// Files defining `name`, sorted. Empty when nothing defines it.
    pub fn lookup(&self, name: &str) -> impl Iterator<Item = &'a Path> + '_ {
        self.definitions
            .get(name)
            .into_iter()
            .flat_map(|files| files.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
