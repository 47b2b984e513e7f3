//! Cross-file linking: CALLS edges between files

use crate::cache::ExtractionCache;
use crate::symbols::SymbolIndex;
use crate::writer::{GraphWriter, WriteFailure};
use codeweb_core::GraphStore;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    /// Files in the batch the pass ran over.
    pub files: usize,
    /// Stale CALLS edges removed before relinking.
    pub cleared: usize,
    pub linked: usize,
    pub failures: Vec<WriteFailure>,
}

/// Recompute CALLS edges for every file in `cache`.
///
/// Outgoing CALLS of each cached file are dropped first, then for each call
/// candidate an edge is merged to every *other* file defining that name. A
/// name defined in several files links to all of them.
pub fn link<S: GraphStore + ?Sized>(store: &mut S, cache: &ExtractionCache) -> LinkReport {
    let index = SymbolIndex::build(cache);
    let mut writer = GraphWriter::new(store);
    let mut report = LinkReport {
        files: cache.len(),
        ..LinkReport::default()
    };

    for path in cache.paths() {
        report.cleared += writer.clear_calls(path);
    }

    for (from, facts) in cache.iter() {
        for name in &facts.calls {
            for to in index.lookup(name).filter(|&to| to != from) {
                if writer.write_call(from, to, name) {
                    report.linked += 1;
                }
            }
        }
    }

    report.failures = writer.into_failures();
    info!(
        "Linked {} files: {} CALLS edges ({} stale removed, {} failed)",
        report.files,
        report.linked,
        report.cleared,
        report.failures.len()
    );
    report
}
