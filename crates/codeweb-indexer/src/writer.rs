//! Graph writer: turns one file's facts into store upserts

use crate::extractor::FileFacts;
use codeweb_core::{GraphStore, StoreError};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, error, info};

/// Which upsert failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WriteOp {
    File,
    Function,
    Package,
    Calls,
    ClearCalls,
}

/// A single failed store write. The batch keeps going after one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFailure {
    pub operation: WriteOp,
    /// What was being written, e.g. `helper in /src/a.py`.
    pub key: String,
    pub reason: String,
}

/// Wraps a store and records, rather than propagates, every failed write.
pub struct GraphWriter<'a, S: GraphStore + ?Sized> {
    store: &'a mut S,
    failures: Vec<WriteFailure>,
}

impl<'a, S: GraphStore + ?Sized> GraphWriter<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        GraphWriter {
            store,
            failures: Vec::new(),
        }
    }

    /// Upsert the File node, then each Function, then each Package.
    /// Returns the number of writes that failed for this file.
    pub fn write_file(
        &mut self,
        path: &Path,
        content: &str,
        facts: &FileFacts,
        project: Option<&str>,
    ) -> usize {
        let before = self.failures.len();

        match self
            .store
            .upsert_file(path, &facts.filename, content, facts.language, project)
        {
            Ok(()) => info!("Created/updated File node: {}", path.display()),
            Err(e) => self.record(WriteOp::File, path.display().to_string(), e),
        }

        for function in &facts.functions {
            match self.store.upsert_function(path, &function.name, &function.code) {
                Ok(()) => debug!("Function node: {} in {}", function.name, path.display()),
                Err(e) => self.record(
                    WriteOp::Function,
                    format!("{} in {}", function.name, path.display()),
                    e,
                ),
            }
        }

        for package in &facts.packages {
            match self.store.upsert_package(path, package) {
                Ok(()) => debug!("Package node: {} for {}", package, path.display()),
                Err(e) => self.record(
                    WriteOp::Package,
                    format!("{} for {}", package, path.display()),
                    e,
                ),
            }
        }

        self.failures.len() - before
    }

    /// Drop the outgoing CALLS edges of `path`. Returns how many were removed.
    pub fn clear_calls(&mut self, path: &Path) -> usize {
        match self.store.clear_calls_from(path) {
            Ok(removed) => removed,
            Err(e) => {
                self.record(WriteOp::ClearCalls, path.display().to_string(), e);
                0
            }
        }
    }

    /// Merge one CALLS edge. Returns false when the write failed.
    pub fn write_call(&mut self, from: &Path, to: &Path, function: &str) -> bool {
        match self.store.merge_calls(from, to, function) {
            Ok(()) => {
                debug!(
                    "CALLS {} -> {} for function {}",
                    from.display(),
                    to.display(),
                    function
                );
                true
            }
            Err(e) => {
                self.record(
                    WriteOp::Calls,
                    format!("{} -> {} ({})", from.display(), to.display(), function),
                    e,
                );
                false
            }
        }
    }

    fn record(&mut self, operation: WriteOp, key: String, err: StoreError) {
        error!("Error writing {:?} {}: {}", operation, key, err);
        self.failures.push(WriteFailure {
            operation,
            key,
            reason: err.to_string(),
        });
    }

    pub fn into_failures(self) -> Vec<WriteFailure> {
        self.failures
    }
}
