//! The narrow interface the extraction engine writes through.
//!
//! Every write is merge-by-key: create the node or relationship when absent,
//! update its attributes when present. Nothing here retries; callers decide
//! whether a failure is worth logging, retrying or aborting for.

use std::path::Path;

use crate::error::StoreResult;
use crate::model::Language;

pub trait GraphStore {
    /// Check the store is reachable before a batch starts.
    fn verify(&self) -> StoreResult<()>;

    /// Create the Project node if it does not exist yet.
    fn merge_project(&mut self, name: &str) -> StoreResult<()>;

    /// Create or update a File node. When `project` names an existing
    /// Project, a CONTAINS_FILE relationship is merged as well.
    fn upsert_file(
        &mut self,
        path: &Path,
        filename: &str,
        content: &str,
        language: Language,
        project: Option<&str>,
    ) -> StoreResult<()>;

    /// Create or update a Function owned by an existing File. The stored code
    /// is replaced on every call.
    fn upsert_function(&mut self, file: &Path, name: &str, code: &str) -> StoreResult<()>;

    /// Merge a global Package node and the USES_PACKAGE link from `file`.
    fn upsert_package(&mut self, file: &Path, name: &str) -> StoreResult<()>;

    /// Merge a CALLS edge between two existing files, keyed by function name.
    fn merge_calls(&mut self, from: &Path, to: &Path, function: &str) -> StoreResult<()>;

    /// Drop every outgoing CALLS edge of `file`. Returns how many were removed.
    fn clear_calls_from(&mut self, file: &Path) -> StoreResult<usize>;

    /// Names of all projects.
    fn list_projects(&self) -> StoreResult<Vec<String>>;

    /// Contents of every file in a project, separated by a blank line.
    /// `None` when the project is unknown or has no files.
    fn project_code(&self, name: &str) -> StoreResult<Option<String>>;

    /// Remove a project together with the files it contains.
    fn delete_project(&mut self, name: &str) -> StoreResult<()>;

    /// Remove every node and relationship.
    fn delete_all(&mut self) -> StoreResult<()>;
}
