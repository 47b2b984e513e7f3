//! Fixtures for indexer tests

use codeweb_core::{GraphStore, Language, MemoryGraph, StoreError, StoreResult};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Two Python files where `b.py` calls a helper defined in `a.py`.
pub fn create_demo_repo() -> TempDir {
    create_repo_with_structure(&[
        ("a.py", "def helper(): return 1\n"),
        ("b.py", "def run(): return helper()\n"),
    ])
}

/// A mixed-language tree with a hidden file, a nested directory and an
/// extension no extractor knows about.
pub fn create_mixed_repo() -> TempDir {
    create_repo_with_structure(&[
        (
            "app/main.py",
            r#"import os
from utils import tools

def main():
    total = add(1, 2)
    print(total)
"#,
        ),
        (
            "app/Calc.java",
            r#"import java.util.List;

public class Calc {
    public static int add(int a, int b) {
        return a + b;
    }
}
"#,
        ),
        (
            "web/index.js",
            r#"const fs = require('fs');

function render(items) {
    for (const item of items) {
        console.log(item);
    }
}
"#,
        ),
        (
            "native/util.c",
            r#"#include <stdio.h>

int add(int a, int b) {
    return a + b;
}
"#,
        ),
        ("notes.xyz", "nothing to see here\n"),
        (".hidden.py", "def secret():\n    return 42\n"),
    ])
}

/// Create a repository with a specific file structure
pub fn create_repo_with_structure(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = tempfile::Builder::new()
        .prefix("codeweb-test")
        .tempdir()
        .unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

/// Store wrapper that rejects writes touching a named function or package,
/// and optionally every CALLS edge.
pub struct FlakyStore {
    pub inner: MemoryGraph,
    pub reject: Vec<String>,
    pub reject_calls: bool,
    pub unavailable: bool,
}

impl FlakyStore {
    pub fn rejecting(names: &[&str]) -> Self {
        FlakyStore {
            inner: MemoryGraph::new(),
            reject: names.iter().map(|n| n.to_string()).collect(),
            reject_calls: false,
            unavailable: false,
        }
    }

    fn check(&self, name: &str) -> StoreResult<()> {
        if self.reject.iter().any(|r| r == name) {
            return Err(StoreError::Unavailable(format!("rejected {}", name)));
        }
        Ok(())
    }
}

impl GraphStore for FlakyStore {
    fn verify(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable("store offline".into()));
        }
        Ok(())
    }

    fn merge_project(&mut self, name: &str) -> StoreResult<()> {
        self.inner.merge_project(name)
    }

    fn upsert_file(
        &mut self,
        path: &Path,
        filename: &str,
        content: &str,
        language: Language,
        project: Option<&str>,
    ) -> StoreResult<()> {
        self.inner.upsert_file(path, filename, content, language, project)
    }

    fn upsert_function(&mut self, file: &Path, name: &str, code: &str) -> StoreResult<()> {
        self.check(name)?;
        self.inner.upsert_function(file, name, code)
    }

    fn upsert_package(&mut self, file: &Path, name: &str) -> StoreResult<()> {
        self.check(name)?;
        self.inner.upsert_package(file, name)
    }

    fn merge_calls(&mut self, from: &Path, to: &Path, function: &str) -> StoreResult<()> {
        if self.reject_calls {
            return Err(StoreError::Unavailable("calls rejected".into()));
        }
        self.inner.merge_calls(from, to, function)
    }

    fn clear_calls_from(&mut self, file: &Path) -> StoreResult<usize> {
        self.inner.clear_calls_from(file)
    }

    fn list_projects(&self) -> StoreResult<Vec<String>> {
        self.inner.list_projects()
    }

    fn project_code(&self, name: &str) -> StoreResult<Option<String>> {
        self.inner.project_code(name)
    }

    fn delete_project(&mut self, name: &str) -> StoreResult<()> {
        self.inner.delete_project(name)
    }

    fn delete_all(&mut self) -> StoreResult<()> {
        self.inner.delete_all()
    }
}
