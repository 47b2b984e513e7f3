//! Per-file extraction: language, functions, packages and call candidates

use crate::calls::extract_calls;
use crate::languages::{FunctionDef, extract_functions, extract_packages};
use codeweb_core::Language;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Everything extracted from one file. Pure data; computing it touches
/// neither the filesystem nor the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFacts {
    pub filename: String,
    pub language: Language,
    pub functions: Vec<FunctionDef>,
    /// Names called in this file that it does not define itself.
    pub calls: BTreeSet<String>,
    pub packages: BTreeSet<String>,
}

impl FileFacts {
    pub fn extract(path: &Path, content: &str) -> Self {
        let language = Language::from_path(path);
        let functions = extract_functions(content, language);
        let packages = extract_packages(content, language);
        let defined: HashSet<&str> = functions.iter().map(|f| f.name.as_str()).collect();
        let calls = extract_calls(content, &defined);

        FileFacts {
            filename: file_name(path),
            language,
            functions,
            calls,
            packages,
        }
    }

    pub fn defines(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f.name == name)
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.name.as_str())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
