//! Java extractor: access-modified method signatures and `import` statements

use super::FunctionDef;
use super::brace::extract_braced;
use super::csharp::METHOD_RE;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s+([\w.]+)\s*;").unwrap());

/// Java and C# share the same modifier grammar.
pub fn functions(content: &str) -> Vec<FunctionDef> {
    extract_braced(content, &METHOD_RE, 3)
}

/// Fully qualified names from single-type imports; wildcard and static
/// imports do not match.
pub fn packages(content: &str) -> BTreeSet<String> {
    IMPORT_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}
