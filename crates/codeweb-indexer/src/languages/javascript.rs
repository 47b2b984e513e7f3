//! JavaScript / TypeScript extractor: `function name(...) {` declarations,
//! ES imports and `require` calls
//!
//! Arrow functions, class methods and function expressions assigned to a
//! variable are not recognized.

use super::FunctionDef;
use super::brace::extract_braced;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub(super) static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+(\w+)\s*\([^)]*\)\s*\{").unwrap());

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+.*\s+from\s+['"]([\w/.-]+)['"]"#).unwrap()
});

static REQUIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\(['"]([\w/.-]+)['"]\)"#).unwrap());

pub fn functions(content: &str) -> Vec<FunctionDef> {
    extract_braced(content, &FUNCTION_RE, 1)
}

pub fn packages(content: &str) -> BTreeSet<String> {
    IMPORT_RE
        .captures_iter(content)
        .chain(REQUIRE_RE.captures_iter(content))
        .map(|caps| caps[1].to_string())
        .collect()
}
