//! C / C++ extractor: loose type-token signatures and `#include` directives

use super::FunctionDef;
use super::brace::extract_braced;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Any run of type-ish tokens (`unsigned int`, `std::vector<T>&`, `char *`)
/// followed by `name(...) {`.
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[\w:*&<>\s]+)\s+(\w+)\s*\([^)]*\)\s*\{").unwrap()
});

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*#include\s+[<"]([\w./]+)[>"]"#).unwrap());

pub fn functions(content: &str) -> Vec<FunctionDef> {
    extract_braced(content, &FUNCTION_RE, 1)
}

pub fn packages(content: &str) -> BTreeSet<String> {
    INCLUDE_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}
