//! C# extractor: access-modified method signatures and `using` directives

use super::FunctionDef;
use super::brace::extract_braced;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// `public|private|protected [static] <type> name(...) {`
pub(super) static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(public|private|protected)\s+(static\s+)?\S+\s+(\w+)\s*\([^)]*\)\s*\{").unwrap()
});

static USING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*using\s+([\w.]+)\s*;").unwrap());

pub fn functions(content: &str) -> Vec<FunctionDef> {
    extract_braced(content, &METHOD_RE, 3)
}

pub fn packages(content: &str) -> BTreeSet<String> {
    USING_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}
