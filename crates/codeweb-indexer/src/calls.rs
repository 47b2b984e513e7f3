//! Language-agnostic call-site scanner

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\s*\(").unwrap());

/// Every word directly followed by `(`, minus the names defined in the same
/// file. Keywords such as `if` and `while` are reported like any other name.
pub fn extract_calls(content: &str, defined: &HashSet<&str>) -> BTreeSet<String> {
    CALL_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !defined.contains(name))
        .map(str::to_string)
        .collect()
}
