//! Generic fallback extractor for languages without a dedicated strategy

use super::FunctionDef;
use super::brace::extract_braced;
use super::javascript::FUNCTION_RE;

/// Only `function name(...) {` declarations are recognized, which covers PHP
/// and nothing in Ruby or Go.
pub fn functions(content: &str) -> Vec<FunctionDef> {
    extract_braced(content, &FUNCTION_RE, 1)
}
