//! Signature-then-braces function scanner shared by the C-family strategies

use super::FunctionDef;
use regex::Regex;

/// Find every match of `signature` and extend it to the brace that closes the
/// `{` the signature ends on. `name_group` is the capture holding the function
/// name.
///
/// Matches are taken from the whole text, so a signature nested inside an
/// earlier body is reported too. When the text ends before the braces balance,
/// the span runs to the end of the text.
pub fn extract_braced(content: &str, signature: &Regex, name_group: usize) -> Vec<FunctionDef> {
    let mut functions = Vec::new();
    for caps in signature.captures_iter(content) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(name_group)) else {
            continue;
        };
        let open = whole.end() - 1;
        functions.push(FunctionDef {
            name: name.as_str().to_string(),
            code: braced_span(content, whole.start(), open).to_string(),
        });
    }
    functions
}

/// Text from `start` through the `}` matching the `{` at byte `open`.
pub fn braced_span(content: &str, start: usize, open: usize) -> &str {
    // Braces are ASCII, so byte positions right after one are char boundaries.
    let bytes = content.as_bytes();
    let mut depth = 1usize;
    let mut i = open;
    while depth > 0 {
        i += 1;
        if i >= bytes.len() {
            return &content[start..];
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
    }
    &content[start..=i]
}
