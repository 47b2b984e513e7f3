//! Python extractor: indentation-tracked functions and import statements

use super::FunctionDef;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static DEF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^def\s+(\w+)\s*\(").unwrap());

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s+(\w+)").unwrap());

static FROM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*from\s+(\w+)").unwrap());

/// Leading whitespace in characters, not bytes.
fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Functions opened by a `def name(` line. The body is every following line
/// indented deeper than the `def`; blank lines never end a body. Nested
/// definitions are part of their parent's body and are not reported.
pub fn functions(content: &str) -> Vec<FunctionDef> {
    let lines: Vec<&str> = content.lines().collect();
    let mut functions = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let stripped = line.trim_start();
        if !stripped.starts_with("def ") {
            i += 1;
            continue;
        }
        let Some(caps) = DEF_RE.captures(stripped) else {
            i += 1;
            continue;
        };

        let base_indent = indent_of(line);
        let mut body = vec![line];
        i += 1;
        while i < lines.len() {
            let next = lines[i];
            if next.trim().is_empty() || indent_of(next) > base_indent {
                body.push(next);
                i += 1;
            } else {
                break;
            }
        }

        functions.push(FunctionDef {
            name: caps[1].to_string(),
            code: body.join("\n"),
        });
    }

    functions
}

/// Top-level module of every `import x` and `from x ...` line.
pub fn packages(content: &str) -> BTreeSet<String> {
    IMPORT_RE
        .captures_iter(content)
        .chain(FROM_RE.captures_iter(content))
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_ends_at_baseline() {
        let code = "def greet(name):\n    if name:\n        msg = 'hi ' + name\n        print(msg)\n    return name\nprint(greet('x'))\n";

        let functions = functions(code);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "greet");
        assert_eq!(functions[0].code.lines().count(), 5);
        assert!(functions[0].code.ends_with("    return name"));
    }

    #[test]
    fn test_blank_lines_stay_in_body() {
        let code = "def a():\n    x = 1\n\n    return x\ndef b():\n    pass";

        let functions = functions(code);
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].code, "def a():\n    x = 1\n\n    return x");
        assert_eq!(functions[1].code, "def b():\n    pass");
    }

    #[test]
    fn test_methods_and_nested_defs() {
        let code = "class User:\n    def __init__(self):\n        def inner():\n            pass\n        self.x = 1\n\n    def save(self):\n        pass\n";

        let names: Vec<_> = functions(code).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["__init__", "save"]);
    }

    #[test]
    fn test_malformed_def_is_skipped() {
        let code = "def (broken):\n    pass\ndef ok():\n    return 1\n";

        let functions = functions(code);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "ok");
    }

    #[test]
    fn test_single_line_def() {
        let functions = functions("def helper(): return 1");
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].code, "def helper(): return 1");
    }

    #[test]
    fn test_wide_whitespace_counts_as_one_column() {
        // U+3000 is three bytes but one column, so it does not out-indent two spaces.
        let code = "  def f():\n\u{3000}x = 1\n  def g():\n      return 2\n";

        let functions = functions(code);
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].code, "  def f():");
        assert_eq!(functions[1].code, "  def g():\n      return 2");
    }

    #[test]
    fn test_packages() {
        let code = "import os\nimport numpy as np\nfrom collections import deque\n  from os.path import join\nx = 'import fake'\n";

        let packages = packages(code);
        let expected: BTreeSet<String> = ["collections", "numpy", "os"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(packages, expected);
    }
}
