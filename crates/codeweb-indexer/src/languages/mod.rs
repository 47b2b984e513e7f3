//! Per-language function and dependency extraction
//!
//! Every strategy is a pure function over raw text: a regex finds where a
//! definition starts, then indentation or brace depth decides where it ends.
//! Nothing here fails; text a strategy cannot make sense of yields fewer
//! results.

pub mod brace;
pub mod c;
pub mod csharp;
pub mod generic;
pub mod java;
pub mod javascript;
pub mod python;

use codeweb_core::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A function found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    /// Exact source text from the start of the signature match to the end of the body.
    pub code: String,
}

/// Functions defined in `content`, in source order.
pub fn extract_functions(content: &str, language: Language) -> Vec<FunctionDef> {
    match language {
        Language::Python => python::functions(content),
        Language::CSharp => csharp::functions(content),
        Language::Java => java::functions(content),
        Language::JavaScript | Language::TypeScript => javascript::functions(content),
        Language::Cpp | Language::C | Language::CHeader => c::functions(content),
        Language::Ruby | Language::Go | Language::Php | Language::Unknown => {
            generic::functions(content)
        }
    }
}

/// Packages, modules or headers `content` refers to.
pub fn extract_packages(content: &str, language: Language) -> BTreeSet<String> {
    match language {
        Language::Python => python::packages(content),
        Language::CSharp => csharp::packages(content),
        Language::Java => java::packages(content),
        Language::JavaScript | Language::TypeScript => javascript::packages(content),
        Language::Cpp | Language::C | Language::CHeader => c::packages(content),
        Language::Ruby | Language::Go | Language::Php | Language::Unknown => BTreeSet::new(),
    }
}
