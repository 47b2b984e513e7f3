//! Source extraction, graph writing and cross-file linking

pub mod cache;
pub mod calls;
pub mod config;
pub mod extractor;
pub mod importer;
pub mod languages;
pub mod linker;
pub mod symbols;
pub mod writer;

#[cfg(test)]
pub mod test_utils;

pub use cache::ExtractionCache;
pub use config::{CONFIG_FILE, ImportConfig};
pub use extractor::FileFacts;
pub use importer::{ImportReport, Importer, SkippedFile};
pub use languages::{FunctionDef, extract_functions, extract_packages};
pub use linker::{LinkReport, link};
pub use symbols::SymbolIndex;
pub use writer::{GraphWriter, WriteFailure, WriteOp};
