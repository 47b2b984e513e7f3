//! Import orchestration: read, extract, write, cache, link

use crate::cache::ExtractionCache;
use crate::config::ImportConfig;
use crate::extractor::FileFacts;
use crate::linker::{LinkReport, link};
use crate::writer::{GraphWriter, WriteFailure};
use anyhow::{Context, Result};
use codeweb_core::{GraphStore, Language};
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one directory import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedFile>,
    pub write_failures: Vec<WriteFailure>,
    pub link: LinkReport,
}

impl ImportReport {
    /// True when every file was read and every write landed.
    pub fn is_clean(&self) -> bool {
        self.write_failures.is_empty() && self.link.failures.is_empty()
    }
}

/// Drives one import batch against a store.
///
/// The extraction cache lives exactly as long as the importer; linking sees
/// every file imported through it so far.
pub struct Importer<'s, S: GraphStore + ?Sized> {
    store: &'s mut S,
    config: ImportConfig,
    project: Option<String>,
    cache: ExtractionCache,
    failures: Vec<WriteFailure>,
}

impl<'s, S: GraphStore + ?Sized> Importer<'s, S> {
    pub fn new(store: &'s mut S, config: ImportConfig) -> Self {
        Importer {
            store,
            config,
            project: None,
            cache: ExtractionCache::new(),
            failures: Vec::new(),
        }
    }

    /// Merge the Project node and attach every later import to it.
    pub fn set_project(&mut self, name: &str) -> Result<()> {
        self.store
            .merge_project(name)
            .with_context(|| format!("Failed to create project '{}'", name))?;
        info!("Project set to {}", name);
        self.project = Some(name.to_string());
        Ok(())
    }

    /// Read and import one file. Returns the key the file was stored under.
    pub fn import_file(&mut self, path: &Path) -> Result<PathBuf> {
        self.store.verify().context("Graph store unavailable")?;

        let content = read_source(path).inspect_err(|e| error!("{:#}", e))?;
        let key = canonical_key(path);
        self.import_source(&key, &content);
        Ok(key)
    }

    /// Import text that is already in memory. Only the extension of `path`
    /// matters for extraction. Returns the number of failed writes.
    pub fn import_source(&mut self, path: &Path, content: &str) -> usize {
        let facts = FileFacts::extract(path, content);
        self.store_facts(path.to_path_buf(), content, facts)
    }

    /// Import every file under `dir`, then link the whole batch once.
    pub fn import_directory(&mut self, dir: &Path) -> Result<ImportReport> {
        self.store.verify().context("Graph store unavailable")?;
        anyhow::ensure!(dir.is_dir(), "Not a directory: {}", dir.display());

        let mut report = ImportReport::default();
        let paths = self.collect_files(dir, &mut report.skipped)?;
        info!("Found {} files under {}", paths.len(), dir.display());

        let loaded: Vec<(PathBuf, Result<(String, FileFacts)>)> = if self.config.parallel {
            paths.par_iter().map(|p| load(p)).collect()
        } else {
            paths.iter().map(|p| load(p)).collect()
        };

        for (path, outcome) in loaded {
            match outcome {
                Ok((content, facts)) => {
                    self.store_facts(path, &content, facts);
                    report.imported += 1;
                }
                Err(e) => {
                    error!("Error processing file {}: {:#}", path.display(), e);
                    report.skipped.push(SkippedFile {
                        path,
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        report.link = self.link();
        report.write_failures = std::mem::take(&mut self.failures);

        info!(
            "Imported {} files ({} skipped, {} write failures)",
            report.imported,
            report.skipped.len(),
            report.write_failures.len()
        );
        Ok(report)
    }

    /// Recompute CALLS edges over everything imported so far.
    pub fn link(&mut self) -> LinkReport {
        link(&mut *self.store, &self.cache)
    }

    /// Write failures since the last directory import.
    pub fn failures(&self) -> &[WriteFailure] {
        &self.failures
    }

    pub fn cache(&self) -> &ExtractionCache {
        &self.cache
    }

    pub fn into_cache(self) -> ExtractionCache {
        self.cache
    }

    fn store_facts(&mut self, path: PathBuf, content: &str, facts: FileFacts) -> usize {
        debug!(
            "{}: {} ({} functions, {} packages, {} calls)",
            path.display(),
            facts.language,
            facts.functions.len(),
            facts.packages.len(),
            facts.calls.len()
        );

        let mut writer = GraphWriter::new(&mut *self.store);
        let failed = writer.write_file(&path, content, &facts, self.project.as_deref());
        self.failures.extend(writer.into_failures());

        self.cache.insert(path, facts);
        failed
    }

    fn collect_files(&self, dir: &Path, skipped: &mut Vec<SkippedFile>) -> Result<Vec<PathBuf>> {
        let excludes = self.config.exclude_set()?;
        let mut files = Vec::new();

        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .hidden(!self.config.include_hidden)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                continue;
            }
            if !path.is_file() {
                warn!("Skipping non-file: {}", path.display());
                skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: "not a regular file".to_string(),
                });
                continue;
            }

            let relative = path.strip_prefix(dir).unwrap_or(path);
            if excludes.is_match(relative) {
                debug!("Excluded: {}", relative.display());
                continue;
            }
            if self.config.supported_only && !Language::from_path(path).is_supported() {
                debug!("Unsupported extension: {}", relative.display());
                continue;
            }

            files.push(canonical_key(path));
        }

        Ok(files)
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load(path: &Path) -> (PathBuf, Result<(String, FileFacts)>) {
    let outcome = read_source(path).map(|content| {
        let facts = FileFacts::extract(path, &content);
        (content, facts)
    });
    (path.to_path_buf(), outcome)
}

/// Canonical path when it resolves, the given path otherwise.
fn canonical_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
