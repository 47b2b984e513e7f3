//! Import configuration
//!
//! Resolution order, highest priority first:
//! 1. Environment variables (`CODEWEB_*`, `.env` loaded through dotenvy)
//! 2. `codeweb.toml`
//! 3. Compiled defaults

use anyhow::{Context, Result};
use codeweb_core::graph_cache_path;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "codeweb.toml";

pub const ENV_STORE: &str = "CODEWEB_STORE";
pub const ENV_PROJECT: &str = "CODEWEB_PROJECT";
pub const ENV_LOG: &str = "CODEWEB_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Where the graph snapshot lives.
    pub store_path: PathBuf,
    /// Project that imported files are attached to.
    pub project: Option<String>,
    pub log_level: String,
    /// Skip files whose extension maps to no known language.
    pub supported_only: bool,
    /// Glob patterns left out of directory walks.
    pub exclude: Vec<String>,
    pub include_hidden: bool,
    /// Extract files on the rayon pool before writing.
    pub parallel: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            store_path: graph_cache_path(Path::new(".")),
            project: None,
            log_level: "info".to_string(),
            supported_only: false,
            exclude: Vec::new(),
            include_hidden: false,
            parallel: true,
        }
    }
}

impl ImportConfig {
    /// Load `path` (or `codeweb.toml` in the working directory) and apply
    /// environment overrides. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = path.unwrap_or(Path::new(CONFIG_FILE));
        let mut config = if path.is_file() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            Self::from_toml(&content)
                .with_context(|| format!("Invalid config {}", path.display()))?
        } else {
            debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `CODEWEB_*` overrides from `lookup`. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(store) = lookup(ENV_STORE) {
            self.store_path = PathBuf::from(store);
        }
        if let Some(project) = lookup(ENV_PROJECT) {
            self.project = Some(project);
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level;
        }
    }

    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern)
                .with_context(|| format!("Invalid exclude pattern '{}'", pattern))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}
