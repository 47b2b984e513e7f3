//! Snapshot persistence for the graph store

use crate::error::{StoreError, StoreResult};
use crate::graph::MemoryGraph;
use crate::model::{GraphEdge, GraphNode, NodeKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cache directory: .codeweb/
pub const CACHE_DIR: &str = ".codeweb";

/// Graph snapshot file
pub const GRAPH_CACHE: &str = "graph.json";

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Get cache directory path
pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(CACHE_DIR)
}

/// Get graph snapshot file path
pub fn graph_cache_path(root: &Path) -> PathBuf {
    cache_dir(root).join(GRAPH_CACHE)
}

/// Serialized form of a [`MemoryGraph`]. Edges refer to nodes by key so the
/// snapshot does not depend on petgraph indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub version: u32,
    pub saved_at: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: NodeKey,
    pub target: NodeKey,
    pub edge: GraphEdge,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<SnapshotEdge>) -> Self {
        GraphSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            nodes,
            edges,
        }
    }
}

/// Write the graph to `path`, creating parent directories as needed.
/// The file is replaced atomically.
pub fn save_graph(graph: &MemoryGraph, path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json_str = serde_json::to_string(&graph.to_snapshot())?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json_str)?;
    std::fs::rename(&tmp, path)?;

    tracing::debug!("Graph snapshot saved: {}", path.display());
    Ok(())
}

/// Load a graph from `path`. `Ok(None)` when no snapshot exists yet.
pub fn load_graph(path: &Path) -> StoreResult<Option<MemoryGraph>> {
    if !path.exists() {
        return Ok(None);
    }

    let json_str = std::fs::read_to_string(path)?;
    let snapshot: GraphSnapshot = serde_json::from_str(&json_str)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StoreError::Unavailable(format!(
            "snapshot {} has version {}, expected {}",
            path.display(),
            snapshot.version,
            SNAPSHOT_VERSION
        )));
    }

    tracing::debug!(
        "Graph snapshot loaded from {} (saved {})",
        path.display(),
        snapshot.saved_at
    );
    Ok(Some(MemoryGraph::from_snapshot(snapshot)))
}

/// Remove a snapshot file if present.
pub fn remove_graph(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// A store opened for the duration of one import batch.
///
/// `commit` persists the graph and `close` ends a read-only session. A session
/// dropped without either discards its changes; the snapshot file is never
/// held open.
pub struct GraphSession {
    graph: MemoryGraph,
    path: PathBuf,
    closed: bool,
}

impl GraphSession {
    /// Open the snapshot at `path`, or start an empty graph when there is none.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let graph = load_graph(&path)?.unwrap_or_default();
        tracing::debug!(
            "Opened graph session on {} ({} nodes, {} edges)",
            path.display(),
            graph.node_count(),
            graph.edge_count()
        );
        Ok(GraphSession {
            graph,
            path,
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn graph(&self) -> &MemoryGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut MemoryGraph {
        &mut self.graph
    }

    /// Persist the graph and end the session.
    pub fn commit(mut self) -> StoreResult<()> {
        save_graph(&self.graph, &self.path)?;
        self.closed = true;
        Ok(())
    }

    /// End the session without writing the snapshot.
    pub fn close(mut self) {
        self.closed = true;
    }
}

impl Drop for GraphSession {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!(
                "Graph session on {} closed without commit, changes discarded",
                self.path.display()
            );
        }
    }
}
