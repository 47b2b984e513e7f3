//! In-memory graph store using petgraph::StableDiGraph with a key index

use crate::cache::{GraphSnapshot, SnapshotEdge};
use crate::error::{StoreError, StoreResult};
use crate::model::*;
use crate::store::GraphStore;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The knowledge graph: a directed multigraph whose nodes are addressed by
/// [`NodeKey`] rather than by index, so every write is a merge.
pub struct MemoryGraph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    index: HashMap<NodeKey, NodeIndex>,
}

impl std::fmt::Debug for MemoryGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl MemoryGraph {
    pub fn new() -> Self {
        MemoryGraph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a node, or overwrite the attributes of the node with the same key.
    pub fn merge_node(&mut self, node: GraphNode) -> NodeIndex {
        let key = node.key();
        match self.index.get(&key) {
            Some(&idx) => {
                if let Some(weight) = self.inner.node_weight_mut(idx) {
                    *weight = node;
                }
                idx
            }
            None => {
                let idx = self.inner.add_node(node);
                self.index.insert(key, idx);
                idx
            }
        }
    }

    /// Add an edge unless an identical one already links the same endpoints.
    /// Returns true when a new edge was created.
    pub fn merge_edge(&mut self, source: NodeIndex, target: NodeIndex, edge: GraphEdge) -> bool {
        let exists = self
            .inner
            .edges_directed(source, Direction::Outgoing)
            .any(|e| e.target() == target && *e.weight() == edge);
        if exists {
            return false;
        }
        self.inner.add_edge(source, target, edge);
        true
    }

    fn find(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    fn require(&self, key: NodeKey) -> StoreResult<NodeIndex> {
        self.find(&key).ok_or(StoreError::MissingNode(key))
    }

    fn key_of(&self, idx: NodeIndex) -> Option<NodeKey> {
        self.inner.node_weight(idx).map(GraphNode::key)
    }

    /// Get a node by key.
    pub fn node(&self, key: &NodeKey) -> Option<&GraphNode> {
        self.find(key).and_then(|idx| self.inner.node_weight(idx))
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.index.contains_key(key)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Get all nodes of a specific kind.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> + '_ {
        self.all_nodes().filter(move |n| n.kind() == kind)
    }

    /// All edges of one kind as (source key, target key, edge).
    pub fn edges_of_kind(&self, kind: EdgeKind) -> Vec<(NodeKey, NodeKey, &GraphEdge)> {
        self.inner
            .edge_indices()
            .filter_map(|idx| {
                let edge = self.inner.edge_weight(idx)?;
                if edge.kind != kind {
                    return None;
                }
                let (source, target) = self.inner.edge_endpoints(idx)?;
                Some((self.key_of(source)?, self.key_of(target)?, edge))
            })
            .collect()
    }

    /// Every CALLS edge, sorted.
    pub fn calls(&self) -> Vec<CallEdge> {
        let mut calls: Vec<CallEdge> = self
            .edges_of_kind(EdgeKind::Calls)
            .into_iter()
            .filter_map(|(source, target, edge)| match (source, target) {
                (NodeKey::File { path: from }, NodeKey::File { path: to }) => Some(CallEdge {
                    from,
                    to,
                    function: edge.function.clone()?,
                }),
                _ => None,
            })
            .collect();
        calls.sort();
        calls
    }

    /// Targets of outgoing edges of one kind, ordered by node index.
    fn targets(&self, source: NodeIndex, kind: EdgeKind) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self
            .inner
            .edges_directed(source, Direction::Outgoing)
            .filter(|e| e.weight().kind == kind)
            .map(|e| e.target())
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Paths of the files a project contains, in graph order.
    pub fn files_of_project(&self, name: &str) -> Vec<PathBuf> {
        let Some(project) = self.find(&NodeKey::project(name)) else {
            return Vec::new();
        };
        self.targets(project, EdgeKind::ContainsFile)
            .into_iter()
            .filter_map(|idx| match self.inner.node_weight(idx) {
                Some(GraphNode::File { path, .. }) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// Names of the functions a file contains, sorted.
    pub fn functions_in_file(&self, file: &Path) -> Vec<String> {
        self.named_targets(file, EdgeKind::ContainsFunction)
    }

    /// Names of the packages a file uses, sorted.
    pub fn packages_of_file(&self, file: &Path) -> Vec<String> {
        self.named_targets(file, EdgeKind::UsesPackage)
    }

    fn named_targets(&self, file: &Path, kind: EdgeKind) -> Vec<String> {
        let Some(idx) = self.find(&NodeKey::file(file)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .targets(idx, kind)
            .into_iter()
            .filter_map(|t| match self.inner.node_weight(t) {
                Some(GraphNode::Function { name, .. }) | Some(GraphNode::Package { name }) => {
                    Some(name.clone())
                }
                _ => None,
            })
            .collect();
        names.sort();
        names
    }

    fn remove(&mut self, idx: NodeIndex) -> Option<GraphNode> {
        let node = self.inner.remove_node(idx)?;
        self.index.remove(&node.key());
        Some(node)
    }

    /// Remove a file node along with the functions it owns.
    fn remove_file(&mut self, file: NodeIndex) {
        for function in self.targets(file, EdgeKind::ContainsFunction) {
            self.remove(function);
        }
        self.remove(file);
    }

    /// Remove packages no file refers to anymore.
    fn sweep_packages(&mut self) -> usize {
        let orphans: Vec<NodeIndex> = self
            .inner
            .node_indices()
            .filter(|&idx| {
                matches!(self.inner.node_weight(idx), Some(GraphNode::Package { .. }))
                    && self
                        .inner
                        .edges_directed(idx, Direction::Incoming)
                        .next()
                        .is_none()
            })
            .collect();
        let count = orphans.len();
        for idx in orphans {
            self.remove(idx);
        }
        count
    }

    /// Capture every node and edge for persistence.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let nodes = self.all_nodes().cloned().collect();
        let edges = self
            .inner
            .edge_indices()
            .filter_map(|idx| {
                let (source, target) = self.inner.edge_endpoints(idx)?;
                Some(SnapshotEdge {
                    source: self.key_of(source)?,
                    target: self.key_of(target)?,
                    edge: self.inner.edge_weight(idx)?.clone(),
                })
            })
            .collect();
        GraphSnapshot::new(nodes, edges)
    }

    /// Rebuild a graph from a snapshot. Edges whose endpoints are missing are dropped.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        let mut graph = MemoryGraph::new();
        for node in snapshot.nodes {
            graph.merge_node(node);
        }
        for SnapshotEdge { source, target, edge } in snapshot.edges {
            match (graph.find(&source), graph.find(&target)) {
                (Some(s), Some(t)) => {
                    graph.merge_edge(s, t, edge);
                }
                _ => tracing::warn!("Dropping dangling snapshot edge {} -> {}", source, target),
            }
        }
        graph
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for MemoryGraph {
    fn verify(&self) -> StoreResult<()> {
        Ok(())
    }

    fn merge_project(&mut self, name: &str) -> StoreResult<()> {
        if !self.contains(&NodeKey::project(name)) {
            self.merge_node(GraphNode::Project {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn upsert_file(
        &mut self,
        path: &Path,
        filename: &str,
        content: &str,
        language: Language,
        project: Option<&str>,
    ) -> StoreResult<()> {
        let file = self.merge_node(GraphNode::File {
            path: path.to_path_buf(),
            filename: filename.to_string(),
            content: content.to_string(),
            language,
        });
        if let Some(name) = project {
            match self.find(&NodeKey::project(name)) {
                Some(project) => {
                    self.merge_edge(project, file, GraphEdge::new(EdgeKind::ContainsFile));
                }
                None => tracing::debug!("Project {} not found, {} left unattached", name, filename),
            }
        }
        Ok(())
    }

    fn upsert_function(&mut self, file: &Path, name: &str, code: &str) -> StoreResult<()> {
        let owner = self.require(NodeKey::file(file))?;
        let function = self.merge_node(GraphNode::Function {
            name: name.to_string(),
            file: file.to_path_buf(),
            code: code.to_string(),
        });
        self.merge_edge(owner, function, GraphEdge::new(EdgeKind::ContainsFunction));
        Ok(())
    }

    fn upsert_package(&mut self, file: &Path, name: &str) -> StoreResult<()> {
        let owner = self.require(NodeKey::file(file))?;
        let package = match self.find(&NodeKey::package(name)) {
            Some(idx) => idx,
            None => self.merge_node(GraphNode::Package {
                name: name.to_string(),
            }),
        };
        self.merge_edge(owner, package, GraphEdge::new(EdgeKind::UsesPackage));
        Ok(())
    }

    fn merge_calls(&mut self, from: &Path, to: &Path, function: &str) -> StoreResult<()> {
        let source = self.require(NodeKey::file(from))?;
        let target = self.require(NodeKey::file(to))?;
        self.merge_edge(source, target, GraphEdge::calls(function));
        Ok(())
    }

    fn clear_calls_from(&mut self, file: &Path) -> StoreResult<usize> {
        let Some(idx) = self.find(&NodeKey::file(file)) else {
            return Ok(0);
        };
        let stale: Vec<_> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .filter(|e| e.weight().kind == EdgeKind::Calls)
            .map(|e| e.id())
            .collect();
        for edge in &stale {
            self.inner.remove_edge(*edge);
        }
        Ok(stale.len())
    }

    fn list_projects(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .nodes_of_kind(NodeKind::Project)
            .filter_map(|n| match n {
                GraphNode::Project { name } => Some(name.clone()),
                _ => None,
            })
            .collect())
    }

    fn project_code(&self, name: &str) -> StoreResult<Option<String>> {
        let contents: Vec<&str> = self
            .files_of_project(name)
            .into_iter()
            .filter_map(|path| match self.node(&NodeKey::file(path)) {
                Some(GraphNode::File { content, .. }) => Some(content.as_str()),
                _ => None,
            })
            .collect();
        if contents.is_empty() {
            return Ok(None);
        }
        Ok(Some(contents.join("\n\n")))
    }

    fn delete_project(&mut self, name: &str) -> StoreResult<()> {
        let Some(project) = self.find(&NodeKey::project(name)) else {
            tracing::debug!("Project {} not found, nothing to delete", name);
            return Ok(());
        };

        // Files shared with another project stay; only the link goes.
        for file in self.targets(project, EdgeKind::ContainsFile) {
            let shared = self
                .inner
                .edges_directed(file, Direction::Incoming)
                .any(|e| e.weight().kind == EdgeKind::ContainsFile && e.source() != project);
            if !shared {
                self.remove_file(file);
            }
        }
        self.remove(project);
        let swept = self.sweep_packages();
        tracing::debug!("Deleted project {} ({} orphaned packages removed)", name, swept);
        Ok(())
    }

    fn delete_all(&mut self) -> StoreResult<()> {
        self.inner.clear();
        self.index.clear();
        Ok(())
    }
}
