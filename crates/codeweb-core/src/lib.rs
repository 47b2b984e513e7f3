//! Codeweb core: knowledge graph model, store interface and persistence

pub mod cache;
pub mod error;
pub mod graph;
pub mod model;
pub mod store;


pub use cache::{
    CACHE_DIR, GRAPH_CACHE, GraphSession, GraphSnapshot, cache_dir, graph_cache_path, load_graph,
    remove_graph, save_graph,
};
pub use error::{StoreError, StoreResult};
pub use graph::MemoryGraph;
pub use model::{CallEdge, EdgeKind, GraphEdge, GraphNode, Language, NodeKey, NodeKind};
pub use store::GraphStore;
