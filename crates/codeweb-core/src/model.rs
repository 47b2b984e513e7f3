//! Core data structures for the knowledge graph

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Language tag detected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    CSharp,
    Java,
    JavaScript,
    TypeScript,
    Cpp,
    C,
    CHeader,
    Ruby,
    Go,
    Php,
    Unknown,
}

impl Language {
    /// Detect language from an extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        match ext.as_str() {
            "py" => Language::Python,
            "cs" => Language::CSharp,
            "java" => Language::Java,
            "js" => Language::JavaScript,
            "ts" => Language::TypeScript,
            "cpp" => Language::Cpp,
            "c" => Language::C,
            "h" => Language::CHeader,
            "rb" => Language::Ruby,
            "go" => Language::Go,
            "php" => Language::Php,
            _ => Language::Unknown,
        }
    }

    /// Detect language from a file path.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(Language::Unknown, Language::from_extension)
    }

    /// The tag stored on File nodes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::CSharp => "C#",
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::CHeader => "C/C++ Header",
            Language::Ruby => "Ruby",
            Language::Go => "Go",
            Language::Php => "PHP",
            Language::Unknown => "Unknown",
        }
    }

    pub fn is_supported(&self) -> bool {
        *self != Language::Unknown
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identity of a node. Two upserts with the same key touch the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKey {
    Project { name: String },
    File { path: PathBuf },
    /// Functions are file-scoped: the same name in two files is two nodes.
    Function { name: String, file: PathBuf },
    /// Packages are global and shared between files.
    Package { name: String },
}

impl NodeKey {
    pub fn project(name: impl Into<String>) -> Self {
        NodeKey::Project { name: name.into() }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        NodeKey::File { path: path.into() }
    }

    pub fn function(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        NodeKey::Function {
            name: name.into(),
            file: file.into(),
        }
    }

    pub fn package(name: impl Into<String>) -> Self {
        NodeKey::Package { name: name.into() }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Project { name } => write!(f, "Project({})", name),
            NodeKey::File { path } => write!(f, "File({})", path.display()),
            NodeKey::Function { name, file } => {
                write!(f, "Function({} in {})", name, file.display())
            }
            NodeKey::Package { name } => write!(f, "Package({})", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    Project,
    File,
    Function,
    Package,
}

/// A node in the knowledge graph together with its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphNode {
    Project {
        name: String,
    },
    File {
        path: PathBuf,
        filename: String,
        content: String,
        language: Language,
    },
    Function {
        name: String,
        file: PathBuf,
        /// Exact source text of the definition.
        code: String,
    },
    Package {
        name: String,
    },
}

impl GraphNode {
    /// Identity key of this node.
    pub fn key(&self) -> NodeKey {
        match self {
            GraphNode::Project { name } => NodeKey::project(name.clone()),
            GraphNode::File { path, .. } => NodeKey::file(path.clone()),
            GraphNode::Function { name, file, .. } => NodeKey::function(name.clone(), file.clone()),
            GraphNode::Package { name } => NodeKey::package(name.clone()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            GraphNode::Project { .. } => NodeKind::Project,
            GraphNode::File { .. } => NodeKind::File,
            GraphNode::Function { .. } => NodeKind::Function,
            GraphNode::Package { .. } => NodeKind::Package,
        }
    }
}

/// What kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Project -> File
    ContainsFile,
    /// File -> Function
    ContainsFunction,
    /// File -> Package
    UsesPackage,
    /// File -> File, derived by the cross-file linker.
    Calls,
}

/// A directed edge in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub kind: EdgeKind,
    /// Name of the called function; only set on `Calls` edges.
    pub function: Option<String>,
}

impl GraphEdge {
    pub fn new(kind: EdgeKind) -> Self {
        GraphEdge { kind, function: None }
    }

    pub fn calls(function: impl Into<String>) -> Self {
        GraphEdge {
            kind: EdgeKind::Calls,
            function: Some(function.into()),
        }
    }
}

/// A resolved CALLS edge, as read back from a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallEdge {
    pub from: PathBuf,
    pub to: PathBuf,
    pub function: String,
}
