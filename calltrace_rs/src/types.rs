use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HUB_THRESHOLD: usize = 5;

/// Extensions probed when an import specifier has none, in priority order.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// File stems treated as conventional entry points by the orphan classifier.
pub const DEFAULT_ENTRY_POINTS: &[&str] = &["index", "main", "app"];

/// One input file. Owned by the caller, borrowed by the engine for a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    /// Stable path or archive-relative key.
    pub id: String,
    pub display_name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        let id = id.into();
        let display_name = id.rsplit('/').next().unwrap_or(id.as_str()).to_string();
        Self {
            id,
            display_name,
            content: content.into(),
        }
    }
}

/// Location of a named function inside one file (byte offsets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSpan {
    pub name: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub source_file_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyInfo {
    pub name: String,
    /// Source text of the callee.
    pub content: String,
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyResult {
    /// Source text of the target function, `None` when no function with that name exists.
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_file: Option<String>,
    pub dependencies: Vec<DependencyInfo>,
}

impl DependencyResult {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        self.target.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerInfo {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHierarchyResult {
    pub target: String,
    pub callers: Vec<CallerInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordFinding {
    pub function_name: String,
    pub found_keywords: BTreeSet<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionComplexity {
    pub name: String,
    pub file: String,
    pub complexity: u32,
}

/// How import specifiers are checked for existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AddressingMode {
    /// Probe the real filesystem.
    Filesystem,
    /// Probe the keys of the supplied manifest (archives, pasted bundles).
    Virtual,
}

/// Directed import graph: module id -> ids it imports, both in discovery order.
pub type ModuleGraph = IndexMap<String, IndexSet<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubEntry {
    pub id: String,
    pub importers: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGraphReport {
    pub nodes: Vec<String>,
    pub edges: Vec<GraphEdge>,
    pub cycles: Vec<Vec<String>>,
    pub hubs: Vec<HubEntry>,
    pub orphans: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// `import x from './a'` and side-effect `import './a'`
    Static,
    /// `export * from './a'`, `export { x } from './a'`
    ReExport,
    /// `import('./a')` with a literal source
    Dynamic,
    /// `require('./a')`
    Require,
}

impl ImportKind {
    pub fn is_static(self) -> bool {
        matches!(self, ImportKind::Static | ImportKind::ReExport)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub specifier: String,
    pub kind: ImportKind,
}
