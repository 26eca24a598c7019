//! # calltrace
//!
//! **Structural questions about JavaScript/TypeScript code**, answered from the
//! syntax tree alone. Nothing is executed or type-checked.
//!
//! - **Dependencies** - what does function `F` call, and what do those callees look like?
//! - **Call hierarchy** - which named functions call `F`?
//! - **Module graph** - who imports whom, with cycles, hubs and orphans
//! - **Keywords** - which functions mention a given set of words?
//! - **Complexity** - rough branching count, for ranking only
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust
//! use calltrace::{SourceFile, analyze_dependencies};
//!
//! let files = vec![
//!     SourceFile::new("src/app.ts", "function main() { helper(); }"),
//!     SourceFile::new("src/lib.ts", "export function helper() { return 1; }"),
//! ];
//! let result = analyze_dependencies(&files, "main").unwrap();
//! assert_eq!(result.dependencies[0].name, "helper");
//! ```
//!
//! ## Module Graphs
//!
//! ```rust
//! use calltrace::{AddressingMode, SourceFile, build_module_graph};
//!
//! let files = vec![
//!     SourceFile::new("a.ts", "import './b';"),
//!     SourceFile::new("b.ts", "import './a';"),
//! ];
//! let report = build_module_graph(&files, AddressingMode::Virtual).unwrap();
//! assert_eq!(report.cycles, vec![vec!["a.ts", "b.ts", "a.ts"]]);
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! calltrace deps main src/          # callees of `main`
//! calltrace callers save src/       # who calls `save`
//! calltrace graph --json src/       # import graph report
//! calltrace keywords eval --in src  # functions mentioning `eval`
//! calltrace hotspots --top 5 src/   # most complex functions
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// The analysis engine.
///
/// # Submodules
///
/// - [`analyzer::deps`] - two-pass dependency resolution
/// - [`analyzer::callers`] - reverse call hierarchy
/// - [`analyzer::keywords`] - per-function keyword search
/// - [`analyzer::resolvers`] - import specifier resolution
/// - [`analyzer::graph`] - module graph builder
/// - [`analyzer::cycles`] - circular import detection
/// - [`analyzer::hubs`] - hub and orphan classification
/// - [`analyzer::complexity`] - complexity estimate
pub mod analyzer;

/// Command-line front end used by the `calltrace` binary.
pub mod cli;

/// `.calltrace/config.toml` loading.
pub mod config;

/// Request-level errors.
pub mod error;

/// Loading source files from disk or from a JSON manifest.
pub mod manifest;

/// Data model shared by the engine and its callers.
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use analyzer::function_spans;
pub use analyzer::callers::{analyze_call_hierarchy, analyze_call_hierarchy_files};
pub use analyzer::complexity::{estimate_complexity, rank_function_complexity};
pub use analyzer::cycles::find_cycles;
pub use analyzer::deps::analyze_dependencies;
pub use analyzer::graph::{GraphConfig, build_module_graph, build_module_graph_with_config};
pub use analyzer::hubs::{EntryPointMatcher, find_hubs, find_orphans};
pub use analyzer::keywords::{analyze_keywords, analyze_keywords_files};
pub use analyzer::resolvers::ModuleResolver;
pub use config::CalltraceConfig;
pub use error::{EngineError, EngineResult};
pub use types::{
    AddressingMode, CallHierarchyResult, CallerInfo, DependencyInfo, DependencyResult,
    FunctionComplexity, FunctionSpan, HubEntry, KeywordFinding, ModuleGraph, ModuleGraphReport, SourceFile,
};
