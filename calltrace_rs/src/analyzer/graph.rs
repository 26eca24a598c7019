//! Module graph construction and the report built on top of it.

use tracing::{debug, warn};

use crate::error::{EngineResult, require_files};
use crate::types::{
    AddressingMode, DEFAULT_ENTRY_POINTS, DEFAULT_EXTENSIONS, DEFAULT_HUB_THRESHOLD, GraphEdge,
    ImportRecord, ModuleGraph, ModuleGraphReport, SourceFile,
};

use super::ast_js::{ParseFailure, extract_imports};
use super::cycles::find_cycles;
use super::hubs::{EntryPointMatcher, find_hubs, find_orphans};
use super::resolvers::{ModuleResolver, normalize_path};
use super::{log_skipped, map_files};

/// Knobs for graph building and the analyzers that run on the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    pub hub_threshold: usize,
    /// Extensions probed for extension-less specifiers, in priority order.
    pub extensions: Vec<String>,
    /// File stems never reported as orphans.
    pub entry_points: Vec<String>,
    /// Turn `import('./x')` and `require('./x')` into edges as well.
    pub include_dynamic_imports: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            hub_threshold: DEFAULT_HUB_THRESHOLD,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            entry_points: DEFAULT_ENTRY_POINTS.iter().map(|s| s.to_string()).collect(),
            include_dynamic_imports: false,
        }
    }
}

fn wants(record: &ImportRecord, config: &GraphConfig) -> bool {
    record.kind.is_static() || config.include_dynamic_imports
}

/// Adjacency map for `files`: module id -> resolved ids it imports.
///
/// Keys are every file that parsed (manifest order), followed by import
/// targets that are not themselves parsed files. Ids are normalized with
/// [`normalize_path`]. Bare and unresolvable specifiers add nothing.
pub fn build_adjacency(files: &[SourceFile], mode: AddressingMode, config: &GraphConfig) -> ModuleGraph {
    let resolver = ModuleResolver::with_extensions(mode, files, config.extensions.clone());

    let per_file = map_files(files, |file| -> Result<(String, Vec<String>), ParseFailure> {
        let records = extract_imports(&file.id, &file.content)?;
        let importer = normalize_path(&file.id);
        let targets: Vec<String> = records
            .iter()
            .filter(|r| wants(r, config))
            .filter_map(|r| resolver.resolve(&importer, &r.specifier))
            .collect();
        debug!(
            file = %importer,
            imports = records.len(),
            resolved = targets.len(),
            "extracted imports"
        );
        Ok((importer, targets))
    });

    let mut graph = ModuleGraph::new();
    for result in per_file {
        match result {
            Ok((importer, targets)) => graph.entry(importer).or_default().extend(targets),
            Err(failure) => log_skipped(&failure),
        }
    }

    let dangling: Vec<String> = graph
        .values()
        .flatten()
        .filter(|id| !graph.contains_key(*id))
        .cloned()
        .collect();
    for id in dangling {
        graph.entry(id).or_default();
    }

    graph
}

/// Build the module graph with default settings and run every analyzer on it.
pub fn build_module_graph(
    files: &[SourceFile],
    mode: AddressingMode,
) -> EngineResult<ModuleGraphReport> {
    build_module_graph_with_config(files, mode, &GraphConfig::default())
}

pub fn build_module_graph_with_config(
    files: &[SourceFile],
    mode: AddressingMode,
    config: &GraphConfig,
) -> EngineResult<ModuleGraphReport> {
    require_files(files)?;

    let graph = build_adjacency(files, mode, config);
    let entry_points = EntryPointMatcher::new(&config.entry_points).unwrap_or_else(|err| {
        warn!("invalid entry point pattern, using defaults: {err}");
        EntryPointMatcher::default()
    });

    let report = report_for(&graph, config.hub_threshold, &entry_points);
    debug!(
        nodes = report.nodes.len(),
        edges = report.edges.len(),
        cycles = report.cycles.len(),
        hubs = report.hubs.len(),
        orphans = report.orphans.len(),
        "module graph built"
    );
    Ok(report)
}

/// Flatten `graph` into a report and run the analyzers.
pub fn report_for(
    graph: &ModuleGraph,
    hub_threshold: usize,
    entry_points: &EntryPointMatcher,
) -> ModuleGraphReport {
    let edges = graph
        .iter()
        .flat_map(|(from, targets)| {
            targets.iter().map(move |to| GraphEdge {
                from: from.clone(),
                to: to.clone(),
            })
        })
        .collect();

    ModuleGraphReport {
        nodes: graph.keys().cloned().collect(),
        edges,
        cycles: find_cycles(graph),
        hubs: find_hubs(graph, hub_threshold),
        orphans: find_orphans(graph, entry_points),
    }
}
