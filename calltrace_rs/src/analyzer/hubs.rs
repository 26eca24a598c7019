//! Hub and orphan classification over the module graph.
//!
//! Both work on in-degree counted as distinct importers other than the
//! module itself, so a self-import never makes a module look popular.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::types::{DEFAULT_ENTRY_POINTS, HubEntry, ModuleGraph};

/// Decides which file names are conventional entry points (`index.ts`,
/// `main.tsx`, `App.test.jsx`, ...). Only the basename is matched, case
/// insensitively, and any dotted suffix after the stem is accepted.
#[derive(Debug, Clone)]
pub struct EntryPointMatcher {
    pattern: Option<Regex>,
}

fn build_pattern<S: AsRef<str>>(stems: &[S]) -> Result<Option<Regex>, regex::Error> {
    let alternatives: Vec<String> = stems
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }
    let pattern = format!(r"(?i)^(?:{})(?:\.[^/]+)?$", alternatives.join("|"));
    Regex::new(&pattern).map(Some)
}

impl EntryPointMatcher {
    pub fn new<S: AsRef<str>>(stems: &[S]) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: build_pattern(stems)?,
        })
    }

    pub fn is_entry_point(&self, module_id: &str) -> bool {
        let basename = module_id.rsplit(['/', '\\']).next().unwrap_or(module_id);
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(basename))
    }
}

impl Default for EntryPointMatcher {
    fn default() -> Self {
        static DEFAULT: OnceLock<EntryPointMatcher> = OnceLock::new();
        DEFAULT
            .get_or_init(|| Self {
                pattern: build_pattern(DEFAULT_ENTRY_POINTS).expect("valid regex literal"),
            })
            .clone()
    }
}

/// Every node of the graph, keys first, then targets that only appear as edges.
fn discovery_order(graph: &ModuleGraph) -> IndexSet<&str> {
    let mut order: IndexSet<&str> = graph.keys().map(String::as_str).collect();
    for targets in graph.values() {
        order.extend(targets.iter().map(String::as_str));
    }
    order
}

fn importers(graph: &ModuleGraph) -> HashMap<&str, HashSet<&str>> {
    let mut importers: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (from, targets) in graph {
        for to in targets {
            if to != from {
                importers.entry(to.as_str()).or_default().insert(from.as_str());
            }
        }
    }
    importers
}

/// Modules imported by at least `threshold` other modules, most imported first.
///
/// A threshold of 0 is treated as 1: a module nobody imports is never a hub.
pub fn find_hubs(graph: &ModuleGraph, threshold: usize) -> Vec<HubEntry> {
    let threshold = threshold.max(1);
    let importers = importers(graph);

    let mut hubs: Vec<HubEntry> = discovery_order(graph)
        .into_iter()
        .filter_map(|id| {
            let count = importers.get(id).map_or(0, HashSet::len);
            (count >= threshold).then(|| HubEntry {
                id: id.to_string(),
                importers: count,
            })
        })
        .collect();

    // stable: ties keep discovery order
    hubs.sort_by(|a, b| b.importers.cmp(&a.importers));
    hubs
}

/// Modules that import something but are imported by nothing, minus entry points.
pub fn find_orphans(graph: &ModuleGraph, entry_points: &EntryPointMatcher) -> Vec<String> {
    let importers = importers(graph);

    graph
        .iter()
        .filter(|(id, targets)| targets.iter().any(|t| t != *id))
        .filter(|(id, _)| !importers.contains_key(id.as_str()))
        .filter(|(id, _)| !entry_points.is_entry_point(id))
        .map(|(id, _)| id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> ModuleGraph {
        let mut graph = ModuleGraph::new();
        for (from, to) in edges {
            graph.entry(from.to_string()).or_default().insert(to.to_string());
            graph.entry(to.to_string()).or_default();
        }
        graph
    }

    fn fan_in(target: &str, count: usize) -> Vec<(String, String)> {
        (0..count)
            .map(|i| (format!("src/user{i}.ts"), target.to_string()))
            .collect()
    }

    fn graph_owned(edges: &[(String, String)]) -> ModuleGraph {
        let borrowed: Vec<(&str, &str)> = edges
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        graph(&borrowed)
    }

    #[test]
    fn five_importers_is_a_hub_at_threshold_five() {
        let g = graph_owned(&fan_in("src/shared.ts", 5));
        let hubs = find_hubs(&g, 5);
        assert_eq!(
            hubs,
            vec![HubEntry {
                id: "src/shared.ts".to_string(),
                importers: 5
            }]
        );
    }

    #[test]
    fn four_importers_is_not_a_hub() {
        let g = graph_owned(&fan_in("src/shared.ts", 4));
        assert!(find_hubs(&g, 5).is_empty());
    }

    #[test]
    fn hubs_sorted_by_count_then_discovery() {
        let g = graph(&[
            ("a", "x"),
            ("b", "x"),
            ("a", "y"),
            ("b", "y"),
            ("c", "y"),
            ("a", "z"),
            ("b", "z"),
        ]);
        let hubs: Vec<_> = find_hubs(&g, 2)
            .into_iter()
            .map(|h| (h.id, h.importers))
            .collect();
        assert_eq!(
            hubs,
            vec![
                ("y".to_string(), 3),
                ("x".to_string(), 2),
                ("z".to_string(), 2)
            ]
        );
    }

    #[test]
    fn self_imports_do_not_count() {
        let g = graph(&[("a", "a"), ("b", "a")]);
        assert!(find_hubs(&g, 2).is_empty());
        assert_eq!(find_hubs(&g, 0).len(), 1);
    }

    #[test]
    fn helpers_is_an_orphan_but_index_is_not() {
        let g = graph(&[("src/helpers.ts", "src/a.ts"), ("src/index.ts", "src/b.ts")]);
        let orphans = find_orphans(&g, &EntryPointMatcher::default());
        assert_eq!(orphans, vec!["src/helpers.ts".to_string()]);
    }

    #[test]
    fn leaves_and_imported_modules_are_not_orphans() {
        let g = graph(&[("src/main.ts", "src/a.ts"), ("src/a.ts", "src/leaf.ts")]);
        assert!(find_orphans(&g, &EntryPointMatcher::default()).is_empty());
    }

    #[test]
    fn entry_point_matching() {
        let matcher = EntryPointMatcher::default();
        assert!(matcher.is_entry_point("src/index.ts"));
        assert!(matcher.is_entry_point("src/App.tsx"));
        assert!(matcher.is_entry_point("main.test.js"));
        assert!(matcher.is_entry_point("lib\\index.mjs"));
        assert!(!matcher.is_entry_point("src/application.ts"));
        assert!(!matcher.is_entry_point("src/index/helpers.ts"));

        let custom = EntryPointMatcher::new(&["server", "cli.entry"]).unwrap();
        assert!(custom.is_entry_point("bin/server.ts"));
        assert!(custom.is_entry_point("cli.entry.js"));
        assert!(!custom.is_entry_point("src/index.ts"));

        let none = EntryPointMatcher::new::<&str>(&[]).unwrap();
        assert!(!none.is_entry_point("index.ts"));
    }
}
