//! Configuration file support for calltrace.
//!
//! Loads optional `.calltrace/config.toml` from the analysis root.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::analyzer::graph::GraphConfig;
use crate::types::{DEFAULT_ENTRY_POINTS, DEFAULT_EXTENSIONS, DEFAULT_HUB_THRESHOLD};

/// Directories never walked when collecting source files.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &["node_modules", ".git", "dist", "build"];

/// Root configuration structure
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalltraceConfig {
    pub graph: GraphSection,
    pub scan: ScanSection,
    pub keywords: KeywordsSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphSection {
    /// Minimum number of distinct importers for a module to count as a hub.
    pub hub_threshold: usize,
    /// Extensions probed for extension-less import specifiers, in order.
    pub extensions: Vec<String>,
    /// File stems never reported as orphans.
    pub entry_points: Vec<String>,
    pub include_dynamic_imports: bool,
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            hub_threshold: DEFAULT_HUB_THRESHOLD,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            entry_points: DEFAULT_ENTRY_POINTS.iter().map(|s| s.to_string()).collect(),
            include_dynamic_imports: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    pub ignore_dirs: Vec<String>,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Named keyword lists, e.g. `security = ["eval", "innerHTML"]`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeywordsSection {
    pub presets: BTreeMap<String, Vec<String>>,
}

impl CalltraceConfig {
    /// Load config from `.calltrace/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".calltrace").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            hub_threshold: self.graph.hub_threshold,
            extensions: self.graph.extensions.clone(),
            entry_points: self.graph.entry_points.clone(),
            include_dynamic_imports: self.graph.include_dynamic_imports,
        }
    }

    pub fn preset(&self, name: &str) -> Option<&[String]> {
        self.keywords.presets.get(name).map(Vec::as_slice)
    }
}
