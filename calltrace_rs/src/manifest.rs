//! Building the `{id, content}` manifest the engine works on.
//!
//! Two sources: a directory walk (ids are real paths, filesystem addressing)
//! or a JSON manifest file (ids are archive keys, virtual addressing).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::analyzer::resolvers::normalize_path;
use crate::types::SourceFile;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no source files found in {0}")]
    Empty(String),
}

/// Options for the directory walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Extensions (without the dot) of files to collect.
    pub extensions: Vec<String>,
    /// Directory names pruned from the walk.
    pub ignore_dirs: Vec<String>,
}

impl WalkOptions {
    fn wants(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want == ext))
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.ignore_dirs.iter().any(|dir| dir == name))
    }
}

fn path_id(path: &Path) -> String {
    normalize_path(&path.to_string_lossy())
}

fn read_source(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect source files under `paths`.
///
/// Explicit file paths are always included. Directories are walked in file
/// name order, keeping files with a wanted extension and pruning ignored
/// directories. Files that are not valid UTF-8 are skipped with a warning.
pub fn collect_sources(
    paths: &[PathBuf],
    options: &WalkOptions,
) -> Result<Vec<SourceFile>, ManifestError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for root in paths {
        let metadata = fs::metadata(root).map_err(|source| ManifestError::Io {
            path: root.clone(),
            source,
        })?;

        if metadata.is_file() {
            let id = path_id(root);
            if seen.insert(id.clone()) {
                files.push(SourceFile::new(id, read_source(root)?));
            }
            continue;
        }

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !options.is_ignored(e))
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !options.wants(entry.path()) {
                continue;
            }

            let id = path_id(entry.path());
            if !seen.insert(id.clone()) {
                continue;
            }
            match fs::read_to_string(entry.path()) {
                Ok(content) => files.push(SourceFile::new(id, content)),
                Err(e) => warn!(file = %id, "skipping file: {e}"),
            }
        }
    }

    debug!(files = files.len(), "collected sources");
    if files.is_empty() {
        let shown: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        return Err(ManifestError::Empty(shown.join(", ")));
    }
    Ok(files)
}

#[derive(Deserialize)]
struct ManifestEntry {
    #[serde(alias = "path")]
    id: String,
    content: String,
}

/// Parse a JSON manifest: an array of `{"path" | "id": .., "content": ..}`.
pub fn parse_manifest(text: &str, origin: &Path) -> Result<Vec<SourceFile>, ManifestError> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(text).map_err(|source| ManifestError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
    if entries.is_empty() {
        return Err(ManifestError::Empty(origin.display().to_string()));
    }
    Ok(entries
        .into_iter()
        .map(|entry| SourceFile::new(normalize_path(&entry.id), entry.content))
        .collect())
}

pub fn load_manifest(path: &Path) -> Result<Vec<SourceFile>, ManifestError> {
    let text = read_source(path)?;
    parse_manifest(&text, path)
}
