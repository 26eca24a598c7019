//! Import specifier resolution.
//!
//! Relative specifiers are joined with the importer's directory, normalized
//! lexically, then probed in a fixed order: the path itself, the path with
//! each extension appended, then `path/index.{ext}`. The first candidate
//! that exists wins.
//!
//! "Exists" depends on the addressing mode: a regular file on disk, or a key
//! of the in-memory manifest. Both modes share every other step.

use std::collections::HashSet;
use std::path::Path;

use crate::types::{AddressingMode, DEFAULT_EXTENSIONS, SourceFile};

/// `./x`, `../x`, `.` and `..` are project-local; everything else is a package.
pub fn is_relative_specifier(spec: &str) -> bool {
    spec == "." || spec == ".." || spec.starts_with("./") || spec.starts_with("../")
}

/// Collapse `.` and `..` segments of a `/`-separated path.
///
/// Backslashes are treated as separators. `..` segments that climb past the
/// start of a relative path are kept, so such paths never match a manifest key.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

fn parent_dir(id: &str) -> &str {
    id.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

pub struct ModuleResolver {
    mode: AddressingMode,
    extensions: Vec<String>,
    /// Normalized manifest ids, virtual mode only.
    known_ids: HashSet<String>,
}

impl ModuleResolver {
    /// Resolver over `files` with the default extension list.
    pub fn new(mode: AddressingMode, files: &[SourceFile]) -> Self {
        let extensions = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        Self::with_extensions(mode, files, extensions)
    }

    pub fn with_extensions(
        mode: AddressingMode,
        files: &[SourceFile],
        extensions: Vec<String>,
    ) -> Self {
        let known_ids = match mode {
            AddressingMode::Virtual => files.iter().map(|f| normalize_path(&f.id)).collect(),
            AddressingMode::Filesystem => HashSet::new(),
        };
        let extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            mode,
            extensions,
            known_ids,
        }
    }

    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// Resolve `specifier` as imported from `importer_id`.
    ///
    /// Returns the id of the first existing candidate, or `None` for bare
    /// specifiers and relative ones that match nothing.
    pub fn resolve(&self, importer_id: &str, specifier: &str) -> Option<String> {
        if !is_relative_specifier(specifier) {
            return None;
        }

        let importer = normalize_path(importer_id);
        let dir = parent_dir(&importer);
        let joined = if dir.is_empty() {
            specifier.to_string()
        } else {
            format!("{dir}/{specifier}")
        };
        let base = normalize_path(&joined);

        self.candidates(&base).into_iter().find(|c| self.exists(c))
    }

    fn candidates(&self, base: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(1 + self.extensions.len() * 2);
        // `.` from a top-level importer normalizes to the empty path; only
        // an index file can match there.
        if !base.is_empty() && base != "/" {
            out.push(base.to_string());
            out.extend(self.extensions.iter().map(|ext| format!("{base}.{ext}")));
        }
        let prefix = match base {
            "" => String::new(),
            "/" => "/".to_string(),
            _ => format!("{base}/"),
        };
        out.extend(self.extensions.iter().map(|ext| format!("{prefix}index.{ext}")));
        out
    }

    fn exists(&self, candidate: &str) -> bool {
        match self.mode {
            AddressingMode::Filesystem => Path::new(candidate).is_file(),
            AddressingMode::Virtual => self.known_ids.contains(candidate),
        }
    }
}
