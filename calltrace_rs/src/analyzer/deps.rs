//! Outgoing dependencies of one named function.
//!
//! Two passes over the manifest. The first indexes files in order until the
//! target turns up; the second indexes whatever is left (in parallel) and
//! matches every named function against the target's called names.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::error::{EngineResult, require_files, require_target};
use crate::types::{DependencyInfo, DependencyResult, SourceFile};

use super::ast_js::{FileIndex, index_functions};
use super::{log_skipped, map_files};

struct Target {
    content: String,
    file: String,
    calls: BTreeSet<String>,
}

fn index_or_skip(file: &SourceFile) -> Option<FileIndex> {
    match index_functions(&file.id, &file.content) {
        Ok(index) => Some(index),
        Err(failure) => {
            log_skipped(&failure);
            None
        }
    }
}

/// Find `target_name` across `files` and list the named functions it calls.
///
/// The first function with that name (manifest order, then source order)
/// wins. Dependencies are de-duplicated by name, never include the target
/// itself, and keep manifest then discovery order.
pub fn analyze_dependencies(
    files: &[SourceFile],
    target_name: &str,
) -> EngineResult<DependencyResult> {
    require_files(files)?;
    let target_name = require_target(target_name)?;

    let mut indexes: Vec<Option<FileIndex>> = Vec::with_capacity(files.len());
    let mut target = None;
    for file in files {
        let index = index_or_skip(file);
        if let Some(found) = index.as_ref().and_then(|idx| idx.find(target_name)) {
            target = Some(Target {
                content: found.content(&file.content),
                file: file.id.clone(),
                calls: found.calls.clone(),
            });
        }
        indexes.push(index);
        if target.is_some() {
            break;
        }
    }

    let Some(target) = target else {
        debug!(target = target_name, files = files.len(), "target function not found");
        return Ok(DependencyResult::not_found());
    };

    indexes.extend(map_files(&files[indexes.len()..], index_or_skip));

    let mut seen = HashSet::new();
    let mut dependencies = Vec::new();
    for (file, index) in files.iter().zip(&indexes) {
        let Some(index) = index else {
            continue;
        };
        for function in index.named() {
            let Some(name) = function.name.as_deref() else {
                continue;
            };
            if name == target_name || !target.calls.contains(name) || !seen.insert(name) {
                continue;
            }
            dependencies.push(DependencyInfo {
                name: name.to_string(),
                content: function.content(&file.content),
                file: file.id.clone(),
            });
        }
    }

    debug!(
        target = target_name,
        file = %target.file,
        dependencies = dependencies.len(),
        "resolved dependencies"
    );

    Ok(DependencyResult {
        target: Some(target.content),
        target_file: Some(target.file),
        dependencies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn names(result: &DependencyResult) -> Vec<&str> {
        result
            .dependencies
            .iter()
            .map(|d| d.name.as_str())
            .collect()
    }

    #[test]
    fn collects_callees_across_files() {
        let files = vec![
            SourceFile::new("a.ts", "function main() { helper(); util.format(); missing(); }"),
            SourceFile::new("b.ts", "export function helper() { return 1; }"),
            SourceFile::new("c.ts", "export const format = (x) => String(x);\nfunction unused() {}"),
        ];
        let result = analyze_dependencies(&files, "main").unwrap();
        assert_eq!(
            result.target.as_deref(),
            Some("function main() { helper(); util.format(); missing(); }")
        );
        assert_eq!(result.target_file.as_deref(), Some("a.ts"));
        assert_eq!(names(&result), vec!["helper", "format"]);
        assert_eq!(result.dependencies[0].file, "b.ts");
        assert_eq!(result.dependencies[1].content, "(x) => String(x)");
    }

    #[test]
    fn recursion_is_not_a_dependency() {
        let files = vec![SourceFile::new(
            "fact.js",
            "function fact(n) { return n <= 1 ? 1 : n * fact(n - 1); }",
        )];
        let result = analyze_dependencies(&files, "fact").unwrap();
        assert!(result.is_found());
        assert!(result.dependencies.is_empty());
    }

    #[test]
    fn duplicate_definitions_keep_the_first() {
        let files = vec![
            SourceFile::new("a.ts", "function run() { step(); }\nfunction step() { return 'a'; }"),
            SourceFile::new("b.ts", "function step() { return 'b'; }"),
        ];
        let result = analyze_dependencies(&files, "run").unwrap();
        assert_eq!(names(&result), vec!["step"]);
        assert!(result.dependencies[0].content.contains("'a'"));
    }

    #[test]
    fn dependencies_before_the_target_file_are_found() {
        let files = vec![
            SourceFile::new("lib.ts", "function load() {}"),
            SourceFile::new("app.ts", "function start() { load(); }"),
        ];
        let result = analyze_dependencies(&files, "start").unwrap();
        assert_eq!(names(&result), vec!["load"]);
        assert_eq!(result.dependencies[0].file, "lib.ts");
    }

    #[test]
    fn unknown_target_is_not_found() {
        let files = vec![SourceFile::new("a.ts", "function a() { b(); }")];
        let result = analyze_dependencies(&files, "nope").unwrap();
        assert_eq!(result, DependencyResult::not_found());
    }

    #[test]
    fn broken_files_are_skipped() {
        let files = vec![
            SourceFile::new("broken.ts", "function ((("),
            SourceFile::new("ok.ts", "function go() { other(); }\nfunction other() {}"),
        ];
        let result = analyze_dependencies(&files, "go").unwrap();
        assert_eq!(names(&result), vec!["other"]);
    }

    #[test]
    fn all_broken_files_is_not_found() {
        let files = vec![
            SourceFile::new("a.ts", "function ((("),
            SourceFile::new("b.ts", "%%% not code"),
        ];
        let result = analyze_dependencies(&files, "main").unwrap();
        assert_eq!(result, DependencyResult::not_found());
    }

    #[test]
    fn malformed_requests_are_errors() {
        let files = vec![SourceFile::new("a.ts", "function a() {}")];
        assert_eq!(analyze_dependencies(&[], "a"), Err(EngineError::EmptyManifest));
        assert_eq!(analyze_dependencies(&files, "  "), Err(EngineError::EmptyTarget));
    }
}
