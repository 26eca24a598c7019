//! Reverse call hierarchy: who calls a given name.

use std::collections::HashSet;

use crate::error::{EngineResult, require_files, require_target};
use crate::types::{CallHierarchyResult, CallerInfo, SourceFile};

use super::ast_js::{FileIndex, SNIPPET_ID, index_functions};
use super::{log_skipped, map_files};

/// Record every named function in `index` that calls `target` directly.
///
/// A call belongs to its nearest enclosing function only; if that function
/// is anonymous the call is dropped. `seen` de-duplicates across files.
fn collect_callers<'s>(
    index: &'s FileIndex,
    source: &str,
    target: &str,
    file: Option<&str>,
    seen: &mut HashSet<&'s str>,
    out: &mut Vec<CallerInfo>,
) {
    for site in index.call_sites.iter().filter(|s| s.callee == target) {
        let Some(caller) = index.enclosing_named(site) else {
            continue;
        };
        let Some(name) = caller.name.as_deref() else {
            continue;
        };
        if !seen.insert(name) {
            continue;
        }
        out.push(CallerInfo {
            name: name.to_string(),
            content: caller.content(source),
            file: file.map(str::to_string),
        });
    }
}

/// Callers of `target_name` within one snippet of code.
///
/// Code that does not parse yields an empty caller list.
pub fn analyze_call_hierarchy(code: &str, target_name: &str) -> EngineResult<CallHierarchyResult> {
    let target = require_target(target_name)?;

    let mut callers = Vec::new();
    match index_functions(SNIPPET_ID, code) {
        Ok(index) => {
            let mut seen = HashSet::new();
            collect_callers(&index, code, target, None, &mut seen, &mut callers);
        }
        Err(failure) => log_skipped(&failure),
    }

    Ok(CallHierarchyResult {
        target: target.to_string(),
        callers,
    })
}

/// Callers of `target_name` across a manifest, in file order.
///
/// Caller names are unique across the whole result; the first file to
/// contribute a name wins.
pub fn analyze_call_hierarchy_files(
    files: &[SourceFile],
    target_name: &str,
) -> EngineResult<CallHierarchyResult> {
    require_files(files)?;
    let target = require_target(target_name)?;

    let indexes = map_files(files, |file| index_functions(&file.id, &file.content));

    let mut callers = Vec::new();
    let mut seen = HashSet::new();
    for (file, index) in files.iter().zip(&indexes) {
        match index {
            Ok(index) => collect_callers(
                index,
                &file.content,
                target,
                Some(&file.id),
                &mut seen,
                &mut callers,
            ),
            Err(failure) => log_skipped(failure),
        }
    }

    Ok(CallHierarchyResult {
        target: target.to_string(),
        callers,
    })
}
