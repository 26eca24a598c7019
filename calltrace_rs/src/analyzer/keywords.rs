//! Keyword search scoped to named functions.

use std::collections::BTreeSet;

use crate::error::{EngineError, EngineResult, require_files};
use crate::types::{KeywordFinding, SourceFile};

use super::ast_js::{FileIndex, SNIPPET_ID, index_functions};
use super::{log_skipped, map_files};

fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> EngineResult<Vec<&str>> {
    let cleaned: Vec<&str> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .collect();
    if cleaned.is_empty() {
        return Err(EngineError::EmptyKeywords);
    }
    Ok(cleaned)
}

fn findings_in(
    index: &FileIndex,
    source: &str,
    keywords: &[&str],
    file: Option<&str>,
    out: &mut Vec<KeywordFinding>,
) {
    for function in index.named() {
        let content = function.content(source);
        let found: BTreeSet<String> = keywords
            .iter()
            .filter(|kw| content.contains(**kw))
            .map(|kw| kw.to_string())
            .collect();
        if found.is_empty() {
            continue;
        }
        out.push(KeywordFinding {
            function_name: function.name.clone().unwrap_or_default(),
            found_keywords: found,
            content,
            file: file.map(str::to_string),
        });
    }
}

/// Named functions in `code` whose text contains any of `keywords`.
///
/// Matching is a case-sensitive substring test. One finding per function
/// node, not per name: two classes that each define `go()` give two
/// findings named `go`.
pub fn analyze_keywords<S: AsRef<str>>(
    code: &str,
    keywords: &[S],
) -> EngineResult<Vec<KeywordFinding>> {
    let keywords = normalize_keywords(keywords)?;

    let mut findings = Vec::new();
    match index_functions(SNIPPET_ID, code) {
        Ok(index) => findings_in(&index, code, &keywords, None, &mut findings),
        Err(failure) => log_skipped(&failure),
    }
    Ok(findings)
}

/// Same as [`analyze_keywords`] over a manifest, tagging each finding with its file.
pub fn analyze_keywords_files<S: AsRef<str>>(
    files: &[SourceFile],
    keywords: &[S],
) -> EngineResult<Vec<KeywordFinding>> {
    require_files(files)?;
    let keywords = normalize_keywords(keywords)?;

    let indexes = map_files(files, |file| index_functions(&file.id, &file.content));

    let mut findings = Vec::new();
    for (file, index) in files.iter().zip(&indexes) {
        match index {
            Ok(index) => findings_in(index, &file.content, &keywords, Some(&file.id), &mut findings),
            Err(failure) => log_skipped(failure),
        }
    }
    Ok(findings)
}
