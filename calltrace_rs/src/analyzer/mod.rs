pub(crate) mod ast_js;
pub mod callers;
pub mod complexity;
pub mod cycles;
pub mod deps;
pub mod graph;
pub mod hubs;
pub mod keywords;
pub mod resolvers;

use std::thread;

use tracing::warn;

use crate::types::{FunctionSpan, SourceFile};

use ast_js::{ParseFailure, index_functions};

/// Maximum number of files parsed at once (bounded parallelism).
const MAX_PARALLEL_FILES: usize = 8;

/// Run `work` over every file on scoped worker threads.
///
/// Results come back in manifest order regardless of which worker finished
/// first, so callers can merge them deterministically.
pub(crate) fn map_files<T, F>(files: &[SourceFile], work: F) -> Vec<T>
where
    T: Send,
    F: Fn(&SourceFile) -> T + Sync,
{
    // For a single file, skip parallelization overhead
    if files.len() <= 1 {
        return files.iter().map(&work).collect();
    }

    let mut results = Vec::with_capacity(files.len());
    thread::scope(|s| {
        for chunk in files.chunks(MAX_PARALLEL_FILES) {
            let handles: Vec<_> = chunk
                .iter()
                .map(|file| {
                    let work = &work;
                    s.spawn(move || work(file))
                })
                .collect();

            for handle in handles {
                match handle.join() {
                    Ok(result) => results.push(result),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
        }
    });
    results
}

/// A file that did not parse contributes nothing; say so once.
pub(crate) fn log_skipped(failure: &ParseFailure) {
    warn!(file = %failure.file, "skipping file: {}", failure.message);
}

/// Every named function in `files`, with byte offsets, in manifest order.
pub fn function_spans(files: &[SourceFile]) -> Vec<FunctionSpan> {
    map_files(files, |file| index_functions(&file.id, &file.content))
        .into_iter()
        .flat_map(|index| match index {
            Ok(index) => index.spans(),
            Err(failure) => {
                log_skipped(&failure);
                Vec::new()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_files_preserves_manifest_order() {
        let files: Vec<SourceFile> = (0..20)
            .map(|i| SourceFile::new(format!("f{i}.ts"), "x".repeat(i)))
            .collect();
        let lengths = map_files(&files, |f| f.content.len());
        assert_eq!(lengths, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn function_spans_skip_broken_files() {
        let files = vec![
            SourceFile::new("a.ts", "function one() {}
const two = () => 2;"),
            SourceFile::new("bad.ts", "function((("),
            SourceFile::new("b.ts", "class K { three() {} }"),
        ];
        let spans = function_spans(&files);
        let names: Vec<_> = spans
            .iter()
            .map(|s| (s.name.as_str(), s.source_file_id.as_str()))
            .collect();
        assert_eq!(names, vec![("one", "a.ts"), ("two", "a.ts"), ("three", "b.ts")]);
        assert_eq!(spans[0].start_offset, 0);
    }
}
