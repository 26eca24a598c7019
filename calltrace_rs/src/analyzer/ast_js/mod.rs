//! JavaScript/TypeScript AST layer built on the OXC parser.
//!
//! Everything that touches the syntax tree lives here. Trees are arena
//! allocated and never escape a single file's walk: callers hand in source
//! text and get back owned data (`FileIndex`, import records, counters).
//!
//! # Module Structure
//!
//! - `names`: function name resolution over the four declaration forms
//! - `calls`: call-site collection (`f()` and `x.f()`)
//! - `visitor`: per-file function index (spans, callees, enclosing functions)
//! - `imports`: import specifier extraction for the module graph

mod calls;
mod imports;
mod names;
mod visitor;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use tracing::debug;

pub(crate) use imports::extract_imports;
pub(crate) use visitor::{FileIndex, index_functions};

/// Id used to parse free-standing snippets (pasted code, single-file requests).
pub(crate) const SNIPPET_ID: &str = "snippet.ts";

/// A file the parser could not turn into a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseFailure {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to parse {}: {}", self.file, self.message)
    }
}

/// Pick the OXC source type for a file id.
///
/// JSX is only enabled for `.tsx`/`.jsx`, otherwise `<T>(x) => x` generics
/// would be read as JSX tags. Ids without a known extension (pasted
/// snippets, archive keys) parse as TypeScript, which accepts plain JS.
pub(crate) fn source_type_for(file_id: &str) -> SourceType {
    let ext = file_id
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let is_jsx_file = ext == "tsx" || ext == "jsx";

    SourceType::from_path(file_id)
        .unwrap_or_else(|_| SourceType::ts())
        .with_typescript(true)
        .with_jsx(is_jsx_file)
}

/// Parse `content` and run `walk` over the program while the arena is alive.
///
/// Recoverable diagnostics are logged and ignored. Only an unrecoverable
/// parse (the parser gave up and produced no program) is a failure.
///
/// Parentheses are not kept as tree nodes, so `const f = (() => {})` binds
/// the arrow directly.
pub(crate) fn with_program<R>(
    file_id: &str,
    content: &str,
    walk: impl FnOnce(&Program<'_>) -> R,
) -> Result<R, ParseFailure> {
    let allocator = Allocator::default();
    let options = ParseOptions {
        preserve_parens: false,
        ..ParseOptions::default()
    };
    let ret = Parser::new(&allocator, content, source_type_for(file_id))
        .with_options(options)
        .parse();

    if ret.panicked {
        let message = ret
            .errors
            .first()
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unrecoverable syntax error".to_string());
        return Err(ParseFailure {
            file: file_id.to_string(),
            message,
        });
    }

    if !ret.errors.is_empty() {
        debug!(
            file = file_id,
            errors = ret.errors.len(),
            "recovered from parser diagnostics: {}",
            ret.errors[0]
        );
    }

    Ok(walk(&ret.program))
}

/// Slice `[start, end)` out of `source`, tolerating spans that fall outside it.
pub(crate) fn slice_source(source: &str, start: usize, end: usize) -> String {
    source.get(start..end).unwrap_or_default().to_string()
}
