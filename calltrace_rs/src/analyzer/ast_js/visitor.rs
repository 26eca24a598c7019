//! Per-file function index.
//!
//! One walk over a file records every function-like node (named or not) in
//! pre-order, what each one calls, its estimated complexity, and every call
//! site together with its nearest enclosing function. The result is owned
//! data, so the tree can be dropped as soon as the walk is over.
//!
//! Callees and decision points land on the innermost open function and are
//! folded into its parent when it closes, so nested closures count for every
//! enclosing function without walking any subtree twice.

use std::collections::BTreeSet;

use oxc_ast::AstKind;
use oxc_ast::ast::CallExpression;
use oxc_ast_visit::Visit;

use crate::analyzer::complexity::is_decision_point;
use crate::types::FunctionSpan;

use super::calls::callee_name;
use super::names::{FnNode, display_span, resolve_function_name};
use super::{ParseFailure, slice_source, with_program};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexedFunction {
    /// `None` for anonymous functions.
    pub name: Option<String>,
    pub start: usize,
    pub end: usize,
    /// Names called anywhere in the lexical body.
    pub calls: BTreeSet<String>,
    pub complexity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallSite {
    pub callee: String,
    /// Index into `FileIndex::functions` of the nearest enclosing function.
    pub enclosing: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileIndex {
    pub file_id: String,
    /// Function-like nodes in traversal (pre-)order.
    pub functions: Vec<IndexedFunction>,
    pub call_sites: Vec<CallSite>,
}

impl FileIndex {
    /// First function with the given name, in traversal order.
    pub(crate) fn find(&self, name: &str) -> Option<&IndexedFunction> {
        self.named().find(|f| f.name.as_deref() == Some(name))
    }

    pub(crate) fn named(&self) -> impl Iterator<Item = &IndexedFunction> {
        self.functions.iter().filter(|f| f.name.is_some())
    }

    /// Named function of the nearest enclosing function of `site`.
    pub(crate) fn enclosing_named(&self, site: &CallSite) -> Option<&IndexedFunction> {
        site.enclosing
            .and_then(|idx| self.functions.get(idx))
            .filter(|f| f.name.is_some())
    }

    pub(crate) fn spans(&self) -> Vec<FunctionSpan> {
        self.named()
            .map(|f| FunctionSpan {
                name: f.name.clone().unwrap_or_default(),
                start_offset: f.start,
                end_offset: f.end,
                source_file_id: self.file_id.clone(),
            })
            .collect()
    }
}

impl IndexedFunction {
    pub(crate) fn content(&self, source: &str) -> String {
        slice_source(source, self.start, self.end)
    }
}

struct FunctionIndexer<'a> {
    /// Nodes from the root down to (excluding) the node being entered.
    ancestors: Vec<AstKind<'a>>,
    /// Indices of the function-like nodes currently open.
    frames: Vec<usize>,
    functions: Vec<IndexedFunction>,
    call_sites: Vec<CallSite>,
}

impl<'a> FunctionIndexer<'a> {
    fn new() -> Self {
        Self {
            ancestors: Vec::new(),
            frames: Vec::new(),
            functions: Vec::new(),
            call_sites: Vec::new(),
        }
    }

    fn open_function(&mut self, node: FnNode<'a>) {
        let parent = self.ancestors.last().copied();
        let span = display_span(node, parent);
        self.functions.push(IndexedFunction {
            name: resolve_function_name(node, parent),
            start: span.start as usize,
            end: span.end as usize,
            calls: BTreeSet::new(),
            complexity: 1,
        });
        self.frames.push(self.functions.len() - 1);
    }

    fn close_function(&mut self) {
        let Some(closed) = self.frames.pop() else {
            return;
        };
        let Some(&parent) = self.frames.last() else {
            return;
        };
        let calls = self.functions[closed].calls.clone();
        let decisions = self.functions[closed].complexity - 1;
        let parent = &mut self.functions[parent];
        parent.calls.extend(calls);
        parent.complexity += decisions;
    }

    fn innermost(&mut self) -> Option<&mut IndexedFunction> {
        let idx = *self.frames.last()?;
        self.functions.get_mut(idx)
    }

    fn record_call_site(&mut self, call: &CallExpression<'a>) {
        if let Some(name) = callee_name(call) {
            if let Some(function) = self.innermost() {
                function.calls.insert(name.to_string());
            }
            self.call_sites.push(CallSite {
                callee: name.to_string(),
                enclosing: self.frames.last().copied(),
            });
        }
    }
}

impl<'a> Visit<'a> for FunctionIndexer<'a> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        if let Some(node) = FnNode::from_kind(kind) {
            self.open_function(node);
        } else if let AstKind::CallExpression(call) = kind {
            self.record_call_site(call);
        }
        if is_decision_point(&kind) {
            if let Some(function) = self.innermost() {
                function.complexity += 1;
            }
        }
        self.ancestors.push(kind);
    }

    fn leave_node(&mut self, kind: AstKind<'a>) {
        self.ancestors.pop();
        if FnNode::from_kind(kind).is_some() {
            self.close_function();
        }
    }
}

/// Parse one file and index its functions and call sites.
pub(crate) fn index_functions(file_id: &str, content: &str) -> Result<FileIndex, ParseFailure> {
    with_program(file_id, content, |program| {
        let mut indexer = FunctionIndexer::new();
        indexer.visit_program(program);
        FileIndex {
            file_id: file_id.to_string(),
            functions: indexer.functions,
            call_sites: indexer.call_sites,
        }
    })
}
