//! Import specifier extraction.
//!
//! Handles:
//! - Static imports: `import { foo } from './bar'`, `import './side-effect'`
//! - Re-exports: `export * from './bar'`, `export { foo } from './bar'`
//! - Dynamic imports with a literal source: `import('./lazy')`
//! - CommonJS: `require('./legacy')`
//!
//! Specifiers are returned verbatim; resolution happens in the graph builder.

use oxc_ast::ast::*;
use oxc_ast_visit::Visit;
use oxc_ast_visit::walk::{walk_call_expression, walk_export_named_declaration};

use crate::types::{ImportKind, ImportRecord};

use super::{ParseFailure, with_program};

#[derive(Default)]
struct ImportCollector {
    records: Vec<ImportRecord>,
}

impl ImportCollector {
    fn push(&mut self, specifier: &str, kind: ImportKind) {
        self.records.push(ImportRecord {
            specifier: specifier.to_string(),
            kind,
        });
    }
}

impl<'a> Visit<'a> for ImportCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.push(decl.source.value.as_str(), ImportKind::Static);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.push(decl.source.value.as_str(), ImportKind::ReExport);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.push(source.value.as_str(), ImportKind::ReExport);
        }
        // `export function f() { return import('./x') }` still needs a walk.
        walk_export_named_declaration(self, decl);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        if let Expression::StringLiteral(lit) = &expr.source {
            self.push(lit.value.as_str(), ImportKind::Dynamic);
        }
        self.visit_expression(&expr.source);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Expression::Identifier(ident) = &call.callee
            && ident.name.as_str() == "require"
            && call.arguments.len() == 1
            && let Some(Argument::StringLiteral(lit)) = call.arguments.first()
        {
            self.push(lit.value.as_str(), ImportKind::Require);
        }
        walk_call_expression(self, call);
    }
}

/// Parse one file and list its import specifiers in source order.
pub(crate) fn extract_imports(
    file_id: &str,
    content: &str,
) -> Result<Vec<ImportRecord>, ParseFailure> {
    with_program(file_id, content, |program| {
        let mut collector = ImportCollector::default();
        collector.visit_program(program);
        collector.records
    })
}
