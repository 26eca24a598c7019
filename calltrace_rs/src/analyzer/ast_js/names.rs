//! Function name resolution.
//!
//! A function-like node is named by one of four shapes, tried in order:
//!
//! 1. `function foo() {}` - its own identifier
//! 2. `const foo = function () {}` / `const foo = () => {}` - the binding
//! 3. `class A { foo() {} }` - the method key
//! 4. `({ foo: () => {} })` / `({ foo() {} })` - the property key
//!
//! Only the immediate parent is inspected. Anything else is anonymous.

use oxc_ast::AstKind;
use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};

/// The two function-like node kinds of the tree.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FnNode<'a> {
    Function(&'a Function<'a>),
    Arrow(&'a ArrowFunctionExpression<'a>),
}

impl<'a> FnNode<'a> {
    /// Function-like view of a tree node, if it is one.
    ///
    /// Body-less functions (`declare function`, overload signatures) are
    /// type-level declarations and do not count.
    pub(crate) fn from_kind(kind: AstKind<'a>) -> Option<Self> {
        match kind {
            AstKind::Function(func) if func.body.is_some() => Some(FnNode::Function(func)),
            AstKind::ArrowFunctionExpression(arrow) => Some(FnNode::Arrow(arrow)),
            _ => None,
        }
    }

    pub(crate) fn span(self) -> Span {
        match self {
            FnNode::Function(func) => func.span,
            FnNode::Arrow(arrow) => arrow.span,
        }
    }

    fn own_identifier(self) -> Option<&'a str> {
        match self {
            FnNode::Function(func) => func.id.as_ref().map(|id| id.name.as_str()),
            FnNode::Arrow(_) => None,
        }
    }

    /// True when `expr` is this very node used as an expression.
    fn is_expression(self, expr: &Expression<'a>) -> bool {
        matches!(
            expr,
            Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_)
        ) && expr.span() == self.span()
    }
}

/// Resolve the canonical name of `node` given its immediate `parent`.
pub(crate) fn resolve_function_name<'a>(
    node: FnNode<'a>,
    parent: Option<AstKind<'a>>,
) -> Option<String> {
    if let Some(name) = node.own_identifier() {
        return Some(name.to_string());
    }

    match parent? {
        AstKind::VariableDeclarator(decl) => match (&decl.id, &decl.init) {
            (BindingPattern::BindingIdentifier(id), Some(init)) if node.is_expression(init) => {
                Some(id.name.to_string())
            }
            _ => None,
        },
        AstKind::MethodDefinition(method) if method.value.span == node.span() => {
            static_key_name(&method.key, method.computed)
        }
        AstKind::ObjectProperty(prop) if node.is_expression(&prop.value) => {
            static_key_name(&prop.key, prop.computed)
        }
        _ => None,
    }
}

/// Span reported as the function's source text.
///
/// Class methods and object method shorthand report the member span so the
/// text starts with the member name instead of the parameter list.
pub(crate) fn display_span<'a>(node: FnNode<'a>, parent: Option<AstKind<'a>>) -> Span {
    match parent {
        Some(AstKind::MethodDefinition(method)) if method.value.span == node.span() => method.span,
        Some(AstKind::ObjectProperty(prop)) if prop.method && node.is_expression(&prop.value) => {
            prop.span
        }
        _ => node.span(),
    }
}

fn static_key_name(key: &PropertyKey<'_>, computed: bool) -> Option<String> {
    if computed {
        return None;
    }
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        _ => None,
    }
}
