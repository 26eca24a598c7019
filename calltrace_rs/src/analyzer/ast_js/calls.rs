//! Call-site collection.
//!
//! A call is attributed to a name when its callee is a bare identifier
//! (`save()`) or a static member access (`store.save()` counts as `save`).
//! The receiver is ignored, so same-named methods on unrelated objects are
//! conflated. Computed members, calls through arbitrary expressions and
//! `new` expressions are not tracked.

use oxc_ast::ast::*;

/// Name a call expression resolves to, if any.
pub(crate) fn callee_name<'c>(call: &'c CallExpression<'_>) -> Option<&'c str> {
    match &call.callee {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::index_functions;

    fn calls_of(code: &str, function: &str) -> Vec<String> {
        let index = index_functions("calls.ts", code).expect("fixture parses");
        index
            .find(function)
            .map(|f| f.calls.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn bare_and_member_calls() {
        let code = r#"
            function handler(req) {
                validate(req);
                db.users.insert(req.body);
                log.info("done");
            }
        "#;
        assert_eq!(calls_of(code, "handler"), vec!["info", "insert", "validate"]);
    }

    #[test]
    fn nested_closures_count_for_the_outer_function() {
        let code = r#"
            function outer(items) {
                items.forEach((item) => { persist(item); });
                const inner = () => notify();
            }
        "#;
        assert_eq!(calls_of(code, "outer"), vec!["forEach", "notify", "persist"]);
        assert_eq!(calls_of(code, "inner"), vec!["notify"]);
    }

    #[test]
    fn nested_call_arguments_and_chains() {
        let code = "function f() { a(b(c())); fetchAll().then(render); }";
        assert_eq!(calls_of(code, "f"), vec!["a", "b", "c", "fetchAll", "then"]);
    }

    #[test]
    fn computed_and_constructor_calls_are_ignored() {
        let code = "function f() { obj['dyn'](); new Widget(); (getFn())(); }";
        assert_eq!(calls_of(code, "f"), vec!["getFn"]);
    }

    #[test]
    fn optional_calls_are_tracked() {
        let code = "function f() { maybe?.(); cache?.flush(); }";
        assert_eq!(calls_of(code, "f"), vec!["flush", "maybe"]);
    }
}
