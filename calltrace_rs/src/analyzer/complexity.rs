//! Approximate cyclomatic complexity.
//!
//! Starts at 1 and adds one per branch point: `if`, loops, non-default
//! `case` arms, ternaries and `&&`/`||`. Good enough to rank functions
//! against each other, not an exact metric.

use oxc_ast::AstKind;
use oxc_ast_visit::Visit;
use tracing::debug;

use crate::types::{FunctionComplexity, SourceFile};

use super::ast_js::{SNIPPET_ID, index_functions, with_program};

pub(crate) fn is_decision_point(kind: &AstKind<'_>) -> bool {
    match kind {
        AstKind::IfStatement(_)
        | AstKind::ForStatement(_)
        | AstKind::ForInStatement(_)
        | AstKind::ForOfStatement(_)
        | AstKind::WhileStatement(_)
        | AstKind::DoWhileStatement(_)
        | AstKind::ConditionalExpression(_) => true,
        AstKind::SwitchCase(case) => case.test.is_some(),
        AstKind::LogicalExpression(expr) => matches!(expr.operator.as_str(), "&&" | "||"),
        _ => false,
    }
}

#[derive(Default)]
struct DecisionCounter {
    decisions: u32,
}

impl<'a> Visit<'a> for DecisionCounter {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        if is_decision_point(&kind) {
            self.decisions += 1;
        }
    }
}

/// Fallback when the code does not parse: one point per ten lines, at least 1.
fn line_heuristic(code: &str) -> u32 {
    let lines = code.lines().count() as f64;
    (lines / 10.0).round().max(1.0) as u32
}

/// Estimate the complexity of a code span. Never fails.
pub fn estimate_complexity(code: &str) -> u32 {
    let counted = with_program(SNIPPET_ID, code, |program| {
        let mut counter = DecisionCounter::default();
        counter.visit_program(program);
        counter.decisions
    });

    match counted {
        Ok(decisions) => 1 + decisions,
        Err(failure) => {
            debug!("{failure}; using line heuristic");
            line_heuristic(code)
        }
    }
}

/// Per-function complexity across a manifest, most complex first.
///
/// Ties keep manifest order, then in-file discovery order. Files that fail
/// to parse are skipped.
pub fn rank_function_complexity(files: &[SourceFile]) -> Vec<FunctionComplexity> {
    let indexes = super::map_files(files, |file| index_functions(&file.id, &file.content));

    let mut ranked = Vec::new();
    for index in indexes {
        let index = match index {
            Ok(index) => index,
            Err(failure) => {
                super::log_skipped(&failure);
                continue;
            }
        };
        for function in index.named() {
            ranked.push(FunctionComplexity {
                name: function.name.clone().unwrap_or_default(),
                file: index.file_id.clone(),
                complexity: function.complexity,
            });
        }
    }

    ranked.sort_by(|a, b| b.complexity.cmp(&a.complexity));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_else_if_counts_two_branches() {
        assert_eq!(estimate_complexity("function f(){ if(a){} else if(b){} }"), 3);
    }

    #[test]
    fn straight_line_code_is_one() {
        assert_eq!(estimate_complexity("const x = 1;\nconsole.log(x);"), 1);
        assert_eq!(estimate_complexity(""), 1);
    }

    #[test]
    fn loops_cases_ternaries_and_logicals() {
        let code = r#"
            function f(xs, mode) {
                for (let i = 0; i < 3; i++) {}
                for (const k in xs) {}
                for (const x of xs) {}
                while (mode) {}
                do {} while (false);
                switch (mode) {
                    case 1: break;
                    case 2: break;
                    default: break;
                }
                const y = mode ? 1 : 2;
                return (a && b) || c;
            }
        "#;
        // 5 loops + 2 cases + 1 ternary + 2 logicals
        assert_eq!(estimate_complexity(code), 11);
    }

    #[test]
    fn nullish_coalescing_is_not_a_branch() {
        assert_eq!(estimate_complexity("const v = a ?? b;"), 1);
    }

    #[test]
    fn unparseable_code_uses_line_heuristic() {
        let garbage = "%%% not code\n".repeat(25);
        assert_eq!(estimate_complexity(&garbage), 3);

        let short = "function (((";
        assert_eq!(estimate_complexity(short), 1);
    }

    #[test]
    fn ranking_orders_by_complexity() {
        let files = vec![
            SourceFile::new("a.ts", "function flat() { go(); }"),
            SourceFile::new(
                "b.ts",
                "function branchy(x) { if (x) {} if (!x) {} }\nfunction one(x) { return x ? 1 : 0; }",
            ),
            SourceFile::new("broken.ts", "function ((("),
        ];
        let ranked = rank_function_complexity(&files);
        let summary: Vec<_> = ranked
            .iter()
            .map(|f| (f.name.as_str(), f.complexity))
            .collect();
        assert_eq!(summary, vec![("branchy", 3), ("one", 2), ("flat", 1)]);
        assert_eq!(ranked[0].file, "b.ts");
    }
}
