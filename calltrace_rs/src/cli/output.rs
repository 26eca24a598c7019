//! Human-readable rendering of engine results.

use std::fmt::Write as _;

use colored::Colorize;

use crate::analyzer::cycles::format_cycle;
use crate::types::{
    CallHierarchyResult, DependencyResult, FunctionComplexity, KeywordFinding, ModuleGraphReport,
};

/// Source listings longer than this are cut in text output.
const MAX_SNIPPET_LINES: usize = 12;

fn snippet(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut out = String::new();
    for line in lines.iter().take(MAX_SNIPPET_LINES) {
        let _ = writeln!(out, "    {}", line.dimmed());
    }
    if lines.len() > MAX_SNIPPET_LINES {
        let _ = writeln!(
            out,
            "    {}",
            format!("... ({} more lines)", lines.len() - MAX_SNIPPET_LINES).dimmed()
        );
    }
    out
}

pub fn render_dependencies(target: &str, result: &DependencyResult) -> String {
    let mut out = String::new();
    let Some(source) = &result.target else {
        let _ = writeln!(out, "{} function `{}` not found", "✗".red().bold(), target);
        return out;
    };

    let _ = writeln!(
        out,
        "{} {} {}",
        target.bold(),
        "in".dimmed(),
        result.target_file.as_deref().unwrap_or("?").cyan()
    );
    out.push_str(&snippet(source));

    if result.dependencies.is_empty() {
        let _ = writeln!(out, "\nNo dependencies found.");
        return out;
    }

    let _ = writeln!(out, "\nDependencies ({}):", result.dependencies.len());
    for dep in &result.dependencies {
        let _ = writeln!(out, "  {} {} {}", dep.name.green(), "in".dimmed(), dep.file.cyan());
        out.push_str(&snippet(&dep.content));
    }
    out
}

pub fn render_callers(result: &CallHierarchyResult) -> String {
    let mut out = String::new();
    if result.callers.is_empty() {
        let _ = writeln!(out, "No callers of `{}` found.", result.target);
        return out;
    }

    let _ = writeln!(
        out,
        "Callers of {} ({}):",
        result.target.bold(),
        result.callers.len()
    );
    for caller in &result.callers {
        match &caller.file {
            Some(file) => {
                let _ = writeln!(out, "  {} {} {}", caller.name.green(), "in".dimmed(), file.cyan());
            }
            None => {
                let _ = writeln!(out, "  {}", caller.name.green());
            }
        }
        out.push_str(&snippet(&caller.content));
    }
    out
}

pub fn render_keywords(findings: &[KeywordFinding]) -> String {
    let mut out = String::new();
    if findings.is_empty() {
        let _ = writeln!(out, "No functions matched.");
        return out;
    }

    let _ = writeln!(out, "Functions matching keywords ({}):", findings.len());
    for finding in findings {
        let keywords: Vec<&str> = finding.found_keywords.iter().map(String::as_str).collect();
        let location = finding
            .file
            .as_deref()
            .map(|f| format!(" {} {}", "in".dimmed(), f.cyan()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {}{} [{}]",
            finding.function_name.green(),
            location,
            keywords.join(", ").yellow()
        );
    }
    out
}

pub fn render_graph(report: &ModuleGraphReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Module graph: {} modules, {} imports",
        report.nodes.len().to_string().bold(),
        report.edges.len().to_string().bold()
    );

    if report.cycles.is_empty() {
        let _ = writeln!(out, "\n{} No circular imports detected.", "✓".green().bold());
    } else {
        let _ = writeln!(
            out,
            "\n{} Circular imports detected ({} cycles):",
            "⚠".yellow().bold(),
            report.cycles.len()
        );
        for (i, cycle) in report.cycles.iter().enumerate() {
            let _ = writeln!(out, "  Cycle {}: {}", i + 1, format_cycle(cycle));
        }
    }

    if !report.hubs.is_empty() {
        let _ = writeln!(out, "\nHubs ({}):", report.hubs.len());
        for hub in &report.hubs {
            let _ = writeln!(out, "  {} ({} importers)", hub.id.cyan(), hub.importers);
        }
    }

    if !report.orphans.is_empty() {
        let _ = writeln!(out, "\nOrphans ({}):", report.orphans.len());
        for orphan in &report.orphans {
            let _ = writeln!(out, "  {}", orphan.cyan());
        }
    }
    out
}

pub fn render_hotspots(ranked: &[FunctionComplexity]) -> String {
    let mut out = String::new();
    if ranked.is_empty() {
        let _ = writeln!(out, "No named functions found.");
        return out;
    }

    let width = ranked
        .iter()
        .map(|f| f.complexity.to_string().len())
        .max()
        .unwrap_or(1);
    for function in ranked {
        let score = format!("{:>width$}", function.complexity);
        let score = if function.complexity >= 10 {
            score.red().bold()
        } else if function.complexity >= 5 {
            score.yellow()
        } else {
            score.normal()
        };
        let _ = writeln!(
            out,
            "  {}  {} {} {}",
            score,
            function.name.green(),
            "in".dimmed(),
            function.file.cyan()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CallerInfo, DependencyInfo, HubEntry};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn dependencies_not_found() {
        plain();
        let text = render_dependencies("ghost", &DependencyResult::not_found());
        assert!(text.contains("function `ghost` not found"));
    }

    #[test]
    fn dependencies_listing() {
        plain();
        let result = DependencyResult {
            target: Some("function a() { b(); }".to_string()),
            target_file: Some("src/a.ts".to_string()),
            dependencies: vec![DependencyInfo {
                name: "b".to_string(),
                content: "function b() {}".to_string(),
                file: "src/b.ts".to_string(),
            }],
        };
        let text = render_dependencies("a", &result);
        assert!(text.contains("a in src/a.ts"));
        assert!(text.contains("Dependencies (1):"));
        assert!(text.contains("b in src/b.ts"));
        assert!(text.contains("    function b() {}"));
    }

    #[test]
    fn long_snippets_are_cut() {
        plain();
        let long = (0..20).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n");
        let text = snippet(&long);
        assert!(text.contains("line11"));
        assert!(!text.contains("line12"));
        assert!(text.contains("... (8 more lines)"));
    }

    #[test]
    fn callers_listing() {
        plain();
        let result = CallHierarchyResult {
            target: "save".to_string(),
            callers: vec![CallerInfo {
                name: "main".to_string(),
                content: "function main() { save(); }".to_string(),
                file: Some("app.ts".to_string()),
            }],
        };
        let text = render_callers(&result);
        assert!(text.contains("Callers of save (1):"));
        assert!(text.contains("main in app.ts"));
    }

    #[test]
    fn graph_summary() {
        plain();
        let report = ModuleGraphReport {
            nodes: vec!["a.ts".into(), "b.ts".into()],
            cycles: vec![vec!["a.ts".into(), "b.ts".into(), "a.ts".into()]],
            hubs: vec![HubEntry {
                id: "b.ts".into(),
                importers: 7,
            }],
            ..ModuleGraphReport::default()
        };
        let text = render_graph(&report);
        assert!(text.contains("2 modules, 0 imports"));
        assert!(text.contains("Cycle 1: a.ts -> b.ts -> a.ts"));
        assert!(text.contains("b.ts (7 importers)"));
        assert!(!text.contains("Orphans"));
    }
}
