//! Circular import detection.
//!
//! Depth-first search over the module graph with an explicit frame stack, so
//! deep import chains cannot overflow the call stack. A back edge into a node
//! on the current path closes a cycle, reported as the path slice from that
//! node plus the closing repeat: `[a, b, c, a]`.

use std::collections::{HashMap, HashSet};

use crate::types::ModuleGraph;

struct Frame<'g> {
    node: &'g str,
    next: usize,
}

/// Every cycle this walk meets, in discovery order.
///
/// Roots and neighbors are visited in insertion order. A node that has been
/// fully explored is never entered again, so overlapping cycles through an
/// already finished node are not reported twice.
pub fn find_cycles(graph: &ModuleGraph) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_path: HashMap<&str, usize> = HashMap::new();
    let mut path: Vec<&str> = Vec::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();

    for root in graph.keys() {
        if visited.contains(root.as_str()) {
            continue;
        }
        visited.insert(root);
        on_path.insert(root, 0);
        path.push(root);
        stack.push(Frame { node: root, next: 0 });

        while let Some(frame) = stack.last_mut() {
            let neighbor = graph
                .get(frame.node)
                .and_then(|targets| targets.get_index(frame.next))
                .map(String::as_str);

            let Some(neighbor) = neighbor else {
                on_path.remove(frame.node);
                stack.pop();
                path.pop();
                continue;
            };
            frame.next += 1;

            if let Some(&start) = on_path.get(neighbor) {
                let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
                cycle.push(neighbor.to_string());
                cycles.push(cycle);
            } else if visited.insert(neighbor) {
                on_path.insert(neighbor, path.len());
                path.push(neighbor);
                stack.push(Frame {
                    node: neighbor,
                    next: 0,
                });
            }
        }
    }

    cycles
}

/// One-line rendering of a cycle; long cycles keep both ends.
pub fn format_cycle(cycle: &[String]) -> String {
    if cycle.len() > 12 {
        format!(
            "{} -> ... ({} intermediate) ... -> {}",
            cycle[..5].join(" -> "),
            cycle.len() - 10,
            cycle[cycle.len() - 5..].join(" -> ")
        )
    } else {
        cycle.join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use super::{find_cycles, format_cycle};
    use crate::types::ModuleGraph;

    fn graph(edges: &[(&str, &str)]) -> ModuleGraph {
        let mut graph = ModuleGraph::new();
        for (from, to) in edges {
            graph.entry(from.to_string()).or_default().insert(to.to_string());
            graph.entry(to.to_string()).or_default();
        }
        graph
    }

    #[test]
    fn detects_three_node_cycle() {
        let cycles = find_cycles(&graph(&[("A", "B"), ("B", "C"), ("C", "A")]));
        assert_eq!(cycles, vec![vec!["A", "B", "C", "A"]]);
    }

    #[test]
    fn detects_self_loop() {
        let cycles = find_cycles(&graph(&[("a", "a")]));
        assert_eq!(cycles, vec![vec!["a", "a"]]);
    }

    #[test]
    fn no_cycle() {
        let cycles = find_cycles(&graph(&[("a", "b"), ("b", "c"), ("a", "c")]));
        assert!(cycles.is_empty());
    }

    #[test]
    fn cycle_reached_through_a_tail() {
        // entry -> a -> b -> c -> a, d -> e
        let cycles = find_cycles(&graph(&[
            ("entry", "a"),
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("d", "e"),
        ]));
        assert_eq!(cycles, vec![vec!["a", "b", "c", "a"]]);
    }

    #[test]
    fn multiple_disjoint_cycles() {
        let cycles = find_cycles(&graph(&[("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")]));
        assert_eq!(cycles, vec![vec!["a", "b", "a"], vec!["c", "d", "c"]]);
    }

    #[test]
    fn finished_nodes_are_not_reexplored() {
        // b is finished before c reaches it again; only a <-> b is reported.
        let cycles = find_cycles(&graph(&[("a", "b"), ("b", "a"), ("c", "b")]));
        assert_eq!(cycles, vec![vec!["a", "b", "a"]]);
    }

    #[test]
    fn nested_back_edges_are_all_reported() {
        let cycles = find_cycles(&graph(&[("a", "b"), ("b", "c"), ("c", "b"), ("c", "a")]));
        assert_eq!(cycles, vec![vec!["b", "c", "b"], vec!["a", "b", "c", "a"]]);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let names: Vec<String> = (0..50_000).map(|i| format!("m{i}")).collect();
        let mut g = ModuleGraph::new();
        for pair in names.windows(2) {
            g.entry(pair[0].clone()).or_default().insert(pair[1].clone());
        }
        g.entry(names[names.len() - 1].clone())
            .or_default()
            .insert(names[0].clone());
        let cycles = find_cycles(&g);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 50_001);
    }

    #[test]
    fn empty_graph() {
        assert!(find_cycles(&ModuleGraph::new()).is_empty());
    }

    #[test]
    fn format_short_and_long_cycles() {
        let short: Vec<String> = ["a", "b", "a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(format_cycle(&short), "a -> b -> a");

        let long: Vec<String> = (0..14).map(|i| format!("m{i}")).collect();
        let text = format_cycle(&long);
        assert!(text.starts_with("m0 -> m1"));
        assert!(text.contains("(4 intermediate)"));
        assert!(text.ends_with("m12 -> m13"));
    }
}
