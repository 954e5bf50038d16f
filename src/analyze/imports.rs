//! Import graph over python modules and first-cycle detection.

use super::python::{module_name, PythonParser};
use crate::scan::SourceTree;
use crate::types::report::{CodeQualityKind, CodeQualityWarning, Warning};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Module name -> root package names it imports.
pub type ImportGraph = BTreeMap<String, BTreeSet<String>>;

pub fn build_import_graph(tree: &SourceTree, parser: &mut PythonParser) -> ImportGraph {
    let mut graph = ImportGraph::new();
    for path in tree.python_files() {
        let Some(module) = parser.parse_file(path) else {
            continue;
        };
        graph
            .entry(module_name(&tree.relative(path)))
            .or_default()
            .extend(module.imported_roots());
    }
    graph
}

/// Depth-first search in module order; stops at the first back edge and
/// returns the cycle path with the repeated module at both ends.
pub fn find_first_cycle(graph: &ImportGraph) -> Option<Vec<String>> {
    let mut visited = HashSet::new();
    let mut stack = Vec::new();
    for node in graph.keys() {
        if visited.contains(node.as_str()) {
            continue;
        }
        if let Some(cycle) = visit(node, graph, &mut visited, &mut stack) {
            return Some(cycle);
        }
    }
    None
}

fn visit<'g>(
    node: &'g str,
    graph: &'g ImportGraph,
    visited: &mut HashSet<&'g str>,
    stack: &mut Vec<&'g str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    stack.push(node);
    for next in graph.get(node).into_iter().flatten() {
        if let Some(start) = stack.iter().position(|on_stack| *on_stack == next.as_str()) {
            let mut cycle: Vec<String> = stack[start..].iter().map(|m| m.to_string()).collect();
            cycle.push(next.clone());
            return Some(cycle);
        }
        if !visited.contains(next.as_str()) {
            if let Some(cycle) = visit(next, graph, visited, stack) {
                return Some(cycle);
            }
        }
    }
    stack.pop();
    None
}

pub fn check_circular_dependencies(
    tree: &SourceTree,
    parser: &mut PythonParser,
) -> Vec<CodeQualityWarning> {
    let graph = build_import_graph(tree, parser);
    find_first_cycle(&graph)
        .map(|cycle| CodeQualityWarning {
            kind: CodeQualityKind::CircularDependency,
            warning: Warning::new(
                format!("Circular dependency detected: {}", cycle.join(" -> ")),
                "Move shared code into a separate module or defer one of the imports.",
            ),
        })
        .into_iter()
        .collect()
}
