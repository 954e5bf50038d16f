//! Python source structure via tree-sitter: function spans, class names and
//! module-level imports.

use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub top_level: bool,
}

impl FunctionDef {
    pub fn line_span(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> Option<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| tracing::error!("failed to load python grammar: {}", e))
            .ok()?;
        Some(Self { parser })
    }

    /// `None` when the source does not parse cleanly.
    pub fn parse(&mut self, source: String) -> Option<ParsedModule> {
        let tree = self.parser.parse(&source, None)?;
        if tree.root_node().has_error() {
            return None;
        }
        Some(ParsedModule { source, tree })
    }

    /// Reads and parses a file; unreadable or unparsable files are skipped.
    pub fn parse_file(&mut self, path: &Path) -> Option<ParsedModule> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!("skipping {}: {}", path.display(), e);
                return None;
            }
        };
        let parsed = self.parse(source);
        if parsed.is_none() {
            tracing::debug!("skipping {}: syntax error", path.display());
        }
        parsed
    }
}

pub struct ParsedModule {
    source: String,
    tree: Tree,
}

impl ParsedModule {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every function definition, nested ones included, in source order.
    pub fn functions(&self) -> Vec<FunctionDef> {
        let mut functions = Vec::new();
        self.visit(self.tree.root_node(), true, &mut |node, top_level| {
            if node.kind() == "function_definition" {
                if let Some(name) = self.field_text(node, "name") {
                    functions.push(FunctionDef {
                        name: name.to_string(),
                        start_line: node.start_position().row + 1,
                        end_line: end_line(node),
                        top_level,
                    });
                }
            }
        });
        functions
    }

    pub fn top_level_classes(&self) -> Vec<String> {
        let mut classes = Vec::new();
        self.visit(self.tree.root_node(), true, &mut |node, top_level| {
            if top_level && node.kind() == "class_definition" {
                if let Some(name) = self.field_text(node, "name") {
                    classes.push(name.to_string());
                }
            }
        });
        classes
    }

    pub fn has_definitions(&self) -> bool {
        let mut found = false;
        self.visit(self.tree.root_node(), true, &mut |node, _| {
            found |= matches!(node.kind(), "function_definition" | "class_definition");
        });
        found
    }

    /// Root package names of module-level `import` / `from ... import`
    /// statements. `__future__` and bare relative imports are dropped.
    pub fn imported_roots(&self) -> Vec<String> {
        let root = self.tree.root_node();
        let mut roots = Vec::new();
        for statement in root.named_children(&mut root.walk()) {
            match statement.kind() {
                "import_statement" => {
                    for child in statement.named_children(&mut statement.walk()) {
                        let target = match child.kind() {
                            "dotted_name" => Some(child),
                            "aliased_import" => child.child_by_field_name("name"),
                            _ => None,
                        };
                        if let Some(text) = target.and_then(|node| self.text(node)) {
                            roots.extend(root_package(text));
                        }
                    }
                }
                "import_from_statement" => {
                    if let Some(text) = self.field_text(statement, "module_name") {
                        roots.extend(root_package(text.trim_start_matches('.')));
                    }
                }
                _ => {}
            }
        }
        roots
    }

    fn text(&self, node: Node) -> Option<&str> {
        node.utf8_text(self.source.as_bytes()).ok()
    }

    fn field_text(&self, node: Node, field: &str) -> Option<&str> {
        node.child_by_field_name(field)
            .and_then(|child| self.text(child))
    }

    /// Depth-first walk. `top_level` holds for direct module children and
    /// the definitions wrapped by their decorators.
    fn visit<'t>(&self, node: Node<'t>, top_level: bool, f: &mut impl FnMut(Node<'t>, bool)) {
        f(node, top_level);
        let child_top_level = match node.kind() {
            "module" => true,
            "decorated_definition" => top_level,
            _ => false,
        };
        for child in node.named_children(&mut node.walk()) {
            self.visit(child, child_top_level, f);
        }
    }
}

fn end_line(node: Node) -> usize {
    let start = node.start_position();
    let end = node.end_position();
    if end.column == 0 && end.row > start.row {
        end.row
    } else {
        end.row + 1
    }
}

fn root_package(dotted: &str) -> Option<String> {
    let root = dotted.split('.').next()?.trim();
    (!root.is_empty() && root != "__future__").then(|| root.to_string())
}

/// Dotted module path for a repository-relative `.py` path.
pub fn module_name(relative: &str) -> String {
    relative
        .strip_suffix(".py")
        .unwrap_or(relative)
        .replace(['/', '\\'], ".")
}
