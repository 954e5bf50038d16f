use super::python::PythonParser;
use crate::scan::SourceTree;
use crate::types::report::{CodeQualityKind, CodeQualityWarning, Warning};

pub const MAX_FUNCTION_LINES: usize = 50;

pub fn check_long_functions(tree: &SourceTree, parser: &mut PythonParser) -> Vec<CodeQualityWarning> {
    let mut warnings = Vec::new();
    for path in tree.python_files() {
        let Some(module) = parser.parse_file(path) else {
            continue;
        };
        let relative = tree.relative(path);
        for function in module.functions() {
            let span = function.line_span();
            if span > MAX_FUNCTION_LINES {
                warnings.push(CodeQualityWarning {
                    kind: CodeQualityKind::LongFunction,
                    warning: Warning::new(
                        format!(
                            "Long function '{}' in {} ({} lines)",
                            function.name, relative, span
                        ),
                        format!(
                            "Split functions longer than {MAX_FUNCTION_LINES} lines into smaller helpers."
                        ),
                    ),
                });
            }
        }
    }
    warnings
}
