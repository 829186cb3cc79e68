// src/scan/scope.rs
//! Enclosing declaration scope, tracked alongside the pre-order walk.

use tree_sitter::Node;

/// Declaration context of the node currently being matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Receiver type of the enclosing method, or the type being declared.
    pub type_name: String,
    /// Enclosing function or method, empty at package level.
    pub func_name: String,
    /// 1-based index of the enclosing function literal within its
    /// declaration, 0 outside closures.
    pub closure_id: usize,
}

struct Frame {
    end: usize,
    scope: Scope,
}

/// Maintains [`Scope`] as nodes arrive in pre-order.
///
/// The walk has no exit events, so a frame is popped once a node starts at or
/// past its end offset.
#[derive(Default)]
pub struct ScopeTracker {
    stack: Vec<Frame>,
    base: Scope,
    closures: usize,
}

impl ScopeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances to `node` and returns the scope it sits in. A declaration
    /// node is inside its own scope.
    pub fn enter(&mut self, node: Node<'_>, source: &[u8]) -> &Scope {
        let start = node.start_byte();
        while self.stack.last().is_some_and(|f| f.end <= start) {
            self.stack.pop();
        }
        if self.stack.is_empty() {
            self.closures = 0;
        }

        if let Some(scope) = self.derive(node, source) {
            self.stack.push(Frame {
                end: node.end_byte(),
                scope,
            });
        }
        self.current()
    }

    #[must_use]
    pub fn current(&self) -> &Scope {
        self.stack.last().map_or(&self.base, |f| &f.scope)
    }

    fn derive(&mut self, node: Node<'_>, source: &[u8]) -> Option<Scope> {
        let outer = self.current().clone();
        match node.kind() {
            "function_declaration" => {
                self.closures = 0;
                Some(Scope {
                    type_name: String::new(),
                    func_name: field_text(node, "name", source),
                    closure_id: 0,
                })
            }
            "method_declaration" => {
                self.closures = 0;
                let type_name = node
                    .child_by_field_name("receiver")
                    .and_then(first_type_identifier)
                    .and_then(|n| n.utf8_text(source).ok())
                    .unwrap_or("")
                    .to_string();
                Some(Scope {
                    type_name,
                    func_name: field_text(node, "name", source),
                    closure_id: 0,
                })
            }
            "type_spec" | "type_alias" => Some(Scope {
                type_name: field_text(node, "name", source),
                ..outer
            }),
            "func_literal" => {
                self.closures += 1;
                Some(Scope {
                    closure_id: self.closures,
                    ..outer
                })
            }
            _ => None,
        }
    }
}

fn field_text(node: Node<'_>, field: &str, source: &[u8]) -> String {
    node.child_by_field_name(field)
        .and_then(|n| n.utf8_text(source).ok())
        .unwrap_or("")
        .to_string()
}

/// Base type name of a receiver, seen through pointers and type arguments.
fn first_type_identifier(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() == "type_identifier" {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(first_type_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Lang;
    use crate::scan::parse::SourceParser;
    use crate::scan::walker::AstWalker;
    use std::ops::ControlFlow;
    use std::path::Path;

    /// Scope at every node of `kind`, in walk order.
    fn scopes_at(code: &str, kind: &str) -> Vec<Scope> {
        let mut parser = SourceParser::new(Lang::Go).unwrap();
        let parsed = parser.parse(Path::new("t.go"), code.as_bytes(), false).unwrap();
        let mut tracker = ScopeTracker::new();
        let mut out = Vec::new();
        let _ = AstWalker::new(Lang::Go, false).walk(parsed.root(), |node| {
            let scope = tracker.enter(node, code.as_bytes());
            if node.kind() == kind {
                out.push(scope.clone());
            }
            ControlFlow::Continue(())
        });
        out
    }

    fn scope(type_name: &str, func_name: &str, closure_id: usize) -> Scope {
        Scope {
            type_name: type_name.to_string(),
            func_name: func_name.to_string(),
            closure_id,
        }
    }

    #[test]
    fn test_package_level_is_empty() {
        let got = scopes_at("package p\n\nvar x = 1\n", "int_literal");
        assert_eq!(got, vec![Scope::default()]);
    }

    #[test]
    fn test_function_and_method() {
        let code = "package p\n\nfunc f() { _ = 1 }\n\nfunc (t *T) m() { _ = 2 }\n\nvar y = 3\n";
        let got = scopes_at(code, "int_literal");
        assert_eq!(got, vec![scope("", "f", 0), scope("T", "m", 0), Scope::default()]);
    }

    #[test]
    fn test_generic_receiver() {
        let code = "package p\n\nfunc (l *List[E]) Len() int { return 0 }\n";
        assert_eq!(scopes_at(code, "int_literal"), vec![scope("List", "Len", 0)]);
    }

    #[test]
    fn test_type_spec() {
        let code = "package p\n\ntype S struct {\n\tA [4]int\n}\n";
        assert_eq!(scopes_at(code, "int_literal"), vec![scope("S", "", 0)]);
    }

    #[test]
    fn test_closures_are_numbered_per_declaration() {
        let code = "package p\n\n\
            func f() {\n\t_ = 0\n\tg := func() { _ = 1 }\n\th := func() { _ = 2 }\n\t_ = 3\n}\n\n\
            func k() {\n\t_ = func() { _ = 4 }\n}\n";
        let got: Vec<usize> = scopes_at(code, "int_literal")
            .into_iter()
            .map(|s| s.closure_id)
            .collect();
        assert_eq!(got, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_package_level_closures_restart_numbering() {
        let code = "package p\n\n\
            func f() {\n\t_ = func() {}\n\t_ = func() {}\n}\n\n\
            var g = func() int { return 7 }\n";
        assert_eq!(scopes_at(code, "int_literal"), vec![scope("", "", 1)]);
    }

    #[test]
    fn test_declaration_node_sees_own_scope() {
        let code = "package p\n\nfunc f() {}\n";
        assert_eq!(scopes_at(code, "function_declaration"), vec![scope("", "f", 0)]);
    }
}
