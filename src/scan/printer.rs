//! Token-level re-rendering for nodes whose span cannot be sliced.

use thiserror::Error;
use tree_sitter::Node;

/// Named nodes printed as one token even though they have children.
const ATOMIC_KINDS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "rune_literal",
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{kind} leaf at {start}..{end} is outside the {len}-byte source")]
    Unresolved {
        kind: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("{kind} leaf at {start}..{end} is not valid UTF-8")]
    Utf8 {
        kind: &'static str,
        start: usize,
        end: usize,
    },
}

/// Renders `nodes` token by token, separated by single spaces.
///
/// Anonymous tokens print their literal kind. Named leaves are resolved
/// against `source` and fail if they fall outside it.
///
/// # Errors
/// Returns `RenderError` when a named leaf cannot be resolved.
pub fn render(nodes: &[Node], source: &[u8]) -> Result<String, RenderError> {
    let mut tokens = Vec::new();
    for node in nodes {
        collect_tokens(*node, source, &mut tokens)?;
    }
    Ok(tokens.join(" "))
}

fn collect_tokens<'s>(
    node: Node,
    source: &'s [u8],
    out: &mut Vec<&'s str>,
) -> Result<(), RenderError> {
    if node.child_count() == 0 || ATOMIC_KINDS.contains(&node.kind()) {
        out.push(leaf_text(node, source)?);
        return Ok(());
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_tokens(child, source, out)?;
    }
    Ok(())
}

fn leaf_text<'s>(node: Node, source: &'s [u8]) -> Result<&'s str, RenderError> {
    let kind = node.kind();
    if !node.is_named() {
        return Ok(kind);
    }

    let (start, end) = (node.start_byte(), node.end_byte());
    let bytes = source.get(start..end).ok_or(RenderError::Unresolved {
        kind,
        start,
        end,
        len: source.len(),
    })?;
    std::str::from_utf8(bytes).map_err(|_| RenderError::Utf8 { kind, start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Lang;
    use tree_sitter::{Parser, Tree};

    fn parse(code: &str) -> Tree {
        let mut parser = Parser::new();
        parser.set_language(&Lang::Go.grammar()).unwrap();
        parser.parse(code, None).unwrap()
    }

    fn find<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        children.into_iter().find_map(|c| find(c, kind))
    }

    #[test]
    fn test_renders_against_own_source() {
        let code = "package p\n\nfunc f(a int) int { return a + \"x\" }\n";
        let tree = parse(code);
        let ret = find(tree.root_node(), "return_statement").unwrap();
        assert_eq!(render(&[ret], code.as_bytes()).unwrap(), "return a + \"x\"");
    }

    #[test]
    fn test_anonymous_only_node_needs_no_source() {
        let code = "package p\n\nfunc f() {\n\tfor {\n\t\tbreak\n\t}\n}\n";
        let tree = parse(code);
        let brk = find(tree.root_node(), "break_statement").unwrap();
        assert_eq!(render(&[brk], b"").unwrap(), "break");
    }

    #[test]
    fn test_unresolved_named_leaf() {
        let code = "package p\n\nfunc f(a int) int { return a }\n";
        let tree = parse(code);
        let ret = find(tree.root_node(), "return_statement").unwrap();
        let err = render(&[ret], b"short").unwrap_err();
        assert!(matches!(err, RenderError::Unresolved { kind: "identifier", .. }));
    }

    #[test]
    fn test_node_list() {
        let code = "package p\n\nfunc f() {\n\tfor {\n\t\tbreak\n\t\tcontinue\n\t}\n}\n";
        let tree = parse(code);
        let brk = find(tree.root_node(), "break_statement").unwrap();
        let cont = find(tree.root_node(), "continue_statement").unwrap();
        assert_eq!(render(&[brk, cont], code.as_bytes()).unwrap(), "break continue");
    }
}
