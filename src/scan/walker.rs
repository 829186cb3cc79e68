//! Deterministic pre-order traversal over named syntax nodes.

use std::ops::ControlFlow;

use tree_sitter::Node;

use crate::lang::Lang;

/// Visits every named node once, parents before children, siblings in
/// source order. Comment nodes are skipped unless requested.
pub struct AstWalker {
    comment_kind: &'static str,
    include_comments: bool,
}

impl AstWalker {
    #[must_use]
    pub fn new(lang: Lang, include_comments: bool) -> Self {
        Self {
            comment_kind: lang.comment_kind(),
            include_comments,
        }
    }

    /// Walks the tree under `root`. Breaking out of `visit` stops the walk;
    /// this is the only per-node checkpoint for an external abort.
    pub fn walk<'t, F>(&self, root: Node<'t>, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(Node<'t>) -> ControlFlow<()>,
    {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            let is_comment = node.kind() == self.comment_kind;
            if node.is_named() && (self.include_comments || !is_comment) {
                visit(node)?;
            }

            if !is_comment && cursor.goto_first_child() {
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return ControlFlow::Continue(());
                }
            }
        }
    }
}
