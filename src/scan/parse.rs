// src/scan/parse.rs
//! Raw bytes to syntax tree, with optional comment grouping.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use crate::error::{Result, ScanError};
use crate::lang::Lang;

use super::walker::AstWalker;

/// A single comment with its byte span and verbatim text (markers included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Adjacent comments with no blank line or code between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

pub struct ParsedFile {
    pub tree: Tree,
    /// Declared package name, empty when the file has no package clause.
    pub package: String,
    /// Empty unless comments were requested.
    pub comments: Vec<CommentGroup>,
    pub keeps_comments: bool,
}

impl ParsedFile {
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Reusable parser. One per worker.
pub struct SourceParser {
    parser: Parser,
    lang: Lang,
}

impl SourceParser {
    /// # Errors
    /// Returns error if the grammar is incompatible with the tree-sitter runtime.
    pub fn new(lang: Lang) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&lang.grammar())?;
        Ok(Self { parser, lang })
    }

    #[must_use]
    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Parses `source`. Any syntax error or invalid UTF-8 sequence rejects
    /// the whole file.
    ///
    /// # Errors
    /// Returns `ScanError::Parse` describing the first error node or the first
    /// undecodable byte.
    pub fn parse(&mut self, path: &Path, source: &[u8], keep_comments: bool) -> Result<ParsedFile> {
        if let Err(err) = std::str::from_utf8(source) {
            return Err(encoding_error(path, source, err.valid_up_to()));
        }

        let Some(tree) = self.parser.parse(source, None) else {
            return Err(ScanError::NoTree(path.to_path_buf()));
        };

        let root = tree.root_node();
        if root.has_error() {
            return Err(syntax_error(path, root, source));
        }

        let package = package_name(root, source);
        let comments = if keep_comments {
            group_comments(collect_comments(root, source, self.lang), source)
        } else {
            Vec::new()
        };

        Ok(ParsedFile {
            tree,
            package,
            comments,
            keeps_comments: keep_comments,
        })
    }
}

fn package_name(root: Node, source: &[u8]) -> String {
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_clause");
    let Some(clause) = clause else {
        return String::new();
    };

    let mut cursor = clause.walk();
    let ident = clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_identifier");
    ident
        .and_then(|n| n.utf8_text(source).ok())
        .unwrap_or("")
        .to_string()
}

fn collect_comments(root: Node, source: &[u8], lang: Lang) -> Vec<Comment> {
    let mut out = Vec::new();
    let walker = AstWalker::new(lang, true);
    let _ = walker.walk(root, |node| {
        if node.kind() == lang.comment_kind() {
            out.push(Comment {
                start: node.start_byte(),
                end: node.end_byte(),
                text: String::from_utf8_lossy(&source[node.start_byte()..node.end_byte()])
                    .into_owned(),
            });
        }
        std::ops::ControlFlow::Continue(())
    });
    out
}

/// Groups comments separated only by whitespace holding at most one newline.
fn group_comments(comments: Vec<Comment>, source: &[u8]) -> Vec<CommentGroup> {
    let mut groups: Vec<CommentGroup> = Vec::new();
    let mut current = CommentGroup::default();

    for comment in comments {
        if let Some(prev) = current.list.last() {
            if !is_adjacent(&source[prev.end..comment.start]) {
                groups.push(std::mem::take(&mut current));
            }
        }
        current.list.push(comment);
    }
    if !current.list.is_empty() {
        groups.push(current);
    }
    groups
}

fn is_adjacent(gap: &[u8]) -> bool {
    gap.iter().all(u8::is_ascii_whitespace) && gap.iter().filter(|&&b| b == b'\n').count() <= 1
}

fn syntax_error(path: &Path, root: Node, source: &[u8]) -> ScanError {
    let bad = first_error(root).unwrap_or(root);
    let point = bad.start_position();
    let message = if bad.is_missing() {
        format!("expected '{}'", bad.kind())
    } else {
        let text = bad.utf8_text(source).unwrap_or("").trim();
        let snippet: String = text.chars().take(20).collect();
        format!("syntax error near '{snippet}'")
    };
    ScanError::Parse {
        path: path.to_path_buf(),
        line: point.row + 1,
        column: point.column + 1,
        message,
    }
}

fn encoding_error(path: &Path, source: &[u8], offset: usize) -> ScanError {
    let before = &source[..offset];
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    ScanError::Parse {
        path: path.to_path_buf(),
        line: before.iter().filter(|&&b| b == b'\n').count() + 1,
        column: offset - line_start + 1,
        message: "illegal UTF-8 encoding".to_string(),
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
