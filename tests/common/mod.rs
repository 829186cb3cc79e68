// tests/common/mod.rs
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nodegrep_core::config::WorkerConfig;
use nodegrep_core::scan::{
    Capture, FilterExpr, MatchData, Matcher, NopFilter, SyntaxRef, Worker,
};
use tree_sitter::Node;

/// Matches nodes by kind, optionally by operator, capturing named fields.
pub struct KindMatcher {
    pub kind: &'static str,
    pub operator: Option<&'static str>,
    pub fields: Vec<&'static str>,
}

impl KindMatcher {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            operator: None,
            fields: Vec::new(),
        }
    }

    pub fn binary(operator: &'static str) -> Self {
        Self {
            kind: "binary_expression",
            operator: Some(operator),
            fields: vec!["left", "right"],
        }
    }
}

impl Matcher for KindMatcher {
    /// Number of nodes offered to the matcher.
    type State = usize;

    fn match_node<'t>(
        &self,
        state: &mut usize,
        node: Node<'t>,
        source: &[u8],
        on_match: &mut dyn FnMut(MatchData<'t>),
    ) {
        *state += 1;
        if node.kind() != self.kind {
            return;
        }
        if let Some(op) = self.operator {
            let actual = node
                .child_by_field_name("operator")
                .and_then(|n| n.utf8_text(source).ok());
            if actual != Some(op) {
                return;
            }
        }
        let captures = self
            .fields
            .iter()
            .filter_map(|f| {
                node.child_by_field_name(*f).map(|c| Capture {
                    name: (*f).to_string(),
                    target: SyntaxRef::Node(c),
                })
            })
            .collect();
        on_match(MatchData { node, captures });
    }
}

/// Reports every block statement list as a node-list capture, empty or not.
pub struct BodyMatcher;

impl Matcher for BodyMatcher {
    type State = ();

    fn match_node<'t>(
        &self,
        _state: &mut (),
        node: Node<'t>,
        _source: &[u8],
        on_match: &mut dyn FnMut(MatchData<'t>),
    ) {
        if node.kind() != "block" {
            return;
        }
        let mut cursor = node.walk();
        let stmts: Vec<Node<'t>> = node
            .named_children(&mut cursor)
            .flat_map(|c| {
                if c.kind() != "statement_list" {
                    return vec![c];
                }
                let mut inner = c.walk();
                let list: Vec<Node<'t>> = c.named_children(&mut inner).collect();
                list
            })
            .collect();
        on_match(MatchData {
            node,
            captures: vec![Capture {
                name: "body".to_string(),
                target: SyntaxRef::Nodes(stmts),
            }],
        });
    }
}

pub fn nop() -> Arc<dyn FilterExpr> {
    Arc::new(NopFilter)
}

pub fn worker<M: Matcher>(matcher: M, config: WorkerConfig) -> Worker<M> {
    Worker::new(Arc::new(matcher), nop(), config).unwrap()
}

pub fn write_go(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

pub const ARITH: &str = "package calc\n\nfunc f(a, b int) int {\n\tx := a + b\n\ty := a * b\n\treturn x + y + 1\n}\n";
