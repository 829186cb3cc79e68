// src/scan/file.rs
//! The file currently being scanned.
//!
//! Bytes, position table and file identity live in one value that is built
//! after a successful parse and dropped when the file is done. Nothing about
//! a file outlives its scan, so a table can never be paired with another
//! file's bytes.

use std::borrow::Cow;

use tree_sitter::Node;

use super::matcher::SyntaxRef;
use super::position::{Position, PositionTable};
use super::printer;

pub struct FileContext {
    filename: String,
    package: String,
    source: Vec<u8>,
    table: PositionTable,
}

impl FileContext {
    #[must_use]
    pub fn new(filename: String, package: String, source: Vec<u8>) -> Self {
        let table = PositionTable::new(&source);
        Self {
            filename,
            package,
            source,
            table,
        }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Declared package name, empty if the file has none.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    #[must_use]
    pub fn position(&self, offset: usize) -> Option<Position> {
        self.table.position(offset)
    }

    /// Source text of `item`.
    ///
    /// Slices the buffer when the span is valid for this file. Otherwise a
    /// comment yields its stored text and anything else is re-rendered.
    ///
    /// # Panics
    /// Panics if re-rendering fails: the node does not belong to this file
    /// and its text cannot be recovered.
    #[must_use]
    pub fn node_text(&self, item: &SyntaxRef<'_>) -> Cow<'_, [u8]> {
        let Some((from, to)) = item.span() else {
            return Cow::Borrowed(&[]);
        };
        if self.table.is_sliceable(from, to) {
            return Cow::Borrowed(&self.source[from..to]);
        }

        match item {
            SyntaxRef::Comment(c) => Cow::Owned(c.text.as_bytes().to_vec()),
            SyntaxRef::Node(n) => Cow::Owned(self.render(std::slice::from_ref(n))),
            SyntaxRef::Nodes(list) => Cow::Owned(self.render(list)),
        }
    }

    fn render(&self, nodes: &[Node<'_>]) -> Vec<u8> {
        match printer::render(nodes, &self.source) {
            Ok(text) => text.into_bytes(),
            Err(err) => panic!("{}: cannot render node text: {err}", self.filename),
        }
    }
}
