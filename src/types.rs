use serde::Serialize;

/// A pattern variable bound during matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedNode {
    pub name: String,
    pub start_offset: usize,
    pub end_offset: usize,
    /// Source text of the bound sub-tree, rendered while the tree was alive.
    pub text: String,
}

/// One accepted hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub filename: String,
    /// 1-based line of the match start.
    pub line: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<Vec<CapturedNode>>,
    /// Display text. Equals the matched bytes unless line expansion is on,
    /// in which case it covers the full enclosing line(s).
    pub text: String,
    /// Where the matched bytes begin inside `text`.
    pub match_start_offset: usize,
    pub match_length: usize,
}

impl Match {
    /// The matched part of `text`, without the surrounding line context.
    #[must_use]
    pub fn matched_text(&self) -> &str {
        let end = self.match_start_offset + self.match_length;
        self.text
            .get(self.match_start_offset..end)
            .unwrap_or(self.text.as_str())
    }

    #[must_use]
    pub fn capture_named(&self, name: &str) -> Option<&CapturedNode> {
        self.capture.as_ref()?.iter().find(|c| c.name == name)
    }
}
