// src/scan/materialize.rs
//! Turns an accepted hit into a [`Match`] record.

use crate::config::WorkerConfig;
use crate::types::{CapturedNode, Match};

use super::file::FileContext;
use super::matcher::{Capture, MatchData};

/// Display text plus the sub-range of it that is the actual match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchText {
    pub text: String,
    pub match_start_offset: usize,
    pub match_length: usize,
}

/// Builds the record for `data`. Returns `None` only if the primary node's
/// span does not resolve in `file`, which means the matcher reported a node
/// from another tree.
#[must_use]
pub fn build_match(file: &FileContext, data: &MatchData<'_>, config: &WorkerConfig) -> Option<Match> {
    let start = file.position(data.node.start_byte())?;
    let end = file.position(data.node.end_byte())?;

    let capture = config
        .need_capture
        .then(|| capture_nodes(file, &data.captures, start.offset));
    let text = match_text(file.source(), start.offset, end.offset, config.need_match_line);

    Some(Match {
        filename: file.filename().to_string(),
        line: start.line,
        start_offset: start.offset,
        end_offset: end.offset,
        capture,
        text: text.text,
        match_start_offset: text.match_start_offset,
        match_length: text.match_length,
    })
}

fn capture_nodes(file: &FileContext, captures: &[Capture<'_>], anchor: usize) -> Vec<CapturedNode> {
    captures
        .iter()
        .map(|c| {
            let (start_offset, end_offset) = c.target.span().unwrap_or((anchor, anchor));
            CapturedNode {
                name: c.name.clone(),
                start_offset,
                end_offset,
                text: String::from_utf8_lossy(&file.node_text(&c.target)).into_owned(),
            }
        })
        .collect()
}

/// Extracts the display text for `[start, end)`.
///
/// With `whole_lines` the range is widened to the enclosing line(s); newlines
/// inside the match are kept as they are.
#[must_use]
pub fn match_text(data: &[u8], start: usize, end: usize, whole_lines: bool) -> MatchText {
    if !whole_lines {
        let text = String::from_utf8_lossy(&data[start..end]).into_owned();
        return MatchText {
            match_start_offset: 0,
            match_length: text.len(),
            text,
        };
    }

    // `if foo {` is recorded in full when only `foo` matched.
    let (line_start, line_end) = expand_to_lines(data, start, end);
    MatchText {
        text: String::from_utf8_lossy(&data[line_start..line_end]).into_owned(),
        match_start_offset: start - line_start,
        match_length: end - start,
    }
}

/// Widens `[start, end)` to the nearest line breaks on either side.
#[must_use]
pub fn expand_to_lines(data: &[u8], start: usize, end: usize) -> (usize, usize) {
    let line_start = data[..start]
        .iter()
        .rposition(|&b| is_newline(b))
        .map_or(0, |i| i + 1);
    let line_end = data[end..]
        .iter()
        .position(|&b| is_newline(b))
        .map_or(data.len(), |i| end + i);
    (line_start, line_end)
}

fn is_newline(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}
