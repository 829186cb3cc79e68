//! Machine-generated file detection from comment text.
//!
//! A comment group marks the file as generated only when it carries both a
//! generation phrase and an edit warning. The phrases may sit on different
//! lines of the group, in any order. Nonstandard markers are missed.

use super::parse::{CommentGroup, ParsedFile};

const GENERATED_PHRASES: &[&str] = &[" code generated ", " generated by "];
const DO_NOT_EDIT_PHRASES: &[&str] = &["do not edit", "don't edit"];

/// Returns `true` if any comment group of `file` is a generation marker.
/// Always `false` when the file was parsed without comments.
#[must_use]
pub fn is_autogen_file(file: &ParsedFile) -> bool {
    file.comments.iter().any(is_autogen_comment)
}

#[must_use]
pub fn is_autogen_comment(group: &CommentGroup) -> bool {
    let mut generated = false;
    let mut do_not_edit = false;
    for comment in &group.list {
        let s = comment.text.to_lowercase();
        generated = generated || GENERATED_PHRASES.iter().any(|p| s.contains(p));
        do_not_edit = do_not_edit || DO_NOT_EDIT_PHRASES.iter().any(|p| s.contains(p));
        if generated && do_not_edit {
            return true;
        }
    }
    false
}
