//! Selection & paragraph resolver.
//!
//! Turns the editor selection into the set of paragraph spans a formatting
//! operation should touch, and classifies the edge cases where there is no
//! stored paragraph to format yet:
//! * empty buffer
//! * caret at the end of text that ends with a line break (the user pressed
//!   return and the new paragraph has no characters yet)
//!
//! In both cases the operation writes the typing attributes instead of the
//! buffer. The resolver never mutates anything.

use core_text::{StyledBuffer, TextRange};

/// Where a paragraph-level operation should write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// No selection, or a selection past the end of the text.
    Nothing,
    /// The buffer holds no characters; only typing attributes exist.
    EmptyBuffer,
    /// Caret sits in the still-empty paragraph after a trailing line break.
    Typing,
    /// Stored paragraphs, in document order, each non-empty and in bounds.
    Paragraphs(Vec<TextRange>),
}

/// Clamp `selection` to a buffer of `len` chars.
///
/// A caret is pulled back to `len - 1`; a range starting past the end yields
/// `None`; an overrunning length is truncated.
pub fn clamped_selection(len: usize, selection: TextRange) -> Option<TextRange> {
    if selection.is_not_found() || len == 0 {
        return None;
    }
    if selection.is_caret() {
        return Some(TextRange::caret(selection.location.min(len - 1)));
    }
    if selection.location >= len {
        return None;
    }
    let length = selection.length.min(len - selection.location);
    Some(TextRange::new(selection.location, length))
}

/// Split `range` into the paragraph spans it covers.
///
/// Walks paragraph by paragraph from `range.location` and stops on a zero
/// advance. Falls back to `[range]` when no paragraph was found.
pub fn paragraph_ranges(buffer: &StyledBuffer, range: TextRange) -> Vec<TextRange> {
    let mut ranges = Vec::new();
    let mut location = range.location;
    let end = range.end();
    while location < end {
        let para = buffer.paragraph_range(TextRange::caret(location));
        ranges.push(para);
        let next = para.end();
        if next <= location {
            break;
        }
        location = next;
    }
    if ranges.is_empty() {
        ranges.push(range);
    }
    ranges
}

/// True when an edit must target the typing attributes: caret, at or past
/// the end of the text, and the last stored character is a line break.
pub fn uses_typing_attributes(buffer: &StyledBuffer, selection: TextRange) -> bool {
    !selection.is_not_found()
        && selection.is_caret()
        && selection.location >= buffer.len()
        && buffer.ends_with_line_break()
}

/// True when a formatting operation has nothing to act on: the buffer has
/// text, the selection is not the typing case, and it does not clamp into the
/// text (no selection, or a range starting past the end).
pub fn selection_out_of_reach(buffer: &StyledBuffer, selection: TextRange) -> bool {
    !buffer.is_empty()
        && !uses_typing_attributes(buffer, selection)
        && clamped_selection(buffer.len(), selection).is_none()
}

/// Classify `selection` for a paragraph-level operation.
pub fn resolve_target(buffer: &StyledBuffer, selection: TextRange) -> EditTarget {
    let len = buffer.len();
    if len == 0 {
        return EditTarget::EmptyBuffer;
    }
    if uses_typing_attributes(buffer, selection) {
        return EditTarget::Typing;
    }
    let Some(clamped) = clamped_selection(len, selection) else {
        return EditTarget::Nothing;
    };
    let enclosing = buffer.paragraph_range(clamped);
    if enclosing.length == 0 {
        return EditTarget::Typing;
    }
    let ranges: Vec<TextRange> = paragraph_ranges(buffer, enclosing)
        .into_iter()
        .filter(|r| r.location < len)
        .collect();
    if ranges.is_empty() {
        EditTarget::Typing
    } else {
        EditTarget::Paragraphs(ranges)
    }
}
