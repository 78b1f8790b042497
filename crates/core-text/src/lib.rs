//! Styled text primitives: the rope-backed attribute buffer, selection ranges,
//! character attributes and paragraph styles (indentation + list stack).
//!
//! This crate holds no formatting policy. The indent and list engines in
//! `core-actions` decide *what* to write; this crate only stores runs and
//! answers paragraph/attribute queries.

use thiserror::Error;

mod attributes;
mod buffer;
mod paragraph;
mod range;

pub use attributes::{Attributes, Color, Font, FontTraits, LineStyle};
pub use buffer::{EditBatch, StyledBuffer, is_line_break};
pub use paragraph::{ListKind, ListStack, MarkerFormat, ParagraphStyle, TextList};
pub use range::TextRange;

/// Errors surfaced by the buffer API. Formatting engines only pass ranges they
/// have clamped, so these indicate a caller bug rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("range {location}..{end} out of bounds for text of length {len}")]
    OutOfBounds {
        location: usize,
        end: usize,
        len: usize,
    },
    #[error("end_editing called without a matching begin_editing")]
    UnbalancedEndEditing,
}

/// Grapheme helpers operating on a single paragraph's text.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;

    /// Previous grapheme boundary (returns 0 if already at or below 1st boundary).
    pub fn prev_boundary(text: &str, byte: usize) -> usize {
        if byte == 0 || byte > text.len() {
            return 0;
        }
        let mut last = 0;
        for (idx, _) in text.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }
}
