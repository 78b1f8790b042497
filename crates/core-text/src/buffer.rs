//! Rope-backed styled text buffer.
//!
//! Text lives in a `ropey::Rope`; styling is a list of contiguous attribute
//! runs covering `[0, len)` with no empty runs. Adjacent runs carrying equal
//! attributes are coalesced after every mutation, so enumerating an attribute
//! yields maximal constant spans.
//!
//! Indices are `char` offsets. Paragraphs follow the rope's line breaks: a
//! paragraph includes its trailing separator, and a document ending with a
//! separator has a final empty paragraph at `len`.
//!
//! Mutation may be bracketed with [`StyledBuffer::begin_editing`] /
//! [`StyledBuffer::end_editing`]. Inside a bracket changes accumulate into one
//! pending [`EditBatch`]; only the outermost `end_editing` publishes it (bumps
//! the generation counter). Unbracketed mutations publish immediately.

use std::rc::Rc;

use ropey::Rope;
use tracing::{debug, trace};

use crate::{Attributes, ParagraphStyle, TextError, TextRange};

#[derive(Debug, Clone, PartialEq)]
struct Run {
    len: usize,
    attrs: Attributes,
}

/// Summary of one committed mutation batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditBatch {
    /// Union of every range touched inside the batch (post-edit coordinates of
    /// the last mutation; earlier ranges are not remapped).
    pub range: TextRange,
    pub mutations: usize,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
struct PendingBatch {
    depth: u32,
    range: Option<TextRange>,
    mutations: usize,
}

/// Styled text: characters plus attribute runs.
#[derive(Debug, Clone, Default)]
pub struct StyledBuffer {
    rope: Rope,
    runs: Vec<Run>,
    pending: PendingBatch,
    generation: u64,
    last_batch: Option<EditBatch>,
}

impl StyledBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with a single run of `attrs`.
    pub fn with_text(text: &str, attrs: Attributes) -> Self {
        let rope = Rope::from_str(text);
        let len = rope.len_chars();
        let runs = if len == 0 {
            Vec::new()
        } else {
            vec![Run { len, attrs }]
        };
        Self {
            rope,
            runs,
            ..Self::default()
        }
    }

    /// Total number of characters.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Characters in `range` (clamped to the buffer).
    pub fn slice(&self, range: TextRange) -> String {
        let len = self.len();
        let start = range.location.min(len);
        let end = range.end().min(len);
        self.rope.slice(start..end).to_string()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        (index < self.len()).then(|| self.rope.char(index))
    }

    /// True when the last stored character terminates a paragraph.
    pub fn ends_with_line_break(&self) -> bool {
        self.len()
            .checked_sub(1)
            .and_then(|i| self.char_at(i))
            .is_some_and(is_line_break)
    }

    /// Number of committed batches so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_batch(&self) -> Option<EditBatch> {
        self.last_batch
    }

    // ---------------------------------------------------------------------
    // Paragraphs
    // ---------------------------------------------------------------------

    /// Smallest paragraph-aligned range containing `range`. A caret at `len`
    /// after a trailing separator resolves to the empty range `(len, 0)`.
    pub fn paragraph_range(&self, range: TextRange) -> TextRange {
        let len = self.len();
        let start = range.location.min(len);
        let last = if range.length > 0 {
            range.end().saturating_sub(1).min(len)
        } else {
            start
        };
        let first_line = self.rope.char_to_line(start);
        let last_line = self.rope.char_to_line(last.max(start));
        let para_start = self.rope.line_to_char(first_line);
        let para_end = self.rope.line_to_char(last_line + 1);
        TextRange::new(para_start, para_end - para_start)
    }

    // ---------------------------------------------------------------------
    // Attribute reads
    // ---------------------------------------------------------------------

    /// Attributes of the character at `index` and the run they belong to.
    pub fn attributes_at(&self, index: usize) -> Option<(&Attributes, TextRange)> {
        let mut start = 0usize;
        for run in &self.runs {
            if index < start + run.len {
                return Some((&run.attrs, TextRange::new(start, run.len)));
            }
            start += run.len;
        }
        None
    }

    /// Paragraph style stored at `index`, if any.
    pub fn paragraph_style_at(&self, index: usize) -> Option<&Rc<ParagraphStyle>> {
        self.attributes_at(index)
            .and_then(|(attrs, _)| attrs.paragraph.as_ref())
    }

    /// Enumerate a projected attribute over `range` in maximal constant spans.
    pub fn runs_of<T, F>(&self, range: TextRange, project: F) -> Vec<(TextRange, T)>
    where
        T: PartialEq,
        F: Fn(&Attributes) -> T,
    {
        let mut out: Vec<(TextRange, T)> = Vec::new();
        let mut start = 0usize;
        for run in &self.runs {
            let span = TextRange::new(start, run.len);
            start += run.len;
            let Some(overlap) = span.intersection(range) else {
                continue;
            };
            let value = project(&run.attrs);
            match out.last_mut() {
                Some((prev, prev_value))
                    if *prev_value == value && prev.end() == overlap.location =>
                {
                    prev.length += overlap.length;
                }
                _ => out.push((overlap, value)),
            }
        }
        out
    }

    // ---------------------------------------------------------------------
    // Transactions
    // ---------------------------------------------------------------------

    pub fn begin_editing(&mut self) {
        self.pending.depth += 1;
        trace!(target: "text.buffer", depth = self.pending.depth, "begin_editing");
    }

    /// Close one bracket. Returns the published batch when the outermost
    /// bracket closes and something was mutated.
    pub fn end_editing(&mut self) -> Result<Option<EditBatch>, TextError> {
        if self.pending.depth == 0 {
            return Err(TextError::UnbalancedEndEditing);
        }
        self.pending.depth -= 1;
        trace!(target: "text.buffer", depth = self.pending.depth, "end_editing");
        if self.pending.depth > 0 {
            return Ok(None);
        }
        Ok(self.publish())
    }

    /// Run `f` inside one begin/end bracket.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_editing();
        let out = f(self);
        // Depth is at least one here, so closing cannot fail.
        let _ = self.end_editing();
        out
    }

    fn publish(&mut self) -> Option<EditBatch> {
        let range = self.pending.range.take()?;
        let mutations = std::mem::take(&mut self.pending.mutations);
        self.generation += 1;
        let batch = EditBatch {
            range,
            mutations,
            generation: self.generation,
        };
        debug!(
            target: "text.buffer",
            location = range.location,
            length = range.length,
            mutations,
            generation = self.generation,
            "edit_committed"
        );
        self.last_batch = Some(batch);
        Some(batch)
    }

    fn note_mutation(&mut self, range: TextRange) {
        self.pending.range = Some(match self.pending.range {
            Some(prev) => prev.union(range),
            None => range,
        });
        self.pending.mutations += 1;
        if self.pending.depth == 0 {
            self.publish();
        }
    }

    // ---------------------------------------------------------------------
    // Attribute writes
    // ---------------------------------------------------------------------

    fn check_range(&self, range: TextRange) -> Result<(), TextError> {
        let len = self.len();
        if range.is_not_found() || range.end() > len {
            return Err(TextError::OutOfBounds {
                location: range.location,
                end: range.end(),
                len,
            });
        }
        Ok(())
    }

    /// Replace the attribute map over `range`.
    pub fn set_attributes(&mut self, range: TextRange, attrs: Attributes) -> Result<(), TextError> {
        self.update_attributes(range, |a| *a = attrs.clone())
    }

    /// Install `style` as the paragraph style over `range`, leaving other
    /// attributes untouched.
    pub fn set_paragraph_style(
        &mut self,
        range: TextRange,
        style: Rc<ParagraphStyle>,
    ) -> Result<(), TextError> {
        self.update_attributes(range, |a| a.paragraph = Some(style.clone()))
    }

    /// Apply `f` to the attributes of every run inside `range`, splitting the
    /// runs at the range boundaries first.
    pub fn update_attributes<F>(&mut self, range: TextRange, mut f: F) -> Result<(), TextError>
    where
        F: FnMut(&mut Attributes),
    {
        self.check_range(range)?;
        if range.length == 0 {
            return Ok(());
        }
        self.split_at(range.location);
        self.split_at(range.end());
        let mut start = 0usize;
        for run in &mut self.runs {
            if start >= range.location && start + run.len <= range.end() {
                f(&mut run.attrs);
            }
            start += run.len;
        }
        self.coalesce();
        trace!(target: "text.buffer", location = range.location, length = range.length, runs = self.runs.len(), "attributes_updated");
        self.note_mutation(range);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Text writes
    // ---------------------------------------------------------------------

    /// Replace the characters in `range` with `text` carrying `attrs`.
    pub fn replace(&mut self, range: TextRange, text: &str, attrs: Attributes) -> Result<(), TextError> {
        self.check_range(range)?;
        self.split_at(range.location);
        self.split_at(range.end());
        let (first, last) = self.run_span(range);
        self.runs.drain(first..last);
        self.rope.remove(range.as_range());
        let inserted = text.chars().count();
        if inserted > 0 {
            self.rope.insert(range.location, text);
            self.runs.insert(
                first,
                Run {
                    len: inserted,
                    attrs,
                },
            );
        }
        self.coalesce();
        debug_assert_eq!(self.runs.iter().map(|r| r.len).sum::<usize>(), self.len());
        self.note_mutation(TextRange::new(range.location, inserted));
        Ok(())
    }

    pub fn insert(&mut self, at: usize, text: &str, attrs: Attributes) -> Result<(), TextError> {
        self.replace(TextRange::caret(at), text, attrs)
    }

    pub fn delete(&mut self, range: TextRange) -> Result<(), TextError> {
        self.replace(range, "", Attributes::default())
    }

    /// Char index of the grapheme boundary preceding `index` within its
    /// paragraph (a paragraph separator counts as one cluster).
    pub fn prev_grapheme_boundary(&self, index: usize) -> usize {
        let index = index.min(self.len());
        if index == 0 {
            return 0;
        }
        let para = self.paragraph_range(TextRange::caret(index - 1));
        let text = self.slice(TextRange::new(para.location, index - para.location));
        let prev = crate::grapheme::prev_boundary(&text, text.len());
        para.location + text[..prev].chars().count()
    }

    // ---------------------------------------------------------------------
    // Run bookkeeping
    // ---------------------------------------------------------------------

    /// Ensure a run boundary exists at `index`.
    fn split_at(&mut self, index: usize) {
        let mut start = 0usize;
        for i in 0..self.runs.len() {
            let len = self.runs[i].len;
            if index > start && index < start + len {
                let head = index - start;
                let tail = Run {
                    len: len - head,
                    attrs: self.runs[i].attrs.clone(),
                };
                self.runs[i].len = head;
                self.runs.insert(i + 1, tail);
                return;
            }
            start += len;
            if start >= index {
                return;
            }
        }
    }

    /// Run indices `[first, last)` exactly covering `range` (boundaries must
    /// already be split).
    fn run_span(&self, range: TextRange) -> (usize, usize) {
        let mut start = 0usize;
        let mut first = self.runs.len();
        let mut last = self.runs.len();
        for (i, run) in self.runs.iter().enumerate() {
            if start == range.location && first == self.runs.len() {
                first = i;
            }
            if start == range.end() {
                last = i;
                break;
            }
            start += run.len;
        }
        if first > last {
            first = last;
        }
        (first, last)
    }

    fn coalesce(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.len == 0 {
                continue;
            }
            match merged.last_mut() {
                Some(prev) if prev.attrs == run.attrs => prev.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

/// Paragraph separators recognised by the buffer.
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}
