//! List engine.
//!
//! Classification reads the outermost descriptor of each paragraph; all
//! paragraphs in the selection must agree or the result is "no list".
//!
//! Descriptor identity decides numbering. Turning a list on reuses the
//! descriptor of a selected paragraph that already has the requested kind so
//! the new paragraphs continue its run; otherwise one fresh descriptor is
//! shared by every paragraph in the operation.

use std::collections::HashMap;
use std::rc::Rc;

use core_config::Config;
use core_state::EditorState;
use core_text::{ListKind, MarkerFormat, ParagraphStyle, StyledBuffer, TextList, TextRange};
use tracing::{debug, trace};

use super::indent::{apply_list_indent, install_styles, stored_style};
use crate::paragraph::{EditTarget, clamped_selection, resolve_target};

/// Per-operation descriptor cache keyed by marker format, so paragraphs
/// nested together in one operation share identity.
#[derive(Debug, Default)]
pub struct ListCache {
    lists: HashMap<MarkerFormat, TextList>,
}

impl ListCache {
    pub fn list_for(&mut self, format: &MarkerFormat) -> TextList {
        self.lists
            .entry(format.clone())
            .or_insert_with(|| TextList::new(format.clone()))
            .clone()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lists.len()
    }
}

/// List kind of the selection; `None` for no list, unknown markers, or a
/// selection mixing kinds.
pub fn current_list_type(state: &EditorState) -> Option<ListKind> {
    let typing_kind = || state.typing.paragraph_style().and_then(ParagraphStyle::list_kind);
    match resolve_target(&state.buffer, state.selection()) {
        EditTarget::EmptyBuffer | EditTarget::Typing => typing_kind(),
        EditTarget::Nothing => None,
        EditTarget::Paragraphs(ranges) => {
            let mut kinds = ranges.iter().map(|r| stored_kind(&state.buffer, *r));
            let Some(first) = kinds.next() else {
                return typing_kind();
            };
            if kinds.all(|k| k == first) { first } else { None }
        }
    }
}

fn stored_kind(buffer: &StyledBuffer, range: TextRange) -> Option<ListKind> {
    buffer
        .paragraph_style_at(range.location)
        .and_then(|s| s.list_kind())
}

/// Turn `kind` off when the whole selection already has it, on otherwise.
pub fn toggle_list(state: &mut EditorState, config: &Config, kind: ListKind) -> bool {
    let current = current_list_type(state);
    let target = if current == Some(kind) { None } else { Some(kind) };
    debug!(target: "actions.list", ?current, ?target, "toggle_list");
    update_list(state, config, target)
}

/// Put the selected paragraphs into a list of `kind`, or take them out of any
/// list when `kind` is `None`. Returns false when there was nothing to do.
pub fn update_list(state: &mut EditorState, config: &Config, kind: Option<ListKind>) -> bool {
    let unit = config.indent().list_unit;
    match resolve_target(&state.buffer, state.selection()) {
        EditTarget::Nothing => false,
        EditTarget::EmptyBuffer => {
            let mut style = ParagraphStyle::default();
            if let Some(kind) = kind {
                style.lists.push(TextList::for_kind(kind));
            }
            apply_list_indent(&mut style, unit);
            debug!(target: "actions.list", ?kind, head = style.head_indent, "list_empty_buffer");
            state.typing.paragraph = Some(Rc::new(style));
            true
        }
        EditTarget::Typing => {
            let mut style = state.typing.paragraph_style().cloned().unwrap_or_default();
            set_membership(&mut style, kind.map(TextList::for_kind), unit);
            debug!(target: "actions.list", ?kind, head = style.head_indent, "list_typing");
            state.typing.paragraph = Some(Rc::new(style));
            true
        }
        EditTarget::Paragraphs(ranges) => {
            let chosen = kind.map(|kind| {
                reusable_list(&state.buffer, &ranges, kind).unwrap_or_else(|| {
                    trace!(target: "actions.list", ?kind, "list_created");
                    TextList::for_kind(kind)
                })
            });
            let updates: Vec<(TextRange, Rc<ParagraphStyle>)> = ranges
                .iter()
                .map(|&range| {
                    let mut style = stored_style(&state.buffer, range);
                    set_membership(&mut style, chosen.clone(), unit);
                    trace!(target: "actions.list", location = range.location, length = range.length, list = ?style.outermost_list(), head = style.head_indent, "paragraph_list_set");
                    (range, Rc::new(style))
                })
                .collect();
            install_styles(&mut state.buffer, &updates, "actions.list");
            state.dirty = true;
            resync_typing(state);
            debug!(target: "actions.list", ?kind, paragraphs = updates.len(), "list_applied");
            true
        }
    }
}

/// Descriptor of the first selected paragraph already in a `kind` list.
fn reusable_list(buffer: &StyledBuffer, ranges: &[TextRange], kind: ListKind) -> Option<TextList> {
    ranges.iter().find_map(|r| {
        let style = buffer.paragraph_style_at(r.location)?;
        if style.list_kind() == Some(kind) {
            let list = style.outermost_list().cloned();
            trace!(target: "actions.list", ?list, "list_reused");
            list
        } else {
            None
        }
    })
}

/// Replace the list stack with `[list]` (or clear it) and re-derive indentation
/// from the new depth.
fn set_membership(style: &mut ParagraphStyle, list: Option<TextList>, unit: f64) {
    style.lists.clear();
    if let Some(list) = list {
        style.lists.push(list);
    }
    apply_list_indent(style, unit);
}

fn resync_typing(state: &mut EditorState) {
    let Some(at) = clamped_selection(state.buffer.len(), state.selection()) else {
        return;
    };
    if let Some(style) = state.buffer.paragraph_style_at(at.location) {
        state.typing.paragraph = Some(style.clone());
    }
}
