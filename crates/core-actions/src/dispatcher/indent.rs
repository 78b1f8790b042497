//! Indent engine.
//!
//! Two ways a paragraph moves left or right:
//! * inside a list the list stack grows or shrinks by one descriptor and the
//!   indentation is re-derived from depth (`depth * list_unit`, first line 0)
//! * outside a list head and first-line indent move by `indent.step`, clamped
//!   to `[minimum, maximum]`, keeping the first-line offset
//!
//! Styles are never mutated in place: each paragraph's style is cloned,
//! adjusted, then installed as a new `Rc` in one buffer transaction.

use std::rc::Rc;

use core_config::{Config, IndentConfig};
use core_state::EditorState;
use core_text::{ParagraphStyle, StyledBuffer, TextRange};
use tracing::{debug, trace, warn};

use super::list::ListCache;
use crate::paragraph::{EditTarget, resolve_target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentDirection {
    Left,
    Right,
}

impl IndentDirection {
    fn sign(self) -> f64 {
        match self {
            IndentDirection::Left => -1.0,
            IndentDirection::Right => 1.0,
        }
    }
}

/// Head indent the toolbar should show for the current selection.
pub fn current_indent(state: &EditorState, config: &Config) -> f64 {
    let minimum = config.indent().minimum;
    let typing_indent = state
        .typing
        .paragraph_style()
        .map_or(minimum, |s| s.head_indent);
    match resolve_target(&state.buffer, state.selection()) {
        EditTarget::EmptyBuffer | EditTarget::Typing => typing_indent,
        EditTarget::Nothing => minimum,
        EditTarget::Paragraphs(ranges) => ranges
            .first()
            .and_then(|r| state.buffer.paragraph_style_at(r.location))
            .map_or(minimum, |s| s.head_indent),
    }
}

/// Move the selected paragraphs (or the typing attributes) one step.
/// Returns false when there was nothing to indent.
pub fn indent(state: &mut EditorState, config: &Config, direction: IndentDirection) -> bool {
    let mut cache = ListCache::default();
    let cfg = config.indent();
    match resolve_target(&state.buffer, state.selection()) {
        EditTarget::Nothing => {
            debug!(target: "actions.indent", ?direction, "indent_no_target");
            false
        }
        EditTarget::EmptyBuffer | EditTarget::Typing => {
            let mut style = state.typing.paragraph_style().cloned().unwrap_or_default();
            step_style(&mut style, direction, cfg, &mut cache);
            debug!(target: "actions.indent", ?direction, head = style.head_indent, depth = style.list_depth(), "indent_typing");
            state.typing.paragraph = Some(Rc::new(style));
            true
        }
        EditTarget::Paragraphs(ranges) => {
            let updates: Vec<(TextRange, Rc<ParagraphStyle>)> = ranges
                .iter()
                .map(|&range| {
                    let mut style = stored_style(&state.buffer, range);
                    step_style(&mut style, direction, cfg, &mut cache);
                    trace!(target: "actions.indent", location = range.location, length = range.length, head = style.head_indent, first_line = style.first_line_head_indent, depth = style.list_depth(), "paragraph_indented");
                    (range, Rc::new(style))
                })
                .collect();
            install_styles(&mut state.buffer, &updates, "actions.indent");
            if let Some((first, _)) = updates.first()
                && let Some(style) = state.buffer.paragraph_style_at(first.location)
            {
                state.typing.paragraph = Some(style.clone());
            }
            state.dirty = true;
            debug!(target: "actions.indent", ?direction, paragraphs = updates.len(), "indent_applied");
            true
        }
    }
}

/// Clone of the style stored at the start of `range`, or a default style.
pub(crate) fn stored_style(buffer: &StyledBuffer, range: TextRange) -> ParagraphStyle {
    buffer
        .paragraph_style_at(range.location)
        .map(|s| ParagraphStyle::clone(s))
        .unwrap_or_default()
}

/// Install each style over its paragraph inside one transaction.
pub(crate) fn install_styles(
    buffer: &mut StyledBuffer,
    updates: &[(TextRange, Rc<ParagraphStyle>)],
    target: &'static str,
) {
    buffer.edit(|buf| {
        for (range, style) in updates {
            if let Err(error) = buf.set_paragraph_style(*range, style.clone()) {
                warn!(target: "actions.dispatch", op = target, %error, "paragraph_style_rejected");
            }
        }
    });
}

fn step_style(
    style: &mut ParagraphStyle,
    direction: IndentDirection,
    cfg: &IndentConfig,
    cache: &mut ListCache,
) {
    if !adjust_list_nesting(style, direction, cache, cfg) {
        step_plain_indent(style, direction.sign() * cfg.step, cfg);
    }
}

/// Shift head indent by `delta`, clamped, and keep the first-line offset
/// (never below the minimum).
fn step_plain_indent(style: &mut ParagraphStyle, delta: f64, cfg: &IndentConfig) {
    let offset = style.first_line_head_indent - style.head_indent;
    let head = cfg.clamp(style.head_indent + delta);
    let first_line = (head + offset).max(cfg.minimum);
    style.set_indents(head, first_line);
}

/// Promote or demote list nesting by one level.
///
/// Precondition: the style must already be in a list. An empty stack returns
/// `false` untouched so the caller falls back to a plain indent step.
///
/// Promotion appends a descriptor with the deepest level's marker format,
/// taken from `cache` so paragraphs promoted together share one descriptor.
/// Promotion past `maximum` keeps the current depth. Demotion drops the
/// deepest descriptor. Indentation is then re-derived from the depth.
pub fn adjust_list_nesting(
    style: &mut ParagraphStyle,
    direction: IndentDirection,
    cache: &mut ListCache,
    cfg: &IndentConfig,
) -> bool {
    let Some(deepest) = style.deepest_list() else {
        return false;
    };
    match direction {
        IndentDirection::Right => {
            let depth = style.list_depth() + 1;
            if depth as f64 * cfg.list_unit <= cfg.maximum {
                let format = deepest.format().clone();
                style.lists.push(cache.list_for(&format));
            } else {
                trace!(target: "actions.indent", depth = style.list_depth(), "list_nesting_at_maximum");
            }
        }
        IndentDirection::Left => {
            style.lists.pop();
        }
    }
    apply_list_indent(style, cfg.list_unit);
    true
}

/// Derive indentation from the list depth.
pub(crate) fn apply_list_indent(style: &mut ParagraphStyle, unit: f64) {
    let depth = style.list_depth();
    if depth == 0 {
        style.set_indents(0.0, 0.0);
    } else {
        style.set_indents(unit * depth as f64, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{ListKind, TextList};

    fn cfg() -> IndentConfig {
        IndentConfig::default()
    }

    #[test]
    fn plain_step_preserves_first_line_offset() {
        let mut s = ParagraphStyle {
            head_indent: 24.0,
            first_line_head_indent: 34.0,
            ..ParagraphStyle::default()
        };
        step_plain_indent(&mut s, 24.0, &cfg());
        assert_eq!((s.head_indent, s.first_line_head_indent), (48.0, 58.0));
        step_plain_indent(&mut s, -96.0, &cfg());
        assert_eq!((s.head_indent, s.first_line_head_indent), (0.0, 10.0));
    }

    #[test]
    fn first_line_never_below_minimum() {
        let mut s = ParagraphStyle {
            head_indent: 48.0,
            first_line_head_indent: 24.0,
            ..ParagraphStyle::default()
        };
        step_plain_indent(&mut s, -24.0, &cfg());
        assert_eq!((s.head_indent, s.first_line_head_indent), (24.0, 0.0));
    }

    #[test]
    fn nesting_requires_a_list() {
        let mut s = ParagraphStyle::default();
        let mut cache = ListCache::default();
        assert!(!adjust_list_nesting(&mut s, IndentDirection::Right, &mut cache, &cfg()));
        assert_eq!(s, ParagraphStyle::default());
    }

    #[test]
    fn promote_then_demote_couples_indent_to_depth() {
        let list = TextList::for_kind(ListKind::Ordered);
        let mut s = ParagraphStyle::default();
        s.lists.push(list.clone());
        let mut cache = ListCache::default();
        assert!(adjust_list_nesting(&mut s, IndentDirection::Right, &mut cache, &cfg()));
        assert_eq!(s.list_depth(), 2);
        assert_eq!(s.deepest_list().unwrap().format(), list.format());
        assert_ne!(s.deepest_list(), Some(&list));
        assert_eq!((s.head_indent, s.first_line_head_indent), (48.0, 0.0));
        assert!(adjust_list_nesting(&mut s, IndentDirection::Left, &mut cache, &cfg()));
        assert!(adjust_list_nesting(&mut s, IndentDirection::Left, &mut cache, &cfg()));
        assert!(!s.has_lists());
        assert_eq!((s.head_indent, s.first_line_head_indent), (0.0, 0.0));
    }

    #[test]
    fn promotion_stops_at_maximum_depth() {
        let mut s = ParagraphStyle::default();
        s.lists.push(TextList::for_kind(ListKind::Unordered));
        let mut cache = ListCache::default();
        for _ in 0..20 {
            adjust_list_nesting(&mut s, IndentDirection::Right, &mut cache, &cfg());
        }
        assert_eq!(s.list_depth(), 8);
        assert_eq!(s.head_indent, 192.0);
    }
}
