//! Inline character formatting.
//!
//! A caret only changes the typing attributes. A range selection changes the
//! stored runs it covers and the typing attributes follow, so the next typed
//! character matches the selection.
//!
//! Reference value for toggles (is bold on? is underline single?) is the
//! typing attributes for a caret and the first selected character otherwise.

use core_config::Config;
use core_state::EditorState;
use core_text::{Attributes, Color, Font, FontTraits, LineStyle, TextRange};
use tracing::{debug, warn};

use crate::paragraph::{clamped_selection, selection_out_of_reach};

/// Line decorations toggled from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Underline,
    Strikethrough,
}

impl Decoration {
    fn slot(self, attrs: &mut Attributes) -> &mut Option<LineStyle> {
        match self {
            Decoration::Underline => &mut attrs.underline,
            Decoration::Strikethrough => &mut attrs.strikethrough,
        }
    }

    fn get(self, attrs: &Attributes) -> Option<LineStyle> {
        match self {
            Decoration::Underline => attrs.underline,
            Decoration::Strikethrough => attrs.strikethrough,
        }
    }
}

/// Clamped range selection, `None` for a caret or no selection.
fn selected_span(state: &EditorState) -> Option<TextRange> {
    let selection = state.selection();
    if selection.is_caret() {
        return None;
    }
    clamped_selection(state.buffer.len(), selection)
}

/// Attributes the toggles read their current value from.
fn reference_attributes(state: &EditorState) -> &Attributes {
    match selected_span(state) {
        Some(span) => state
            .buffer
            .attributes_at(span.location)
            .map_or(&state.typing, |(attrs, _)| attrs),
        None => &state.typing,
    }
}

fn reference_font(state: &EditorState, config: &Config) -> Font {
    reference_attributes(state)
        .font
        .clone()
        .unwrap_or_else(|| config.font().body_font())
}

/// Apply `f` to every run in the selected span inside one transaction.
fn update_span<F>(state: &mut EditorState, op: &'static str, f: F) -> bool
where
    F: FnMut(&mut Attributes),
{
    let Some(span) = selected_span(state) else {
        return false;
    };
    let result = state.buffer.edit(|buf| buf.update_attributes(span, f));
    if let Err(error) = result {
        warn!(target: "actions.format", op, %error, "span_update_rejected");
        return false;
    }
    state.dirty = true;
    true
}

fn no_selection(state: &EditorState) -> bool {
    selection_out_of_reach(&state.buffer, state.selection())
}

/// Flip `traits` relative to the reference font, on every selected run and on
/// the typing font. Each run keeps its own family and size.
pub fn toggle_trait(state: &mut EditorState, config: &Config, traits: FontTraits) -> bool {
    if no_selection(state) {
        return false;
    }
    let base = reference_font(state, config);
    let enable = !base.traits.contains(traits);
    let body = config.font().body_font();
    update_span(state, "toggle_trait", |attrs| {
        let font = attrs.font.get_or_insert_with(|| body.clone());
        font.traits.set(traits, enable);
    });
    let mut typing_font = state.typing.font.clone().unwrap_or(base);
    typing_font.traits.set(traits, enable);
    state.typing.font = Some(typing_font);
    debug!(target: "actions.format", ?traits, enable, "trait_toggled");
    true
}

/// Single line on when the reference value is anything but single, off
/// otherwise.
pub fn toggle_line_style(state: &mut EditorState, decoration: Decoration) -> bool {
    if no_selection(state) {
        return false;
    }
    let value = match decoration.get(reference_attributes(state)) {
        Some(LineStyle::Single) => None,
        _ => Some(LineStyle::Single),
    };
    update_span(state, "toggle_line_style", |attrs| *decoration.slot(attrs) = value);
    *decoration.slot(&mut state.typing) = value;
    debug!(target: "actions.format", ?decoration, on = value.is_some(), "line_style_toggled");
    true
}

/// Resize every selected run by `delta` points (clamped) and the typing font
/// from the reference font.
pub fn adjust_font_size(state: &mut EditorState, config: &Config, delta: f64) -> bool {
    if no_selection(state) {
        return false;
    }
    let fonts = config.font();
    let body = fonts.body_font();
    let base = reference_font(state, config);
    update_span(state, "adjust_font_size", |attrs| {
        let font = attrs.font.get_or_insert_with(|| body.clone());
        font.size = fonts.clamp_size(font.size + delta);
    });
    let size = fonts.clamp_size(base.size + delta);
    state.typing.font = Some(base.with_size(size));
    debug!(target: "actions.format", delta, size, "font_size_adjusted");
    true
}

/// Switch family on every selected run (keeping size and traits) and on the
/// typing font.
pub fn apply_font_family(state: &mut EditorState, config: &Config, family: &str) -> bool {
    if no_selection(state) {
        return false;
    }
    let body = config.font().body_font();
    let base = reference_font(state, config);
    update_span(state, "apply_font_family", |attrs| {
        let font = attrs.font.get_or_insert_with(|| body.clone());
        font.family = family.to_string();
    });
    state.typing.font = Some(base.with_family(family));
    debug!(target: "actions.format", family, "font_family_applied");
    true
}

pub fn set_text_color(state: &mut EditorState, color: Color) -> bool {
    if no_selection(state) {
        return false;
    }
    update_span(state, "set_text_color", |attrs| attrs.foreground = Some(color));
    state.typing.foreground = Some(color);
    debug!(target: "actions.format", ?color, "text_color_set");
    true
}

/// `Color::CLEAR` removes the highlight from the selection; typing keeps the
/// clear color so new text is not highlighted either.
pub fn set_highlight_color(state: &mut EditorState, color: Color) -> bool {
    if no_selection(state) {
        return false;
    }
    let stored = (!color.is_clear()).then_some(color);
    update_span(state, "set_highlight_color", |attrs| attrs.background = stored);
    state.typing.background = Some(color);
    debug!(target: "actions.format", ?color, "highlight_set");
    true
}
