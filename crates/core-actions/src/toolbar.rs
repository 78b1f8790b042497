//! Toolbar snapshot.
//!
//! What the formatting toolbar should highlight for the current selection.
//! Character state comes from the typing attributes (they track the text at
//! the caret); paragraph state uses the indent and list queries.

use core_config::Config;
use core_state::EditorState;
use core_text::{Color, ListKind};

use crate::{current_indent, current_list_type};

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub list: Option<ListKind>,
    pub indent: f64,
    pub font_family: String,
    pub font_size: f64,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

pub fn toolbar_state(state: &EditorState, config: &Config) -> ToolbarState {
    let typing = &state.typing;
    let font = typing
        .font
        .clone()
        .unwrap_or_else(|| config.font().body_font());
    ToolbarState {
        bold: font.is_bold(),
        italic: font.is_italic(),
        underline: typing.underline.is_some(),
        strikethrough: typing.strikethrough.is_some(),
        list: current_list_type(state),
        indent: current_indent(state, config),
        font_family: font.family,
        font_size: font.size,
        foreground: typing.foreground,
        background: typing.background.filter(|c| !c.is_clear()),
    }
}
