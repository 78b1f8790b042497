//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `indent` - indent engine (plain steps and list nesting)
//! * `list`   - list engine (classification, toggling, descriptor identity)
//! * `format` - inline character formatting (traits, lines, font, colors)
//! * `edit`   - text insertion / backward delete
//! * `undo`   - undo / redo dispatch
//!
//! Ordering per action:
//! 1. observers see `on_action`
//! 2. formatting actions record one undo checkpoint (before any mutation),
//!    unless the selection is out of reach and the action returns clean
//! 3. the handler runs to completion
//! 4. if anything changed, observers get `on_refresh` with the new toolbar state

use crate::paragraph::selection_out_of_reach;
use crate::{Action, ActionObserver, toolbar_state};
use core_config::Config;
use core_state::EditorState;
use tracing::debug;

mod edit;
pub mod format;
pub mod indent;
pub mod list;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Buffer, selection or typing attributes changed; the view and toolbar
    /// must refresh.
    pub dirty: bool,
    /// The whole buffer was swapped (undo / redo); cached layout is invalid.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            buffer_replaced: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            buffer_replaced: false,
        }
    }
    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            buffer_replaced: true,
        }
    }

    fn from_changed(changed: bool) -> Self {
        if changed { Self::dirty() } else { Self::clean() }
    }
}

/// Apply an action to editor state.
pub fn dispatch(
    action: Action,
    state: &mut EditorState,
    config: &Config,
    observers: &[Box<dyn ActionObserver>],
) -> DispatchResult {
    for obs in observers {
        obs.on_action(&action);
    }

    if action.is_formatting() {
        if selection_out_of_reach(&state.buffer, state.selection()) {
            debug!(target: "actions.dispatch", ?action, "selection_out_of_reach_skip");
            return DispatchResult::clean();
        }
        state.push_discrete_edit_snapshot();
    }

    let result = match action {
        Action::IndentLeft => DispatchResult::from_changed(indent::indent(
            state,
            config,
            indent::IndentDirection::Left,
        )),
        Action::IndentRight => DispatchResult::from_changed(indent::indent(
            state,
            config,
            indent::IndentDirection::Right,
        )),
        Action::ToggleOrderedList => DispatchResult::from_changed(list::toggle_list(
            state,
            config,
            core_text::ListKind::Ordered,
        )),
        Action::ToggleUnorderedList => DispatchResult::from_changed(list::toggle_list(
            state,
            config,
            core_text::ListKind::Unordered,
        )),
        Action::ToggleBold => DispatchResult::from_changed(format::toggle_trait(
            state,
            config,
            core_text::FontTraits::BOLD,
        )),
        Action::ToggleItalic => DispatchResult::from_changed(format::toggle_trait(
            state,
            config,
            core_text::FontTraits::ITALIC,
        )),
        Action::ToggleUnderline => DispatchResult::from_changed(format::toggle_line_style(
            state,
            format::Decoration::Underline,
        )),
        Action::ToggleStrikethrough => DispatchResult::from_changed(format::toggle_line_style(
            state,
            format::Decoration::Strikethrough,
        )),
        Action::IncreaseFontSize => {
            let step = config.font().step;
            DispatchResult::from_changed(format::adjust_font_size(state, config, step))
        }
        Action::DecreaseFontSize => {
            let step = config.font().step;
            DispatchResult::from_changed(format::adjust_font_size(state, config, -step))
        }
        Action::ApplyFontFamily(family) => {
            DispatchResult::from_changed(format::apply_font_family(state, config, &family))
        }
        Action::SetTextColor(color) => {
            DispatchResult::from_changed(format::set_text_color(state, color))
        }
        Action::SetHighlightColor(color) => {
            DispatchResult::from_changed(format::set_highlight_color(state, color))
        }
        Action::InsertText(text) => edit::handle_insert(state, &text),
        Action::DeleteBackward => edit::handle_delete_backward(state),
        Action::Select(range) => {
            state.set_selection(range);
            DispatchResult::dirty()
        }
        Action::Undo => undo::handle_undo(state),
        Action::Redo => undo::handle_redo(state),
    };

    if result.dirty {
        let toolbar = toolbar_state(state, config);
        for obs in observers {
            obs.on_refresh(&toolbar);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Attributes, TextRange};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        actions: Rc<RefCell<Vec<Action>>>,
        refreshes: Rc<RefCell<usize>>,
    }

    impl ActionObserver for Recorder {
        fn on_action(&self, action: &Action) {
            self.actions.borrow_mut().push(action.clone());
        }
        fn on_refresh(&self, _toolbar: &crate::ToolbarState) {
            *self.refreshes.borrow_mut() += 1;
        }
    }

    #[test]
    fn observers_see_action_then_refresh() {
        let actions = Rc::new(RefCell::new(Vec::new()));
        let refreshes = Rc::new(RefCell::new(0));
        let observers: Vec<Box<dyn ActionObserver>> = vec![Box::new(Recorder {
            actions: actions.clone(),
            refreshes: refreshes.clone(),
        })];
        let cfg = Config::default();
        let mut st = EditorState::from_text("A\nB", Attributes::default());
        let res = dispatch(Action::IndentRight, &mut st, &cfg, &observers);
        assert!(res.dirty);
        assert_eq!(actions.borrow().as_slice(), &[Action::IndentRight]);
        assert_eq!(*refreshes.borrow(), 1);
    }

    #[test]
    fn formatting_without_selection_is_clean_and_skips_undo() {
        let cfg = Config::default();
        let mut st = EditorState::from_text("A\nB", Attributes::default());
        st.set_selection(TextRange::NOT_FOUND);
        let res = dispatch(Action::ToggleOrderedList, &mut st, &cfg, &[]);
        assert_eq!(res, DispatchResult::clean());
        assert_eq!(st.undo_depth(), 0);
        assert!(st.buffer.paragraph_style_at(0).is_none());
    }

    #[test]
    fn formatting_past_end_keeps_redo_history() {
        let cfg = Config::default();
        let mut st = EditorState::from_text("abc", Attributes::default());
        st.set_selection(TextRange::caret(0));
        dispatch(Action::IndentRight, &mut st, &cfg, &[]);
        dispatch(Action::Undo, &mut st, &cfg, &[]);
        assert_eq!((st.undo_depth(), st.redo_depth()), (0, 1));

        dispatch(Action::Select(TextRange::new(10, 2)), &mut st, &cfg, &[]);
        let typing = st.typing.clone();
        for action in [Action::IndentRight, Action::ToggleUnorderedList, Action::ToggleBold] {
            let res = dispatch(action, &mut st, &cfg, &[]);
            assert_eq!(res, DispatchResult::clean());
        }
        assert_eq!((st.undo_depth(), st.redo_depth()), (0, 1));
        assert_eq!(st.typing, typing);
        assert_eq!(st.redo(), Some(core_state::SnapshotKind::Format));
        assert_eq!(st.buffer.paragraph_style_at(0).map(|s| s.head_indent), Some(24.0));
    }

    #[test]
    fn formatting_records_one_checkpoint() {
        let cfg = Config::default();
        let mut st = EditorState::from_text("A\nB", Attributes::default());
        st.set_selection(TextRange::new(0, 3));
        dispatch(Action::ToggleUnorderedList, &mut st, &cfg, &[]);
        assert_eq!(st.undo_depth(), 1);
        assert!(st.dirty);
    }
}
