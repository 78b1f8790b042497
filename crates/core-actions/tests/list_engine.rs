//! List engine: classification, toggling, descriptor identity and the
//! empty-buffer / typing-attributes cases.

mod common;

use std::rc::Rc;

use common::*;
use core_actions::{Action, current_list_type};
use core_text::{
    Attributes, ListKind, MarkerFormat, ParagraphStyle, StyledBuffer, TextList, TextRange,
};
use core_state::EditorState;
use pretty_assertions::assert_eq;

/// Install a one-level list style on the paragraph starting at `at`.
fn put_in_list(st: &mut EditorState, at: usize, list: &TextList) {
    let range = st.buffer.paragraph_range(TextRange::caret(at));
    let mut style = ParagraphStyle::default();
    style.lists.push(list.clone());
    style.set_indents(24.0, 0.0);
    st.buffer.set_paragraph_style(range, Rc::new(style)).unwrap();
}

#[test]
fn empty_buffer_unordered_toggle_sets_typing_list() {
    let mut st = state("");
    run(&mut st, Action::ToggleUnorderedList);
    let typing = st.typing.paragraph_style().unwrap();
    assert_eq!(typing.list_depth(), 1);
    assert_eq!(typing.list_kind(), Some(ListKind::Unordered));
    assert_eq!(typing.head_indent, 24.0);
    assert_eq!(typing.first_line_head_indent, 0.0);
    assert_eq!(current_list_type(&st), Some(ListKind::Unordered));
}

#[test]
fn three_unordered_paragraphs_toggle_off() {
    let mut st = state("A\nB\nC");
    select(&mut st, 0, 5);
    run(&mut st, Action::ToggleUnorderedList);
    let shared = style_at(&st, 0).outermost_list().cloned().unwrap();
    for at in [0, 2, 4] {
        assert_eq!(style_at(&st, at).outermost_list(), Some(&shared));
    }
    assert_eq!(current_list_type(&st), Some(ListKind::Unordered));

    run(&mut st, Action::ToggleUnorderedList);
    for at in [0, 2, 4] {
        let s = style_at(&st, at);
        assert!(!s.has_lists());
        assert_eq!((s.head_indent, s.first_line_head_indent), (0.0, 0.0));
    }
    assert_eq!(current_list_type(&st), None);
}

#[test]
fn double_toggle_restores_plain_paragraphs() {
    for action in [Action::ToggleOrderedList, Action::ToggleUnorderedList] {
        let mut st = state("one\ntwo\n");
        select(&mut st, 0, 8);
        run(&mut st, action.clone());
        run(&mut st, action);
        for at in paragraph_starts(&st) {
            assert_eq!(style_at(&st, at), ParagraphStyle::default());
        }
    }
}

#[test]
fn double_toggle_off_then_on_restores_kind_and_indent() {
    let mut st = state("A\nB");
    select(&mut st, 0, 3);
    run(&mut st, Action::ToggleOrderedList);
    let before: Vec<_> = [0, 2]
        .iter()
        .map(|&i| {
            let s = style_at(&st, i);
            (s.list_kind(), s.head_indent, s.first_line_head_indent)
        })
        .collect();
    run(&mut st, Action::ToggleOrderedList);
    run(&mut st, Action::ToggleOrderedList);
    let after: Vec<_> = [0, 2]
        .iter()
        .map(|&i| {
            let s = style_at(&st, i);
            (s.list_kind(), s.head_indent, s.first_line_head_indent)
        })
        .collect();
    assert_eq!(before, after);
}

#[test]
fn selection_spanning_existing_list_continues_its_numbering() {
    let mut st = state("P1\nP2");
    let a = TextList::new(MarkerFormat::ORDERED);
    put_in_list(&mut st, 0, &a);
    select(&mut st, 0, 5);
    assert_eq!(current_list_type(&st), None);
    run(&mut st, Action::ToggleOrderedList);
    assert_eq!(style_at(&st, 3).outermost_list(), Some(&a));
    assert_eq!(style_at(&st, 0).outermost_list(), Some(&a));
    assert_eq!(style_at(&st, 3).head_indent, 24.0);
}

#[test]
fn distant_paragraph_gets_a_fresh_list() {
    let mut st = state("P1\nP2\nP3");
    let a = TextList::new(MarkerFormat::ORDERED);
    put_in_list(&mut st, 0, &a);
    select(&mut st, 6, 0);
    run(&mut st, Action::ToggleOrderedList);
    let p3 = style_at(&st, 6);
    assert_eq!(p3.list_kind(), Some(ListKind::Ordered));
    assert_ne!(p3.outermost_list(), Some(&a));
    assert!(!style_at(&st, 3).has_lists());
}

#[test]
fn mixed_selection_classifies_as_none() {
    let mut st = state("A\nB");
    put_in_list(&mut st, 0, &TextList::for_kind(ListKind::Ordered));
    put_in_list(&mut st, 2, &TextList::for_kind(ListKind::Unordered));
    select(&mut st, 0, 3);
    assert_eq!(current_list_type(&st), None);
    select(&mut st, 2, 0);
    assert_eq!(current_list_type(&st), Some(ListKind::Unordered));
}

#[test]
fn mixed_selection_toggle_turns_everything_on() {
    let mut st = state("A\nB");
    let ordered = TextList::for_kind(ListKind::Ordered);
    put_in_list(&mut st, 0, &ordered);
    put_in_list(&mut st, 2, &TextList::for_kind(ListKind::Unordered));
    select(&mut st, 0, 3);
    run(&mut st, Action::ToggleOrderedList);
    assert_eq!(style_at(&st, 0).outermost_list(), Some(&ordered));
    assert_eq!(style_at(&st, 2).outermost_list(), Some(&ordered));
}

#[test]
fn loosely_tagged_markers_are_recognised() {
    let mut st = state("A");
    put_in_list(&mut st, 0, &TextList::new(MarkerFormat::new("{Decimal}")));
    assert_eq!(current_list_type(&st), Some(ListKind::Ordered));
    run(&mut st, Action::ToggleOrderedList);
    assert!(!style_at(&st, 0).has_lists());

    put_in_list(&mut st, 0, &TextList::new(MarkerFormat::new("{square}")));
    assert_eq!(current_list_type(&st), None);
}

#[test]
fn trailing_newline_caret_toggles_typing_only() {
    let mut st = state("A\n");
    select(&mut st, 2, 0);
    run(&mut st, Action::ToggleOrderedList);
    assert!(!style_at(&st, 0).has_lists());
    assert_eq!(current_list_type(&st), Some(ListKind::Ordered));
    run(&mut st, Action::ToggleOrderedList);
    let typing = st.typing.paragraph_style().unwrap();
    assert!(!typing.has_lists());
    assert_eq!(typing.head_indent, 0.0);
}

#[test]
fn typing_resyncs_to_paragraph_at_selection() {
    let mut st = state("A\nB");
    select(&mut st, 2, 0);
    run(&mut st, Action::ToggleUnorderedList);
    assert_eq!(
        st.typing.paragraph.as_ref(),
        st.buffer.paragraph_style_at(2)
    );
}

#[test]
fn typed_paragraphs_continue_the_typing_list() {
    let mut st = EditorState::new(StyledBuffer::new());
    run(&mut st, Action::ToggleOrderedList);
    run(&mut st, Action::InsertText("one".into()));
    run(&mut st, Action::InsertText("\n".into()));
    run(&mut st, Action::InsertText("two".into()));
    assert_eq!(st.buffer.text(), "one\ntwo");
    let first = style_at(&st, 0);
    let second = style_at(&st, 4);
    assert_eq!(first.outermost_list(), second.outermost_list());
    assert_eq!(first.list_kind(), Some(ListKind::Ordered));
}

#[test]
fn paragraph_without_style_reads_as_no_list() {
    let st = EditorState::from_text("plain", Attributes::default());
    assert_eq!(current_list_type(&st), None);
}
