//! Observer notifications and structured logging of list operations.

mod common;

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use common::*;
use core_actions::{Action, ActionObserver, ToolbarState, dispatch};
use core_text::{ListKind, TextRange};
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Default)]
struct Toolbar {
    seen: RefCell<Vec<Action>>,
    last: RefCell<Option<ToolbarState>>,
    refreshes: RefCell<usize>,
}

struct Shared(Rc<Toolbar>);

impl ActionObserver for Shared {
    fn on_action(&self, action: &Action) {
        self.0.seen.borrow_mut().push(action.clone());
    }
    fn on_refresh(&self, toolbar: &ToolbarState) {
        *self.0.refreshes.borrow_mut() += 1;
        *self.0.last.borrow_mut() = Some(toolbar.clone());
    }
}

#[test]
fn refresh_carries_list_and_indent_state() {
    let toolbar = Rc::new(Toolbar::default());
    let observers: Vec<Box<dyn ActionObserver>> = vec![Box::new(Shared(toolbar.clone()))];
    let config = cfg();
    let mut st = state("A\nB");

    dispatch(Action::Select(TextRange::caret(2)), &mut st, &config, &observers);
    dispatch(Action::ToggleUnorderedList, &mut st, &config, &observers);

    let last = toolbar.last.borrow().clone().unwrap();
    assert_eq!(last.list, Some(ListKind::Unordered));
    assert_eq!(last.indent, 24.0);
    assert_eq!(*toolbar.refreshes.borrow(), 2);
    assert_eq!(toolbar.seen.borrow().len(), 2);
}

#[test]
fn clean_dispatch_does_not_refresh() {
    let toolbar = Rc::new(Toolbar::default());
    let observers: Vec<Box<dyn ActionObserver>> = vec![Box::new(Shared(toolbar.clone()))];
    let config = cfg();
    let mut st = state("A");
    dispatch(Action::Undo, &mut st, &config, &observers);
    st.set_selection(TextRange::NOT_FOUND);
    dispatch(Action::IndentRight, &mut st, &config, &observers);
    assert_eq!(*toolbar.refreshes.borrow(), 0);
    assert_eq!(toolbar.seen.borrow().len(), 2);
}

#[derive(Clone)]
struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

#[test]
fn list_operations_log_under_actions_list_target() {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(BufferWriter {
            inner: buffer.clone(),
        })
        .finish();

    with_default(subscriber, || {
        let mut st = state("A\nB");
        select(&mut st, 0, 3);
        run(&mut st, Action::ToggleOrderedList);
    });

    let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    assert!(output.contains("DEBUG actions.list:"), "{output}");
    assert!(output.contains("list_applied"), "{output}");
    assert!(output.contains("paragraphs=2"), "{output}");
    assert!(output.contains("DEBUG text.buffer:"), "{output}");
}
