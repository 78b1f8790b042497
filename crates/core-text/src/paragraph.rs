//! Paragraph-level style values: indentation and the list stack.
//!
//! List descriptors are identity-bearing: two paragraphs belong to the same
//! numbered run only when they hold the *same* [`TextList`] handle. Two
//! handles with identical marker formats are still different lists.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

/// Nesting of list descriptors, outermost first.
pub type ListStack = SmallVec<[TextList; 4]>;

/// Monotonic id source for list descriptors (debug output only; identity is
/// pointer equality).
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Free-form marker tag, e.g. `{decimal}.` or `{disc}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerFormat(Cow<'static, str>);

impl MarkerFormat {
    /// Marker used for ordered lists created by this crate.
    pub const ORDERED: MarkerFormat = MarkerFormat(Cow::Borrowed("{decimal}."));
    /// Plain decimal tag produced by other writers; still an ordered list.
    pub const DECIMAL: MarkerFormat = MarkerFormat(Cow::Borrowed("{decimal}"));
    pub const DISC: MarkerFormat = MarkerFormat(Cow::Borrowed("{disc}"));

    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the tag. Exact matches are tried first; otherwise the tag is
    /// matched loosely (case-insensitive substring) because tags are not a
    /// closed set.
    pub fn list_kind(&self) -> Option<ListKind> {
        if *self == Self::ORDERED || *self == Self::DECIMAL {
            return Some(ListKind::Ordered);
        }
        if *self == Self::DISC {
            return Some(ListKind::Unordered);
        }
        let lower = self.0.to_lowercase();
        if lower.contains("decimal") {
            Some(ListKind::Ordered)
        } else if lower.contains("disc") || lower.contains("bullet") {
            Some(ListKind::Unordered)
        } else {
            None
        }
    }
}

impl fmt::Display for MarkerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two list flavours the toolbar can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn marker_format(self) -> MarkerFormat {
        match self {
            ListKind::Ordered => MarkerFormat::ORDERED,
            ListKind::Unordered => MarkerFormat::DISC,
        }
    }
}

struct ListMarker {
    id: u64,
    format: MarkerFormat,
}

/// Shared list descriptor. Cloning shares identity; [`TextList::new`] creates
/// a fresh numbering run.
#[derive(Clone)]
pub struct TextList(Rc<ListMarker>);

impl TextList {
    pub fn new(format: MarkerFormat) -> Self {
        let id = NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed);
        Self(Rc::new(ListMarker { id, format }))
    }

    pub fn for_kind(kind: ListKind) -> Self {
        Self::new(kind.marker_format())
    }

    pub fn format(&self) -> &MarkerFormat {
        &self.0.format
    }

    pub fn kind(&self) -> Option<ListKind> {
        self.0.format.list_kind()
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }
}

impl PartialEq for TextList {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TextList {}

impl fmt::Debug for TextList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextList#{}({})", self.0.id, self.0.format)
    }
}

/// Indentation and list membership of a paragraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphStyle {
    /// Left offset of every line after the first.
    pub head_indent: f64,
    /// Left offset of the first line.
    pub first_line_head_indent: f64,
    pub lists: ListStack,
}

impl ParagraphStyle {
    pub fn list_depth(&self) -> usize {
        self.lists.len()
    }

    pub fn has_lists(&self) -> bool {
        !self.lists.is_empty()
    }

    pub fn outermost_list(&self) -> Option<&TextList> {
        self.lists.first()
    }

    pub fn deepest_list(&self) -> Option<&TextList> {
        self.lists.last()
    }

    /// List kind as seen by the toolbar: classification of the outermost
    /// descriptor.
    pub fn list_kind(&self) -> Option<ListKind> {
        self.outermost_list().and_then(TextList::kind)
    }

    pub fn set_indents(&mut self, head: f64, first_line: f64) {
        self.head_indent = head;
        self.first_line_head_indent = first_line;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn exact_marker_classification() {
        assert_eq!(MarkerFormat::ORDERED.list_kind(), Some(ListKind::Ordered));
        assert_eq!(MarkerFormat::DECIMAL.list_kind(), Some(ListKind::Ordered));
        assert_eq!(MarkerFormat::DISC.list_kind(), Some(ListKind::Unordered));
    }

    #[test]
    fn loose_marker_classification() {
        assert_eq!(
            MarkerFormat::new("({DECIMAL})").list_kind(),
            Some(ListKind::Ordered)
        );
        assert_eq!(
            MarkerFormat::new("bullet").list_kind(),
            Some(ListKind::Unordered)
        );
        assert_eq!(MarkerFormat::new("{lower-roman}").list_kind(), None);
        assert_eq!(MarkerFormat::new("{square}").list_kind(), None);
    }

    #[test]
    fn list_equality_is_identity() {
        let a = TextList::for_kind(ListKind::Ordered);
        let b = TextList::for_kind(ListKind::Ordered);
        assert_eq!(a.format(), b.format());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn style_equality_follows_list_identity() {
        let list = TextList::for_kind(ListKind::Unordered);
        let s1 = ParagraphStyle {
            head_indent: 24.0,
            first_line_head_indent: 0.0,
            lists: smallvec![list.clone()],
        };
        let mut s2 = s1.clone();
        assert_eq!(s1, s2);
        s2.lists = smallvec![TextList::for_kind(ListKind::Unordered)];
        assert_ne!(s1, s2);
        assert_eq!(s1.list_kind(), Some(ListKind::Unordered));
    }
}
