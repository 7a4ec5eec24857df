//! Surrounding a selection with a delimiter pair.

use crate::document::Cursor;
use crate::error::EditError;

use super::session::report;
use super::{ChangeNotifier, EditSession, RenderScope};

/// Which preference toggle governs a delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterClass {
    Bracket,
    Quote,
    /// Emphasis, strikethrough and math markers.
    MarkdownSyntax,
}

/// An opening delimiter and the character that closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapPair {
    pub open: char,
    pub close: char,
    pub class: DelimiterClass,
}

const fn pair(open: char, close: char, class: DelimiterClass) -> WrapPair {
    WrapPair { open, close, class }
}

pub const WRAP_PAIRS: [WrapPair; 11] = [
    pair('"', '"', DelimiterClass::Quote),
    pair('\'', '\'', DelimiterClass::Quote),
    pair('`', '`', DelimiterClass::Quote),
    pair('(', ')', DelimiterClass::Bracket),
    pair('[', ']', DelimiterClass::Bracket),
    pair('{', '}', DelimiterClass::Bracket),
    pair('<', '>', DelimiterClass::Bracket),
    pair('*', '*', DelimiterClass::MarkdownSyntax),
    pair('_', '_', DelimiterClass::MarkdownSyntax),
    pair('~', '~', DelimiterClass::MarkdownSyntax),
    pair('$', '$', DelimiterClass::MarkdownSyntax),
];

/// The pair opened by `open`, if it is a wrap delimiter.
pub fn wrap_pair(open: char) -> Option<WrapPair> {
    WRAP_PAIRS.iter().copied().find(|pair| pair.open == open)
}

impl<N: ChangeNotifier> EditSession<N> {
    /// Whether typing `ch` should wrap the current selection.
    ///
    /// Needs a non-empty selection. Markdown syntax markers are refused
    /// inside code content; quotes and brackets are not.
    pub fn should_wrap(&self, ch: char) -> bool {
        let Some(pair) = wrap_pair(ch) else {
            return false;
        };
        let Some(cursor) = &self.cursor else {
            return false;
        };
        if cursor.is_collapsed() {
            return false;
        }
        if pair.class == DelimiterClass::MarkdownSyntax {
            let in_code = self
                .store
                .get(&cursor.start.key)
                .is_some_and(crate::document::Block::is_code_content);
            if in_code {
                return false;
            }
        }
        true
    }

    /// Surround the selected text with the pair opened by `open` and leave
    /// a caret just after the closing delimiter.
    ///
    /// Only selections within a single block are wrapped.
    pub fn wrap_selection(&mut self, open: char) -> bool {
        report("wrap_selection", self.wrap(open))
    }

    fn wrap(&mut self, open: char) -> Result<(), EditError> {
        let pair = wrap_pair(open).ok_or(EditError::UnknownDelimiter(open))?;
        let cursor = self.cursor.as_ref().ok_or(EditError::NoCursor)?;
        if !cursor.is_single_block() {
            return Err(EditError::CrossBlockSelection(
                cursor.start.key.clone(),
                cursor.end.key.clone(),
            ));
        }

        let key = cursor.start.key.clone();
        let (start, end) = if cursor.start.offset <= cursor.end.offset {
            (cursor.start.offset, cursor.end.offset)
        } else {
            (cursor.end.offset, cursor.start.offset)
        };

        let block = self
            .store
            .get(&key)
            .ok_or_else(|| EditError::BlockNotFound(key.clone()))?;
        if !block.is_editable() {
            return Err(EditError::NotEditable(key));
        }
        let text = block.text();
        let out_of_bounds = |offset| EditError::OffsetOutOfBounds {
            key: key.clone(),
            offset,
        };
        let prefix = text.get(..start).ok_or_else(|| out_of_bounds(start))?;
        let selected = text.get(start..end).ok_or_else(|| out_of_bounds(end))?;
        let suffix = text.get(end..).ok_or_else(|| out_of_bounds(end))?;

        let mut wrapped =
            String::with_capacity(text.len() + pair.open.len_utf8() + pair.close.len_utf8());
        wrapped.push_str(prefix);
        wrapped.push(pair.open);
        wrapped.push_str(selected);
        wrapped.push(pair.close);
        wrapped.push_str(suffix);
        let caret = end + pair.open.len_utf8() + pair.close.len_utf8();

        self.store.replace_text(&key, wrapped)?;
        self.cursor = Some(Cursor::caret(&key, caret));
        debug_assert!(self.check_invariants().is_ok());
        tracing::debug!(block = %key, open = %pair.open, caret, "wrapped selection");

        self.notifier.partial_render(&RenderScope::Subtree(key));
        self.notifier.dispatch_selection_change();
        self.notifier.dispatch_change();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockStore, BlockTree, CursorPosition};
    use crate::editor::{Notification, RecordingNotifier};

    fn session_with(trees: Vec<BlockTree>) -> EditSession<RecordingNotifier> {
        EditSession::with_notifier(BlockStore::from_trees(trees), RecordingNotifier::new())
    }

    fn select(session: &mut EditSession<RecordingNotifier>, text: &str, start: usize, end: usize) {
        let key = session.store().find_by_text(text).unwrap().key().clone();
        session.set_cursor(Cursor::span(&key, start, end)).unwrap();
    }

    #[test]
    fn test_wrap_pair_lookup() {
        assert_eq!(wrap_pair('(').map(|p| p.close), Some(')'));
        assert_eq!(wrap_pair('<').map(|p| p.class), Some(DelimiterClass::Bracket));
        assert_eq!(wrap_pair('`').map(|p| p.class), Some(DelimiterClass::Quote));
        assert_eq!(wrap_pair('~').map(|p| p.class), Some(DelimiterClass::MarkdownSyntax));
        assert!(wrap_pair('a').is_none());
        assert!(wrap_pair(')').is_none());
    }

    #[test]
    fn test_wrap_selection_with_quotes() {
        let mut session = session_with(vec![BlockTree::paragraph("hello world")]);
        select(&mut session, "hello world", 0, 5);

        assert!(session.wrap_selection('"'));
        let block = session.store().find_by_text("\"hello\" world").unwrap();
        assert_eq!(session.cursor(), Some(&Cursor::caret(block.key(), 7)));
    }

    #[test]
    fn test_wrap_selection_normalizes_backward_selection() {
        let mut session = session_with(vec![BlockTree::paragraph("hello world")]);
        select(&mut session, "hello world", 11, 6);

        assert!(session.wrap_selection('('));
        let block = session.store().find_by_text("hello (world)").unwrap();
        assert_eq!(session.cursor(), Some(&Cursor::caret(block.key(), 13)));
    }

    #[test]
    fn test_wrap_selection_notifies_in_order() {
        let mut session = session_with(vec![BlockTree::paragraph("abc")]);
        select(&mut session, "abc", 1, 2);
        let key = session.cursor().unwrap().start.key.clone();

        assert!(session.wrap_selection('*'));
        assert_eq!(
            session.notifier().events(),
            &[
                Notification::Render(RenderScope::Subtree(key)),
                Notification::SelectionChange,
                Notification::Change,
            ]
        );
    }

    #[test]
    fn test_wrap_selection_counts_multibyte_delimiters_in_bytes() {
        let mut session = session_with(vec![BlockTree::paragraph("naïve text")]);
        select(&mut session, "naïve text", 0, 6);

        assert!(session.wrap_selection('_'));
        let block = session.store().find_by_text("_naïve_ text").unwrap();
        assert_eq!(session.cursor().unwrap().end.offset, 8);
        assert_eq!(block.text().get(..8), Some("_naïve_"));
    }

    #[test]
    fn test_wrap_caret_inserts_empty_pair() {
        let mut session = session_with(vec![BlockTree::paragraph("ab")]);
        select(&mut session, "ab", 1, 1);

        assert!(session.wrap_selection('['));
        assert!(session.store().find_by_text("a[]b").is_some());
        assert_eq!(session.cursor().unwrap().start.offset, 3);
    }

    #[test]
    fn test_wrap_rejects_unknown_delimiter() {
        let mut session = session_with(vec![BlockTree::paragraph("abc")]);
        select(&mut session, "abc", 0, 3);

        assert!(!session.wrap_selection('x'));
        assert!(session.store().find_by_text("abc").is_some());
        assert!(session.notifier().events().is_empty());
    }

    #[test]
    fn test_wrap_rejects_cross_block_selection() {
        let mut session = session_with(vec![
            BlockTree::paragraph("first"),
            BlockTree::paragraph("second"),
        ]);
        let first = session.store().find_by_text("first").unwrap().key().clone();
        let second = session.store().find_by_text("second").unwrap().key().clone();
        let cursor = Cursor::new(CursorPosition::new(&first, 2), CursorPosition::new(&second, 3));
        session.set_cursor(cursor.clone()).unwrap();
        let before = session.store().clone();

        assert!(!session.wrap_selection('"'));
        assert_eq!(session.store(), &before);
        assert_eq!(session.cursor(), Some(&cursor));
        assert!(session.notifier().events().is_empty());
    }

    #[test]
    fn test_wrap_without_cursor_fails() {
        let mut session = session_with(vec![BlockTree::paragraph("abc")]);
        assert!(!session.wrap_selection('"'));
    }

    #[test]
    fn test_should_wrap_requires_selection() {
        let mut session = session_with(vec![BlockTree::paragraph("abc")]);
        assert!(!session.should_wrap('"'));
        select(&mut session, "abc", 2, 2);
        assert!(!session.should_wrap('"'));
        select(&mut session, "abc", 0, 2);
        assert!(session.should_wrap('"'));
        assert!(!session.should_wrap('a'));
    }

    #[test]
    fn test_should_wrap_refuses_markdown_syntax_in_code() {
        let mut session = session_with(vec![BlockTree::code_block("let x = y;")]);
        select(&mut session, "let x = y;", 4, 5);

        for ch in ['*', '_', '~', '$'] {
            assert!(!session.should_wrap(ch), "{ch} must not wrap code");
        }
        for ch in ['"', '\'', '`', '(', '[', '{', '<'] {
            assert!(session.should_wrap(ch), "{ch} should wrap code");
        }
    }

    #[test]
    fn test_should_wrap_allows_cross_block_selection() {
        let mut session = session_with(vec![
            BlockTree::paragraph("first"),
            BlockTree::paragraph("second"),
        ]);
        let first = session.store().find_by_text("first").unwrap().key().clone();
        let second = session.store().find_by_text("second").unwrap().key().clone();
        session
            .set_cursor(Cursor::new(
                CursorPosition::new(&first, 0),
                CursorPosition::new(&second, 0),
            ))
            .unwrap();
        assert!(session.should_wrap('"'));
        assert!(!session.wrap_selection('"'));
    }
}
