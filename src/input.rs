//! Key handling for structural edits.
//!
//! Translates key events into session operations and tells the host whether
//! the platform's default handling of the key must be suppressed.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::{ChangeNotifier, EditSession, wrap_pair};

/// A key event plus the host's "default prevented" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    event: KeyEvent,
    default_prevented: bool,
}

impl KeyInput {
    pub const fn new(event: KeyEvent) -> Self {
        Self {
            event,
            default_prevented: false,
        }
    }

    pub fn from_code(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::new(KeyEvent::new(code, modifiers))
    }

    pub const fn event(&self) -> &KeyEvent {
        &self.event
    }

    /// Suppress the default behaviour of this key (e.g. inserting the typed
    /// character).
    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn is_key_down(&self) -> bool {
        self.event.kind != KeyEventKind::Release
    }
}

impl From<KeyEvent> for KeyInput {
    fn from(event: KeyEvent) -> Self {
        Self::new(event)
    }
}

fn meta() -> KeyModifiers {
    KeyModifiers::SUPER | KeyModifiers::META
}

impl<N: ChangeNotifier> EditSession<N> {
    /// Alt+Up / Alt+Down move the current line.
    ///
    /// Any other modifier disables the chord. Once the chord matches the
    /// default is suppressed, even when the move itself is refused.
    pub fn handle_move_line_keydown(&mut self, input: &mut KeyInput) -> bool {
        if !input.is_key_down() {
            return false;
        }
        let modifiers = input.event.modifiers;
        if !modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SHIFT | meta()) {
            return false;
        }

        match input.event.code {
            KeyCode::Up => {
                input.prevent_default();
                self.move_line_up()
            }
            KeyCode::Down => {
                input.prevent_default();
                self.move_line_down()
            }
            _ => false,
        }
    }

    /// Typing a delimiter over a selection wraps it, subject to the
    /// surround and per-class auto-pair preferences.
    pub fn handle_wrap_selection_keydown(&mut self, input: &mut KeyInput) -> bool {
        if !input.is_key_down() {
            return false;
        }
        if input
            .event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | meta())
        {
            return false;
        }
        if !self.options().surround_selection {
            return false;
        }
        let KeyCode::Char(ch) = input.event.code else {
            return false;
        };
        if !self.should_wrap(ch) {
            return false;
        }
        let Some(pair) = wrap_pair(ch) else {
            return false;
        };
        if !self.options().allows(pair.class) {
            return false;
        }

        input.prevent_default();
        self.wrap_selection(ch)
    }

    /// Run the move-line gate, then the wrap gate.
    pub fn handle_keydown(&mut self, input: &mut KeyInput) -> bool {
        self.handle_move_line_keydown(input) || self.handle_wrap_selection_keydown(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorOptions;
    use crate::document::{BlockStore, BlockTree, Cursor};

    fn session(texts: &[&str]) -> EditSession {
        EditSession::new(BlockStore::from_trees(
            texts.iter().map(|t| BlockTree::paragraph(*t)).collect(),
        ))
    }

    fn caret_in(session: &mut EditSession, text: &str) {
        let key = session.store().find_by_text(text).unwrap().key().clone();
        session.set_cursor(Cursor::caret(&key, 0)).unwrap();
    }

    fn select_all(session: &mut EditSession, text: &str) {
        let key = session.store().find_by_text(text).unwrap().key().clone();
        session.set_cursor(Cursor::span(&key, 0, text.len())).unwrap();
    }

    #[test]
    fn test_alt_up_moves_line() {
        let mut session = session(&["a", "b"]);
        caret_in(&mut session, "b");
        let mut input = KeyInput::from_code(KeyCode::Up, KeyModifiers::ALT);

        assert!(session.handle_move_line_keydown(&mut input));
        assert!(input.is_default_prevented());
        assert_eq!(
            session.store().to_trees(),
            vec![BlockTree::paragraph("b"), BlockTree::paragraph("a")]
        );
    }

    #[test]
    fn test_alt_up_at_top_suppresses_default_but_fails() {
        let mut session = session(&["a", "b"]);
        caret_in(&mut session, "a");
        let mut input = KeyInput::from_code(KeyCode::Up, KeyModifiers::ALT);

        assert!(!session.handle_move_line_keydown(&mut input));
        assert!(input.is_default_prevented());
    }

    #[test]
    fn test_ctrl_alt_up_is_not_handled() {
        let mut session = session(&["a", "b"]);
        caret_in(&mut session, "b");
        let mut input =
            KeyInput::from_code(KeyCode::Up, KeyModifiers::ALT | KeyModifiers::CONTROL);

        assert!(!session.handle_move_line_keydown(&mut input));
        assert!(!input.is_default_prevented());
        assert_eq!(
            session.store().to_trees(),
            vec![BlockTree::paragraph("a"), BlockTree::paragraph("b")]
        );
    }

    #[test]
    fn test_move_line_gate_rejects_other_chords() {
        let mut session = session(&["a", "b"]);
        caret_in(&mut session, "a");
        for (code, modifiers) in [
            (KeyCode::Down, KeyModifiers::NONE),
            (KeyCode::Down, KeyModifiers::ALT | KeyModifiers::SHIFT),
            (KeyCode::Down, KeyModifiers::ALT | KeyModifiers::SUPER),
            (KeyCode::Left, KeyModifiers::ALT),
        ] {
            let mut input = KeyInput::from_code(code, modifiers);
            assert!(!session.handle_move_line_keydown(&mut input));
            assert!(!input.is_default_prevented());
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut session = session(&["a", "b"]);
        caret_in(&mut session, "a");
        let event =
            KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::ALT, KeyEventKind::Release);
        let mut input = KeyInput::from(event);
        assert!(!session.handle_keydown(&mut input));
    }

    #[test]
    fn test_typed_quote_wraps_selection() {
        let mut session = session(&["hello"]);
        select_all(&mut session, "hello");
        let mut input = KeyInput::from_code(KeyCode::Char('"'), KeyModifiers::SHIFT);

        assert!(session.handle_wrap_selection_keydown(&mut input));
        assert!(input.is_default_prevented());
        assert!(session.store().find_by_text("\"hello\"").is_some());
    }

    #[test]
    fn test_wrap_gate_respects_master_toggle() {
        let mut session = session(&["hello"]).with_options(EditorOptions {
            surround_selection: false,
            ..EditorOptions::default()
        });
        select_all(&mut session, "hello");
        let mut input = KeyInput::from_code(KeyCode::Char('('), KeyModifiers::NONE);

        assert!(!session.handle_wrap_selection_keydown(&mut input));
        assert!(!input.is_default_prevented());
        assert!(session.store().find_by_text("hello").is_some());
    }

    #[test]
    fn test_wrap_gate_respects_class_toggles() {
        let cases = [
            (
                '(',
                EditorOptions {
                    auto_pair_bracket: false,
                    ..EditorOptions::default()
                },
            ),
            (
                '\'',
                EditorOptions {
                    auto_pair_quote: false,
                    ..EditorOptions::default()
                },
            ),
            (
                '*',
                EditorOptions {
                    auto_pair_markdown_syntax: false,
                    ..EditorOptions::default()
                },
            ),
        ];
        for (ch, options) in cases {
            let mut session = session(&["hello"]).with_options(options);
            select_all(&mut session, "hello");
            let mut input = KeyInput::from_code(KeyCode::Char(ch), KeyModifiers::NONE);
            assert!(!session.handle_wrap_selection_keydown(&mut input), "{ch}");
            assert!(!input.is_default_prevented(), "{ch}");
        }
    }

    #[test]
    fn test_wrap_gate_rejects_modified_keys() {
        let mut session = session(&["hello"]);
        select_all(&mut session, "hello");
        for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT, KeyModifiers::SUPER] {
            let mut input = KeyInput::from_code(KeyCode::Char('('), modifiers);
            assert!(!session.handle_wrap_selection_keydown(&mut input));
        }
        assert!(session.store().find_by_text("hello").is_some());
    }

    #[test]
    fn test_wrap_gate_without_selection_lets_key_through() {
        let mut session = session(&["hello"]);
        caret_in(&mut session, "hello");
        let mut input = KeyInput::from_code(KeyCode::Char('('), KeyModifiers::NONE);

        assert!(!session.handle_wrap_selection_keydown(&mut input));
        assert!(!input.is_default_prevented());
    }

    #[test]
    fn test_handle_keydown_dispatches_both_gates() {
        let mut session = session(&["a", "b"]);
        caret_in(&mut session, "a");
        let mut input = KeyInput::from_code(KeyCode::Down, KeyModifiers::ALT);
        assert!(session.handle_keydown(&mut input));

        select_all(&mut session, "b");
        let mut input = KeyInput::from_code(KeyCode::Char('['), KeyModifiers::NONE);
        assert!(session.handle_keydown(&mut input));
        assert_eq!(
            session.store().to_trees(),
            vec![BlockTree::paragraph("[b]"), BlockTree::paragraph("a")]
        );
    }
}
