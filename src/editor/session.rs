use crate::config::EditorOptions;
use crate::document::{BlockStore, Cursor, CursorPosition, InvariantViolation};
use crate::error::EditError;

use super::{ChangeNotifier, NoopNotifier};

/// One editing session: the block store, the cursor, the preferences and
/// the host notifier, owned together.
///
/// Every operation takes the session explicitly and either completes or
/// leaves all of it untouched.
#[derive(Debug)]
pub struct EditSession<N: ChangeNotifier = NoopNotifier> {
    pub(super) store: BlockStore,
    pub(super) cursor: Option<Cursor>,
    pub(super) options: EditorOptions,
    pub(super) notifier: N,
}

impl EditSession {
    /// Session with default options and no rendering host.
    pub fn new(store: BlockStore) -> Self {
        Self::with_notifier(store, NoopNotifier)
    }
}

impl<N: ChangeNotifier> EditSession<N> {
    pub fn with_notifier(store: BlockStore, notifier: N) -> Self {
        Self {
            store,
            cursor: None,
            options: EditorOptions::default(),
            notifier,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn store(&self) -> &BlockStore {
        &self.store
    }

    pub const fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub const fn set_options(&mut self, options: EditorOptions) {
        self.options = options;
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    pub const fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Replace the selection. Both endpoints must name live blocks and sit on
    /// a character boundary of their text.
    pub fn set_cursor(&mut self, cursor: Cursor) -> Result<(), EditError> {
        self.check_position(&cursor.start)?;
        self.check_position(&cursor.end)?;
        self.cursor = Some(cursor);
        Ok(())
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Store invariants plus liveness of the cursor endpoints.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.store.check_invariants()?;
        if let Some(cursor) = &self.cursor {
            for position in [&cursor.start, &cursor.end] {
                if !self.store.contains(&position.key) {
                    return Err(InvariantViolation::Dangling {
                        referrer: "cursor".to_string(),
                        key: position.key.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_position(&self, position: &CursorPosition) -> Result<(), EditError> {
        let block = self
            .store
            .get(&position.key)
            .ok_or_else(|| EditError::BlockNotFound(position.key.clone()))?;
        if block.text().is_char_boundary(position.offset) {
            Ok(())
        } else {
            Err(EditError::OffsetOutOfBounds {
                key: position.key.clone(),
                offset: position.offset,
            })
        }
    }
}

/// Flatten an operation result into the boolean the host expects, logging
/// why it was refused.
pub(super) fn report(operation: &'static str, result: Result<(), EditError>) -> bool {
    match result {
        Ok(()) => true,
        Err(reason) => {
            tracing::debug!(operation, %reason, "edit refused");
            false
        }
    }
}
