use serde::{Deserialize, Serialize};

use super::BlockKey;

/// One selection endpoint: a block and a byte offset into its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorPosition {
    pub key: BlockKey,
    pub offset: usize,
}

impl CursorPosition {
    pub fn new(key: impl Into<BlockKey>, offset: usize) -> Self {
        Self {
            key: key.into(),
            offset,
        }
    }
}

/// The current selection.
///
/// `start` is where the selection was anchored and `end` where it was
/// extended to, so `start` may come after `end` in the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub start: CursorPosition,
    pub end: CursorPosition,
}

impl Cursor {
    pub const fn new(start: CursorPosition, end: CursorPosition) -> Self {
        Self { start, end }
    }

    /// A zero-width selection.
    pub fn caret(key: impl Into<BlockKey>, offset: usize) -> Self {
        let position = CursorPosition::new(key, offset);
        Self {
            start: position.clone(),
            end: position,
        }
    }

    /// A selection inside a single block.
    pub fn span(key: impl Into<BlockKey>, start: usize, end: usize) -> Self {
        let key = key.into();
        Self {
            start: CursorPosition::new(key.clone(), start),
            end: CursorPosition::new(key, end),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn is_single_block(&self) -> bool {
        self.start.key == self.end.key
    }
}
