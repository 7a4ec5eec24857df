// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditSession)
    clippy::module_name_repetitions
)]

//! # Blockedit
//!
//! Structural editing core for a block-based markdown editor.
//!
//! A document is a tree of blocks (paragraphs, headings, list items, block
//! quotes, code blocks, ...) addressed by stable keys. On top of it the core
//! provides:
//! - Moving the current line up or down among its siblings (Alt+Up/Down)
//! - Wrapping a selection in a delimiter pair as it is typed
//!
//! ## Architecture
//!
//! All state lives in one [`EditSession`](editor::EditSession): the block
//! store, the cursor, the editing preferences and the host's change
//! notifier. Operations are plain methods on the session that either apply
//! completely or leave everything untouched and return `false`.
//!
//! ## Modules
//!
//! - [`document`]: Block store, block types and the cursor model
//! - [`editor`]: Line moves and selection wrapping
//! - [`input`]: Key chord handling
//! - [`config`]: Editing preferences
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod input;
pub mod logging;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::EditorOptions;
    pub use crate::document::{Block, BlockKey, BlockStore, BlockTree, BlockType, Cursor};
    pub use crate::editor::{ChangeNotifier, EditSession, RenderScope};
    pub use crate::error::EditError;
    pub use crate::input::KeyInput;
}
