//! Block tree and cursor model.
//!
//! This module handles:
//! - Block records addressed by stable keys
//! - Parent and sibling links kept as lookup keys into one arena
//! - Ancestor search used to resolve the unit an operation acts on
//! - The two-endpoint cursor

mod cursor;
mod store;
mod tree;
mod types;

pub use cursor::{Cursor, CursorPosition};
pub use store::{BlockStore, InvariantViolation};
pub use tree::BlockTree;
pub use types::{Block, BlockKey, BlockType, FunctionType, HeadingLevel, UnknownBlockType};
