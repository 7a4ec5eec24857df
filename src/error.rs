//! Reasons an editing operation is refused.

use thiserror::Error;

use crate::document::BlockKey;

/// Why a structural or text edit did not happen.
///
/// Every variant is raised before the first write, so an `Err` always means
/// the document and cursor are untouched. The public session API flattens
/// these into `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no active cursor")]
    NoCursor,

    #[error("no movable block at the cursor")]
    NoMovableBlock,

    #[error("block {0} is already at the document boundary")]
    AtBoundary(BlockKey),

    #[error("neighbouring block {0} is not editable")]
    NeighbourNotEditable(BlockKey),

    #[error("block {0} is not editable")]
    NotEditable(BlockKey),

    #[error("block not found: {0}")]
    BlockNotFound(BlockKey),

    #[error("blocks {0} and {1} are not adjacent siblings")]
    NotAdjacent(BlockKey, BlockKey),

    #[error("block {0} is missing from its sibling sequence")]
    MissingFromSequence(BlockKey),

    #[error("selection spans blocks {0} and {1}")]
    CrossBlockSelection(BlockKey, BlockKey),

    #[error("{0:?} is not a wrap delimiter")]
    UnknownDelimiter(char),

    #[error("offset {offset} is outside the text of block {key}")]
    OffsetOutOfBounds { key: BlockKey, offset: usize },
}
