use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::{Block, BlockKey, BlockType};
use crate::error::EditError;

/// A broken structural invariant found by [`BlockStore::check_invariants`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{referrer} references missing block {key}")]
    Dangling { referrer: String, key: BlockKey },

    #[error("block {child} is listed under {listed} but points at parent {actual:?}")]
    ParentMismatch {
        child: BlockKey,
        listed: String,
        actual: Option<BlockKey>,
    },

    #[error("block {0} appears more than once in sibling sequences")]
    Duplicate(BlockKey),

    #[error("block {0} is not in its parent's sibling sequence")]
    Orphaned(BlockKey),

    #[error("sibling links of {0} disagree with the sibling sequence")]
    BrokenChain(BlockKey),
}

/// Arena of blocks addressed by key.
///
/// Children sequences and sibling links are two views of the same order.
/// [`BlockStore::swap_siblings`] is the only operation that reorders blocks,
/// and it keeps both views in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockStore {
    pub(super) blocks: HashMap<BlockKey, Block>,
    pub(super) roots: Vec<BlockKey>,
    pub(super) next_id: usize,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Keys of the top-level blocks in document order.
    pub fn roots(&self) -> &[BlockKey] {
        &self.roots
    }

    pub fn get(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.get(key)
    }

    pub fn contains(&self, key: &BlockKey) -> bool {
        self.blocks.contains_key(key)
    }

    pub fn parent(&self, block: &Block) -> Option<&Block> {
        block.parent.as_ref().and_then(|key| self.blocks.get(key))
    }

    /// Nearest strict ancestor of `block` with the given type.
    pub fn closest(&self, block: &Block, block_type: BlockType) -> Option<&Block> {
        let mut current = self.parent(block);
        while let Some(ancestor) = current {
            if ancestor.block_type == block_type {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// Highest ancestor of `block` below the document root.
    ///
    /// A top-level block is its own outmost block.
    pub fn find_outmost_block<'a>(&'a self, block: &'a Block) -> &'a Block {
        let mut current = block;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// First leaf in document order whose text equals `text`.
    pub fn find_by_text(&self, text: &str) -> Option<&Block> {
        self.iter().find(|block| block.children.is_empty() && block.text == text)
    }

    /// Blocks in document (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        let mut stack: Vec<&BlockKey> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            while let Some(key) = stack.pop() {
                if let Some(block) = self.blocks.get(key) {
                    stack.extend(block.children.iter().rev());
                    return Some(block);
                }
            }
            None
        })
    }

    /// Exchange two adjacent siblings in both the sibling sequence and the
    /// sibling links.
    ///
    /// The arguments may be given in either order. Fails without touching the
    /// store when the blocks are not adjacent siblings.
    pub fn swap_siblings(&mut self, a: &BlockKey, b: &BlockKey) -> Result<(), EditError> {
        let block_a = self.require(a)?;
        let block_b = self.require(b)?;

        let (first, second) = if block_a.next_sibling.as_ref() == Some(b) {
            (block_a, block_b)
        } else if block_b.next_sibling.as_ref() == Some(a) {
            (block_b, block_a)
        } else {
            return Err(EditError::NotAdjacent(a.clone(), b.clone()));
        };
        if first.parent != second.parent {
            return Err(EditError::NotAdjacent(a.clone(), b.clone()));
        }

        // Everything below is read before the first write.
        let first_key = first.key.clone();
        let second_key = second.key.clone();
        let parent = first.parent.clone();
        let before = first.pre_sibling.clone();
        let after = second.next_sibling.clone();

        let sequence = self.sequence(parent.as_ref())?;
        let first_idx = sequence
            .iter()
            .position(|key| *key == first_key)
            .ok_or_else(|| EditError::MissingFromSequence(first_key.clone()))?;
        let second_idx = sequence
            .iter()
            .position(|key| *key == second_key)
            .ok_or_else(|| EditError::MissingFromSequence(second_key.clone()))?;
        for neighbour in [&before, &after].into_iter().flatten() {
            self.require(neighbour)?;
        }

        if let Some(sequence) = self.sequence_mut(parent.as_ref()) {
            sequence.swap(first_idx, second_idx);
        }
        if let Some(block) = self.blocks.get_mut(&second_key) {
            block.pre_sibling.clone_from(&before);
            block.next_sibling = Some(first_key.clone());
        }
        if let Some(block) = self.blocks.get_mut(&first_key) {
            block.pre_sibling = Some(second_key.clone());
            block.next_sibling.clone_from(&after);
        }
        if let Some(block) = before.as_ref().and_then(|key| self.blocks.get_mut(key)) {
            block.next_sibling = Some(second_key.clone());
        }
        if let Some(block) = after.as_ref().and_then(|key| self.blocks.get_mut(key)) {
            block.pre_sibling = Some(first_key.clone());
        }

        tracing::trace!(first = %first_key, second = %second_key, "swapped siblings");
        Ok(())
    }

    /// Replace the text of an editable block.
    pub fn replace_text(&mut self, key: &BlockKey, text: String) -> Result<(), EditError> {
        let block = self
            .blocks
            .get_mut(key)
            .ok_or_else(|| EditError::BlockNotFound(key.clone()))?;
        if !block.editable {
            return Err(EditError::NotEditable(key.clone()));
        }
        block.text = text;
        Ok(())
    }

    /// Verify that sibling sequences, parent links and sibling links agree
    /// and reference only live blocks.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        self.check_sequence("document root", None, &self.roots, &mut seen)?;
        for block in self.blocks.values() {
            self.check_sequence(
                block.key.as_str(),
                Some(&block.key),
                &block.children,
                &mut seen,
            )?;
        }
        if let Some(orphan) = self.blocks.keys().find(|key| !seen.contains(*key)) {
            return Err(InvariantViolation::Orphaned(orphan.clone()));
        }
        Ok(())
    }

    fn check_sequence<'a>(
        &self,
        owner: &str,
        parent: Option<&BlockKey>,
        sequence: &'a [BlockKey],
        seen: &mut HashSet<&'a BlockKey>,
    ) -> Result<(), InvariantViolation> {
        let mut previous: Option<&BlockKey> = None;
        for key in sequence {
            let block = self.blocks.get(key).ok_or_else(|| InvariantViolation::Dangling {
                referrer: owner.to_string(),
                key: key.clone(),
            })?;
            if !seen.insert(key) {
                return Err(InvariantViolation::Duplicate(key.clone()));
            }
            if block.parent.as_ref() != parent {
                return Err(InvariantViolation::ParentMismatch {
                    child: key.clone(),
                    listed: owner.to_string(),
                    actual: block.parent.clone(),
                });
            }
            if block.pre_sibling.as_ref() != previous {
                return Err(InvariantViolation::BrokenChain(key.clone()));
            }
            if let Some(prev) = previous {
                let linked_forward = self
                    .blocks
                    .get(prev)
                    .is_some_and(|p| p.next_sibling.as_ref() == Some(key));
                if !linked_forward {
                    return Err(InvariantViolation::BrokenChain(prev.clone()));
                }
            }
            previous = Some(key);
        }
        if let Some(last) = previous {
            let terminated = self
                .blocks
                .get(last)
                .is_some_and(|block| block.next_sibling.is_none());
            if !terminated {
                return Err(InvariantViolation::BrokenChain(last.clone()));
            }
        }
        Ok(())
    }

    fn require(&self, key: &BlockKey) -> Result<&Block, EditError> {
        self.blocks
            .get(key)
            .ok_or_else(|| EditError::BlockNotFound(key.clone()))
    }

    fn sequence(&self, parent: Option<&BlockKey>) -> Result<&[BlockKey], EditError> {
        match parent {
            Some(key) => Ok(&self.require(key)?.children),
            None => Ok(&self.roots),
        }
    }

    fn sequence_mut(&mut self, parent: Option<&BlockKey>) -> Option<&mut Vec<BlockKey>> {
        match parent {
            Some(key) => self.blocks.get_mut(key).map(|block| &mut block.children),
            None => Some(&mut self.roots),
        }
    }
}
