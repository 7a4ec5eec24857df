//! Moving the current line up or down among its siblings.

use crate::document::{Block, BlockKey, BlockStore, BlockType};
use crate::error::EditError;

use super::session::report;
use super::{ChangeNotifier, EditSession, RenderScope};

/// Direction of a line move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The block that moves as a unit when the cursor sits in `key`.
///
/// List items always move whole. Content blocks move on their own at the
/// top level and directly inside a blockquote. Under a list they resolve to
/// the enclosing list item; inside any other container the walk climbs.
pub fn movable_block_at<'a>(store: &'a BlockStore, key: &BlockKey) -> Option<&'a Block> {
    let origin = store.get(key)?;
    let mut current = origin;
    loop {
        let parent = store.parent(current);
        let block_type = current.block_type();

        if block_type == BlockType::ListItem {
            return Some(current);
        }

        if block_type.is_content_level() {
            match parent {
                None => return Some(current),
                Some(container) if container.block_type().is_list() => {
                    return store.closest(current, BlockType::ListItem).or(Some(current));
                }
                Some(container) if container.block_type() == BlockType::Blockquote => {
                    return Some(current);
                }
                Some(_) => {}
            }
        }

        match parent {
            Some(parent) => {
                tracing::trace!(from = %current.key(), to = %parent.key(), "climbing to parent");
                current = parent;
            }
            None => break,
        }
    }
    Some(store.find_outmost_block(origin))
}

impl<N: ChangeNotifier> EditSession<N> {
    /// The block a line move would relocate, if the cursor is active.
    pub fn movable_block(&self) -> Option<&Block> {
        let cursor = self.cursor.as_ref()?;
        movable_block_at(&self.store, &cursor.start.key)
    }

    /// Swap the current line with its previous sibling.
    pub fn move_line_up(&mut self) -> bool {
        report("move_line_up", self.move_line(Direction::Up))
    }

    /// Swap the current line with its next sibling.
    pub fn move_line_down(&mut self) -> bool {
        report("move_line_down", self.move_line(Direction::Down))
    }

    fn move_line(&mut self, direction: Direction) -> Result<(), EditError> {
        let cursor = self.cursor.as_ref().ok_or(EditError::NoCursor)?;
        let target = movable_block_at(&self.store, &cursor.start.key)
            .ok_or(EditError::NoMovableBlock)?;
        if !target.is_editable() {
            return Err(EditError::NotEditable(target.key().clone()));
        }

        let neighbour_key = match direction {
            Direction::Up => target.pre_sibling(),
            Direction::Down => target.next_sibling(),
        }
        .ok_or_else(|| EditError::AtBoundary(target.key().clone()))?;
        let neighbour = self
            .store
            .get(neighbour_key)
            .ok_or_else(|| EditError::BlockNotFound(neighbour_key.clone()))?;
        if !neighbour.is_editable() {
            return Err(EditError::NeighbourNotEditable(neighbour.key().clone()));
        }

        let target_key = target.key().clone();
        let neighbour_key = neighbour.key().clone();
        let scope = target
            .parent()
            .map_or(RenderScope::Document, |parent| RenderScope::Subtree(parent.clone()));

        self.store.swap_siblings(&target_key, &neighbour_key)?;
        debug_assert!(self.check_invariants().is_ok());
        tracing::debug!(block = %target_key, ?direction, "moved line");

        self.notifier.partial_render(&scope);
        self.notifier.dispatch_change();
        Ok(())
    }
}
