use thiserror::Error;

use crate::block::edit::{apply_edit, BlockEdit, EditError};
use crate::block::factory::default_block;
use crate::block::model::{BlockKind, ContentBlock};
use crate::block::reorder::reorder_by_key;
use crate::document::id::SlotOwner;
use crate::document::validate::{validate_blocks, ValidationError};
use crate::mutation::types::SlotPayload;

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("no block with id {0:?} in this slot")]
    UnknownBlock(String),
    #[error("block {id:?} cannot change type from {from} to {to}")]
    TypeChange { id: String, from: String, to: String },
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Working copy of one slot while an admin edits it.
///
/// Nothing here talks to the store: the caller loads the slot, edits it
/// through the session, and saves [`SlotSession::save_payload`] wholesale.
#[derive(Debug, Clone)]
pub struct SlotSession {
    owner: SlotOwner,
    blocks: Vec<ContentBlock>,
    dirty: bool,
}

impl SlotSession {
    pub fn new(owner: SlotOwner, blocks: Vec<ContentBlock>) -> Self {
        Self {
            owner,
            blocks,
            dirty: false,
        }
    }

    pub fn owner(&self) -> &SlotOwner {
        &self.owner
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// True once anything changed since the session was opened.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append a default block of `kind` and return its id.
    pub fn add_block(&mut self, kind: BlockKind) -> String {
        let block = default_block(kind);
        let id = block.id.clone();
        self.blocks.push(block);
        self.dirty = true;
        id
    }

    /// Apply an editor change to the block with `block_id`.
    pub fn edit_block(&mut self, block_id: &str, edit: BlockEdit) -> Result<(), SlotError> {
        let index = self.index_of(block_id)?;
        self.blocks[index] = apply_edit(&self.blocks[index], edit)?;
        self.dirty = true;
        Ok(())
    }

    /// Swap in an updated block reported by an editor's change callback.
    pub fn replace_block(&mut self, updated: ContentBlock) -> Result<(), SlotError> {
        let index = self.index_of(&updated.id)?;
        let current = &self.blocks[index];
        if current.type_name() != updated.type_name() {
            return Err(SlotError::TypeChange {
                id: updated.id.clone(),
                from: current.type_name().to_string(),
                to: updated.type_name().to_string(),
            });
        }
        self.blocks[index] = updated;
        self.dirty = true;
        Ok(())
    }

    /// Drag `active` onto `over`. Returns whether the order changed.
    pub fn reorder(&mut self, active: &str, over: &str) -> bool {
        let moved = reorder_by_key(&mut self.blocks, active, over);
        self.dirty |= moved;
        moved
    }

    /// The body for the slot's PUT request, replacing the stored sequence.
    pub fn save_payload(&self) -> Result<SlotPayload, SlotError> {
        validate_blocks(&self.blocks)?;
        Ok(SlotPayload {
            content: self.blocks.clone(),
        })
    }

    /// Mark the working copy as persisted.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn index_of(&self, block_id: &str) -> Result<usize, SlotError> {
        self.blocks
            .iter()
            .position(|block| block.id == block_id)
            .ok_or_else(|| SlotError::UnknownBlock(block_id.to_string()))
    }
}
