//! Drag-and-drop reordering of keyed sequences.

use super::model::{ContentBlock, Slide};

/// Items that carry a stable key used as the drag handle identity.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for ContentBlock {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Slide {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Move the item at `from` so it ends up at `to`, shifting the items in
/// between. Relative order of every other item is preserved.
///
/// A `to` past the end moves the item to the end; a `from` out of range
/// leaves the sequence unchanged.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || from == to {
        return;
    }
    let to = to.min(items.len() - 1);
    let item = items.remove(from);
    items.insert(to, item);
}

/// Apply a drag gesture: move the item keyed `active` to the position of
/// the item keyed `over`. Returns whether the sequence changed.
pub fn reorder_by_key<T: Keyed>(items: &mut Vec<T>, active: &str, over: &str) -> bool {
    if active == over {
        return false;
    }
    let from = items.iter().position(|item| item.key() == active);
    let to = items.iter().position(|item| item.key() == over);
    match (from, to) {
        (Some(from), Some(to)) => {
            move_item(items, from, to);
            true
        }
        _ => false,
    }
}
