//! Default instances for the block creation menu.

use super::model::{
    BlockBody, BlockKind, ContentBlock, ImageData, PostGridData, Slide, SliderData, TextData,
};
use crate::document::id::new_id;

pub const DEFAULT_TEXT: &str = "<p>New text block</p>";
pub const DEFAULT_IMAGE_SRC: &str = "https://via.placeholder.com/800x400";
pub const DEFAULT_IMAGE_ALT: &str = "Placeholder image";
pub const DEFAULT_SLIDE_TEXT: &str = "<p>New Slide</p>";

/// A new block of `kind` with a fresh id.
pub fn default_block(kind: BlockKind) -> ContentBlock {
    let body = match kind {
        BlockKind::Text => BlockBody::Text(TextData {
            text: DEFAULT_TEXT.to_string(),
            ..Default::default()
        }),
        BlockKind::Image => BlockBody::Image(ImageData {
            src: DEFAULT_IMAGE_SRC.to_string(),
            alt: DEFAULT_IMAGE_ALT.to_string(),
            ..Default::default()
        }),
        BlockKind::Slider => BlockBody::Slider(SliderData::default()),
        BlockKind::PostGrid => BlockBody::PostGrid(PostGridData::default()),
    };
    ContentBlock::new(new_id(), body)
}

/// A new slide holding a single text block.
pub fn new_slide() -> Slide {
    Slide {
        id: new_id(),
        content: vec![ContentBlock::text(new_id(), DEFAULT_SLIDE_TEXT)],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_default() {
        for kind in BlockKind::ALL {
            let block = default_block(kind);
            assert_eq!(block.kind(), Some(kind));
            assert!(!block.id.is_empty());
        }
    }

    #[test]
    fn defaults_match_the_menu() {
        assert_eq!(
            default_block(BlockKind::Text).body,
            BlockBody::Text(TextData { text: DEFAULT_TEXT.into(), ..Default::default() })
        );
        assert_eq!(
            default_block(BlockKind::Slider).body,
            BlockBody::Slider(SliderData { slides: vec![], ..Default::default() })
        );
        assert_eq!(
            default_block(BlockKind::PostGrid).body,
            BlockBody::PostGrid(PostGridData { columns: 3, ..Default::default() })
        );
    }

    #[test]
    fn ids_are_never_reused() {
        let a = default_block(BlockKind::Text);
        let b = default_block(BlockKind::Text);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_slide_has_one_text_block() {
        let slide = new_slide();
        assert_eq!(slide.content.len(), 1);
        assert_eq!(
            slide.content[0].body,
            BlockBody::Text(TextData { text: DEFAULT_SLIDE_TEXT.into(), ..Default::default() })
        );
        assert_ne!(slide.id, slide.content[0].id);
    }
}
