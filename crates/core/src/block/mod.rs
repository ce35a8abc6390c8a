pub mod edit;
pub mod factory;
pub mod model;
pub mod render;
pub mod reorder;

pub use edit::{apply_edit, BlockEdit, BlockEditor, EditError, EditSurface};
pub use factory::{default_block, new_slide};
pub use model::{
    BlockBody, BlockKind, ContentBlock, ImageData, PostGridData, Slide, SliderData, TextData,
};
pub use render::{render_blocks, PageDirectory};
pub use reorder::{move_item, reorder_by_key, Keyed};
