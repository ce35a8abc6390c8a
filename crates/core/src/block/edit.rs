//! Block editing: the surface an admin edits and the changes it produces.
//!
//! Edits never change a block's `id` or `type`. Every accepted edit hands
//! the complete updated block to the editor's change callback.

use serde::Serialize;
use thiserror::Error;

use super::factory::new_slide;
use super::model::{BlockBody, ContentBlock};
use crate::upload::{PendingFile, UploadError, Uploader};

/// A single change an editor surface can make to a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockEdit {
    /// Serialized markup from the rich-text surface.
    SetText(String),
    SetImageSrc(String),
    SetImageAlt(String),
    /// Append a slide holding one default text block.
    AddSlide,
    RemoveSlide(String),
    /// Stored verbatim; zero, negative and very large values are accepted.
    SetColumns(i64),
}

impl BlockEdit {
    fn name(&self) -> &'static str {
        match self {
            BlockEdit::SetText(_) => "set-text",
            BlockEdit::SetImageSrc(_) => "set-image-src",
            BlockEdit::SetImageAlt(_) => "set-image-alt",
            BlockEdit::AddSlide => "add-slide",
            BlockEdit::RemoveSlide(_) => "remove-slide",
            BlockEdit::SetColumns(_) => "set-columns",
        }
    }
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("{edit} does not apply to a {block_type} block")]
    KindMismatch {
        edit: &'static str,
        block_type: String,
    },
    #[error("image upload failed: {0}")]
    Upload(#[from] UploadError),
}

/// Apply `edit` to `block`, returning the updated copy.
///
/// Only the touched field of `data` changes; the rest is carried over.
pub fn apply_edit(block: &ContentBlock, edit: BlockEdit) -> Result<ContentBlock, EditError> {
    let mut updated = block.clone();
    match (&mut updated.body, edit) {
        (BlockBody::Text(data), BlockEdit::SetText(text)) => data.text = text,
        (BlockBody::Image(data), BlockEdit::SetImageSrc(src)) => data.src = src,
        (BlockBody::Image(data), BlockEdit::SetImageAlt(alt)) => data.alt = alt,
        (BlockBody::Slider(data), BlockEdit::AddSlide) => data.slides.push(new_slide()),
        (BlockBody::Slider(data), BlockEdit::RemoveSlide(slide_id)) => {
            data.slides.retain(|slide| slide.id != slide_id);
        }
        (BlockBody::PostGrid(data), BlockEdit::SetColumns(columns)) => data.columns = columns,
        (body, edit) => {
            return Err(EditError::KindMismatch {
                edit: edit.name(),
                block_type: body.type_name().to_string(),
            })
        }
    }
    Ok(updated)
}

/// What an admin sees when editing a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "surface", rename_all = "kebab-case")]
pub enum EditSurface {
    RichText {
        markup: String,
    },
    Image {
        src: String,
        alt: String,
        pending_upload: Option<String>,
    },
    Slider {
        slides: Vec<SlidePreview>,
    },
    PostGrid {
        columns: i64,
    },
    Unsupported {
        type_name: String,
    },
}

/// A slide as listed by the slider surface. Nested content is shown as
/// pretty-printed JSON and is not editable in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlidePreview {
    pub id: String,
    pub number: usize,
    pub raw_content: String,
}

/// Editing session for one block.
pub struct BlockEditor<F>
where
    F: FnMut(&ContentBlock),
{
    block: ContentBlock,
    pending_file: Option<PendingFile>,
    on_change: F,
}

impl<F> BlockEditor<F>
where
    F: FnMut(&ContentBlock),
{
    pub fn new(block: ContentBlock, on_change: F) -> Self {
        Self {
            block,
            pending_file: None,
            on_change,
        }
    }

    pub fn block(&self) -> &ContentBlock {
        &self.block
    }

    pub fn into_block(self) -> ContentBlock {
        self.block
    }

    pub fn surface(&self) -> EditSurface {
        match &self.block.body {
            BlockBody::Text(data) => EditSurface::RichText {
                markup: data.text.clone(),
            },
            BlockBody::Image(data) => EditSurface::Image {
                src: data.src.clone(),
                alt: data.alt.clone(),
                pending_upload: self.pending_file.as_ref().map(|f| f.file_name.clone()),
            },
            BlockBody::Slider(data) => EditSurface::Slider {
                slides: data
                    .slides
                    .iter()
                    .enumerate()
                    .map(|(index, slide)| SlidePreview {
                        id: slide.id.clone(),
                        number: index + 1,
                        raw_content: serde_json::to_string_pretty(&slide.content)
                            .unwrap_or_default(),
                    })
                    .collect(),
            },
            BlockBody::PostGrid(data) => EditSurface::PostGrid {
                columns: data.columns,
            },
            BlockBody::Unknown { type_name, .. } => EditSurface::Unsupported {
                type_name: type_name.clone(),
            },
        }
    }

    /// Apply an edit and notify the change callback.
    pub fn apply(&mut self, edit: BlockEdit) -> Result<(), EditError> {
        self.block = apply_edit(&self.block, edit)?;
        (self.on_change)(&self.block);
        Ok(())
    }

    /// Remember a file for the next [`BlockEditor::confirm_upload`].
    pub fn select_file(&mut self, file: PendingFile) {
        self.pending_file = Some(file);
    }

    /// Upload the selected file and point the image at the returned URL.
    ///
    /// Does nothing when no file is selected. On failure the block and the
    /// selection are left as they were.
    pub async fn confirm_upload<U>(&mut self, uploader: &U) -> Result<(), EditError>
    where
        U: Uploader,
    {
        let Some(file) = self.pending_file.as_ref() else {
            return Ok(());
        };
        if !matches!(self.block.body, BlockBody::Image(_)) {
            return Err(EditError::KindMismatch {
                edit: "upload",
                block_type: self.block.type_name().to_string(),
            });
        }

        let url = uploader.upload(file).await.inspect_err(|err| {
            tracing::warn!(block_id = %self.block.id, error = %err, "image upload failed");
        })?;
        self.pending_file = None;
        self.apply(BlockEdit::SetImageSrc(url))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::block::factory::DEFAULT_SLIDE_TEXT;
    use crate::block::model::{PostGridData, Slide, SliderData, TextData};

    struct FixedUploader {
        url: &'static str,
        calls: AtomicUsize,
    }

    impl Uploader for FixedUploader {
        async fn upload(&self, _file: &PendingFile) -> Result<String, UploadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.url.to_string())
        }
    }

    struct RejectingUploader;

    impl Uploader for RejectingUploader {
        async fn upload(&self, _file: &PendingFile) -> Result<String, UploadError> {
            Err(UploadError::Rejected("too big".into()))
        }
    }

    fn png() -> PendingFile {
        PendingFile {
            file_name: "plant.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    fn slider_with(ids: &[&str]) -> ContentBlock {
        ContentBlock::new(
            "slider",
            BlockBody::Slider(SliderData {
                slides: ids
                    .iter()
                    .map(|id| Slide {
                        id: id.to_string(),
                        content: vec![],
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn alt_change_leaves_src_untouched() {
        let block = ContentBlock::image("img", "/uploads/a.png", "old");
        let updated = apply_edit(&block, BlockEdit::SetImageAlt("new".into())).unwrap();

        assert_eq!(updated, ContentBlock::image("img", "/uploads/a.png", "new"));
    }

    #[test]
    fn alt_change_keeps_unmodelled_keys() {
        let block: ContentBlock = serde_json::from_value(serde_json::json!({
            "id": "img", "type": "image",
            "data": { "src": "/uploads/a.png", "alt": "old", "caption": "Plant" }
        }))
        .unwrap();
        let updated = apply_edit(&block, BlockEdit::SetImageAlt("new".into())).unwrap();

        let data = &serde_json::to_value(&updated).unwrap()["data"];
        assert_eq!(data["alt"], "new");
        assert_eq!(data["caption"], "Plant");
    }

    #[test]
    fn text_edit_keeps_id_and_type() {
        let block = ContentBlock::text("t1", "<p>a</p>");
        let updated = apply_edit(&block, BlockEdit::SetText("<p>b</p>".into())).unwrap();

        assert_eq!(updated.id, "t1");
        assert_eq!(updated.body, BlockBody::Text(TextData { text: "<p>b</p>".into(), ..Default::default() }));
    }

    #[test]
    fn mismatched_edit_is_rejected() {
        let block = ContentBlock::text("t1", "x");
        let err = apply_edit(&block, BlockEdit::SetColumns(2)).unwrap_err();
        assert!(matches!(err, EditError::KindMismatch { edit: "set-columns", .. }));
    }

    #[test]
    fn add_slide_appends_default_slide() {
        let block = slider_with(&["a"]);
        let updated = apply_edit(&block, BlockEdit::AddSlide).unwrap();

        let BlockBody::Slider(data) = &updated.body else {
            panic!("slider expected");
        };
        assert_eq!(data.slides.len(), 2);
        assert_eq!(data.slides[0].id, "a");
        assert_eq!(
            data.slides[1].content[0].body,
            BlockBody::Text(TextData { text: DEFAULT_SLIDE_TEXT.into(), ..Default::default() })
        );
    }

    #[test]
    fn remove_slide_by_id() {
        let block = slider_with(&["a", "b", "c"]);
        let updated = apply_edit(&block, BlockEdit::RemoveSlide("b".into())).unwrap();

        assert_eq!(updated, slider_with(&["a", "c"]));
        let unchanged = apply_edit(&updated, BlockEdit::RemoveSlide("zzz".into())).unwrap();
        assert_eq!(unchanged, updated);
    }

    #[test]
    fn columns_accept_out_of_range_values() {
        let block = ContentBlock::new("g", BlockBody::PostGrid(PostGridData { columns: 3, ..Default::default() }));
        for columns in [0, -4, 10_000] {
            let updated = apply_edit(&block, BlockEdit::SetColumns(columns)).unwrap();
            assert_eq!(updated.body, BlockBody::PostGrid(PostGridData { columns, ..Default::default() }));
        }
    }

    #[test]
    fn editor_notifies_with_complete_block() {
        let mut seen = Vec::new();
        let mut editor = BlockEditor::new(ContentBlock::image("img", "/a.png", "A"), |block: &ContentBlock| {
            seen.push(block.clone());
        });
        editor.apply(BlockEdit::SetImageSrc("/b.png".into())).unwrap();
        editor.apply(BlockEdit::SetImageAlt("B".into())).unwrap();
        drop(editor);

        assert_eq!(
            seen,
            vec![
                ContentBlock::image("img", "/b.png", "A"),
                ContentBlock::image("img", "/b.png", "B"),
            ]
        );
    }

    #[test]
    fn rejected_edit_does_not_notify() {
        let mut calls = 0;
        let mut editor = BlockEditor::new(ContentBlock::text("t", "x"), |_: &ContentBlock| calls += 1);
        assert!(editor.apply(BlockEdit::AddSlide).is_err());
        drop(editor);
        assert_eq!(calls, 0);
    }

    #[test]
    fn slider_surface_shows_raw_content() {
        let block = apply_edit(&slider_with(&[]), BlockEdit::AddSlide).unwrap();
        let editor = BlockEditor::new(block, |_: &ContentBlock| {});

        let EditSurface::Slider { slides } = editor.surface() else {
            panic!("slider surface expected");
        };
        assert_eq!(slides[0].number, 1);
        assert!(slides[0].raw_content.contains("New Slide"));
    }

    #[tokio::test]
    async fn upload_replaces_src_and_keeps_alt() {
        let uploader = FixedUploader {
            url: "/uploads/1700000000000-plant.png",
            calls: AtomicUsize::new(0),
        };
        let mut changes = Vec::new();
        let mut editor = BlockEditor::new(ContentBlock::image("img", "", "Plant"), |b: &ContentBlock| {
            changes.push(b.clone());
        });

        editor.select_file(png());
        assert!(matches!(
            editor.surface(),
            EditSurface::Image { pending_upload: Some(ref name), .. } if name == "plant.png"
        ));
        editor.confirm_upload(&uploader).await.unwrap();
        let block = editor.into_block();

        assert_eq!(block, ContentBlock::image("img", "/uploads/1700000000000-plant.png", "Plant"));
        assert_eq!(uploader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(changes.len(), 1);
    }

    #[tokio::test]
    async fn confirm_without_file_is_a_no_op() {
        let uploader = FixedUploader {
            url: "/uploads/x.png",
            calls: AtomicUsize::new(0),
        };
        let mut editor = BlockEditor::new(ContentBlock::image("img", "/a.png", "A"), |_: &ContentBlock| {});

        editor.confirm_upload(&uploader).await.unwrap();

        assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
        assert_eq!(editor.block(), &ContentBlock::image("img", "/a.png", "A"));
    }

    #[tokio::test]
    async fn failed_upload_keeps_block_and_selection() {
        let mut editor = BlockEditor::new(ContentBlock::image("img", "/a.png", "A"), |_: &ContentBlock| {});
        editor.select_file(png());

        let err = editor.confirm_upload(&RejectingUploader).await.unwrap_err();

        assert!(matches!(err, EditError::Upload(UploadError::Rejected(_))));
        assert_eq!(editor.block(), &ContentBlock::image("img", "/a.png", "A"));
        assert!(matches!(editor.surface(), EditSurface::Image { pending_upload: Some(_), .. }));
    }
}
