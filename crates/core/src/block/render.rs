//! Server-side rendering of block sequences into HTML.
//!
//! Every variant except `post-grid` is a pure function of the block itself.
//! A post-grid asks its [`PageDirectory`] for the current pages each time it
//! is rendered; nothing is cached between renders.

use std::fmt::Write;

use super::model::{BlockBody, ContentBlock, ImageData, PostGridData, SliderData};
use crate::document::model::PageSummary;
use crate::document::store::StoreError;

/// Source of the page listing a post-grid block renders.
pub trait PageDirectory {
    fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError>;
}

/// Render a block sequence in order into a single HTML string.
pub fn render_blocks<D>(blocks: &[ContentBlock], pages: &D) -> String
where
    D: PageDirectory + ?Sized,
{
    let mut html = String::new();
    for block in blocks {
        render_block(&mut html, block, pages);
    }
    html
}

fn render_block<D>(out: &mut String, block: &ContentBlock, pages: &D)
where
    D: PageDirectory + ?Sized,
{
    match &block.body {
        // Trusted author markup; only authenticated editors can write it.
        BlockBody::Text(data) => {
            let _ = write!(out, "<div class=\"block-text\">{}</div>", data.text);
        }
        BlockBody::Image(data) => render_image(out, data),
        BlockBody::Slider(data) => render_slider(out, &block.id, data, pages),
        BlockBody::PostGrid(data) => render_post_grid(out, data, pages),
        BlockBody::Unknown { type_name, .. } => {
            tracing::debug!(block_id = %block.id, block_type = %type_name, "rendering unknown block placeholder");
            out.push_str("<div class=\"block-unknown\">Unknown block type</div>");
        }
    }
}

/// An empty `src` is passed through and shows as a broken image.
fn render_image(out: &mut String, data: &ImageData) {
    let _ = write!(
        out,
        "<img src=\"{}\" alt=\"{}\">",
        escape_html(&data.src),
        escape_html(&data.alt)
    );
}

fn render_slider<D>(out: &mut String, block_id: &str, data: &SliderData, pages: &D)
where
    D: PageDirectory + ?Sized,
{
    let _ = write!(
        out,
        "<div class=\"slider\" data-slider-id=\"{}\">",
        escape_html(block_id)
    );
    for slide in &data.slides {
        let _ = write!(
            out,
            "<div class=\"slide\" data-slide-id=\"{}\">",
            escape_html(&slide.id)
        );
        for nested in &slide.content {
            render_block(out, nested, pages);
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn render_post_grid<D>(out: &mut String, data: &PostGridData, pages: &D)
where
    D: PageDirectory + ?Sized,
{
    let listing = pages.list_pages().unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to list pages for post grid");
        Vec::new()
    });

    let _ = write!(out, "<div class=\"grid grid-cols-{} gap-4\">", data.columns);
    for page in &listing {
        let _ = write!(
            out,
            "<div class=\"post-card\"><h2>{}</h2><a href=\"/{}\">Read more</a></div>",
            escape_html(&page.title),
            escape_html(&page.slug)
        );
    }
    out.push_str("</div>");
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
