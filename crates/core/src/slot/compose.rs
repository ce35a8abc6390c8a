//! Assembly of a full public page from its slots.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::block::model::ContentBlock;
use crate::block::render::{escape_html, render_blocks, PageDirectory};
use crate::document::model::{Page, Popup, SiteSettings};

/// Language the page is served in. Arabic pages are laid out right to left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    pub fn dir(self) -> &'static str {
        match self {
            Locale::En => "ltr",
            Locale::Ar => "rtl",
        }
    }
}

/// Everything needed to render one page. Settings are passed in explicitly.
pub struct PageView<'a> {
    pub settings: &'a SiteSettings,
    pub header: &'a [ContentBlock],
    pub page: &'a Page,
    pub footer: &'a [ContentBlock],
    pub popups: &'a [Popup],
    pub locale: Locale,
}

/// Render a complete HTML document for `view`.
pub fn render_page<D>(view: &PageView<'_>, pages: &D) -> String
where
    D: PageDirectory + ?Sized,
{
    let mut html = String::new();
    let title = if view.settings.title.is_empty() {
        escape_html(&view.page.title)
    } else {
        format!(
            "{} | {}",
            escape_html(&view.page.title),
            escape_html(&view.settings.title)
        )
    };

    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"{}\" dir=\"{}\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title></head><body>",
        view.locale.code(),
        view.locale.dir()
    );

    html.push_str("<header class=\"site-header\">");
    if !view.settings.logo_url.is_empty() {
        let _ = write!(
            html,
            "<a href=\"/\" class=\"site-logo\"><img src=\"{}\" alt=\"{}\"></a>",
            escape_html(&view.settings.logo_url),
            escape_html(&view.settings.title)
        );
    }
    html.push_str(&render_blocks(view.header, pages));
    html.push_str("</header>");

    let _ = write!(
        html,
        "<main><div class=\"prose lg:prose-xl mx-auto py-8\">{}</div></main>",
        render_blocks(&view.page.content, pages)
    );

    let _ = write!(
        html,
        "<footer class=\"site-footer\">{}</footer>",
        render_blocks(view.footer, pages)
    );

    for popup in view.popups {
        render_popup(&mut html, popup, pages);
    }

    html.push_str("</body></html>");
    html
}

/// Popups start hidden; the trigger attributes drive client-side display.
fn render_popup<D>(out: &mut String, popup: &Popup, pages: &D)
where
    D: PageDirectory + ?Sized,
{
    let _ = write!(
        out,
        "<div class=\"popup\" data-popup-id=\"{}\" data-trigger=\"{}\"",
        escape_html(&popup.id),
        popup.trigger.kind.as_str()
    );
    if let Some(delay) = popup.trigger.delay {
        let _ = write!(out, " data-delay=\"{delay}\"");
    }
    if let Some(threshold) = popup.trigger.scroll_percentage {
        let _ = write!(out, " data-scroll-percentage=\"{threshold}\"");
    }
    let _ = write!(
        out,
        " hidden><button class=\"popup-close\" aria-label=\"Close\">&times;</button>{}</div>",
        render_blocks(&popup.content, pages)
    );
}
