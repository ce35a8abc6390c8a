/// Identifier utilities for slots and generated entities.
///
/// Slot owners are addressed with short keys:
/// - Header: `header`
/// - Footer: `footer`
/// - Page: `page:{slug}`
/// - Popup: `popup:{id}`
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PAGE_PREFIX: &str = "page:";
const POPUP_PREFIX: &str = "popup:";

/// Fresh identifier for a block, slide or popup. Never reused.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Owner of a slot: the entity whose `content` sequence is being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "owner", content = "key", rename_all = "camelCase")]
pub enum SlotOwner {
    Page(String),
    Header,
    Footer,
    Popup(String),
}

impl SlotOwner {
    /// Parse a slot key. Returns `None` for anything unrecognised or empty.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "header" => Some(SlotOwner::Header),
            "footer" => Some(SlotOwner::Footer),
            _ => {
                if let Some(slug) = key.strip_prefix(PAGE_PREFIX) {
                    (!slug.is_empty()).then(|| SlotOwner::Page(slug.to_string()))
                } else if let Some(id) = key.strip_prefix(POPUP_PREFIX) {
                    (!id.is_empty()).then(|| SlotOwner::Popup(id.to_string()))
                } else {
                    None
                }
            }
        }
    }

    /// The slot key, inverse of [`SlotOwner::parse`].
    pub fn key(&self) -> String {
        match self {
            SlotOwner::Page(slug) => format!("{PAGE_PREFIX}{slug}"),
            SlotOwner::Header => "header".to_string(),
            SlotOwner::Footer => "footer".to_string(),
            SlotOwner::Popup(id) => format!("{POPUP_PREFIX}{id}"),
        }
    }

    /// REST resource that stores this slot.
    pub fn api_path(&self) -> String {
        match self {
            SlotOwner::Page(slug) => format!("/api/pages/{slug}"),
            SlotOwner::Header => "/api/theme/header".to_string(),
            SlotOwner::Footer => "/api/theme/footer".to_string(),
            SlotOwner::Popup(id) => format!("/api/popups/{id}"),
        }
    }

    pub fn is_theme(&self) -> bool {
        matches!(self, SlotOwner::Header | SlotOwner::Footer)
    }
}

impl fmt::Display for SlotOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
