use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::id::SlotOwner;

/// Signals passed between components of the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SiteEvent {
    /// Ask the consent manager to show its preferences modal again.
    ConsentReopenRequested,
    /// A slot's whole block sequence was replaced.
    SlotSaved(SlotSavedEvent),
    PageCreated { slug: String },
    PageDeleted { slug: String },
    PopupCreated { id: String },
    PopupDeleted { id: String },
    SettingsSaved,
    FormSaved { name: String },
    FormSubmitted { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSavedEvent {
    pub owner: SlotOwner,
    pub block_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl SiteEvent {
    pub fn slot_saved(owner: SlotOwner, block_count: usize) -> Self {
        SiteEvent::SlotSaved(SlotSavedEvent {
            owner,
            block_count,
            timestamp: Utc::now(),
        })
    }
}
