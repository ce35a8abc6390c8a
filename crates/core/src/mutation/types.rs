/// Request and response bodies of the content API.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::model::ContentBlock;
use crate::document::model::{FormStep, PopupTrigger};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPage {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<FormStep>,
}

/// Popup creation body. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPopup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub trigger: PopupTrigger,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Wholesale replacement of a slot's block sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPayload {
    pub content: Vec<ContentBlock>,
}
