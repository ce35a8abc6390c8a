use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::model::ContentBlock;
use crate::block::render::PageDirectory;
use crate::document::store::StoreError;

/// Root of the JSON document store.
///
/// Root keys this model does not know about are carried in `extra` so a
/// load/save cycle never drops them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default)]
    pub site_settings: SiteSettings,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub forms: Vec<Form>,
    #[serde(default)]
    pub header: ThemeSlot,
    #[serde(default)]
    pub footer: ThemeSlot,
    #[serde(default)]
    pub popups: Vec<Popup>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Numeric in seeded documents, string in newer ones.
    #[serde(default)]
    pub id: Value,
    pub username: String,
    /// Argon2 PHC string, or a legacy plaintext value.
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Title and link target of a page, as listed by a post-grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub slug: String,
    pub title: String,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            slug: page.slug.clone(),
            title: page.title.clone(),
        }
    }
}

/// Header or footer content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeSlot {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<FormStep>,
    /// Append-only.
    #[serde(default)]
    pub submissions: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormStep {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

fn default_field_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Popup {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub trigger: PopupTrigger,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Client-side display timing of a popup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupTrigger {
    #[serde(rename = "type", default)]
    pub kind: TriggerKind,
    /// Milliseconds after load, `onload` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
    /// Percentage of the page scrolled, `onscroll` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    #[default]
    Onload,
    Onscroll,
}

impl TriggerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::Onload => "onload",
            TriggerKind::Onscroll => "onscroll",
        }
    }
}

impl SiteDocument {
    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.slug == slug)
    }

    pub fn page_index(&self, slug: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.slug == slug)
    }

    pub fn form(&self, name: &str) -> Option<&Form> {
        self.forms.iter().find(|form| form.name == name)
    }

    pub fn form_index(&self, name: &str) -> Option<usize> {
        self.forms.iter().position(|form| form.name == name)
    }

    pub fn popup(&self, id: &str) -> Option<&Popup> {
        self.popups.iter().find(|popup| popup.id == id)
    }

    pub fn popup_index(&self, id: &str) -> Option<usize> {
        self.popups.iter().position(|popup| popup.id == id)
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }
}

impl PageDirectory for [Page] {
    fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError> {
        Ok(self.iter().map(PageSummary::from).collect())
    }
}

impl PageDirectory for SiteDocument {
    fn list_pages(&self) -> Result<Vec<PageSummary>, StoreError> {
        self.pages.as_slice().list_pages()
    }
}
