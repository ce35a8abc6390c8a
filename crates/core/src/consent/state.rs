use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage key of the persisted consent decision.
pub const CONSENT_STORAGE_KEY: &str = "jis_cookie_consent";

/// A visitor's cookie consent. `necessary` is always true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentState {
    pub necessary: bool,
    pub performance: bool,
    pub functional: bool,
    pub targeting: bool,
}

/// The optional categories a visitor can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCategory {
    Performance,
    Functional,
    Targeting,
}

impl Default for ConsentState {
    fn default() -> Self {
        Self::reject_all()
    }
}

impl ConsentState {
    pub fn accept_all() -> Self {
        Self {
            necessary: true,
            performance: true,
            functional: true,
            targeting: true,
        }
    }

    pub fn reject_all() -> Self {
        Self {
            necessary: true,
            performance: false,
            functional: false,
            targeting: false,
        }
    }

    pub fn get(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Performance => self.performance,
            ConsentCategory::Functional => self.functional,
            ConsentCategory::Targeting => self.targeting,
        }
    }

    pub fn set(&mut self, category: ConsentCategory, allowed: bool) {
        match category {
            ConsentCategory::Performance => self.performance = allowed,
            ConsentCategory::Functional => self.functional = allowed,
            ConsentCategory::Targeting => self.targeting = allowed,
        }
    }

    /// Parse a stored decision.
    ///
    /// Anything that is not a JSON object with a true `necessary` field is
    /// rejected. Missing optional categories read as not granted.
    pub fn parse_stored(raw: &str) -> Option<Self> {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            return None;
        };
        if map.get("necessary").and_then(Value::as_bool) != Some(true) {
            return None;
        }
        let flag = |key: &str| map.get(key).and_then(Value::as_bool).unwrap_or(false);
        Some(Self {
            necessary: true,
            performance: flag("performance"),
            functional: flag("functional"),
            targeting: flag("targeting"),
        })
    }

    /// Serialized form written to storage. `necessary` is forced to true.
    pub fn to_stored(&self) -> String {
        let complete = Self {
            necessary: true,
            ..*self
        };
        serde_json::to_string(&complete).unwrap_or_default()
    }
}
