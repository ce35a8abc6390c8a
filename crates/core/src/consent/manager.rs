use std::collections::HashMap;

use thiserror::Error;

use super::scripts::{apply_consent, ScriptHost};
use super::state::{ConsentCategory, ConsentState, CONSENT_STORAGE_KEY};
use crate::events::SiteEvent;

#[derive(Debug, Error)]
#[error("consent storage unavailable: {0}")]
pub struct StorageError(pub String);

/// Key/value storage the visitor's decision is persisted in.
pub trait ConsentStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl ConsentStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Which consent UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentPhase {
    /// Nothing loaded yet.
    Unknown,
    BannerShown,
    ModalShown,
    Decided,
}

/// Drives the cookie banner and preferences modal.
pub struct ConsentManager<S, H> {
    storage: S,
    scripts: H,
    gtm_id: String,
    phase: ConsentPhase,
    consent: Option<ConsentState>,
    preferences: ConsentState,
}

impl<S, H> ConsentManager<S, H>
where
    S: ConsentStorage,
    H: ScriptHost,
{
    pub fn new(storage: S, scripts: H, gtm_id: impl Into<String>) -> Self {
        Self {
            storage,
            scripts,
            gtm_id: gtm_id.into(),
            phase: ConsentPhase::Unknown,
            consent: None,
            preferences: ConsentState::default(),
        }
    }

    /// Restore a stored decision on page load.
    ///
    /// A valid decision is applied straight away. Missing or malformed data
    /// shows the banner, and malformed data is removed from storage.
    pub fn load(&mut self) -> ConsentPhase {
        match self.storage.get(CONSENT_STORAGE_KEY) {
            Ok(Some(raw)) => match ConsentState::parse_stored(&raw) {
                Some(consent) => {
                    self.consent = Some(consent);
                    self.preferences = consent;
                    apply_consent(&consent, &mut self.scripts, &self.gtm_id);
                    self.phase = ConsentPhase::Decided;
                }
                None => {
                    tracing::warn!("discarding malformed stored consent");
                    if let Err(error) = self.storage.remove(CONSENT_STORAGE_KEY) {
                        tracing::warn!(%error, "failed to clear stored consent");
                    }
                    self.phase = ConsentPhase::BannerShown;
                }
            },
            Ok(None) => self.phase = ConsentPhase::BannerShown,
            Err(error) => {
                tracing::warn!(%error, "failed to read stored consent");
                self.phase = ConsentPhase::BannerShown;
            }
        }
        self.phase
    }

    pub fn accept_all(&mut self) {
        self.decide(ConsentState::accept_all());
    }

    pub fn reject_all(&mut self) {
        self.decide(ConsentState::reject_all());
    }

    /// Set one category in the preferences modal without saving.
    pub fn toggle(&mut self, category: ConsentCategory, enabled: bool) {
        self.preferences.set(category, enabled);
    }

    /// Save what the modal currently shows.
    pub fn save_preferences(&mut self) {
        self.decide(self.preferences);
    }

    /// Open the preferences modal, pre-filled from the stored decision.
    pub fn reopen(&mut self) {
        let stored = match self.storage.get(CONSENT_STORAGE_KEY) {
            Ok(raw) => raw.as_deref().and_then(ConsentState::parse_stored),
            Err(error) => {
                tracing::warn!(%error, "failed to read stored consent");
                None
            }
        };
        self.preferences = stored.unwrap_or_default();
        self.phase = ConsentPhase::ModalShown;
    }

    /// React to site-wide events such as the footer's "cookie settings" link.
    pub fn handle_event(&mut self, event: &SiteEvent) {
        if matches!(event, SiteEvent::ConsentReopenRequested) {
            self.reopen();
        }
    }

    pub fn phase(&self) -> ConsentPhase {
        self.phase
    }

    pub fn consent(&self) -> Option<ConsentState> {
        self.consent
    }

    pub fn preferences(&self) -> ConsentState {
        self.preferences
    }

    pub fn banner_visible(&self) -> bool {
        self.phase == ConsentPhase::BannerShown
    }

    pub fn modal_visible(&self) -> bool {
        self.phase == ConsentPhase::ModalShown
    }

    pub fn scripts(&self) -> &H {
        &self.scripts
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Record a decision. It takes effect for this page view even when it
    /// cannot be persisted; the banner then returns on the next load.
    fn decide(&mut self, consent: ConsentState) {
        let consent = ConsentState {
            necessary: true,
            ..consent
        };
        if let Err(error) = self.storage.set(CONSENT_STORAGE_KEY, &consent.to_stored()) {
            tracing::warn!(%error, "failed to persist consent");
        }
        self.consent = Some(consent);
        self.preferences = consent;
        self.phase = ConsentPhase::Decided;
        apply_consent(&consent, &mut self.scripts, &self.gtm_id);
    }
}
