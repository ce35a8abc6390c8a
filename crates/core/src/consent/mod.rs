//! Cookie consent: the stored decision, the banner/modal flow, and the
//! scripts each category unlocks.

pub mod manager;
pub mod scripts;
pub mod state;

pub use manager::{ConsentManager, ConsentPhase, ConsentStorage, MemoryStorage, StorageError};
pub use scripts::{apply_consent, gtm_loader, MemoryScriptHost, Script, ScriptHost, GTM_SCRIPT_ID};
pub use state::{ConsentCategory, ConsentState, CONSENT_STORAGE_KEY};
