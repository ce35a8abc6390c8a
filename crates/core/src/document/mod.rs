pub mod id;
pub mod model;
pub mod store;
pub mod validate;

pub use id::{new_id, SlotOwner};
pub use model::{
    Form, FormField, FormStep, Page, PageSummary, Popup, PopupTrigger, SiteDocument,
    SiteSettings, ThemeSlot, TriggerKind, User,
};
pub use store::{AdminSeed, JsonFileStore, StoreError};
