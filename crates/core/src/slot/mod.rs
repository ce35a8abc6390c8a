//! Slots: the ordered block sequences owned by pages, the header, the
//! footer and popups.

pub mod compose;
pub mod session;

pub use compose::{render_page, Locale, PageView};
pub use session::{SlotError, SlotSession};
