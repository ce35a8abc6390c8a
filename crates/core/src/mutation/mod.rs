pub mod merge;
pub mod types;

pub use merge::{merge_shallow, MergeError};
pub use types::{Credentials, NewForm, NewPage, NewPopup, SlotPayload, TokenResponse, UploadResponse};
