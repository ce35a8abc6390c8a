//! Domain core for the JIS corporate site: content blocks, slot editing,
//! consent handling, and the JSON document store behind the admin API.

pub mod auth;
pub mod block;
pub mod consent;
pub mod document;
pub mod events;
pub mod mutation;
pub mod popup;
pub mod slot;
pub mod upload;
