//! # Resumatch Shared
//!
//! Request and response bodies exchanged with the Resumatch backend.
//! Kept free of client logic so any front end can reuse them.

pub mod dto;
pub mod response;

pub use response::{ErrorBody, FALLBACK_ERROR_MESSAGE, detail_message};
