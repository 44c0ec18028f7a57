//! # Resumatch Core
//!
//! The domain layer of the Resumatch client.
//! Entities, the normalized error contract, client-side validation and the
//! ports that storage adapters implement. No network or filesystem access here.

pub mod domain;
pub mod error;
pub mod highlight;
pub mod ports;

pub use error::ApiError;
