//! Domain layer for Parley.
//!
//! Holds the types shared by every other crate: users, contacts, messages,
//! notifications, the `ApiClient` port and its normalized error, client
//! configuration and validation rules.

pub mod api;
pub mod clock;
pub mod config;
pub mod contact;
pub mod error;
pub mod media;
pub mod message;
pub mod notification;
pub mod user;
pub mod validation;

// Re-export common error types
pub use api::{ApiClient, ApiError, ApiErrorKind, HttpMethod};
pub use error::ParleyError;
pub use validation::ValidationError;
