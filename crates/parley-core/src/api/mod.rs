//! Backend access port.
//!
//! # Module Structure
//!
//! - `client`: the `ApiClient` trait and `HttpMethod`
//! - `error`: the normalized `ApiError` every adapter must produce

mod client;
mod error;

pub use client::{ApiClient, HttpMethod};
pub use error::{ApiError, ApiErrorKind, extract_server_message};
