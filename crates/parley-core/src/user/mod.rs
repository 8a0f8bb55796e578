//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: the authenticated identity (`AuthUser`) and `ProfileUpdate`
//! - `credentials`: signup/login payloads and their validation rules

mod credentials;
mod model;

// Re-export public API
pub use credentials::{LoginRequest, SignupRequest, is_valid_email};
pub use model::{AuthUser, ProfileUpdate};
