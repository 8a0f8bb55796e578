//! Message domain module.
//!
//! # Module Structure
//!
//! - `model`: stored messages (`Message`) and outgoing payloads (`OutgoingMessage`)
//! - `demo`: the fixed history shown for the demo contact
//! - `timeline`: relative-time and day-separator helpers for rendering

mod demo;
mod model;
pub mod timeline;

pub use demo::{DEMO_PEER_ID, DEMO_SELF_ID, demo_conversation};
pub use model::{Message, OutgoingMessage, SenderRef};
