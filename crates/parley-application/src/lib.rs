//! Application layer for Parley.
//!
//! Holds the two client-side stores and the container that wires them to
//! an `ApiClient`, a `Notifier` and a `Clock`. Store operations never
//! return errors: every failure is turned into exactly one notification and
//! the store is left fully settled.

pub mod app;
mod codec;
pub mod conversation_store;
pub mod failure;
pub mod pending;
pub mod session_store;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::ChatApp;
pub use conversation_store::{ConversationState, ConversationStore, DEFAULT_REFETCH_INTERVAL};
pub use failure::{FailureClass, Operation};
pub use pending::PendingRequests;
pub use session_store::{SessionState, SessionStore};
