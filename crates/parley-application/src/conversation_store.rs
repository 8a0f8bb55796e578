//! Conversation store: the contact list, the selected contact and its
//! message history.
//!
//! When the backend has no contacts to offer (or cannot be reached) the
//! store falls back to demo mode: a single synthetic contact whose history
//! is generated locally and whose sends never leave the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parley_core::clock::Clock;
use parley_core::contact::{Contact, DEMO_CONTACT_ID};
use parley_core::message::{Message, OutgoingMessage, demo_conversation};
use parley_core::notification::Notifier;
use parley_core::{ApiClient, ApiError, HttpMethod};
use serde_json::Value;
use uuid::Uuid;

use crate::codec::{decode, encode};
use crate::failure::{Operation, failure_notification, validation_notification};
use crate::pending::PendingRequests;
use crate::state::{InFlight, StateCell};

const CONTACTS_PATH: &str = "/message/users";

/// How long a fetched history is considered fresh by
/// [`ConversationStore::fetch_messages_if_stale`].
pub const DEFAULT_REFETCH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub contacts: Vec<Contact>,
    pub demo_mode: bool,
    pub contacts_loading: bool,
    pub selected_contact: Option<Contact>,
    pub messages: Vec<Message>,
    pub messages_loading: bool,
}

impl ConversationState {
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_contact.as_ref().map(|c| c.id.as_str())
    }

    fn contacts_loading_flag(&mut self) -> &mut bool {
        &mut self.contacts_loading
    }

    fn messages_loading_flag(&mut self) -> &mut bool {
        &mut self.messages_loading
    }

    fn enter_demo_mode(&mut self) {
        self.contacts = vec![Contact::demo()];
        self.demo_mode = true;
    }

    /// A result for `contact_id` still belongs on screen unless another
    /// contact has been selected since.
    fn accepts_result_for(&self, contact_id: &str) -> bool {
        self.selected_id().is_none_or(|selected| selected == contact_id)
    }
}

pub struct ConversationStore {
    api: Arc<dyn ApiClient>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    state: StateCell<ConversationState>,
    pending: PendingRequests,
    last_fetched: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl ConversationStore {
    pub fn new(api: Arc<dyn ApiClient>, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            notifier,
            clock,
            state: StateCell::new(ConversationState::default()),
            pending: PendingRequests::new(),
            last_fetched: Mutex::new(HashMap::new()),
        }
    }

    pub fn snapshot(&self) -> ConversationState {
        self.state.snapshot()
    }

    pub fn selected_contact(&self) -> Option<Contact> {
        self.state.read(|s| s.selected_contact.clone())
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.read(|s| s.messages.clone())
    }

    pub fn is_demo_mode(&self) -> bool {
        self.state.read(|s| s.demo_mode)
    }

    pub fn online_contacts(&self) -> Vec<Contact> {
        self.state.read(|s| {
            s.contacts
                .iter()
                .filter(|c| c.is_online())
                .cloned()
                .collect()
        })
    }

    pub fn is_fetch_pending(&self, contact_id: &str) -> bool {
        self.pending.is_pending(contact_id)
    }

    /// Loads the contact list, falling back to demo mode when the backend
    /// returns nothing usable.
    pub async fn list_contacts(&self) {
        let _loading = InFlight::begin(&self.state, ConversationState::contacts_loading_flag);

        match self.api.request(HttpMethod::Get, CONTACTS_PATH, None).await {
            Ok(value) => match decode_contacts(value) {
                Some(contacts) => {
                    tracing::info!("[Contacts] Loaded {} contacts", contacts.len());
                    self.state.update(|s| {
                        s.contacts = contacts;
                        s.demo_mode = false;
                    });
                }
                None => {
                    tracing::info!("[Contacts] No usable contacts returned, entering demo mode");
                    self.state.update(ConversationState::enter_demo_mode);
                }
            },
            Err(err) => {
                self.state.update(ConversationState::enter_demo_mode);
                self.report(Operation::ListContacts, &err);
            }
        }
    }

    /// Replaces the selection. Does not fetch.
    pub fn select_contact(&self, contact: Option<Contact>) {
        tracing::debug!(
            "[Conversation] Selected {:?}",
            contact.as_ref().map(|c| c.id.as_str())
        );
        self.state.update(|s| s.selected_contact = contact);
    }

    /// Selects the contact with `contact_id` from the loaded list.
    ///
    /// Returns the selected contact, or `None` if no such contact is loaded
    /// (the selection is left unchanged).
    pub fn select_contact_by_id(&self, contact_id: &str) -> Option<Contact> {
        let contact = self
            .state
            .read(|s| s.contacts.iter().find(|c| c.id == contact_id).cloned())?;
        self.select_contact(Some(contact.clone()));
        Some(contact)
    }

    /// Loads the history for `contact_id`.
    ///
    /// A second call for the same id while the first is in flight returns
    /// immediately. Results are dropped if another contact was selected
    /// while the request was open.
    pub async fn fetch_messages(&self, contact_id: &str) {
        self.fetch_history(contact_id).await;
    }

    /// Fetches only if `contact_id` has not been fetched within `max_age`.
    ///
    /// Returns `true` if this call issued a fetch, and `false` when the
    /// history was fresh or a fetch for the same id was already pending.
    pub async fn fetch_messages_if_stale(&self, contact_id: &str, max_age: Duration) -> bool {
        let now = self.clock.now();
        let fresh = self
            .history_lock()
            .get(contact_id)
            .is_some_and(|last| (now - *last).to_std().is_ok_and(|age| age < max_age));
        if fresh {
            tracing::trace!("[Conversation] History for {} is fresh", contact_id);
            return false;
        }
        self.fetch_history(contact_id).await
    }

    async fn fetch_history(&self, contact_id: &str) -> bool {
        let Some(_pending) = self.pending.try_begin(contact_id) else {
            tracing::debug!("[Conversation] Fetch for {} already pending", contact_id);
            return false;
        };
        self.record_fetch(contact_id);
        let _loading = InFlight::begin(&self.state, ConversationState::messages_loading_flag);

        if contact_id == DEMO_CONTACT_ID {
            let messages = demo_conversation(self.clock.now());
            self.apply_history(contact_id, messages);
            return true;
        }

        let path = format!("/message/{contact_id}");
        let result = self
            .api
            .request(HttpMethod::Get, &path, None)
            .await
            .and_then(decode::<Vec<Message>>);

        match result {
            Ok(messages) => self.apply_history(contact_id, messages),
            Err(err) => self.report(Operation::FetchMessages, &err),
        }
        true
    }

    /// Sends a message to the selected contact.
    ///
    /// Demo sends are appended locally. Real sends are appended only after
    /// the server confirms them.
    pub async fn send_message(&self, payload: OutgoingMessage) {
        let Some(contact_id) = self.state.read(|s| s.selected_id().map(str::to_string)) else {
            tracing::debug!("[Conversation] Send with no contact selected, ignoring");
            return;
        };
        if let Err(err) = payload.validate() {
            self.notifier
                .notify(validation_notification(Operation::SendMessage, &err));
            return;
        }

        if contact_id == DEMO_CONTACT_ID {
            let message = Message::local(
                format!("local-{}", Uuid::new_v4()),
                &payload,
                self.clock.now(),
            );
            self.state.update(|s| s.messages.push(message));
            return;
        }

        let path = format!("/message/send/{contact_id}");
        match self.post_message(&path, &payload).await {
            Ok(message) => {
                let appended = self.state.update(|s| {
                    if s.selected_id() != Some(contact_id.as_str()) {
                        return false;
                    }
                    s.messages.push(message);
                    true
                });
                if !appended {
                    tracing::debug!(
                        "[Conversation] Sent to {} but selection changed, not appending",
                        contact_id
                    );
                }
            }
            Err(err) => self.report(Operation::SendMessage, &err),
        }
    }

    /// Clears the selection, messages and fetch history.
    pub fn reset(&self) {
        self.state.update(|s| {
            s.selected_contact = None;
            s.messages.clear();
        });
        self.history_lock().clear();
    }

    async fn post_message(&self, path: &str, payload: &OutgoingMessage) -> Result<Message, ApiError> {
        let body = encode(payload)?;
        let value = self.api.request(HttpMethod::Post, path, Some(body)).await?;
        decode(value)
    }

    fn apply_history(&self, contact_id: &str, messages: Vec<Message>) {
        let count = messages.len();
        let applied = self.state.update(|s| {
            if !s.accepts_result_for(contact_id) {
                return false;
            }
            s.messages = messages;
            true
        });
        if applied {
            tracing::debug!("[Conversation] Loaded {} messages for {}", count, contact_id);
        } else {
            tracing::debug!("[Conversation] Discarding stale history for {}", contact_id);
        }
    }

    fn record_fetch(&self, contact_id: &str) {
        let now = self.clock.now();
        self.history_lock().insert(contact_id.to_string(), now);
    }

    fn history_lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.last_fetched.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, operation: Operation, err: &ApiError) {
        if let Some(notification) = failure_notification(operation, err) {
            self.notifier.notify(notification);
        }
    }
}

/// A non-empty array of contacts, or `None` for anything else.
fn decode_contacts(value: Value) -> Option<Vec<Contact>> {
    match &value {
        Value::Array(items) if !items.is_empty() => {}
        _ => return None,
    }
    match serde_json::from_value(value) {
        Ok(contacts) => Some(contacts),
        Err(err) => {
            tracing::warn!("[Contacts] Could not decode contact list: {}", err);
            None
        }
    }
}
