use std::sync::Arc;

use parley_core::ApiClient;
use parley_core::clock::{Clock, SystemClock};
use parley_core::notification::Notifier;

use crate::conversation_store::ConversationStore;
use crate::session_store::SessionStore;

/// Owns one session store and one conversation store sharing the same
/// backend, notifier and clock.
pub struct ChatApp {
    session: SessionStore,
    conversation: ConversationStore,
}

impl ChatApp {
    pub fn new(api: Arc<dyn ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_clock(api, notifier, Arc::new(SystemClock))
    }

    pub fn with_clock(
        api: Arc<dyn ApiClient>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session: SessionStore::new(api.clone(), notifier.clone()),
            conversation: ConversationStore::new(api, notifier, clock),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn conversation(&self) -> &ConversationStore {
        &self.conversation
    }

    /// Resolves the session and, when signed in, loads the contact list.
    ///
    /// Returns whether a user is signed in.
    pub async fn bootstrap(&self) -> bool {
        self.session.check_session().await;
        let authenticated = self.session.is_authenticated();
        if authenticated {
            self.conversation.list_contacts().await;
        }
        authenticated
    }

    /// Logs out and forgets the active conversation.
    pub async fn sign_out(&self) {
        self.session.log_out().await;
        self.conversation.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockApi, RecordingNotifier, fixed_now};
    use parley_core::clock::ManualClock;
    use parley_core::contact::{Contact, DEMO_CONTACT_ID};
    use parley_core::message::OutgoingMessage;
    use parley_core::{ApiError, HttpMethod};
    use serde_json::{Value, json};

    fn app() -> (ChatApp, Arc<MockApi>, Arc<RecordingNotifier>) {
        let api = MockApi::new();
        let notifier = RecordingNotifier::new();
        let clock = Arc::new(ManualClock::new(fixed_now()));
        let app = ChatApp::with_clock(api.clone(), notifier.clone(), clock);
        (app, api, notifier)
    }

    #[tokio::test]
    async fn test_bootstrap_anonymous_skips_contacts() {
        let (app, api, notifier) = app();
        api.respond(
            HttpMethod::Get,
            "/auth/check",
            Err(ApiError::status_code(401, None)),
        );

        assert!(!app.bootstrap().await);
        assert_eq!(api.call_count(), 1);
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_loads_contacts_when_signed_in() {
        let (app, api, _) = app();
        api.respond(
            HttpMethod::Get,
            "/auth/check",
            Ok(json!({"_id": "me", "fullName": "Me", "email": "me@example.com"})),
        );
        api.respond(HttpMethod::Get, "/message/users", Ok(json!([])));

        assert!(app.bootstrap().await);
        assert!(app.conversation().is_demo_mode());
    }

    #[tokio::test]
    async fn test_sign_out_resets_conversation() {
        let (app, api, _) = app();
        api.respond(HttpMethod::Post, "/auth/logout", Ok(Value::Null));
        let conversation = app.conversation();
        conversation.select_contact(Some(Contact::demo()));
        conversation.fetch_messages(DEMO_CONTACT_ID).await;
        conversation
            .send_message(OutgoingMessage::text("hello"))
            .await;
        assert_eq!(conversation.messages().len(), 8);

        app.sign_out().await;

        assert!(app.session().user().is_none());
        assert!(conversation.selected_contact().is_none());
        assert!(conversation.messages().is_empty());
    }
}
