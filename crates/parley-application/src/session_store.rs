//! Session store: who is signed in, and the auth operations that change it.

use std::sync::Arc;

use parley_core::notification::{Notification, Notifier};
use parley_core::user::{AuthUser, LoginRequest, ProfileUpdate, SignupRequest};
use parley_core::{ApiClient, ApiError, HttpMethod};
use serde_json::Value;

use crate::codec::{decode, encode};
use crate::failure::{Operation, failure_notification, validation_notification};
use crate::state::{InFlight, StateCell};

const CHECK_PATH: &str = "/auth/check";
const SIGNUP_PATH: &str = "/auth/signup";
const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";
const UPDATE_PROFILE_PATH: &str = "/auth/update-profile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<AuthUser>,
    /// Starts `true`: the session is unresolved until the first check settles.
    pub session_check_in_flight: bool,
    pub signup_in_flight: bool,
    pub login_in_flight: bool,
    pub profile_update_in_flight: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            session_check_in_flight: true,
            signup_in_flight: false,
            login_in_flight: false,
            profile_update_in_flight: false,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    fn session_check_flag(&mut self) -> &mut bool {
        &mut self.session_check_in_flight
    }

    fn signup_flag(&mut self) -> &mut bool {
        &mut self.signup_in_flight
    }

    fn login_flag(&mut self) -> &mut bool {
        &mut self.login_in_flight
    }

    fn profile_update_flag(&mut self) -> &mut bool {
        &mut self.profile_update_in_flight
    }
}

pub struct SessionStore {
    api: Arc<dyn ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: StateCell<SessionState>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: StateCell::new(SessionState::default()),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.snapshot()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.state.read(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read(SessionState::is_authenticated)
    }

    /// Resolves the current session from the auth cookie.
    ///
    /// Never notifies: an anonymous visitor is the normal case.
    pub async fn check_session(&self) {
        let _in_flight = InFlight::begin(&self.state, SessionState::session_check_flag);

        match self.request_user(HttpMethod::Get, CHECK_PATH, None).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "[Session] Authenticated");
                self.set_user(Some(user));
            }
            Err(err) => {
                if err.is_unauthorized() {
                    tracing::debug!("[Session] Not authenticated");
                } else {
                    tracing::warn!(
                        "[Session] Session check failed: {}. Is the backend reachable at the configured API URL?",
                        err
                    );
                }
                self.set_user(None);
            }
        }
    }

    pub async fn sign_up(&self, request: SignupRequest) {
        if let Err(err) = request.validate() {
            self.notifier
                .notify(validation_notification(Operation::SignUp, &err));
            return;
        }

        let _in_flight = InFlight::begin(&self.state, SessionState::signup_flag);
        let result = match encode(&request) {
            Ok(body) => {
                self.request_user(HttpMethod::Post, SIGNUP_PATH, Some(body))
                    .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "[Session] Account created");
                self.set_user(Some(user));
                self.notifier
                    .notify(Notification::success("Account created successfully"));
            }
            Err(err) => self.report(Operation::SignUp, &err),
        }
    }

    pub async fn log_in(&self, request: LoginRequest) {
        if let Err(err) = request.validate() {
            self.notifier
                .notify(validation_notification(Operation::LogIn, &err));
            return;
        }

        let _in_flight = InFlight::begin(&self.state, SessionState::login_flag);
        let result = match encode(&request) {
            Ok(body) => self.request_user(HttpMethod::Post, LOGIN_PATH, Some(body)).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "[Session] Logged in");
                self.set_user(Some(user));
                self.notifier
                    .notify(Notification::success("Logged in successfully"));
            }
            Err(err) => self.report(Operation::LogIn, &err),
        }
    }

    /// Logs out on the server. The local session is cleared whatever the
    /// outcome.
    pub async fn log_out(&self) {
        let result = self.api.request(HttpMethod::Post, LOGOUT_PATH, None).await;
        self.set_user(None);

        match result {
            Ok(_) => {
                tracing::info!("[Session] Logged out");
                self.notifier
                    .notify(Notification::success("Logged out successfully"));
            }
            Err(err) => self.report(Operation::LogOut, &err),
        }
    }

    pub async fn update_profile(&self, update: ProfileUpdate) {
        if let Err(err) = update.validate() {
            self.notifier
                .notify(validation_notification(Operation::UpdateProfile, &err));
            return;
        }

        let _in_flight = InFlight::begin(&self.state, SessionState::profile_update_flag);
        let result = match encode(&update) {
            Ok(body) => {
                self.request_user(HttpMethod::Put, UPDATE_PROFILE_PATH, Some(body))
                    .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "[Session] Profile updated");
                self.set_user(Some(user));
                self.notifier
                    .notify(Notification::success("Profile updated successfully"));
            }
            Err(err) => self.report(Operation::UpdateProfile, &err),
        }
    }

    async fn request_user(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<AuthUser, ApiError> {
        let value = self.api.request(method, path, body).await?;
        decode(value)
    }

    fn set_user(&self, user: Option<AuthUser>) {
        self.state.update(|s| s.user = user);
    }

    fn report(&self, operation: Operation, err: &ApiError) {
        if let Some(notification) = failure_notification(operation, err) {
            self.notifier.notify(notification);
        }
    }
}
