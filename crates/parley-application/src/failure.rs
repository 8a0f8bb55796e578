//! Failure classification and the notifications each class produces.

use std::fmt;

use parley_core::ApiError;
use parley_core::notification::Notification;
use parley_core::validation::ValidationError;

pub const CONFLICT_MESSAGE: &str =
    "This email is already registered. Please login or use a different email.";
pub const SERVER_MESSAGE: &str = "Server error. Please try again later or contact support.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please check your connection and try again.";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Image is too large. Please choose a smaller image.";
pub const NOT_FOUND_MESSAGE: &str = "Service not found. Please check the API URL configuration.";
pub const SESSION_CLEARED_MESSAGE: &str = "Session cleared locally";

/// Store operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CheckSession,
    SignUp,
    LogIn,
    LogOut,
    UpdateProfile,
    ListContacts,
    FetchMessages,
    SendMessage,
}

impl Operation {
    /// Message shown when the server gave none and no class applies.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::CheckSession => "Session check failed",
            Operation::SignUp => "Signup failed. Please check your network connection.",
            Operation::LogIn => "Login failed. Please check your input.",
            Operation::LogOut => SESSION_CLEARED_MESSAGE,
            Operation::UpdateProfile => "Profile update failed.",
            Operation::ListContacts => "Failed to load users",
            Operation::FetchMessages => "Failed to load messages",
            Operation::SendMessage => "Failed to send message",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CheckSession => "check_session",
            Operation::SignUp => "sign_up",
            Operation::LogIn => "log_in",
            Operation::LogOut => "log_out",
            Operation::UpdateProfile => "update_profile",
            Operation::ListContacts => "list_contacts",
            Operation::FetchMessages => "fetch_messages",
            Operation::SendMessage => "send_message",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 401 while checking the session: the visitor is simply anonymous.
    ExpectedAnonymous,
    /// Rejected client side, before any request.
    Validation,
    /// 409 on signup.
    Conflict,
    /// 413.
    PayloadTooLarge,
    /// Adapter timeout or 408.
    Timeout,
    /// 5xx.
    Server,
    /// 404, which means the base URL is misconfigured.
    NotFound,
    Generic,
}

/// Maps a backend failure onto a [`FailureClass`] for `operation`.
pub fn classify(operation: Operation, err: &ApiError) -> FailureClass {
    if operation == Operation::CheckSession && err.is_unauthorized() {
        return FailureClass::ExpectedAnonymous;
    }
    if err.is_timeout() {
        return FailureClass::Timeout;
    }
    match err.status() {
        Some(409) if operation == Operation::SignUp => FailureClass::Conflict,
        Some(413) => FailureClass::PayloadTooLarge,
        Some(404) => FailureClass::NotFound,
        Some(500..=599) => FailureClass::Server,
        _ => FailureClass::Generic,
    }
}

/// The single notification a failed `operation` emits, if any.
///
/// Logs the failure as a side effect; a 404 is logged at error level
/// because it points at a bad API URL rather than a user mistake.
pub fn failure_notification(operation: Operation, err: &ApiError) -> Option<Notification> {
    let class = classify(operation, err);

    match class {
        FailureClass::ExpectedAnonymous => {
            tracing::debug!("[{}] Not authenticated", operation);
        }
        FailureClass::NotFound => {
            tracing::error!(
                "[{}] Endpoint not found ({}). Check the configured API URL.",
                operation,
                err
            );
        }
        _ => {
            tracing::warn!("[{}] Failed ({:?}): {}", operation, class, err);
        }
    }

    if operation == Operation::CheckSession {
        return None;
    }
    if operation == Operation::LogOut {
        return Some(match err.server_message() {
            Some(message) => Notification::error(message),
            None => Notification::info(SESSION_CLEARED_MESSAGE),
        });
    }

    let message = match class {
        FailureClass::ExpectedAnonymous => return None,
        FailureClass::Conflict => CONFLICT_MESSAGE,
        FailureClass::PayloadTooLarge => PAYLOAD_TOO_LARGE_MESSAGE,
        FailureClass::Timeout => TIMEOUT_MESSAGE,
        FailureClass::Server => SERVER_MESSAGE,
        FailureClass::NotFound => NOT_FOUND_MESSAGE,
        FailureClass::Validation | FailureClass::Generic => err
            .server_message()
            .unwrap_or_else(|| operation.fallback_message()),
    };
    Some(Notification::error(message))
}

/// Notification for input rejected before it reached the network.
pub fn validation_notification(operation: Operation, err: &ValidationError) -> Notification {
    tracing::debug!("[{}] Rejected: {}", operation, err);
    Notification::error(err.to_string())
}
