//! Test doubles shared by the store tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parley_core::notification::{Notification, Notifier};
use parley_core::{ApiClient, ApiError, HttpMethod};
use serde_json::Value;
use tokio::sync::Notify;

type Route = (HttpMethod, String);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// Holds a request open until the test releases it.
#[derive(Default)]
pub(crate) struct Gate {
    started: Notify,
    release: Notify,
}

impl Gate {
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// `ApiClient` answering from per-route queues of scripted responses.
///
/// Unscripted routes fail with a 404.
#[derive(Default)]
pub(crate) struct MockApi {
    responses: Mutex<HashMap<Route, VecDeque<Result<Value, ApiError>>>>,
    gates: Mutex<HashMap<Route, Arc<Gate>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: HttpMethod, path: &str, response: Result<Value, ApiError>) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    pub fn gate(&self, method: HttpMethod, path: &str) -> Arc<Gate> {
        self.gates
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, method: HttpMethod, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let route = (method, path.to_string());
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        let gate = self.gates.lock().unwrap().get(&route).cloned();
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        self.responses
            .lock()
            .unwrap()
            .get_mut(&route)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ApiError::status_code(404, None)))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}
