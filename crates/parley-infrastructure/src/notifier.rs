//! Channel-backed notifier.
//!
//! Stores push notifications from whatever task runs the operation; the
//! presentation layer drains the receiver at its own pace.

use parley_core::notification::{Notification, Notifier};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

#[derive(Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        tracing::trace!(level = ?notification.level, "[Notify] {}", notification.message);
        if self.sender.send(notification).is_err() {
            tracing::debug!("[Notify] Receiver dropped, notification discarded");
        }
    }
}
