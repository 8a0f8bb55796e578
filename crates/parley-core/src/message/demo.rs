//! Fixed conversation shown for the demo contact.

use chrono::{DateTime, TimeDelta, Utc};

use super::model::Message;

/// Sender id of the demo contact's side of the conversation.
pub const DEMO_PEER_ID: &str = "demo-other";
/// Sender id of the "own" side of the demo conversation.
pub const DEMO_SELF_ID: &str = "current-user";

/// Seven messages spread over three days so day separators can be seen:
/// two from two days ago, two from yesterday, three from the last hours.
pub fn demo_conversation(now: DateTime<Utc>) -> Vec<Message> {
    let day = TimeDelta::days(1);
    let script: [(&str, &str, &str, TimeDelta); 7] = [
        ("m1", "Hey! How are you doing?", DEMO_PEER_ID, day * 2),
        (
            "m2",
            "I'm doing great, thanks for asking!",
            DEMO_SELF_ID,
            day * 2 - TimeDelta::minutes(5),
        ),
        (
            "m3",
            "Good morning! Ready for today's meeting?",
            DEMO_PEER_ID,
            day,
        ),
        (
            "m4",
            "Absolutely! I've prepared all the documents.",
            DEMO_SELF_ID,
            day - TimeDelta::minutes(10),
        ),
        ("m5", "Welcome to the chat preview!", DEMO_PEER_ID, TimeDelta::hours(2)),
        (
            "m6",
            "You can type and send messages below.",
            DEMO_PEER_ID,
            TimeDelta::minutes(30),
        ),
        ("m7", "This is a recent message!", DEMO_PEER_ID, TimeDelta::minutes(2)),
    ];

    script
        .into_iter()
        .map(|(id, text, sender, ago)| Message {
            id: id.to_string(),
            sender_id: Some(sender.to_string()),
            receiver_id: None,
            sender: None,
            text: Some(text.to_string()),
            image: None,
            created_at: Some(now - ago),
            local_mine: false,
        })
        .collect()
}
