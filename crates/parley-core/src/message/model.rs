use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media;
use crate::validation::ValidationError;

/// Embedded sender reference some backends return instead of `senderId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
}

/// A message in the active conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderRef>,
    #[serde(default, alias = "content", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Data URL or remote URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Appended without a server round-trip (demo sends only).
    #[serde(default, skip_serializing_if = "is_false")]
    pub local_mine: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Message {
    /// Builds a locally authored message from an outgoing payload.
    pub fn local(id: impl Into<String>, payload: &OutgoingMessage, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            sender_id: None,
            receiver_id: None,
            sender: None,
            text: payload.text.clone(),
            image: payload.image.clone(),
            created_at: Some(at),
            local_mine: true,
        }
    }

    pub fn is_locally_authored(&self) -> bool {
        self.local_mine
    }

    /// Whether this message was written by `user_id` (or locally).
    pub fn is_from(&self, user_id: Option<&str>) -> bool {
        if self.local_mine {
            return true;
        }
        let Some(user_id) = user_id else {
            return false;
        };
        self.sender_id.as_deref() == Some(user_id)
            || self.sender.as_ref().is_some_and(|s| s.id == user_id)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.is_empty())
    }

    pub fn has_content(&self) -> bool {
        self.text().is_some() || self.image().is_some()
    }
}

/// Body of `POST /message/send/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OutgoingMessage {
    /// Trims the text and drops blank fields.
    pub fn new(text: Option<String>, image: Option<String>) -> Self {
        Self {
            text: text
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            image: image.filter(|i| !i.is_empty()),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Some(text.into()), None)
    }

    pub fn image(image: impl Into<String>) -> Self {
        Self::new(None, Some(image.into()))
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        let caption = caption.into();
        let caption = caption.trim();
        self.text = (!caption.is_empty()).then(|| caption.to_string());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.is_none() && self.image.is_none() {
            return Err(ValidationError::EmptyMessage);
        }
        if let Some(image) = &self.image {
            media::validate_image(image)?;
        }
        Ok(())
    }
}
