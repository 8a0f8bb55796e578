//! Contact records returned by `GET /message/users`.

use serde::{Deserialize, Serialize};

/// Reserved id of the synthetic contact installed in demo mode.
pub const DEMO_CONTACT_ID: &str = "demo";

pub const UNKNOWN_CONTACT_NAME: &str = "Unknown User";

/// Optional name-bearing fields of a [`Contact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    FullName,
    Name,
    Username,
    Email,
}

/// Order in which name fields are tried when labelling a contact.
pub const DISPLAY_NAME_FALLBACK: [NameField; 4] = [
    NameField::FullName,
    NameField::Name,
    NameField::Username,
    NameField::Email,
];

/// A user the current session may converse with.
///
/// Backends disagree on which name fields they populate, so every name is
/// optional and [`Contact::display_name`] walks [`DISPLAY_NAME_FALLBACK`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
}

impl Contact {
    /// The single contact shown while the backend has nobody to offer.
    pub fn demo() -> Self {
        Self {
            id: DEMO_CONTACT_ID.to_string(),
            name: Some("Demo User".to_string()),
            email: Some("demo@example.com".to_string()),
            ..Self::default()
        }
    }

    pub fn is_demo(&self) -> bool {
        self.id == DEMO_CONTACT_ID
    }

    pub fn is_online(&self) -> bool {
        self.is_online.unwrap_or(false)
    }

    pub fn field(&self, field: NameField) -> Option<&str> {
        let value = match field {
            NameField::FullName => &self.full_name,
            NameField::Name => &self.name,
            NameField::Username => &self.username,
            NameField::Email => &self.email,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn display_name(&self) -> &str {
        DISPLAY_NAME_FALLBACK
            .iter()
            .find_map(|field| self.field(*field))
            .unwrap_or(UNKNOWN_CONTACT_NAME)
    }

    pub fn avatar(&self) -> Option<&str> {
        self.profile_pic.as_deref().filter(|pic| !pic.is_empty())
    }
}
