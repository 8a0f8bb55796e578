//! Authenticated identity and profile edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media;
use crate::validation::ValidationError;

/// The identity returned by `/auth/check`, `/auth/signup`, `/auth/login`
/// and `/auth/update-profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    /// Avatar reference (remote URL or data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    /// Avatar reference, ignoring the empty string some backends store.
    pub fn avatar(&self) -> Option<&str> {
        self.profile_pic.as_deref().filter(|pic| !pic.is_empty())
    }

    /// Name to show for the signed-in user.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            "User"
        } else {
            &self.full_name
        }
    }
}

/// Partial profile edit sent to `PUT /auth/update-profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl ProfileUpdate {
    /// An update that only replaces the avatar.
    pub fn avatar(image: impl Into<String>) -> Self {
        Self {
            profile_pic: Some(image.into()),
            full_name: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.profile_pic.is_none() && self.full_name.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyProfileUpdate);
        }
        if let Some(name) = &self.full_name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingFields);
            }
        }
        if let Some(image) = &self.profile_pic {
            media::validate_image(image)?;
        }
        Ok(())
    }
}
