//! Client-side validation failures.
//!
//! These are raised before any network call is made. Their `Display` text is
//! the exact notification shown to the user.

use thiserror::Error;

use crate::media::MAX_IMAGE_BYTES;

/// Minimum password length accepted by signup and login forms.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Image size should be less than {}MB", .limit / (1024 * 1024))]
    ImageTooLarge { limit: usize },

    #[error("Only image files can be attached")]
    NotAnImage,

    #[error("Message must contain text or an image")]
    EmptyMessage,

    #[error("Nothing to update")]
    EmptyProfileUpdate,
}

impl ValidationError {
    pub fn password_too_short() -> Self {
        Self::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        }
    }

    pub fn image_too_large() -> Self {
        Self::ImageTooLarge {
            limit: MAX_IMAGE_BYTES,
        }
    }
}
