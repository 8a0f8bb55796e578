//! Contact domain module.

mod model;

pub use model::{
    Contact, DEMO_CONTACT_ID, DISPLAY_NAME_FALLBACK, NameField, UNKNOWN_CONTACT_NAME,
};
