//! Infrastructure layer for Parley.
//!
//! Concrete adapters for the ports defined in `parley-core`: the reqwest
//! HTTP client, configuration loading, platform paths, the channel-backed
//! notifier and image file encoding.

pub mod config_service;
pub mod http_client;
pub mod media;
pub mod notifier;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http_client::ReqwestApiClient;
pub use crate::notifier::ChannelNotifier;
pub use crate::paths::ParleyPaths;
