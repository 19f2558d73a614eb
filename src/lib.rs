//! js-i18n-publisher
//!
//! Exports server-side translation strings into a client-side dictionary
//! script so browser code can perform localized lookups without a server
//! round-trip. The artifact is cached on disk under a content-derived name
//! and registered, together with a static lookup runtime, for the page head.

pub mod cache_key;
pub mod config;
pub mod dictionary;
pub mod publish;
pub mod publisher;
pub mod source;

pub use config::PublisherSettings;
pub use publisher::DictionaryPublisher;
