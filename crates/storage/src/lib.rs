//! Storage layer for CodingPT
//!
//! This crate provides the injected key-value store used for session
//! continuity, plus typed views over the keys the app persists.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod kv;
pub mod lessons;
pub mod settings;

pub use auth::{AuthStorage, CredentialPair};
pub use kv::{KeyValueStore, KvConfig, KvError, MemoryStore, SledStore};
pub use lessons::LessonStorage;
pub use settings::{Settings, SettingsStorage};
