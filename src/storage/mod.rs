//! Storage layer for the persisted shelf.
//!
//! Durable storage is a plain string key-value store, the same shape as
//! browser local storage. The shelf itself is a JSON array under one key.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: JSON file backend with atomic writes
//! - `memory`: in-memory backend
//! - `list_store`: [`BookStore`], the Persistent List Store

pub mod backend;
pub mod json;
pub mod list_store;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonFileStorage;
pub use list_store::{BookStore, SubscriptionId, STORAGE_KEY};
pub use memory::MemoryStorage;
