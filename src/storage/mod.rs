//! Storage module for configuration and workout persistence.

pub mod config;
pub mod database;
pub mod kv;
pub mod persistence;
pub mod schema;

pub use config::{AppConfig, ConfigError, FormSettings, MapSettings, StorageSettings};
pub use database::SqliteKvStore;
pub use kv::{KeyValueStore, MemoryKvStore, StorageError};
pub use persistence::{RecordError, WorkoutPersistence, WorkoutRecord, DEFAULT_KEY};
