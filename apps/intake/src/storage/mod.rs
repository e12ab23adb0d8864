// Anonymization and durable storage for finished intake sessions.

pub mod anonymize;
pub mod store;

pub use store::{RecordStore, StoreError};
