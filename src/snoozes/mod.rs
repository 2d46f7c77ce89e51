//! Snoozed notification storage
//!
//! Summarized notifications are persisted with the time they should be
//! delivered again. The store is a trait so a document database can back it;
//! the in-memory implementation keeps the service usable without one.

pub mod handlers;
pub mod models;
pub mod store;

pub use handlers::{delete_snooze, list_snoozes, store_snooze, update_snooze, SnoozesState};
pub use models::{SnoozeListItem, SnoozeRecord, SnoozeStoreRequest, SnoozeUpdate};
pub use store::{InMemorySnoozeStore, SnoozeStore, SnoozeStoreConfig};
