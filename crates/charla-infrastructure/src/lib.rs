//! Durable-store access and configuration loading.
//!
//! The history store and analytics sink are backed by a document-table
//! REST service; in-memory implementations cover offline mode and tests.

mod config_loader;
mod memory_store;
mod table_analytics_sink;
mod table_api;
mod table_history_store;

pub use config_loader::load_config;
pub use memory_store::{InMemoryAnalyticsSink, InMemoryHistoryStore};
pub use table_analytics_sink::TableAnalyticsSink;
pub use table_api::TableApiClient;
pub use table_history_store::TableHistoryStore;
