// Adapters layer: concrete implementations of the domain ports.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::domain::ports::PollStore;
use crate::utils::error::{PollError, Result};
use std::sync::Arc;

/// Opens the store named by a `database.url` setting: `memory` or a `sqlite:` URL.
pub async fn open_store(url: &str, max_connections: u32) -> Result<Arc<dyn PollStore>> {
    if url == "memory" {
        tracing::info!("Using in-memory poll store; data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    tracing::info!("Opening SQLite poll store: {}", url);
    Ok(Arc::new(SqliteStore::connect(url, max_connections).await?))
}

/// A choice whose counter already holds `u32::MAX` votes cannot take another one.
pub(crate) fn vote_limit_reached(choice_id: i64) -> PollError {
    PollError::StorageMessage {
        message: format!("choice {} has reached the maximum vote count", choice_id),
    }
}
