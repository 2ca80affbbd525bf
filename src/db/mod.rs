//! Database layer (Firestore, or in-memory for tests and local runs).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::WrappedRecord;

/// Collection names as constants.
pub mod collections {
    /// Wrapped records (keyed by wrapped id)
    pub const WRAPPED: &str = "wrapped";
}

/// Wrapped record store, dispatching to the configured backend.
#[derive(Clone)]
pub enum WrappedDb {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
}

impl WrappedDb {
    /// Connect to Firestore for `project_id`.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        Ok(Self::Firestore(FirestoreStore::new(project_id).await?))
    }

    /// Empty in-memory store.
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Get a wrapped record by id.
    pub async fn get_wrapped(&self, id: &str) -> Result<Option<WrappedRecord>, AppError> {
        match self {
            Self::Firestore(store) => store.get_wrapped(id).await,
            Self::Memory(store) => Ok(store.get_wrapped(id)),
        }
    }

    /// Create or replace a wrapped record and return what was stored.
    ///
    /// An existing record keeps its `created_at`; everything else is
    /// overwritten.
    pub async fn upsert_wrapped(&self, record: &WrappedRecord) -> Result<WrappedRecord, AppError> {
        let stored = match self {
            Self::Firestore(store) => store.upsert_wrapped(record).await?,
            Self::Memory(store) => store.upsert_wrapped(record),
        };

        tracing::debug!(
            id = %stored.id,
            user_id = stored.user_id,
            year = stored.year,
            "Stored wrapped"
        );

        Ok(stored)
    }
}
