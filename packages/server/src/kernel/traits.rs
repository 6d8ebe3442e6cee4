// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Filter selection and validation live in domains/records; stores just execute.
//
// Naming convention: Base* for trait names (e.g., BaseRecordStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{PageRequest, RecordId};
use crate::domains::records::models::{Record, RecordFilter};
use crate::domains::records::validation::ValidRecord;

// =============================================================================
// Record Store Trait (Infrastructure - durable storage of records)
// =============================================================================

#[async_trait]
pub trait BaseRecordStore: Send + Sync {
    /// Persist a new record; the store assigns the id.
    async fn insert(&self, fields: &ValidRecord) -> Result<Record>;

    /// Fetch a record by id.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>>;

    /// Fetch one page of records matching `filter`, plus the total match count.
    async fn find_page(
        &self,
        filter: &RecordFilter,
        request: &PageRequest,
    ) -> Result<(Vec<Record>, i64)>;

    /// Overwrite all mutable fields of an existing record.
    /// Returns `None` if the id is no longer present.
    async fn update(&self, record: &Record) -> Result<Option<Record>>;

    /// Delete by id. Returns whether a record was removed.
    async fn delete(&self, id: RecordId) -> Result<bool>;

    /// Verify the store is reachable (health check).
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
