//! Server dependencies (using traits for testability)
//!
//! This module provides the dependency container shared by all request handlers.
//! Storage is reached only through `BaseRecordStore` so tests can swap it out.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::common::{PageRequest, RecordId};
use crate::domains::records::models::{Record, RecordFilter};
use crate::domains::records::validation::ValidRecord;
use crate::domains::records::RecordService;
use crate::kernel::BaseRecordStore;

// =============================================================================
// PgRecordStore (implements BaseRecordStore over the `records` table)
// =============================================================================

/// Postgres-backed record store
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseRecordStore for PgRecordStore {
    async fn insert(&self, fields: &ValidRecord) -> Result<Record> {
        Record::create(fields, &self.pool).await
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>> {
        Record::find_by_id(id, &self.pool).await
    }

    async fn find_page(
        &self,
        filter: &RecordFilter,
        request: &PageRequest,
    ) -> Result<(Vec<Record>, i64)> {
        Record::find_page(filter, request, &self.pool).await
    }

    async fn update(&self, record: &Record) -> Result<Option<Record>> {
        record.update(&self.pool).await
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        Record::delete(id, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        Record::ping(&self.pool).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to request handlers
#[derive(Clone)]
pub struct ServerDeps {
    pub records: Arc<RecordService>,
}

impl ServerDeps {
    /// Wire the record service to a concrete store.
    pub fn new(store: Arc<dyn BaseRecordStore>) -> Self {
        Self {
            records: Arc::new(RecordService::new(store)),
        }
    }

    /// Production wiring over a Postgres pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PgRecordStore::new(pool)))
    }
}
