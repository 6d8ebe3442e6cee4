//! Record service.
//!
//! Owns the search-strategy decision and the validation boundary; everything
//! durable goes through the injected `BaseRecordStore`.

use std::sync::Arc;
use tracing::{debug, info};

use crate::common::{Page, PageRequest, RecordId};
use crate::domains::records::data::RecordInput;
use crate::domains::records::errors::RecordError;
use crate::domains::records::models::{Record, RecordFilter};
use crate::domains::records::validation::validate;
use crate::kernel::BaseRecordStore;

pub struct RecordService {
    store: Arc<dyn BaseRecordStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn BaseRecordStore>) -> Self {
        Self { store }
    }

    /// Search records by optional name/course filters.
    ///
    /// Blank filters are ignored; see `RecordFilter::from_params` for the
    /// strategy order.
    pub async fn search(
        &self,
        name: Option<&str>,
        course: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<Record>, RecordError> {
        let filter = RecordFilter::from_params(name, course);
        debug!(
            strategy = filter.strategy(),
            filter = %filter,
            page = request.page,
            size = request.size,
            "Searching records"
        );

        let (records, total) = self.store.find_page(&filter, request).await?;
        Ok(Page::new(records, total, request))
    }

    pub async fn create(&self, input: &RecordInput) -> Result<Record, RecordError> {
        let fields = validate(input).map_err(RecordError::Validation)?;
        let record = self.store.insert(&fields).await?;
        info!(record_id = %record.id, "Record created");
        Ok(record)
    }

    pub async fn get(&self, id: RecordId) -> Result<Record, RecordError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(RecordError::NotFound(id))
    }

    /// Replace every mutable field of an existing record.
    ///
    /// Validation runs before the lookup, so invalid input is rejected even
    /// for an unknown id.
    pub async fn update(&self, id: RecordId, input: &RecordInput) -> Result<Record, RecordError> {
        let fields = validate(input).map_err(RecordError::Validation)?;

        let mut record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(RecordError::NotFound(id))?;
        record.apply(fields);

        // The row may vanish between the read and the write
        let updated = self
            .store
            .update(&record)
            .await?
            .ok_or(RecordError::NotFound(id))?;
        info!(record_id = %id, "Record updated");
        Ok(updated)
    }

    /// Delete by id. Deleting an absent id is not an error.
    pub async fn delete(&self, id: RecordId) -> Result<(), RecordError> {
        if self.store.delete(id).await? {
            info!(record_id = %id, "Record deleted");
        } else {
            debug!(record_id = %id, "Delete requested for absent record");
        }
        Ok(())
    }

    /// Storage reachability, for the health endpoint.
    pub async fn ping(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }
}
