// TestDependencies - in-memory implementations for testing
//
// Provides a record store that can be injected into ServerDeps so handler and
// service tests run without a database.

use anyhow::Result;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::common::{PageRequest, RecordId, SortDirection, SortField};
use crate::domains::records::models::{Record, RecordFilter};
use crate::domains::records::validation::ValidRecord;
use crate::kernel::{BaseRecordStore, ServerDeps};

// =============================================================================
// In-memory Record Store
// =============================================================================

#[derive(Default)]
struct StoreState {
    rows: BTreeMap<RecordId, Record>,
    last_id: i64,
}

/// Record store backed by a `BTreeMap`. Ids are assigned sequentially from 1.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<Mutex<StoreState>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `message` (simulates an outage).
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<()> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BaseRecordStore for InMemoryRecordStore {
    async fn insert(&self, fields: &ValidRecord) -> Result<Record> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let record = Record::from_valid(RecordId::from_i64(state.last_id), fields.clone());
        state.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().rows.get(&id).cloned())
    }

    async fn find_page(
        &self,
        filter: &RecordFilter,
        request: &PageRequest,
    ) -> Result<(Vec<Record>, i64)> {
        self.check_available()?;
        let state = self.state.lock().unwrap();

        let mut matching: Vec<Record> = state
            .rows
            .values()
            .filter(|r| filter.matches(&r.name, &r.course))
            .cloned()
            .collect();
        matching.sort_by(|a, b| compare(a, b, request));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(&self, record: &Record) -> Result<Option<Record>> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        match state.rows.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}

fn compare(a: &Record, b: &Record, request: &PageRequest) -> Ordering {
    request
        .sort
        .keys()
        .iter()
        .fold(Ordering::Equal, |ordering, key| {
            ordering.then_with(|| {
                let by_field = match key.field {
                    SortField::Id => a.id.cmp(&b.id),
                    SortField::Name => a.name.cmp(&b.name),
                    SortField::Email => a.email.cmp(&b.email),
                    SortField::Course => a.course.cmp(&b.course),
                    SortField::Age => a.age.cmp(&b.age),
                };
                match key.direction {
                    SortDirection::Asc => by_field,
                    SortDirection::Desc => by_field.reverse(),
                }
            })
        })
        .then_with(|| a.id.cmp(&b.id))
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundles the in-memory store with the ServerDeps wired to it.
pub struct TestDependencies {
    pub store: InMemoryRecordStore,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: InMemoryRecordStore::new(),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(Arc::new(self.store.clone()))
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
