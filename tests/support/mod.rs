use std::sync::Arc;

use sluggable::{
    DefaultSlugGenerator, InMemoryRecordStore, MemoryRecord, SlugOptions, SlugResult, SlugService,
};

/// Wires a `SlugService` to an in-memory store and drives the lifecycle the
/// way a persistence collaborator would: hook first, then the storage write.
pub struct Harness {
    pub store: Arc<InMemoryRecordStore>,
    pub service: SlugService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(InMemoryRecordStore::new())
    }

    pub fn with_soft_delete() -> Self {
        Self::with_store(InMemoryRecordStore::with_soft_delete())
    }

    fn with_store(store: InMemoryRecordStore) -> Self {
        let store = Arc::new(store);
        let service = SlugService::new(store.clone(), Arc::new(DefaultSlugGenerator));
        Self { store, service }
    }

    pub async fn create(
        &self,
        mut record: MemoryRecord,
        options: &SlugOptions,
    ) -> SlugResult<MemoryRecord> {
        self.service.before_persist(&mut record, options, true).await?;
        self.store.save(record)
    }

    pub async fn create_named(&self, name: &str, options: &SlugOptions) -> SlugResult<MemoryRecord> {
        self.create(MemoryRecord::new().with_field("name", name), options)
            .await
    }

    pub async fn update(
        &self,
        mut record: MemoryRecord,
        options: &SlugOptions,
    ) -> SlugResult<MemoryRecord> {
        self.service.before_persist(&mut record, options, false).await?;
        self.store.save(record)
    }
}
