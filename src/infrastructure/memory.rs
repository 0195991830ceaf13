// src/infrastructure/memory.rs
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::{SlugError, SlugResult};
use crate::domain::record::{RecordId, RecordStore, SluggableRecord};

/// A record held by [`InMemoryRecordStore`]. Field values are stringly
/// typed; dirty tracking compares the working values against the snapshot
/// taken when the record was loaded or last saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecord {
    id: Option<RecordId>,
    fields: HashMap<String, String>,
    loaded: HashMap<String, String>,
    deleted_at: Option<DateTime<Utc>>,
}

impl MemoryRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_clean(&mut self) {
        self.loaded = self.fields.clone();
    }
}

impl SluggableRecord for MemoryRecord {
    fn identity(&self) -> Option<RecordId> {
        self.id
    }

    fn read_field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn write_field(&mut self, name: &str, value: String) {
        self.fields.insert(name.to_string(), value);
    }

    fn is_dirty(&self, name: &str) -> bool {
        self.fields.get(name) != self.loaded.get(name)
    }
}

#[derive(Debug, Default)]
struct Rows {
    by_id: HashMap<i64, MemoryRecord>,
    next_id: i64,
}

/// Map-backed store for tests and small embedded use. One instance models
/// one record type's backing collection.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    rows: Mutex<Rows>,
    soft_delete: bool,
}

impl InMemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose record type opts into soft deletion.
    #[must_use]
    pub fn with_soft_delete() -> Self {
        Self {
            rows: Mutex::new(Rows::default()),
            soft_delete: true,
        }
    }

    /// Persists `record`, assigning an identity on first insert. Returns the
    /// stored copy with a fresh clean snapshot.
    pub fn save(&self, mut record: MemoryRecord) -> SlugResult<MemoryRecord> {
        let mut rows = self.lock()?;
        let id = match record.id {
            Some(id) => id.0,
            None => {
                rows.next_id += 1;
                let id = rows.next_id;
                record.id = Some(RecordId(id));
                id
            }
        };
        record.mark_clean();
        rows.by_id.insert(id, record.clone());
        Ok(record)
    }

    pub fn find(&self, id: RecordId) -> SlugResult<Option<MemoryRecord>> {
        let rows = self.lock()?;
        Ok(rows.by_id.get(&id.0).cloned())
    }

    /// Marks the record logically deleted; the row stays in the collection.
    pub fn soft_delete(&self, id: RecordId) -> SlugResult<()> {
        let mut rows = self.lock()?;
        let record = rows
            .by_id
            .get_mut(&id.0)
            .ok_or_else(|| SlugError::Store(format!("no record with id {}", id.0)))?;
        record.deleted_at = Some(Utc::now());
        Ok(())
    }

    fn lock(&self) -> SlugResult<std::sync::MutexGuard<'_, Rows>> {
        self.rows
            .lock()
            .map_err(|_| SlugError::Store("record store mutex poisoned".into()))
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn slugs_with_prefix(
        &self,
        field: &str,
        prefix: &str,
        include_deleted: bool,
    ) -> SlugResult<Vec<String>> {
        let rows = self.lock()?;
        let mut slugs: Vec<String> = rows
            .by_id
            .values()
            .filter(|record| include_deleted || record.deleted_at.is_none())
            .filter_map(|record| record.fields.get(field))
            .filter(|value| value.starts_with(prefix))
            .cloned()
            .collect();
        slugs.sort();
        Ok(slugs)
    }

    async fn slug_taken_by_other(
        &self,
        field: &str,
        value: &str,
        exclude: Option<RecordId>,
    ) -> SlugResult<bool> {
        let rows = self.lock()?;
        Ok(rows.by_id.values().any(|record| {
            record.deleted_at.is_none()
                && record.id != exclude
                && record.fields.get(field).is_some_and(|held| held == value)
        }))
    }

    fn supports_soft_delete(&self) -> bool {
        self.soft_delete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_assigns_identity_and_clean_snapshot() {
        let store = InMemoryRecordStore::new();
        let record = MemoryRecord::new().with_field("name", "first");
        assert!(record.is_dirty("name"));

        let saved = store.save(record).unwrap();
        assert_eq!(saved.identity(), Some(RecordId(1)));
        assert!(!saved.is_dirty("name"));

        let mut reloaded = store.find(RecordId(1)).unwrap().unwrap();
        assert!(!reloaded.is_dirty("name"));
        reloaded.set_field("name", "second");
        assert!(reloaded.is_dirty("name"));
    }

    #[tokio::test]
    async fn prefix_query_is_ordered_and_scoped() {
        let store = InMemoryRecordStore::new();
        for slug in ["post-2", "post", "post-10", "other"] {
            store
                .save(MemoryRecord::new().with_field("slug", slug))
                .unwrap();
        }

        let slugs = store.slugs_with_prefix("slug", "post", false).await.unwrap();
        assert_eq!(slugs, vec!["post", "post-10", "post-2"]);
    }

    #[tokio::test]
    async fn soft_deleted_rows_hide_from_default_visibility() {
        let store = InMemoryRecordStore::with_soft_delete();
        let saved = store
            .save(MemoryRecord::new().with_field("slug", "gone"))
            .unwrap();
        store.soft_delete(saved.identity().unwrap()).unwrap();

        let visible = store.slugs_with_prefix("slug", "gone", false).await.unwrap();
        assert!(visible.is_empty());

        let all = store.slugs_with_prefix("slug", "gone", true).await.unwrap();
        assert_eq!(all, vec!["gone"]);

        assert!(!store.slug_taken_by_other("slug", "gone", None).await.unwrap());
    }

    #[tokio::test]
    async fn exact_query_excludes_the_given_identity() {
        let store = InMemoryRecordStore::new();
        let saved = store
            .save(MemoryRecord::new().with_field("slug", "mine"))
            .unwrap();

        let id = saved.identity().unwrap();
        assert!(!store.slug_taken_by_other("slug", "mine", Some(id)).await.unwrap());
        assert!(store.slug_taken_by_other("slug", "mine", None).await.unwrap());
    }
}
