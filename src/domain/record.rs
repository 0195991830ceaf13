// src/domain/record.rs
use async_trait::async_trait;

use crate::domain::errors::SlugResult;

/// Primary identity of a persisted record. Unsaved records have none yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(pub i64);

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Field-level access the slug service needs from a record. The service
/// never constructs records; it reads source fields and writes the target
/// field, nothing else.
pub trait SluggableRecord {
    fn identity(&self) -> Option<RecordId>;

    /// Current value of a named field; `None` for missing or null fields,
    /// which derivation treats as the empty string.
    fn read_field(&self, name: &str) -> Option<String>;

    fn write_field(&mut self, name: &str, value: String);

    /// Whether the field changed since the record was loaded. Only
    /// meaningful mid-update, before the persistence write.
    fn is_dirty(&self, name: &str) -> bool;
}

/// Query surface of the backing collection, scoped to one record type.
/// Implementations answer from storage; the service issues at most one
/// `slugs_with_prefix` call per uniqueness resolution.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All existing values of `field` starting with `prefix`, ordered
    /// ascending. Ignores default visibility filters; includes soft-deleted
    /// rows when `include_deleted` is set, so a reactivated record cannot
    /// collide with a live one.
    async fn slugs_with_prefix(
        &self,
        field: &str,
        prefix: &str,
        include_deleted: bool,
    ) -> SlugResult<Vec<String>>;

    /// Whether any record other than `exclude` holds exactly `value` in
    /// `field`. Honors default visibility (soft-deleted rows are not
    /// considered). Used for update-time revalidation only.
    async fn slug_taken_by_other(
        &self,
        field: &str,
        value: &str,
        exclude: Option<RecordId>,
    ) -> SlugResult<bool>;

    fn supports_soft_delete(&self) -> bool;
}
