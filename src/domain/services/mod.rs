// src/domain/services/mod.rs
use std::sync::Arc;

use tracing::debug;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::SlugResult;
use crate::domain::options::{SlugOptions, SlugSource};
use crate::domain::record::{RecordStore, SluggableRecord};

/// Domain service responsible for deriving slugs and keeping them unique
/// across create/update lifecycle events.
///
/// Uniqueness resolution fetches the existing slugs once and searches for a
/// free suffix in memory; it never requeries per attempt. Two concurrent
/// writers deriving from the same text can therefore observe the same
/// snapshot and compute the same slug. Collaborators that cannot tolerate
/// that should back the target field with a unique constraint and retry the
/// whole cycle on violation.
pub struct SlugService {
    store: Arc<dyn RecordStore>,
    generator: Arc<dyn SlugGenerator>,
}

impl SlugService {
    pub fn new(store: Arc<dyn RecordStore>, generator: Arc<dyn SlugGenerator>) -> Self {
        Self { store, generator }
    }

    /// Lifecycle entry point. Collaborators call this from their
    /// before-create and before-update hooks, before the persistence write.
    pub async fn before_persist(
        &self,
        record: &mut dyn SluggableRecord,
        options: &SlugOptions,
        is_new: bool,
    ) -> SlugResult<()> {
        if is_new {
            self.generate_on_create(record, options).await
        } else {
            self.generate_on_update(record, options).await
        }
    }

    pub async fn generate_on_create(
        &self,
        record: &mut dyn SluggableRecord,
        options: &SlugOptions,
    ) -> SlugResult<()> {
        options.validate()?;
        if !options.generate_on_create {
            return Ok(());
        }
        self.assign(record, options).await
    }

    /// Update path. Regenerates when a source field is dirty (a computed
    /// source is always treated as changed, since its inputs cannot be
    /// inspected); otherwise keeps the current slug as long as no other
    /// record holds it.
    pub async fn generate_on_update(
        &self,
        record: &mut dyn SluggableRecord,
        options: &SlugOptions,
    ) -> SlugResult<()> {
        options.validate()?;
        if !options.generate_on_update {
            return Ok(());
        }

        if source_changed(record, options) {
            debug!(target = %options.target_field, "slug source changed, regenerating");
            return self.assign(record, options).await;
        }

        if self.current_slug_is_valid(record, options).await? {
            return Ok(());
        }
        debug!(target = %options.target_field, "current slug collides, regenerating");
        self.assign(record, options).await
    }

    /// On-demand regeneration, ignoring lifecycle flags and dirty state.
    pub async fn force_generate(
        &self,
        record: &mut dyn SluggableRecord,
        options: &SlugOptions,
    ) -> SlugResult<()> {
        options.validate()?;
        self.assign(record, options).await
    }

    /// Derives the canonical, not-yet-unique slug: read the source (computed
    /// function, or field values joined with the separator; missing fields
    /// read as empty), truncate the raw text to `max_length` characters, then
    /// canonicalize.
    pub fn derive(
        &self,
        record: &dyn SluggableRecord,
        options: &SlugOptions,
    ) -> SlugResult<String> {
        options.validate()?;
        let raw = match &options.source {
            SlugSource::Computed(compute) => compute(record),
            SlugSource::Fields(fields) => fields
                .iter()
                .map(|field| record.read_field(field).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(&options.separator),
        };
        let raw: String = match options.max_length {
            Some(limit) => raw.chars().take(limit).collect(),
            None => raw,
        };
        Ok(self.generator.slugify(&raw, &options.separator))
    }

    /// Resolves `candidate` against the backing collection. Fetches every
    /// existing slug sharing the candidate as prefix (soft-deleted rows
    /// included when the store supports them) in a single query; if any
    /// exist, appends `separator` + the first counter value absent from that
    /// snapshot.
    pub async fn make_unique(&self, candidate: &str, options: &SlugOptions) -> SlugResult<String> {
        let existing = self
            .store
            .slugs_with_prefix(
                &options.target_field,
                candidate,
                self.store.supports_soft_delete(),
            )
            .await?;

        if existing.is_empty() {
            return Ok(candidate.to_string());
        }

        let mut counter: u64 = 1;
        loop {
            let attempt = format!("{candidate}{}{counter}", options.separator);
            if !existing.iter().any(|slug| slug == &attempt) {
                return Ok(attempt);
            }
            counter += 1;
        }
    }

    async fn assign(
        &self,
        record: &mut dyn SluggableRecord,
        options: &SlugOptions,
    ) -> SlugResult<()> {
        let mut slug = self.derive(record, options)?;
        if options.enforce_uniqueness {
            slug = self.make_unique(&slug, options).await?;
        }
        record.write_field(&options.target_field, slug);
        Ok(())
    }

    /// Revalidation compares the current slug against exact matches only,
    /// while regeneration compares against prefix matches. The asymmetry is
    /// intentional; a record keeps `foo` even when `foo-bar` exists.
    async fn current_slug_is_valid(
        &self,
        record: &dyn SluggableRecord,
        options: &SlugOptions,
    ) -> SlugResult<bool> {
        // No identity means no way to exclude this record from the query;
        // treat the slug as stale.
        let Some(id) = record.identity() else {
            return Ok(false);
        };
        let current = record.read_field(&options.target_field).unwrap_or_default();
        let taken = self
            .store
            .slug_taken_by_other(&options.target_field, &current, Some(id))
            .await?;
        Ok(!taken)
    }
}

fn source_changed(record: &dyn SluggableRecord, options: &SlugOptions) -> bool {
    match &options.source {
        SlugSource::Computed(_) => true,
        SlugSource::Fields(fields) => fields.iter().any(|field| record.is_dirty(field)),
    }
}
