// src/domain/options.rs
use std::fmt;
use std::sync::Arc;

use crate::domain::errors::{SlugError, SlugResult};
use crate::domain::record::SluggableRecord;

/// A caller-supplied function that computes the raw slug input from the
/// record, used instead of reading source fields.
pub type ComputedSource = Arc<dyn Fn(&dyn SluggableRecord) -> String + Send + Sync>;

/// Where the raw slug text comes from: an ordered list of record fields
/// joined with the separator, or a computed function over the whole record.
#[derive(Clone)]
pub enum SlugSource {
    Fields(Vec<String>),
    Computed(ComputedSource),
}

impl fmt::Debug for SlugSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            Self::Computed(_) => f.debug_tuple("Computed").field(&"<fn>").finish(),
        }
    }
}

/// Options describing how a slug is derived and stored. Built once per save
/// operation and passed explicitly; never cached across saves.
#[derive(Debug, Clone)]
pub struct SlugOptions {
    pub source: SlugSource,
    pub target_field: String,
    pub enforce_uniqueness: bool,
    pub separator: String,
    /// Maximum number of characters kept from the raw joined source text,
    /// applied before canonicalization.
    pub max_length: Option<usize>,
    pub generate_on_create: bool,
    pub generate_on_update: bool,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SlugOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: SlugSource::Fields(vec!["name".to_string()]),
            target_field: "slug".to_string(),
            enforce_uniqueness: true,
            separator: "-".to_string(),
            max_length: None,
            generate_on_create: true,
            generate_on_update: true,
        }
    }

    #[must_use]
    pub fn with_source_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source = SlugSource::Fields(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_computed_source<F>(mut self, compute: F) -> Self
    where
        F: Fn(&dyn SluggableRecord) -> String + Send + Sync + 'static,
    {
        self.source = SlugSource::Computed(Arc::new(compute));
        self
    }

    #[must_use]
    pub fn with_target_field(mut self, field: impl Into<String>) -> Self {
        self.target_field = field.into();
        self
    }

    #[must_use]
    pub fn with_uniqueness(mut self, unique: bool) -> Self {
        self.enforce_uniqueness = unique;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub fn with_generate_on_create(mut self, enabled: bool) -> Self {
        self.generate_on_create = enabled;
        self
    }

    #[must_use]
    pub fn with_generate_on_update(mut self, enabled: bool) -> Self {
        self.generate_on_update = enabled;
        self
    }

    /// A `Fields` source must name at least one field; an empty list would
    /// otherwise degrade into a permanent empty slug.
    pub fn validate(&self) -> SlugResult<()> {
        match &self.source {
            SlugSource::Fields(fields) if fields.is_empty() => Err(SlugError::Configuration(
                "slug source fields cannot be empty".into(),
            )),
            _ => Ok(()),
        }
    }
}
