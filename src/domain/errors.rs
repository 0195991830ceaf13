// src/domain/errors.rs
use thiserror::Error;

pub type SlugResult<T> = Result<T, SlugError>;

#[derive(Debug, Error)]
pub enum SlugError {
    /// Options misuse, e.g. an empty source-field list. Raised at first use
    /// rather than silently producing an empty slug.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A store query failed; the collaborator's error is surfaced unchanged.
    #[error("store error: {0}")]
    Store(String),
}
