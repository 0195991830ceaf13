//! Slug derivation and uniqueness reconciliation for persisted records.
//!
//! A collaborator (an ORM layer, a repository, a hand-rolled store) calls
//! [`SlugService::before_persist`] from its before-create and before-update
//! hooks. The service derives a canonical slug from the record's source
//! fields, decides whether an update actually requires regeneration, and
//! resolves collisions against the backing collection exposed through the
//! [`RecordStore`] trait. The service never persists anything itself.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::errors::{SlugError, SlugResult};
pub use domain::options::{SlugOptions, SlugSource};
pub use domain::record::{RecordId, RecordStore, SluggableRecord};
pub use domain::services::SlugService;
pub use infrastructure::memory::{InMemoryRecordStore, MemoryRecord};
pub use infrastructure::util::DefaultSlugGenerator;
