pub mod errors;
pub mod options;
pub mod record;
pub mod services;

pub use errors::{SlugError, SlugResult};
pub use options::{SlugOptions, SlugSource};
pub use record::{RecordId, RecordStore, SluggableRecord};
pub use services::SlugService;
