pub mod memory;
pub mod util;

pub use memory::{InMemoryRecordStore, MemoryRecord};
pub use util::DefaultSlugGenerator;
