pub mod loader;
pub mod memory;
pub mod sqlite;

pub use loader::open_source;
pub use memory::MemorySource;
pub use sqlite::{SqliteSource, TableSchema};
