//! Address book persistence.
//!
//! The session saves the complete book after every mutating command and
//! loads it once on start-up.

mod file_store;
mod memory_store;
mod traits;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::BookStore;
