//! Storage adapter for the external record store.
//!
//! The engine does not own persistence; it consumes member and
//! relationship records through the narrow trait contract in
//! [`traits`]. An in-memory implementation is provided for tests and
//! for running the engine over an already-fetched snapshot.

pub mod errors;
pub mod filters;
pub mod memory;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use filters::{MemberFilter, RelationshipFilter};
pub use memory::MemoryDirectoryStore;
pub use traits::{DirectoryStore, MemberStore, RelationshipStore};
