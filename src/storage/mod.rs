//! Storage module for crawl data
//!
//! The content store maps each page identity to its page record. It is the
//! single source of truth for whether a URL has been seen, and it answers
//! whether any discovered page is still pending.
//!
//! Storage is in-memory only and lives for the duration of one crawl.

mod memory;
mod traits;

pub use memory::MemoryStorage;
pub use traits::Storage;
