//! Storage trait
//!
//! This module defines the interface of the content store: a
//! content-addressed map from page identity to page record.

use crate::state::{Page, PageIdentity};

/// Trait for content store implementations
///
/// Entries are keyed by [`PageIdentity`] and are never removed. The crawl
/// pipeline writes to a store from a single task only, so implementations
/// need no internal locking.
pub trait Storage {
    /// Returns true if an entry exists for the identity, in any state
    fn contains(&self, id: &PageIdentity) -> bool;

    /// Inserts the page, or overwrites the existing entry with its identity
    fn save(&mut self, page: Page);

    /// Looks up a single page
    fn get(&self, id: &PageIdentity) -> Option<&Page>;

    /// Returns true if any entry is still pending
    fn has_pending(&self) -> bool;

    /// Number of entries still pending
    fn pending_count(&self) -> usize;

    /// Total number of entries
    fn len(&self) -> usize;

    /// Returns true if the store has no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every entry
    fn all_pages(&self) -> Vec<Page>;
}
