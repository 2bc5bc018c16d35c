//! In-memory content store

use crate::state::{Page, PageIdentity};
use crate::storage::Storage;
use std::collections::HashMap;

/// HashMap-backed content store
///
/// Keeps a running count of pending entries so `has_pending` does not need
/// to scan the map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    pages: HashMap<PageIdentity, Page>,
    pending: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn contains(&self, id: &PageIdentity) -> bool {
        self.pages.contains_key(id)
    }

    fn save(&mut self, page: Page) {
        let now_pending = page.state.is_pending();
        let was_pending = self
            .pages
            .insert(page.id().clone(), page)
            .map(|previous| previous.state.is_pending());

        match (was_pending, now_pending) {
            (None | Some(false), true) => self.pending += 1,
            (Some(true), false) => self.pending -= 1,
            _ => {}
        }
    }

    fn get(&self, id: &PageIdentity) -> Option<&Page> {
        self.pages.get(id)
    }

    fn has_pending(&self) -> bool {
        self.pending > 0
    }

    fn pending_count(&self) -> usize {
        self.pending
    }

    fn len(&self) -> usize {
        self.pages.len()
    }

    fn all_pages(&self) -> Vec<Page> {
        self.pages.values().cloned().collect()
    }
}
