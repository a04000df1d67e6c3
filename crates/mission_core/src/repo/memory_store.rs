//! In-process genre store.
//!
//! Holds the serialized document in memory and decodes it through the same
//! lenient decoder as the file store. Exposes a save counter and a failure
//! switch for service-level tests.

use crate::model::entity::Genre;
use crate::repo::decode::decode_document;
use crate::repo::genre_store::{
    empty_document, encode_document, GenreStore, StorageError, StorageResult,
};
use log::debug;
use std::cell::{Cell, RefCell};

const MEMORY_LOCATION: &str = "<memory>";

/// Genre store keeping its document in memory.
#[derive(Debug, Default)]
pub struct MemoryGenreStore {
    document: RefCell<Option<String>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemoryGenreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw JSON document, bypassing validation.
    pub fn with_document(document: impl Into<String>) -> Self {
        let store = Self::default();
        store.document.replace(Some(document.into()));
        store
    }

    /// Current raw document: the last successful save, the seeded document,
    /// or the empty document written by the first load. `None` until one of
    /// those happens.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Makes every subsequent save fail with `StorageError::Unavailable`.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl GenreStore for MemoryGenreStore {
    fn load_genres(&self) -> StorageResult<Vec<Genre>> {
        let mut document = self.document.borrow_mut();
        let text = match document.take() {
            Some(text) => text,
            None => empty_document()?,
        };
        let decoded = decode_document(&text, MEMORY_LOCATION);
        *document = Some(text);
        let decoded = decoded?;
        debug!(
            "event=store_load module=repo mode=memory status=ok genres={} dropped_entries={}",
            decoded.genres.len(),
            decoded.dropped
        );
        Ok(decoded.genres)
    }

    fn save_genres(&self, genres: &[Genre]) -> StorageResult<()> {
        if self.fail_saves.get() {
            return Err(StorageError::Unavailable(
                "memory store is configured to reject saves".to_string(),
            ));
        }
        let text = encode_document(genres)?;
        self.document.replace(Some(text));
        self.saves.set(self.saves.get() + 1);
        debug!(
            "event=store_save module=repo mode=memory status=ok genres={}",
            genres.len()
        );
        Ok(())
    }
}
