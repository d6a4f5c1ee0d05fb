use assistant_x::error::{StorageError, StorageResult};
use assistant_x::{AddressBook, BookStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock book store for testing.
///
/// Keeps the last saved book in memory, counts calls per method and can be
/// switched into a failing mode to exercise error paths.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockBookStore {
    book: Arc<Mutex<Option<AddressBook>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_loads: Arc<AtomicBool>,
    fail_saves: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockBookStore {
    /// Create a new empty MockBookStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `book`.
    pub fn with_book(book: AddressBook) -> Self {
        let store = Self::new();
        *store.book.lock().unwrap() = Some(book);
        store
    }

    /// Make every following load fail with an I/O error.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make every following save fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The last successfully saved book.
    pub fn saved(&self) -> Option<AddressBook> {
        self.book.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn failure() -> StorageError {
        StorageError::Io(io::Error::new(io::ErrorKind::Other, "disk unavailable"))
    }
}

#[async_trait]
impl BookStore for MockBookStore {
    async fn load(&self) -> StorageResult<AddressBook> {
        self.track_call("load");
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        Ok(self.book.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save(&self, book: &AddressBook) -> StorageResult<()> {
        self.track_call("save");
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        *self.book.lock().unwrap() = Some(book.clone());
        Ok(())
    }
}
