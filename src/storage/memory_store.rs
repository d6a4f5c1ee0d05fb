use crate::error::StorageResult;
use crate::models::AddressBook;
use crate::storage::traits::BookStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory book store.
///
/// Keeps the last saved book as serialized JSON, so a load goes through the
/// same encoding as [`FileStore`](super::FileStore). Clones share state,
/// which lets a test keep a handle after giving the store to a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<Mutex<Option<Vec<u8>>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `book`.
    pub fn with_book(book: &AddressBook) -> StorageResult<Self> {
        let store = Self::new();
        *store.lock() = Some(serde_json::to_vec(book)?);
        Ok(store)
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn load(&self) -> StorageResult<AddressBook> {
        match self.lock().as_deref() {
            Some(bytes) => Ok(serde_json::from_slice(bytes)?),
            None => Ok(AddressBook::new()),
        }
    }

    async fn save(&self, book: &AddressBook) -> StorageResult<()> {
        let bytes = serde_json::to_vec(book)?;
        *self.lock() = Some(bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    #[tokio::test]
    async fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let mut book = AddressBook::new();
        book.add(Record::new("Ann").unwrap());

        store.save(&book).await.unwrap();
        assert_eq!(store.load().await.unwrap(), book);
        assert_eq!(store.save_count(), 1);
    }
}
