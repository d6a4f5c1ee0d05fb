use crate::error::StorageResult;
use crate::models::AddressBook;
use async_trait::async_trait;

/// Persistence for the whole address book.
///
/// The book is always loaded and saved as one aggregate, enabling different
/// implementations (JSON file, in-memory for tests).
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Load the stored book. A store with nothing saved yet yields an empty book.
    async fn load(&self) -> StorageResult<AddressBook>;

    /// Replace the stored book with `book`.
    async fn save(&self, book: &AddressBook) -> StorageResult<()>;
}
