use async_trait::async_trait;

use crate::StorageResult;

/// One page of a prefix listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Keys on this page, in listing order
    pub keys: Vec<String>,
    /// Cursor for the next page; `None` once the listing is exhausted
    pub next_continuation_token: Option<String>,
}

impl ListPage {
    /// Whether another page follows this one
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_continuation_token.is_some()
    }
}

/// Object store operations scoped to one bucket
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists one page of keys under `prefix`, resuming from `continuation_token`
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the listing fails
    async fn list_page(
        &self,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> StorageResult<ListPage>;

    /// Deletes every key in `keys` with a single batch request
    ///
    /// Keys that do not exist are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::BatchDeleteFailed` if any key could not be deleted
    async fn delete_batch(&self, keys: &[String]) -> StorageResult<()>;

    /// Checks whether `key` exists
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` for failures other than "not found"
    async fn object_exists(&self, key: &str) -> StorageResult<bool>;

    /// Reads the full body of `key`
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the object is missing or unreadable
    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>>;
}
