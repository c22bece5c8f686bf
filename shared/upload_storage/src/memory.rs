use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{ListPage, ObjectStore, StorageError, StorageResult};

/// Keys returned per page unless a test asks for another size
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// `ObjectStore` over a sorted in-memory map, paging like `ListObjectsV2`
///
/// The continuation token is the last key of the previous page.
#[derive(Debug)]
pub struct InMemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    page_size: usize,
    list_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl InMemoryObjectStore {
    /// Creates an empty store returning at most `page_size` keys per listing
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            page_size: page_size.max(1),
            list_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Writes `body` at `key`, replacing any previous object
    pub fn put(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.lock().insert(key.into(), body.into());
    }

    /// All keys currently stored
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Number of stored objects
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no objects
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// How many listing pages have been served
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// How many non-empty batch deletes have been executed
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list_page(
        &self,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> StorageResult<ListPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let objects = self.lock();
        let mut matching = objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .filter(|key| {
                continuation_token
                    .as_deref()
                    .is_none_or(|after| key.as_str() > after)
            });

        let keys: Vec<String> = matching.by_ref().take(self.page_size).cloned().collect();
        let next_continuation_token = if matching.next().is_some() {
            keys.last().cloned()
        } else {
            None
        };

        Ok(ListPage {
            keys,
            next_continuation_token,
        })
    }

    async fn delete_batch(&self, keys: &[String]) -> StorageResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        let mut objects = self.lock();
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    async fn object_exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.lock().contains_key(key))
    }

    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::S3Error(format!("NoSuchKey: {key}")))
    }
}
