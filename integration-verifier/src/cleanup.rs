use tracing::{debug, info};
use upload_storage::{ObjectStore, StorageResult};

use crate::{VerifierError, VerifierResult};

/// Totals from clearing a prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    /// Listing pages visited
    pub pages: usize,
    /// Keys submitted for deletion
    pub deleted: usize,
}

/// Pages through a prefix deleting one listing page at a time
///
/// The cursor only advances once a page has been deleted, so a failed batch
/// can be retried from [`Self::cursor`] with [`Self::resume`].
pub struct DeleteBatches<'a> {
    store: &'a dyn ObjectStore,
    prefix: &'a str,
    cursor: Option<String>,
    exhausted: bool,
}

impl<'a> DeleteBatches<'a> {
    /// Starts at the beginning of `prefix`
    #[must_use]
    pub const fn new(store: &'a dyn ObjectStore, prefix: &'a str) -> Self {
        Self {
            store,
            prefix,
            cursor: None,
            exhausted: false,
        }
    }

    /// Resumes after a previously observed cursor
    #[must_use]
    pub const fn resume(
        store: &'a dyn ObjectStore,
        prefix: &'a str,
        cursor: Option<String>,
    ) -> Self {
        Self {
            store,
            prefix,
            cursor,
            exhausted: false,
        }
    }

    /// Continuation token of the next page to list
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Whether the last page has been deleted
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Lists and deletes the next page
    ///
    /// Returns `None` once the listing is exhausted, otherwise the number of
    /// keys deleted from this page.
    ///
    /// # Errors
    ///
    /// Returns the listing or delete failure; the cursor is left unchanged
    pub async fn next_batch(&mut self) -> StorageResult<Option<usize>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self.store.list_page(self.prefix, self.cursor.clone()).await?;
        self.store.delete_batch(&page.keys).await?;

        debug!(
            prefix = %self.prefix,
            deleted = page.keys.len(),
            more = page.has_more(),
            "Deleted listing page"
        );

        self.exhausted = !page.has_more();
        self.cursor = page.next_continuation_token;
        Ok(Some(page.keys.len()))
    }
}

/// Deletes every object under `prefix`
///
/// Objects outside the prefix are never listed and so never touched. An
/// empty prefix is a no-op success.
///
/// # Errors
///
/// Returns `VerifierError::Cleanup` on the first listing or delete failure
pub async fn clear_prefix(
    store: &dyn ObjectStore,
    prefix: &str,
) -> VerifierResult<CleanupSummary> {
    let mut batches = DeleteBatches::new(store, prefix);
    let mut summary = CleanupSummary::default();

    while let Some(deleted) = batches.next_batch().await.map_err(VerifierError::Cleanup)? {
        summary.pages += 1;
        summary.deleted += deleted;
    }

    info!(
        prefix = %prefix,
        pages = summary.pages,
        deleted = summary.deleted,
        "Cleared upload prefix"
    );
    Ok(summary)
}
