use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::UserAggregate;

/// Reference to one stored document as it was read.
///
/// Carries the physical id so a later write targets the same record, and
/// the version observed so the write can be rejected if the record moved
/// on in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriteHandle {
    pub document_id: Uuid,
    pub version: i64,
}

/// Port for the domain layer: the one-document-per-user store.
/// Object-safe and async-friendly via `async_trait`.
///
/// Every method replaces or reads whole aggregates; there are no
/// partial-field updates.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// Load the aggregate whose logical id is `user_id`.
    ///
    /// If several records match, the oldest one wins.
    async fn find(&self, user_id: &str) -> anyhow::Result<Option<(UserAggregate, WriteHandle)>>;

    /// Insert a new document. Returns `None` if a document with the same
    /// logical id already exists.
    async fn create(&self, user: &UserAggregate) -> anyhow::Result<Option<WriteHandle>>;

    /// Replace the document behind `handle` with `user`.
    ///
    /// Returns the handle for the new version, or `None` when `handle` is
    /// stale (document deleted or written by someone else since the read).
    async fn write(
        &self,
        handle: &WriteHandle,
        user: &UserAggregate,
    ) -> anyhow::Result<Option<WriteHandle>>;

    /// Delete the document behind `handle`. Returns true if a row was deleted.
    async fn delete(&self, handle: &WriteHandle) -> anyhow::Result<bool>;
}
