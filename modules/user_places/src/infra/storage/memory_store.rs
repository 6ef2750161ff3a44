//! Process-local document store.
//!
//! Documents are kept serialized, so what comes back from `find` went
//! through the same JSON round trip as with a database-backed store.

use anyhow::Context;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::contract::model::UserAggregate;
use crate::domain::repo::{AggregateStore, WriteHandle};

#[derive(Debug, Clone)]
struct StoredDocument {
    document_id: Uuid,
    version: i64,
    body: serde_json::Value,
}

/// Logical id → document. The map key doubles as the uniqueness guard.
#[derive(Debug, Default)]
pub struct InMemoryAggregateStore {
    docs: DashMap<String, StoredDocument>,
}

impl InMemoryAggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait::async_trait]
impl AggregateStore for InMemoryAggregateStore {
    async fn find(&self, user_id: &str) -> anyhow::Result<Option<(UserAggregate, WriteHandle)>> {
        let Some(doc) = self.docs.get(user_id).map(|d| d.clone()) else {
            return Ok(None);
        };
        let user: UserAggregate = serde_json::from_value(doc.body)
            .with_context(|| format!("corrupt user document {}", doc.document_id))?;
        Ok(Some((
            user,
            WriteHandle {
                document_id: doc.document_id,
                version: doc.version,
            },
        )))
    }

    async fn create(&self, user: &UserAggregate) -> anyhow::Result<Option<WriteHandle>> {
        let body = serde_json::to_value(user).context("encode user document")?;
        match self.docs.entry(user.id.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let handle = WriteHandle {
                    document_id: Uuid::new_v4(),
                    version: 1,
                };
                slot.insert(StoredDocument {
                    document_id: handle.document_id,
                    version: handle.version,
                    body,
                });
                Ok(Some(handle))
            }
        }
    }

    async fn write(
        &self,
        handle: &WriteHandle,
        user: &UserAggregate,
    ) -> anyhow::Result<Option<WriteHandle>> {
        let body = serde_json::to_value(user).context("encode user document")?;
        let Some(mut doc) = self.docs.get_mut(&user.id) else {
            return Ok(None);
        };
        if doc.document_id != handle.document_id || doc.version != handle.version {
            return Ok(None);
        }
        doc.version += 1;
        doc.body = body;
        Ok(Some(WriteHandle {
            document_id: doc.document_id,
            version: doc.version,
        }))
    }

    async fn delete(&self, handle: &WriteHandle) -> anyhow::Result<bool> {
        let mut removed = false;
        self.docs.retain(|_, doc| {
            let hit = doc.document_id == handle.document_id;
            removed |= hit;
            !hit
        });
        Ok(removed)
    }
}
