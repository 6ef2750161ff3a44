//! SeaORM-backed document store implementing the domain port.
//!
//! This struct is generic over `C: ConnectionTrait`, so you can construct it
//! with a `DatabaseConnection` **or** a transactional connection.
//! Each user aggregate lives in one row as serialized JSON; `version` is
//! bumped on every write and checked against the caller's handle.

use anyhow::Context;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::contract::model::UserAggregate;
use crate::domain::repo::{AggregateStore, WriteHandle};
use crate::infra::storage::entity::{ActiveModel as DocumentAM, Column, Entity as DocumentEntity};

/// SeaORM store impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmAggregateStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmAggregateStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> AggregateStore for SeaOrmAggregateStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find(&self, user_id: &str) -> anyhow::Result<Option<(UserAggregate, WriteHandle)>> {
        let found = DocumentEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .one(&self.conn)
            .await
            .context("find failed")?;

        let Some(row) = found else {
            return Ok(None);
        };
        let user: UserAggregate = serde_json::from_str(&row.body)
            .with_context(|| format!("corrupt user document {}", row.id))?;
        Ok(Some((
            user,
            WriteHandle {
                document_id: row.id,
                version: row.version,
            },
        )))
    }

    async fn create(&self, user: &UserAggregate) -> anyhow::Result<Option<WriteHandle>> {
        let now = Utc::now();
        let handle = WriteHandle {
            document_id: Uuid::new_v4(),
            version: 1,
        };
        let m = DocumentAM {
            id: Set(handle.document_id),
            user_id: Set(user.id.clone()),
            version: Set(handle.version),
            body: Set(serde_json::to_string(user).context("encode user document")?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match m.insert(&self.conn).await {
            Ok(_) => Ok(Some(handle)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(None),
            Err(e) => Err(e).context("create failed"),
        }
    }

    async fn write(
        &self,
        handle: &WriteHandle,
        user: &UserAggregate,
    ) -> anyhow::Result<Option<WriteHandle>> {
        let next = handle.version + 1;
        let body = serde_json::to_string(user).context("encode user document")?;

        // Conditional on the version read: a concurrent writer makes this a no-op.
        let res = DocumentEntity::update_many()
            .col_expr(Column::Body, Expr::value(body))
            .col_expr(Column::Version, Expr::value(next))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(handle.document_id))
            .filter(Column::Version.eq(handle.version))
            .exec(&self.conn)
            .await
            .context("write failed")?;

        if res.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(WriteHandle {
            document_id: handle.document_id,
            version: next,
        }))
    }

    async fn delete(&self, handle: &WriteHandle) -> anyhow::Result<bool> {
        let res = DocumentEntity::delete_by_id(handle.document_id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}
