use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{require_key, Service};
use crate::contract::model::{NewUser, UserAggregate};
use crate::domain::error::DomainError;

impl Service {
    #[instrument(
        name = "user_places.service.create_user",
        skip(self),
        fields(user_id = %new_user.id)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<Uuid, DomainError> {
        self.create_user_at(new_user, Utc::now()).await
    }

    /// Create a user keeping the supplied creation time. Used when the
    /// identity provider already knows when the account came to be.
    #[instrument(
        name = "user_places.service.create_user_at",
        skip(self),
        fields(user_id = %new_user.id)
    )]
    pub async fn create_user_at(
        &self,
        new_user: NewUser,
        created_on: DateTime<Utc>,
    ) -> Result<Uuid, DomainError> {
        info!("Creating new user");
        require_key("id", &new_user.id)?;

        if self
            .call_store("find", self.store.find(&new_user.id))
            .await?
            .is_some()
        {
            return Err(DomainError::user_already_exists(new_user.id));
        }

        let user = UserAggregate::empty(new_user.id, created_on);
        // The unique index still guards a create that raced past the check above.
        let handle = self
            .call_store("create", self.store.create(&user))
            .await?
            .ok_or_else(|| DomainError::user_already_exists(user.id.clone()))?;

        info!(document_id = %handle.document_id, "Successfully created user");
        Ok(handle.document_id)
    }

    #[instrument(name = "user_places.service.get_user", skip(self))]
    pub async fn get_user(&self, user_id: &str) -> Result<UserAggregate, DomainError> {
        debug!("Getting user by id");
        let (user, _) = self.load(user_id).await?;
        debug!("Successfully retrieved user");
        Ok(user)
    }

    #[instrument(name = "user_places.service.delete_user", skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> Result<(), DomainError> {
        info!("Deleting user");

        let (_, handle) = self.load(user_id).await?;
        let deleted = self
            .call_store("delete", self.store.delete(&handle))
            .await?;

        if !deleted {
            return Err(DomainError::user_not_found(user_id));
        }

        info!("Successfully deleted user");
        Ok(())
    }
}
