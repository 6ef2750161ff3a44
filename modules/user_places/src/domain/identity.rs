use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::contract::model::{NewUser, SyncOutcome, WebhookHeaders};
use crate::domain::error::DomainError;
use crate::domain::events::{IdentityEvent, IdentityUser};
use crate::domain::ports::WebhookVerifier;
use crate::domain::service::Service;

/// Keeps user aggregates in step with the identity provider.
///
/// Every delivery may arrive more than once, so both transitions are
/// idempotent: a repeated `user.created` finds the aggregate present and a
/// repeated `user.deleted` finds it gone, and neither is an error.
#[derive(Clone)]
pub struct IdentitySync {
    service: Service,
    verifier: Arc<dyn WebhookVerifier>,
}

impl IdentitySync {
    pub fn new(service: Service, verifier: Arc<dyn WebhookVerifier>) -> Self {
        Self { service, verifier }
    }

    /// Verify, parse and apply one raw delivery.
    #[instrument(
        name = "user_places.identity.handle_delivery",
        skip(self, headers, body),
        fields(message_id = %headers.message_id)
    )]
    pub async fn handle_delivery(
        &self,
        headers: &WebhookHeaders,
        body: &[u8],
    ) -> Result<SyncOutcome, DomainError> {
        if let Err(e) = self.verifier.verify(headers, body) {
            warn!(error = %e, "Rejected identity webhook");
            return Err(e);
        }
        let event = IdentityEvent::parse(body)?;
        self.apply(event).await
    }

    /// Apply an event whose authenticity was already established.
    #[instrument(name = "user_places.identity.apply", skip(self))]
    pub async fn apply(&self, event: IdentityEvent) -> Result<SyncOutcome, DomainError> {
        match event {
            IdentityEvent::UserCreated(user) => self.on_user_created(user).await,
            IdentityEvent::UserDeleted { user_id } => self.on_user_deleted(user_id).await,
            IdentityEvent::Other { event_type } => {
                debug!(event_type = %event_type, "Ignoring identity event");
                Ok(SyncOutcome::Ignored { event_type })
            }
        }
    }

    async fn on_user_created(&self, user: IdentityUser) -> Result<SyncOutcome, DomainError> {
        let created_on = user.created_on().unwrap_or_else(Utc::now);
        let new_user = NewUser {
            id: user.id.clone(),
        };

        match self.service.create_user_at(new_user, created_on).await {
            Ok(document_id) => {
                info!(
                    user_id = %user.id,
                    email = user.primary_email().unwrap_or("<none>"),
                    "User provisioned from identity provider"
                );
                Ok(SyncOutcome::Created {
                    user_id: user.id,
                    document_id,
                })
            }
            Err(DomainError::UserAlreadyExists { user_id }) => {
                debug!(user_id = %user_id, "User already provisioned; redelivery");
                Ok(SyncOutcome::AlreadyPresent { user_id })
            }
            Err(e) => Err(e),
        }
    }

    async fn on_user_deleted(&self, user_id: String) -> Result<SyncOutcome, DomainError> {
        match self.service.delete_user(&user_id).await {
            Ok(()) => {
                info!(user_id = %user_id, "User removed after identity deletion");
                Ok(SyncOutcome::Deleted { user_id })
            }
            Err(DomainError::UserNotFound { .. }) => {
                debug!(user_id = %user_id, "User already absent; redelivery");
                Ok(SyncOutcome::AlreadyAbsent { user_id })
            }
            Err(e) => Err(e),
        }
    }
}
