use crate::contract::model::WebhookHeaders;
use crate::domain::error::DomainError;

/// Output port: authenticate a raw identity-provider delivery before any
/// of it is trusted.
pub trait WebhookVerifier: Send + Sync {
    /// Fails with `DomainError::AuthenticationFailed` when the signature,
    /// timestamp or headers do not check out.
    fn verify(&self, headers: &WebhookHeaders, body: &[u8]) -> Result<(), DomainError>;
}
