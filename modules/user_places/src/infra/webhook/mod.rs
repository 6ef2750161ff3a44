pub mod hmac_verifier;

pub use hmac_verifier::HmacWebhookVerifier;
