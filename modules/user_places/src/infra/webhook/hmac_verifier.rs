//! Shared-secret signature check for identity-provider webhooks.
//!
//! The signed content is `{message_id}.{timestamp}.{body}`, MAC'd with
//! HMAC-SHA256. The signature header may carry several space-separated
//! `v1,<base64>` entries (secret rotation); one match is enough.

use std::time::Duration;

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::contract::model::WebhookHeaders;
use crate::domain::error::DomainError;
use crate::domain::ports::WebhookVerifier;

type HmacSha256 = Hmac<Sha256>;

const SECRET_PREFIX: &str = "whsec_";
const SIGNATURE_VERSION: &str = "v1";

pub struct HmacWebhookVerifier {
    key: Vec<u8>,
    tolerance: Duration,
}

impl HmacWebhookVerifier {
    /// `secret` is the provider's `whsec_<base64>` string and must decode.
    /// An unprefixed secret that is not valid base64 is used as raw bytes.
    pub fn new(secret: &str, tolerance: Duration) -> anyhow::Result<Self> {
        let key = match secret.strip_prefix(SECRET_PREFIX) {
            Some(encoded) => STANDARD
                .decode(encoded)
                .context("webhook_secret has the whsec_ prefix but is not valid base64")?,
            None => STANDARD
                .decode(secret)
                .unwrap_or_else(|_| secret.as_bytes().to_vec()),
        };
        Ok(Self { key, tolerance })
    }

    fn mac(
        &self,
        message_id: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<HmacSha256, DomainError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| DomainError::authentication_failed(format!("unusable secret: {e}")))?;
        mac.update(message_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);
        Ok(mac)
    }

    /// Signature header entry for this content, as the provider would send it.
    pub fn sign(
        &self,
        message_id: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<String, DomainError> {
        let digest = self.mac(message_id, timestamp, body)?.finalize().into_bytes();
        Ok(format!("{SIGNATURE_VERSION},{}", STANDARD.encode(digest)))
    }

    /// Verify against an explicit clock.
    pub fn verify_at(
        &self,
        headers: &WebhookHeaders,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if headers.message_id.is_empty()
            || headers.timestamp.is_empty()
            || headers.signature.is_empty()
        {
            return Err(DomainError::authentication_failed("missing webhook headers"));
        }

        let sent_at: i64 = headers
            .timestamp
            .trim()
            .parse()
            .map_err(|_| DomainError::authentication_failed("invalid webhook timestamp"))?;
        if now.timestamp().abs_diff(sent_at) > self.tolerance.as_secs() {
            return Err(DomainError::authentication_failed(
                "webhook timestamp outside allowed tolerance",
            ));
        }

        let expected = self.mac(&headers.message_id, &headers.timestamp, body)?;
        let matched = headers
            .signature
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == SIGNATURE_VERSION)
            .filter_map(|(_, sig)| STANDARD.decode(sig).ok())
            // verify_slice compares in constant time
            .any(|sig| expected.clone().verify_slice(&sig).is_ok());

        if matched {
            Ok(())
        } else {
            Err(DomainError::authentication_failed("no matching signature"))
        }
    }
}

impl WebhookVerifier for HmacWebhookVerifier {
    fn verify(&self, headers: &WebhookHeaders, body: &[u8]) -> Result<(), DomainError> {
        self.verify_at(headers, body, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";
    const BODY: &[u8] = br#"{"type":"user.created","data":{"id":"user_1"}}"#;

    fn verifier() -> HmacWebhookVerifier {
        HmacWebhookVerifier::new(SECRET, Duration::from_secs(300)).unwrap()
    }

    fn signed_headers(v: &HmacWebhookVerifier, now: DateTime<Utc>, body: &[u8]) -> WebhookHeaders {
        let timestamp = now.timestamp().to_string();
        WebhookHeaders {
            message_id: "msg_p5jXN8AQM9LWM0D4loKWxJek".to_string(),
            signature: v.sign("msg_p5jXN8AQM9LWM0D4loKWxJek", &timestamp, body).unwrap(),
            timestamp,
        }
    }

    fn assert_auth_failed(result: Result<(), DomainError>) {
        assert!(
            matches!(result, Err(DomainError::AuthenticationFailed { .. })),
            "expected AuthenticationFailed, got {result:?}"
        );
    }

    #[test]
    fn accepts_valid_signature() {
        let v = verifier();
        let now = Utc::now();
        let headers = signed_headers(&v, now, BODY);
        assert!(v.verify_at(&headers, BODY, now).is_ok());
    }

    #[test]
    fn rejects_tampered_body() {
        let v = verifier();
        let now = Utc::now();
        let headers = signed_headers(&v, now, BODY);
        assert_auth_failed(v.verify_at(&headers, br#"{"type":"user.deleted"}"#, now));
    }

    #[test]
    fn rejects_signature_from_other_secret() {
        let other =
            HmacWebhookVerifier::new("whsec_c2VjcmV0LW51bWJlci10d28=", Duration::from_secs(300))
                .unwrap();
        let now = Utc::now();
        let headers = signed_headers(&other, now, BODY);
        assert_auth_failed(verifier().verify_at(&headers, BODY, now));
    }

    #[test]
    fn rejects_stale_and_future_timestamps() {
        let v = verifier();
        let sent = Utc::now();
        let headers = signed_headers(&v, sent, BODY);
        assert_auth_failed(v.verify_at(&headers, BODY, sent + chrono::Duration::seconds(301)));
        assert_auth_failed(v.verify_at(&headers, BODY, sent - chrono::Duration::seconds(301)));
        assert!(v
            .verify_at(&headers, BODY, sent + chrono::Duration::seconds(299))
            .is_ok());
    }

    #[test]
    fn accepts_any_matching_entry() {
        let v = verifier();
        let now = Utc::now();
        let mut headers = signed_headers(&v, now, BODY);
        headers.signature = format!("v1,Zm9vYmFy v2,whatever {}", headers.signature);
        assert!(v.verify_at(&headers, BODY, now).is_ok());
    }

    #[test]
    fn ignores_other_signature_versions() {
        let v = verifier();
        let now = Utc::now();
        let mut headers = signed_headers(&v, now, BODY);
        headers.signature = headers.signature.replacen("v1,", "v2,", 1);
        assert_auth_failed(v.verify_at(&headers, BODY, now));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        let v = verifier();
        let now = Utc::now();
        assert_auth_failed(v.verify_at(&WebhookHeaders::default(), BODY, now));

        let mut headers = signed_headers(&v, now, BODY);
        headers.timestamp = "yesterday".to_string();
        assert_auth_failed(v.verify_at(&headers, BODY, now));
    }

    #[test]
    fn raw_secret_is_used_when_not_base64() {
        let v = HmacWebhookVerifier::new("not base64!", Duration::from_secs(60)).unwrap();
        let now = Utc::now();
        let headers = signed_headers(&v, now, BODY);
        assert!(v.verify(&headers, BODY).is_ok());
    }

    #[test]
    fn prefixed_secret_must_be_base64() {
        let err = HmacWebhookVerifier::new("whsec_not base64!", Duration::from_secs(60))
            .err()
            .expect("malformed secret is refused");
        assert!(err.to_string().contains("whsec_"), "{err}");
    }
}
