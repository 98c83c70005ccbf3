//! HMAC-signed, expiring download links.

use super::MediaError;
use crate::media::domain::ObjectKey;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Outcome of checking a presented link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LinkCheck {
    Valid,
    Expired,
    BadSignature,
}

/// Issues and checks signed links of the form
/// `{base}/files/{bucket}/{path}?expires={unix}&signature={mac}`.
///
/// The MAC covers the bucket, path, and expiry, so none of them can be
/// altered without invalidating the link.
#[derive(Clone)]
pub struct UrlSigner {
    keyed_mac: HmacSha256,
    base_url: String,
    ttl: Duration,
}

impl UrlSigner {
    /// Creates a signer.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::SigningKey`] when the secret is empty or
    /// rejected by the MAC.
    pub fn new(
        secret: &[u8],
        base_url: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, MediaError> {
        if secret.is_empty() {
            return Err(MediaError::SigningKey);
        }
        let keyed_mac =
            <HmacSha256 as Mac>::new_from_slice(secret).map_err(|_| MediaError::SigningKey)?;
        let base = base_url.into();
        Ok(Self {
            keyed_mac,
            base_url: base.trim_end_matches('/').to_owned(),
            ttl,
        })
    }

    /// Returns a link to `key` valid until `now + ttl`.
    #[must_use]
    pub fn signed_url(&self, key: &ObjectKey, now: DateTime<Utc>) -> String {
        let expires = (now + self.ttl).timestamp();
        let signature = self.signature(key, expires);
        format!(
            "{}/files/{}/{}?expires={expires}&signature={signature}",
            self.base_url,
            key.bucket(),
            key.path()
        )
    }

    /// Computes the signature of `key` expiring at `expires`.
    #[must_use]
    pub fn signature(&self, key: &ObjectKey, expires: i64) -> String {
        URL_SAFE_NO_PAD.encode(self.mac(key, expires).finalize().into_bytes())
    }

    pub(super) fn check(
        &self,
        key: &ObjectKey,
        expires: i64,
        signature: &str,
        now: DateTime<Utc>,
    ) -> LinkCheck {
        let Ok(presented) = URL_SAFE_NO_PAD.decode(signature) else {
            return LinkCheck::BadSignature;
        };
        if self.mac(key, expires).verify_slice(&presented).is_err() {
            return LinkCheck::BadSignature;
        }
        if now.timestamp() > expires {
            return LinkCheck::Expired;
        }
        LinkCheck::Valid
    }

    fn mac(&self, key: &ObjectKey, expires: i64) -> HmacSha256 {
        let mut mac = self.keyed_mac.clone();
        mac.update(key.bucket().as_bytes());
        mac.update(b"/");
        mac.update(key.path().as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        mac
    }
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner")
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("ttl", &self.ttl)
            .finish()
    }
}
