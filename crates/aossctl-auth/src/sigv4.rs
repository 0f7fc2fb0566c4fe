//! AWS Signature Version 4 request signing.
//!
//! Signing an outgoing request:
//!
//! 1. Stamp the request with `x-amz-date`, `x-amz-content-sha256` and, for
//!    temporary credentials, `x-amz-security-token`.
//! 2. Build the canonical request from the method, path, query, signed
//!    headers and payload hash.
//! 3. Build the string to sign from the timestamp, credential scope and the
//!    canonical request hash.
//! 4. Derive the signing key with the HMAC-SHA256 chain over date, region and
//!    service.
//! 5. Attach the `Authorization` header.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use digest::KeyInit;
use hmac::{Hmac, Mac};
use http::HeaderValue;
use http::header::{AUTHORIZATION, HOST};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::canonical::{build_canonical_request, build_signed_headers_string};
use crate::credentials::Credentials;
use crate::error::AuthError;

/// The signing algorithm.
const ALGORITHM: &str = "AWS4-HMAC-SHA256";

const X_AMZ_DATE: &str = "x-amz-date";
const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";
const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

type HmacSha256 = Hmac<Sha256>;

/// Signs outgoing HTTP requests in place.
pub trait RequestSigner: Send + Sync {
    /// Add authentication headers to `request`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the request cannot be canonicalized.
    fn sign(&self, request: &mut http::Request<Bytes>) -> Result<(), AuthError>;
}

/// SigV4 signer bound to one set of credentials, a region and a service.
#[derive(Debug, Clone)]
pub struct SigV4Signer {
    credentials: Credentials,
    region: String,
    service: String,
}

impl SigV4Signer {
    /// Create a signer.
    pub fn new(
        credentials: Credentials,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            region: region.into(),
            service: service.into(),
        }
    }

    /// Sign `request` as if it were sent at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingHost`] if no host can be determined, or
    /// [`AuthError::InvalidHeaderValue`] if a signed header is not ASCII.
    pub fn sign_at(
        &self,
        request: &mut http::Request<Bytes>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let amz_date = timestamp.format("%Y%m%dT%H%M%SZ").to_string();
        let date = timestamp.format("%Y%m%d").to_string();
        let payload_hash = hash_payload(request.body());

        if !request.headers().contains_key(HOST) {
            let authority = request
                .uri()
                .authority()
                .ok_or(AuthError::MissingHost)?
                .as_str()
                .to_owned();
            request
                .headers_mut()
                .insert(HOST, header_value(HOST.as_str(), &authority)?);
        }

        let headers = request.headers_mut();
        headers.insert(X_AMZ_DATE, header_value(X_AMZ_DATE, &amz_date)?);
        headers.insert(
            X_AMZ_CONTENT_SHA256,
            header_value(X_AMZ_CONTENT_SHA256, &payload_hash)?,
        );
        if let Some(token) = self.credentials.session_token() {
            headers.insert(
                X_AMZ_SECURITY_TOKEN,
                header_value(X_AMZ_SECURITY_TOKEN, token)?,
            );
        }

        let signed_headers: Vec<&str> = request
            .headers()
            .keys()
            .map(http::HeaderName::as_str)
            .filter(|name| is_signed_header(name))
            .collect();

        let mut header_pairs = Vec::with_capacity(signed_headers.len());
        for &name in &signed_headers {
            for value in request.headers().get_all(name) {
                let value = value
                    .to_str()
                    .map_err(|_| AuthError::InvalidHeaderValue(name.to_owned()))?;
                header_pairs.push((name, value));
            }
        }

        let canonical_request = build_canonical_request(
            request.method().as_str(),
            request.uri().path(),
            request.uri().query().unwrap_or(""),
            &header_pairs,
            &signed_headers,
            &payload_hash,
        );
        debug!(canonical_request, "built canonical request");

        let canonical_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let credential_scope = format!("{date}/{}/{}/aws4_request", self.region, self.service);
        let string_to_sign = build_string_to_sign(&amz_date, &credential_scope, &canonical_hash);

        let signing_key = derive_signing_key(
            self.credentials.secret_access_key(),
            &date,
            &self.region,
            &self.service,
        );
        let signature = compute_signature(&signing_key, &string_to_sign);

        let authorization = format!(
            "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={}, Signature={signature}",
            self.credentials.access_key_id(),
            build_signed_headers_string(&signed_headers),
        );

        let authorization = header_value(AUTHORIZATION.as_str(), &authorization)?;
        request.headers_mut().insert(AUTHORIZATION, authorization);
        Ok(())
    }
}

impl RequestSigner for SigV4Signer {
    fn sign(&self, request: &mut http::Request<Bytes>) -> Result<(), AuthError> {
        self.sign_at(request, Utc::now())
    }
}

/// Headers covered by the signature.
fn is_signed_header(name: &str) -> bool {
    name == "host" || name == "content-type" || name.starts_with("x-amz-")
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(value).map_err(|_| AuthError::InvalidHeaderValue(name.to_owned()))
}

/// Build the SigV4 string to sign.
///
/// # Examples
///
/// ```
/// use aossctl_auth::sigv4::build_string_to_sign;
///
/// let sts = build_string_to_sign(
///     "20130524T000000Z",
///     "20130524/us-east-1/aoss/aws4_request",
///     "7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972",
/// );
/// assert!(sts.starts_with("AWS4-HMAC-SHA256\n20130524T000000Z\n"));
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Derive the SigV4 signing key.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let date_region_key = hmac_sha256(&date_key, region.as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, service.as_bytes());
    hmac_sha256(&date_region_service_key, b"aws4_request")
}

/// Compute the hex-encoded HMAC-SHA256 signature of `data`.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac =
        <HmacSha256 as KeyInit>::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Compute the hex-encoded SHA-256 of a payload, as sent in
/// `x-amz-content-sha256`.
///
/// # Examples
///
/// ```
/// use aossctl_auth::sigv4::hash_payload;
///
/// assert_eq!(
///     hash_payload(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}
