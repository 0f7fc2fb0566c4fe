//! Credential model and credential sources.
//!
//! [`CredentialSource`] abstracts how a run obtains its AWS credentials. The
//! command-line tool uses [`AmbientCredentialSource`], which walks the AWS SDK
//! default provider chain; tests use [`StaticCredentialSource`].

use std::fmt;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use tracing::debug;

use aossctl_core::AwsRegion;

use crate::error::AuthError;

/// AWS credentials used to sign requests for the lifetime of one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
}

impl Credentials {
    /// Create credentials from their parts.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    /// The access key ID.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The secret access key.
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// The session token, present for temporary credentials.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

impl From<&aws_credential_types::Credentials> for Credentials {
    fn from(creds: &aws_credential_types::Credentials) -> Self {
        Self::new(
            creds.access_key_id(),
            creds.secret_access_key(),
            creds.session_token().map(ToOwned::to_owned),
        )
    }
}

/// Something that can produce credentials for the current process.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Resolve credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoCredentials`] when nothing can be discovered.
    async fn resolve(&self) -> Result<Credentials, AuthError>;
}

/// Resolves credentials through the AWS SDK default provider chain
/// (environment, shared profile, SSO, container and instance metadata).
#[derive(Debug, Clone)]
pub struct AmbientCredentialSource {
    region: AwsRegion,
}

impl AmbientCredentialSource {
    /// Create a source scoped to the given region.
    #[must_use]
    pub fn new(region: AwsRegion) -> Self {
        Self { region }
    }
}

#[async_trait]
impl CredentialSource for AmbientCredentialSource {
    async fn resolve(&self) -> Result<Credentials, AuthError> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.as_str().to_owned()))
            .load()
            .await;

        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| AuthError::NoCredentials("no credentials provider configured".to_owned()))?;

        let creds = provider
            .provide_credentials()
            .await
            .map_err(|e| AuthError::NoCredentials(e.to_string()))?;

        debug!(
            access_key_id = %creds.access_key_id(),
            temporary = creds.session_token().is_some(),
            "resolved ambient credentials"
        );

        Ok(Credentials::from(&creds))
    }
}

/// A fixed set of credentials.
#[derive(Debug, Clone)]
pub struct StaticCredentialSource {
    credentials: Credentials,
}

impl StaticCredentialSource {
    /// Create a source that always yields `credentials`.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialSource for StaticCredentialSource {
    async fn resolve(&self) -> Result<Credentials, AuthError> {
        Ok(self.credentials.clone())
    }
}
