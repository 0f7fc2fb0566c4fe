//! Configuration management for aossctl.
//!
//! Defaults can be overridden through environment variables; command-line
//! flags take precedence over both.

use std::env;

use crate::error::{AossError, AossResult};
use crate::types::{AwsRegion, KnnEngine};

/// Signing service name for OpenSearch Serverless collections.
pub const DEFAULT_SERVICE_NAME: &str = "aoss";

/// External tool used to refresh short-lived credentials.
pub const DEFAULT_CREDENTIAL_TOOL: &str = "ada";

/// Global configuration for aossctl.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AossConfig {
    /// Default AWS region.
    pub default_region: AwsRegion,
    /// Service name bound into the request signature scope.
    pub service_name: String,
    /// Engine used for new vector indices.
    pub knn_engine: KnnEngine,
    /// Log level.
    pub log_level: String,
    /// Program invoked by the credential refresh helper.
    pub credential_tool: String,
}

impl Default for AossConfig {
    fn default() -> Self {
        Self {
            default_region: AwsRegion::default(),
            service_name: DEFAULT_SERVICE_NAME.to_owned(),
            knn_engine: KnnEngine::default(),
            log_level: "info".to_owned(),
            credential_tool: DEFAULT_CREDENTIAL_TOOL.to_owned(),
        }
    }
}

impl AossConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns [`AossError::Config`] if `AOSS_KNN_ENGINE` names an unknown engine.
    pub fn from_env() -> AossResult<Self> {
        let mut config = Self::default();

        if let Ok(v) = env::var("DEFAULT_REGION") {
            config.default_region = AwsRegion::new(v);
        }
        if let Ok(v) = env::var("AOSS_SERVICE_NAME") {
            config.service_name = v;
        }
        if let Ok(v) = env::var("AOSS_KNN_ENGINE") {
            config.knn_engine = v
                .parse()
                .map_err(|e: AossError| AossError::Config(format!("AOSS_KNN_ENGINE: {e}")))?;
        }
        if let Ok(v) = env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = env::var("AOSS_CREDENTIAL_TOOL") {
            config.credential_tool = v;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = AossConfig::default();
        assert_eq!(config.default_region.as_str(), "us-east-1");
        assert_eq!(config.service_name, "aoss");
        assert_eq!(config.knn_engine, KnnEngine::Faiss);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.credential_tool, "ada");
    }
}
