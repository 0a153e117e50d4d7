//! Azure OpenAI configuration.

use std::error::Error;
use std::fmt::{self, Debug, Display};

use reqwest::Url;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
/// Environment variable holding the resource endpoint.
pub const ENDPOINT_VAR: &str = "AZURE_ENDPOINT_URL";
/// Environment variable holding the API version.
pub const API_VERSION_VAR: &str = "AZURE_OPENAI_VERSION";
/// Environment variable holding the deployment name.
pub const DEPLOYMENT_VAR: &str = "AZURE_DEPLOYMENT_NAME";

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-10-21";
/// Deployment used when none is configured.
pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o";

/// Errors from loading the configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set or is blank.
    MissingVar(&'static str),
    /// The endpoint is not an absolute http(s) URL.
    InvalidEndpoint(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => {
                write!(f, "{name} environment variable is not set")
            }
            ConfigError::InvalidEndpoint(reason) => {
                write!(f, "invalid endpoint URL: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Builder for [`AzureConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AzureConfigBuilder {
    api_key: String,
    endpoint: Option<String>,
    api_version: Option<String>,
    deployment: Option<String>,
}

impl AzureConfigBuilder {
    /// Creates a builder with the given API key.
    #[inline]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
            api_version: None,
            deployment: None,
        }
    }

    /// Sets the resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the API version.
    #[inline]
    pub fn with_api_version<S: Into<String>>(mut self, api_version: S) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Sets the deployment name.
    #[inline]
    pub fn with_deployment<S: Into<String>>(mut self, deployment: S) -> Self {
        self.deployment = Some(deployment.into());
        self
    }

    /// Builds the configuration, validating the endpoint.
    pub fn build(self) -> Result<AzureConfig, ConfigError> {
        let endpoint = self.endpoint.ok_or(ConfigError::MissingVar(ENDPOINT_VAR))?;
        let endpoint = validate_endpoint(&endpoint)?;
        Ok(AzureConfig {
            api_key: self.api_key,
            endpoint,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            deployment: self
                .deployment
                .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
        })
    }
}

impl Debug for AzureConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfigBuilder")
            .field("api_key", &"<deducted>")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .finish()
    }
}

/// Connection settings of an Azure OpenAI deployment.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AzureConfig {
    api_key: String,
    endpoint: String,
    api_version: String,
    deployment: String,
}

impl AzureConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name
    /// to its value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;
        let endpoint = get(ENDPOINT_VAR).ok_or(ConfigError::MissingVar(ENDPOINT_VAR))?;

        let mut builder =
            AzureConfigBuilder::with_api_key(api_key).with_endpoint(endpoint);
        if let Some(api_version) = get(API_VERSION_VAR) {
            builder = builder.with_api_version(api_version);
        }
        if let Some(deployment) = get(DEPLOYMENT_VAR) {
            builder = builder.with_deployment(deployment);
        }
        builder.build()
    }

    /// Returns the API key.
    #[inline]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the endpoint, without a trailing slash.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the API version.
    #[inline]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the deployment name.
    #[inline]
    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    /// Returns the chat completions URL of the deployment.
    ///
    /// `deployment` overrides the configured deployment, which is how an
    /// agent pinned to another model is addressed.
    pub fn chat_completions_url(&self, deployment: Option<&str>) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint,
            deployment.unwrap_or(&self.deployment),
            self.api_version
        )
    }
}

impl Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("api_key", &"<deducted>")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .finish()
    }
}

fn validate_endpoint(endpoint: &str) -> Result<String, ConfigError> {
    let url = Url::parse(endpoint)
        .map_err(|err| ConfigError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEndpoint(format!(
            "{endpoint}: scheme must be http or https"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::InvalidEndpoint(format!(
            "{endpoint}: missing host"
        )));
    }
    Ok(endpoint.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(
        vars: &[(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        move |name: &str| vars.get(name).map(|value| value.to_string())
    }

    #[test]
    fn test_from_lookup_with_defaults() {
        let config = AzureConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (ENDPOINT_VAR, "https://demo.openai.azure.com/"),
        ]))
        .unwrap();
        assert_eq!(config.api_key(), "secret");
        assert_eq!(config.endpoint(), "https://demo.openai.azure.com");
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.deployment(), DEFAULT_DEPLOYMENT);
        assert_eq!(
            config.chat_completions_url(None),
            "https://demo.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-10-21"
        );
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AzureConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (ENDPOINT_VAR, "http://localhost:8080"),
            (API_VERSION_VAR, "2025-01-01-preview"),
            (DEPLOYMENT_VAR, "gpt-4o-mini"),
        ]))
        .unwrap();
        assert_eq!(config.deployment(), "gpt-4o-mini");
        assert_eq!(
            config.chat_completions_url(Some("o3")),
            "http://localhost:8080/openai/deployments/o3/chat/completions?api-version=2025-01-01-preview"
        );

        // Blank values fall back to defaults.
        let config = AzureConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (ENDPOINT_VAR, "http://localhost:8080"),
            (DEPLOYMENT_VAR, "   "),
        ]))
        .unwrap();
        assert_eq!(config.deployment(), DEFAULT_DEPLOYMENT);
    }

    #[test]
    fn test_missing_and_invalid() {
        let err = AzureConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(API_KEY_VAR));
        assert_eq!(
            err.to_string(),
            "AZURE_OPENAI_API_KEY environment variable is not set"
        );

        let err = AzureConfig::from_lookup(lookup(&[(API_KEY_VAR, "secret")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(ENDPOINT_VAR));

        for endpoint in ["not a url", "ftp://demo.openai.azure.com", "file:///tmp"] {
            let err = AzureConfigBuilder::with_api_key("secret")
                .with_endpoint(endpoint)
                .build()
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidEndpoint(_)),
                "{endpoint}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let builder = AzureConfigBuilder::with_api_key("top-secret")
            .with_endpoint("https://demo.openai.azure.com");
        assert!(!format!("{builder:?}").contains("top-secret"));

        let config = builder.build().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("demo.openai.azure.com"));
    }
}
