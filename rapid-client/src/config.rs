//! Client configuration.
//!
//! A [`ClientConfig`] selects the gateway environment, carries the API
//! credentials (directly or by environment variable name), and tunes the HTTP
//! transport and endpoint paths.
//!
//! # Examples
//!
//! ```
//! use rapid_client::config::{ClientConfig, Environment};
//!
//! let toml = r#"
//!     environment = "sandbox"
//!
//!     [credentials]
//!     api_key = "C3AB9CMBi3zPkA1OjnLSkKTZeL4GMm5XVlJIEWyZAbA"
//!     password = "API-P4ss"
//!
//!     [http]
//!     timeout_secs = 30
//! "#;
//!
//! let config = ClientConfig::from_toml(toml).unwrap();
//! assert_eq!(config.environment, Environment::Sandbox);
//! assert_eq!(config.base_url(), "https://api.sandbox.ewaypayments.com");
//! ```

use std::{fmt, path::Path};

use serde::Deserialize;
use url::{Host, Url};
use zeroize::Zeroizing;

use crate::{
    error::{RapidError, Result},
    gateway::EndpointConfig,
    transport::HttpConfig,
};

/// Base URL of the sandbox gateway.
pub const SANDBOX_URL: &str = "https://api.sandbox.ewaypayments.com";

/// Base URL of the production gateway.
pub const PRODUCTION_URL: &str = "https://api.ewaypayments.com";

/// Gateway API version sent with every request.
pub const DEFAULT_API_VERSION: u32 = 40;

/// Target gateway environment.
///
/// Deserialised from `"sandbox"`, `"production"`, or an `https://` base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    /// Test gateway.
    #[default]
    Sandbox,
    /// Live gateway.
    Production,
    /// Any other base URL, e.g. a regional endpoint or a recording proxy.
    Custom(Url),
}

impl Environment {
    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Sandbox => SANDBOX_URL,
            Self::Production => PRODUCTION_URL,
            Self::Custom(url) => url.as_str().trim_end_matches('/'),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = RapidError;

    fn try_from(value: String) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "sandbox" => return Ok(Self::Sandbox),
            "production" | "live" => return Ok(Self::Production),
            _ => {}
        }

        let url = Url::parse(&value).map_err(|e| {
            RapidError::ConfigError(format!(
                "environment must be 'sandbox', 'production' or an https URL, got '{value}': {e}"
            ))
        })?;

        let environment = Self::Custom(url);
        environment.validate()?;
        Ok(environment)
    }
}

impl Environment {
    /// Checks a custom base URL against what the HTTP transport will accept:
    /// HTTPS, a host, and not the local machine.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::ConfigError`] naming the offending part.
    pub fn validate(&self) -> Result<()> {
        let Self::Custom(url) = self else {
            return Ok(());
        };
        if url.scheme() != "https" {
            return Err(RapidError::ConfigError(format!(
                "custom environment must use HTTPS, got: {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(RapidError::ConfigError(format!("custom environment has no host: {url}")));
        }
        if is_loopback(url) {
            return Err(RapidError::ConfigError(format!(
                "custom environment must not point to the local machine: {url}"
            )));
        }
        Ok(())
    }
}

/// Returns true if `url` names the local machine.
pub(crate) fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sandbox => f.write_str("sandbox"),
            Self::Production => f.write_str("production"),
            Self::Custom(url) => write!(f, "{url}"),
        }
    }
}

/// API key and password used for HTTP basic authentication.
///
/// Both values are wiped from memory on drop and never appear in `Debug`
/// output.
#[derive(Clone)]
pub struct Credentials {
    api_key: Zeroizing<String>,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Creates credentials from the merchant's API key and password.
    pub fn new(api_key: impl Into<String>, password: impl Into<String>) -> Self {
        Self { api_key: Zeroizing::new(api_key.into()), password: Zeroizing::new(password.into()) }
    }

    /// API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where to find the credentials.
///
/// A raw value wins over its environment variable when both are given.
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    /// API key.
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// API password.
    pub password: Option<String>,
    /// Environment variable holding the API password.
    pub password_env: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_env", &self.password_env)
            .finish()
    }
}

impl CredentialsConfig {
    /// Validates environment variable names and that each secret has a source.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::ConfigError`] when a secret has no source or an
    /// environment variable name is malformed.
    pub fn validate(&self) -> Result<()> {
        for (name, value, env) in [
            ("api_key", &self.api_key, &self.api_key_env),
            ("password", &self.password, &self.password_env),
        ] {
            if let Some(env) = env {
                validate_env_var_name(env)?;
            }
            if value.is_none() && env.is_none() {
                return Err(RapidError::ConfigError(format!(
                    "credentials.{name} or credentials.{name}_env must be set"
                )));
            }
        }
        Ok(())
    }

    /// Resolves the credentials, reading environment variables where needed.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::ConfigError`] if a referenced environment variable
    /// is unset or empty.
    pub fn resolve(&self) -> Result<Credentials> {
        let api_key = resolve_secret("api_key", self.api_key.as_deref(), self.api_key_env.as_deref())?;
        let password =
            resolve_secret("password", self.password.as_deref(), self.password_env.as_deref())?;
        Ok(Credentials { api_key, password })
    }
}

fn resolve_secret(name: &str, value: Option<&str>, env: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(value) = value {
        return Ok(Zeroizing::new(value.to_owned()));
    }
    let Some(env) = env else {
        return Err(RapidError::ConfigError(format!("credentials.{name} is not configured")));
    };
    match std::env::var(env) {
        Ok(value) if !value.is_empty() => Ok(Zeroizing::new(value)),
        _ => Err(RapidError::ConfigError(format!(
            "environment variable {env} for credentials.{name} is unset or empty"
        ))),
    }
}

/// Validates an environment variable name.
fn validate_env_var_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        return Err(RapidError::ConfigError("environment variable name cannot be empty".to_owned()));
    };

    // Alphanumeric with underscores, starting with letter or underscore
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(RapidError::ConfigError(format!(
            "environment variable name must start with letter or underscore: {name}"
        )));
    }

    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(RapidError::ConfigError(format!(
                "environment variable name contains invalid character '{ch}': {name}"
            )));
        }
    }

    Ok(())
}

/// Root client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Target gateway.
    #[serde(default)]
    pub environment: Environment,

    /// Gateway API version, sent as `X-EWAY-APIVERSION`.
    #[serde(default = "default_api_version")]
    pub api_version: u32,

    /// Credential sources.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// HTTP transport tuning.
    #[serde(default)]
    pub http: HttpConfig,

    /// Endpoint path overrides.
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

fn default_api_version() -> u32 {
    DEFAULT_API_VERSION
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api_version: DEFAULT_API_VERSION,
            credentials: CredentialsConfig::default(),
            http: HttpConfig::default(),
            endpoints: EndpointConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for `environment` with inline credentials.
    pub fn new(
        environment: Environment,
        api_key: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            credentials: CredentialsConfig {
                api_key: Some(api_key.into()),
                password: Some(password.into()),
                ..CredentialsConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::ConfigError`] on malformed TOML or invalid values.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| RapidError::ConfigError(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RapidError::ConfigError`] if the file cannot be read or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RapidError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`RapidError::ConfigError`] found.
    pub fn validate(&self) -> Result<()> {
        if self.api_version == 0 {
            return Err(RapidError::ConfigError("api_version must be positive".to_owned()));
        }
        self.environment.validate()?;
        self.credentials.validate()?;
        self.http.validate()?;
        self.endpoints.validate()?;
        Ok(())
    }

    /// Base URL of the selected environment.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.environment.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::try_from("sandbox".to_owned()).unwrap(), Environment::Sandbox);
        assert_eq!(Environment::try_from("Production".to_owned()).unwrap(), Environment::Production);

        let custom = Environment::try_from("https://proxy.example.com/rapid/".to_owned()).unwrap();
        assert_eq!(custom.base_url(), "https://proxy.example.com/rapid");
    }

    #[test]
    fn test_environment_rejects_http_and_garbage() {
        assert!(matches!(
            Environment::try_from("http://api.ewaypayments.com".to_owned()),
            Err(RapidError::ConfigError(_))
        ));
        assert!(Environment::try_from("staging".to_owned()).is_err());
    }

    #[test]
    fn test_environment_rejects_loopback_hosts() {
        for value in ["https://localhost:8443", "https://127.0.0.2/rapid", "https://[::1]/"] {
            assert!(
                matches!(Environment::try_from(value.to_owned()), Err(RapidError::ConfigError(_))),
                "{value} accepted"
            );
        }

        let mut config = ClientConfig::new(Environment::Sandbox, "key", "secret");
        config.environment = Environment::Custom(Url::parse("https://LOCALHOST/rapid").unwrap());
        assert!(matches!(config.validate(), Err(RapidError::ConfigError(_))));
    }

    #[test]
    fn test_base_urls() {
        assert_eq!(Environment::Sandbox.base_url(), SANDBOX_URL);
        assert_eq!(Environment::Production.base_url(), PRODUCTION_URL);
    }

    #[test]
    fn test_full_config_from_toml() {
        let toml = r#"
            environment = "production"
            api_version = 40

            [credentials]
            api_key_env = "RAPID_API_KEY"
            password_env = "RAPID_PASSWORD"

            [http]
            pool_max_idle_per_host = 10
            timeout_secs = 30
            connect_timeout_secs = 10
            http_version = "auto"

            [endpoints]
            query_customer = "/Customer/{id}"
        "#;

        let config = ClientConfig::from_toml(toml).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.api_version, 40);
        assert_eq!(config.credentials.api_key_env.as_deref(), Some("RAPID_API_KEY"));
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.endpoints.query_customer.as_deref(), Some("/Customer/{id}"));
    }

    #[test]
    fn test_defaults_applied() {
        let toml = r#"
            [credentials]
            api_key = "key"
            password = "secret"
        "#;

        let config = ClientConfig::from_toml(toml).unwrap();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.http, HttpConfig::default());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let err = ClientConfig::from_toml("environment = \"sandbox\"").unwrap_err();
        assert!(err.to_string().contains("credentials.api_key"));
    }

    #[test]
    fn test_invalid_env_var_name_rejected() {
        let toml = r#"
            [credentials]
            api_key_env = "1BAD"
            password = "secret"
        "#;
        assert!(ClientConfig::from_toml(toml).is_err());

        let toml = r#"
            [credentials]
            api_key_env = "BAD-NAME"
            password = "secret"
        "#;
        assert!(ClientConfig::from_toml(toml).is_err());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let toml = r#"
            [credentials]
            api_key = "key"
            password = "secret"

            [http]
            timeout_secs = 0
        "#;
        assert!(matches!(ClientConfig::from_toml(toml), Err(RapidError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_toml_syntax() {
        assert!(matches!(ClientConfig::from_toml("environment = "), Err(RapidError::ConfigError(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let err = ClientConfig::from_file("/nonexistent/rapid.toml").unwrap_err();
        assert!(matches!(err, RapidError::ConfigError(_)));
    }

    #[test]
    fn test_inline_credentials_resolve() {
        let config = ClientConfig::new(Environment::Sandbox, "key", "secret");
        let credentials = config.credentials.resolve().unwrap();
        assert_eq!(credentials.api_key(), "key");
        assert_eq!(credentials.password(), "secret");
    }

    #[test]
    fn test_unset_env_var_fails_resolution() {
        let config = CredentialsConfig {
            api_key_env: Some("RAPID_CLIENT_TEST_SURELY_UNSET_KEY".to_owned()),
            password: Some("secret".to_owned()),
            ..CredentialsConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(matches!(config.resolve(), Err(RapidError::ConfigError(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("key-123", "hunter2");
        let debug_str = format!("{credentials:?}");
        assert!(!debug_str.contains("key-123"));
        assert!(!debug_str.contains("hunter2"));

        let config = ClientConfig::new(Environment::Sandbox, "key-123", "hunter2");
        let debug_str = format!("{config:?}");
        assert!(!debug_str.contains("hunter2"));
    }
}
