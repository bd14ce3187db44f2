//! Environment-sourced configuration, read once at startup.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the workflow backend, without a trailing slash.
    pub backend_url: String,
    /// Optional bearer credential attached to every backend call.
    pub backend_api_key: Option<SecretString>,
    /// Listen host for the HTTP server.
    pub host: String,
    /// Listen port for the HTTP server.
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// `BACKEND_URL` is required — there is no default backend to trust.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = std::env::var("BACKEND_URL")
            .map_err(|_| ConfigError::MissingEnvVar("BACKEND_URL".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let backend_api_key = std::env::var("BACKEND_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(SecretString::from);

        let host = std::env::var("ASSIST_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match std::env::var("ASSIST_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ASSIST_PORT".to_string(),
                message: format!("not a valid port: {raw}"),
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            backend_url,
            backend_api_key,
            host,
            port,
        })
    }
}
