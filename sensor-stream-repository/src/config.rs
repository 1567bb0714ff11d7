//! Connection settings for the OpenSearch sink.

/// Default OpenSearch URL.
pub const DEFAULT_OPENSEARCH_URL: &str = "https://localhost:9200";

/// Default basic-auth user.
pub const DEFAULT_OPENSEARCH_USERNAME: &str = "admin";

/// Connection settings for the OpenSearch sink.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Server URL, e.g. `https://localhost:9200`.
    pub url: String,
    /// Basic-auth user, used only when a password is set.
    pub username: String,
    /// Basic-auth password. `None` disables authentication.
    pub password: Option<String>,
    /// Verify the server's TLS certificate. Development clusters commonly
    /// run with self-signed certificates and set this to false.
    pub verify_certs: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OPENSEARCH_URL.to_string(),
            username: DEFAULT_OPENSEARCH_USERNAME.to_string(),
            password: None,
            verify_certs: false,
        }
    }
}

impl SinkConfig {
    /// Create a config for the given URL without authentication.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Enable basic authentication.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = Some(password.into());
        self
    }

    /// Set whether TLS certificates are verified.
    pub fn with_verify_certs(mut self, verify_certs: bool) -> Self {
        self.verify_certs = verify_certs;
        self
    }
}
