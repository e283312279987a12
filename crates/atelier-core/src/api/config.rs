//! API configuration

/// Where the remote service lives and how to authenticate against it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Bearer token issued by the sign-in flow
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build the HTTP binding for this configuration
    pub fn build_http_api(&self) -> super::HttpApi {
        super::HttpApi::new(self)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}
