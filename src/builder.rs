use std::time::Duration;

use reqwest::Client;

use crate::{ApiClient, ClientConfig, ClientError};

/// Builder for configuring an [`ApiClient`]
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Start from a loaded configuration
    ///
    /// # Example
    /// ```
    /// use chef_client::{ApiClient, ClientConfig};
    ///
    /// let config = ClientConfig::default();
    /// let builder = ApiClient::builder().config(&config);
    /// ```
    pub fn config(self, config: &ClientConfig) -> Self {
        self.base_url(config.base_url.clone())
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
    }

    /// Set the root URL of the recommendation service
    ///
    /// # Example
    /// ```
    /// use chef_client::ApiClient;
    ///
    /// let builder = ApiClient::builder()
    ///     .base_url("http://localhost:5000");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use chef_client::ApiClient;
    /// use std::time::Duration;
    ///
    /// let builder = ApiClient::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `ClientError::BuilderError` if:
    /// - The base URL is empty or not http(s)
    /// - The underlying HTTP client cannot be created
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let defaults = ClientConfig::default();

        let base_url = self.base_url.unwrap_or(defaults.base_url);
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::BuilderError(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let timeout = self.timeout.unwrap_or(Duration::from_secs(defaults.timeout));
        let user_agent = self.user_agent.unwrap_or(defaults.user_agent);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ClientError::BuilderError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(ApiClient::from_parts(client, base_url))
    }
}
