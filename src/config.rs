use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Client configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root URL of the recommendation service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// `max_resultados` sent with every search
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Prefix prepended to relative recipe image paths
    #[serde(default = "default_static_prefix")]
    pub static_prefix: String,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            max_results: default_max_results(),
            static_prefix: default_static_prefix(),
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_results() -> u32 {
    5
}

fn default_static_prefix() -> String {
    "/static/".to_string()
}

fn default_user_agent() -> String {
    format!("chef-client/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CHEF__ prefix
    /// 2. chef-client.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CHEF__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ClientConfig::load`] for the source priority.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("chef-client").required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// `CHEF__BASE_URL`, `CHEF__TIMEOUT`, ...
fn environment() -> Environment {
    Environment::with_prefix("CHEF")
        .separator("__")
        .try_parsing(true)
}
