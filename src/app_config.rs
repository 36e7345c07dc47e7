use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Transcript provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Title lookup settings
    #[serde(default)]
    pub title: TitleConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Transcript provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Ordered watch-page base endpoints, tried first to last until one
    /// succeeds
    #[serde(default = "default_player_endpoints")]
    pub player_endpoints: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with upstream requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            player_endpoints: default_player_endpoints(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Title lookup configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TitleConfig {
    /// Watch-page base endpoint used for the title fetch
    #[serde(default = "default_title_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_title_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_title_endpoint(),
            timeout_secs: default_title_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_player_endpoints() -> Vec<String> {
    vec![
        "https://www.youtube.com".to_string(),
        "https://www.youtube-nocookie.com".to_string(),
        "https://m.youtube.com".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_title_timeout_secs() -> u64 {
    10
}

fn default_title_endpoint() -> String {
    "https://www.youtube.com".to_string()
}

fn default_user_agent() -> String {
    // Desktop browser agent; the watch page serves a reduced player response
    // to unknown clients
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.provider.player_endpoints.is_empty() {
            return Err(anyhow!("At least one player endpoint is required"));
        }

        for endpoint in &self.provider.player_endpoints {
            url::Url::parse(endpoint)
                .map_err(|e| anyhow!("Invalid player endpoint '{}': {}", endpoint, e))?;
        }

        url::Url::parse(&self.title.endpoint)
            .map_err(|e| anyhow!("Invalid title endpoint '{}': {}", self.title.endpoint, e))?;

        if self.provider.timeout_secs == 0 || self.title.timeout_secs == 0 {
            return Err(anyhow!("Timeouts must be at least one second"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderConfig::default(),
            title: TitleConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
