/// Configuration management for Listing Service
///
/// Loads configuration from environment variables.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// MongoDB configuration
    pub mongo: MongoConfig,
    /// Notification delivery channel configuration
    pub channel: ChannelConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
}

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string
    pub uri: String,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
}

/// Delivery channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Bounded queue capacity for notification delivery events
    #[serde(default = "default_channel_capacity")]
    pub capacity: usize,
}

// Default values
fn default_database() -> String {
    "listing".to_string()
}

fn default_channel_capacity() -> usize {
    1024
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        };

        let mongo = MongoConfig {
            uri: std::env::var("MONGO_URI").context("MONGO_URI environment variable not set")?,
            database: std::env::var("MONGO_DATABASE").unwrap_or_else(|_| default_database()),
        };

        let channel = ChannelConfig {
            capacity: std::env::var("DELIVERY_CHANNEL_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_channel_capacity),
        };

        Ok(Config {
            app,
            mongo,
            channel,
        })
    }
}
