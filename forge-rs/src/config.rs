//! Configuration for forge-rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ForgeError, Result};

/// Main service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Session token configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Free-tier quota configuration
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Checkout form configuration
    #[serde(default)]
    pub billing: BillingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:3000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Directory of static assets served at the root path
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret key for signing session tokens
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Token lifetime in hours
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: u64,
}

/// Free-tier quota configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotaConfig {
    /// Number of free product generations before subscription is required
    #[serde(default = "default_free_products")]
    pub free_products: u32,
}

/// PayPal checkout form configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingConfig {
    /// Merchant (business) email the checkout form pays into
    #[serde(default = "default_business_email")]
    pub business_email: String,
    /// Item name shown on the checkout page
    #[serde(default = "default_item_name")]
    pub item_name: String,
    /// Monthly subscription amount, e.g. "10.00"
    #[serde(default = "default_amount")]
    pub amount: String,
    /// ISO currency code
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_token_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_token_expiry_hours() -> u64 {
    24
}

fn default_free_products() -> u32 {
    3
}

fn default_business_email() -> String {
    "gharatimustafa@gmail.com".to_string()
}

fn default_item_name() -> String {
    "DigitalForge Monthly Subscription".to_string()
}

fn default_amount() -> String {
    "10.00".to_string()
}

fn default_currency_code() -> String {
    "USD".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            public_dir: default_public_dir(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_expiry_hours: default_token_expiry_hours(),
        }
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            free_products: default_free_products(),
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            business_email: default_business_email(),
            item_name: default_item_name(),
            amount: default_amount(),
            currency_code: default_currency_code(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            quota: QuotaConfig::default(),
            billing: BillingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ForgeError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ForgeError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply the PORT environment variable, if set, to the listen address
    pub fn apply_port_env(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| ForgeError::Config(format!("Invalid PORT value: {}", port)))?;
            let host = self
                .server
                .listen_addr
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("0.0.0.0");
            self.server.listen_addr = format!("{}:{}", host, port);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.quota.free_products, 3);
        assert_eq!(config.billing.currency_code, "USD");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
listen_addr = "127.0.0.1:8080"

[quota]
free_products = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.quota.free_products, 5);
        // Unspecified sections keep their defaults
        assert_eq!(config.auth.token_expiry_hours, 24);
        assert_eq!(config.billing.amount, "10.00");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.public_dir, "public");
        assert_eq!(config.billing.item_name, "DigitalForge Monthly Subscription");
    }
}
