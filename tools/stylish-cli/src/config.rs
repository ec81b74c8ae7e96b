//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stylish_data::Credentials;
use stylish_observability::LogConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Durable client storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Payment provider.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Credentials for guest token bootstrap.
    #[serde(default)]
    pub guest: GuestConfig,

    /// Home page carousel.
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `STYLISH_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("STYLISH_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(path) = lookup("STYLISH_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }
        if let Some(prime) = lookup("STYLISH_PAYMENT_PRIME") {
            self.payment.prime = Some(prime);
        }
        self
    }
}

/// Storefront API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, including the API version.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries of failed idempotent requests.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "http://localhost:3000/api/1.0".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Where the cart and token are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file. Defaults to the user data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Payment settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Prime issued by the payment provider's sandbox.
    #[serde(default)]
    pub prime: Option<String>,
}

/// Guest checkout credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestConfig {
    /// `native` or `facebook`.
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl GuestConfig {
    /// Credentials to bootstrap with, if enough are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        let provider = self.provider.as_deref().unwrap_or(if self.access_token.is_some() {
            "facebook"
        } else {
            "native"
        });

        match provider {
            "facebook" => self.access_token.clone().map(Credentials::facebook),
            "native" => match (&self.email, &self.password) {
                (Some(email), Some(password)) => Some(Credentials::native(email, password)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    5_000
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}
