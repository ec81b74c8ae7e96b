//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use stylish_auth::TokenProvider;
use stylish_cache::Cache;
use stylish_client::{
    CarouselController, CheckoutSequencer, PaginationController, ProfilePanel, SessionStore,
};
use stylish_commerce::prelude::QueryContext;
use stylish_data::{FetchClient, HttpStorefrontApi, PresetPrimeGateway, RetryPolicy};

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Application state, loaded once per invocation.
    pub session: Arc<SessionStore>,
    api: Arc<HttpStorefrontApi>,
}

impl Context {
    /// Load context from config file and storage.
    pub fn load(config: CliConfig, output: Output) -> Result<Self> {
        let storage_path = config
            .storage
            .path
            .clone()
            .unwrap_or_else(default_storage_path);
        output.debug(&format!("Using storage {}", storage_path.display()));

        let cache = Cache::open(&storage_path)
            .with_context(|| format!("Failed to open storage: {}", storage_path.display()))?;
        let session = Arc::new(SessionStore::load(cache));

        let client = FetchClient::with_timeout(Duration::from_millis(config.api.timeout_ms))
            .context("Failed to build HTTP client")?
            .with_base_url(config.api.base_url.clone())
            .with_default_header("Accept", "application/json")
            .with_retry(RetryPolicy::new(config.api.max_retries));

        let mut api = HttpStorefrontApi::new(client);
        if let Some(credentials) = config.guest.credentials() {
            api = api.with_guest_credentials(credentials);
        }

        Ok(Self {
            config,
            output,
            session,
            api: Arc::new(api),
        })
    }

    /// Read the config file given on the command line, or search for one
    /// from the working directory upwards.
    pub fn read_config(config_path: Option<&str>) -> Result<CliConfig> {
        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            Self::find_config(&cwd).unwrap_or_default()
        };
        Ok(config.with_env_overrides())
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["stylish.toml", ".stylish.toml", "stylish.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    pub fn tokens(&self) -> TokenProvider {
        TokenProvider::new(self.api.clone(), self.session.clone())
    }

    pub fn pager(&self, context: QueryContext) -> PaginationController {
        PaginationController::new(self.api.clone(), context)
    }

    pub fn carousel(&self) -> CarouselController {
        CarouselController::with_interval(
            self.api.clone(),
            Duration::from_millis(self.config.carousel.interval_ms),
        )
    }

    pub fn profile_panel(&self) -> ProfilePanel {
        ProfilePanel::new(self.tokens())
    }

    pub fn checkout(&self) -> CheckoutSequencer {
        let payments = PresetPrimeGateway::new(self.config.payment.prime.clone());
        CheckoutSequencer::new(
            self.session.clone(),
            self.tokens(),
            Arc::new(payments),
            self.api.clone(),
        )
    }

    pub fn api(&self) -> &HttpStorefrontApi {
        &self.api
    }
}

/// Default store file under the platform data directory.
fn default_storage_path() -> PathBuf {
    let base = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    };
    base.join("stylish").join("storage.json")
}
