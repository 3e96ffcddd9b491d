//! Runtime configuration loaded from the process environment

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{VelaraError, VelaraResult};
use crate::provider::ProviderDescriptor;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_REFERER: &str = "https://velara.app";
pub const DEFAULT_DB_PATH: &str = "data/velara.db";
pub const DEFAULT_PORT: u16 = 3001;

/// Deep-research models can take minutes to answer
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 120;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key; without it every provider call fails
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    /// Sent as `HTTP-Referer` for OpenRouter app attribution
    pub referer: String,
    /// Shared secret the scheduler presents as a bearer token
    pub cron_secret: Option<String>,
    /// Provider priority list, best first
    pub providers: Vec<ProviderDescriptor>,
    pub provider_timeout: Duration,
    pub db_path: PathBuf,
    /// In-process refresh interval; `None` leaves scheduling to an external cron
    pub refresh_interval: Option<Duration>,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - OPENROUTER_API_KEY, CRON_SECRET (missing values are logged by the caller, not fatal)
    /// - OPENROUTER_BASE_URL, OPENROUTER_REFERER
    /// - VELARA_MODELS: comma-separated model ids in priority order
    /// - PROVIDER_TIMEOUT_SECS, REFRESH_INTERVAL_SECS, SERVER_PORT
    /// - DECK_DB_PATH
    pub fn from_env() -> VelaraResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> VelaraResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let providers = match non_empty("VELARA_MODELS") {
            Some(list) => {
                let providers = ProviderDescriptor::parse_list(&list);
                if providers.is_empty() {
                    return Err(VelaraError::config("VELARA_MODELS lists no models"));
                }
                providers
            }
            None => ProviderDescriptor::defaults(),
        };

        let provider_timeout = Duration::from_secs(
            parse_number(&non_empty, "PROVIDER_TIMEOUT_SECS")?.unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
        );

        let refresh_interval = match parse_number::<u64, _>(&non_empty, "REFRESH_INTERVAL_SECS")? {
            Some(0) => {
                return Err(VelaraError::config("REFRESH_INTERVAL_SECS must be greater than zero"))
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Self {
            openrouter_api_key: non_empty("OPENROUTER_API_KEY"),
            openrouter_base_url: non_empty("OPENROUTER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            referer: non_empty("OPENROUTER_REFERER").unwrap_or_else(|| DEFAULT_REFERER.to_string()),
            cron_secret: non_empty("CRON_SECRET"),
            providers,
            provider_timeout,
            db_path: non_empty("DECK_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            refresh_interval,
            port: parse_number(&non_empty, "SERVER_PORT")?.unwrap_or(DEFAULT_PORT),
        })
    }
}

fn parse_number<T, F>(lookup: &F, key: &str) -> VelaraResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| VelaraError::config(format!("Invalid {}: {} ({})", key, raw, e)))
        })
        .transpose()
}
