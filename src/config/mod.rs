use std::fmt;
use std::time::Duration;

use url::Url;

use crate::errors::{RelayError, RelayResult};

pub const DEFAULT_STORY_COUNT: usize = 5;
pub const DEFAULT_INTERVAL_HOURS: u64 = 24;
pub const DEFAULT_HN_API_URL: &str = "https://hacker-news.firebaseio.com/v0";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// One year
pub const MAX_INTERVAL_HOURS: u64 = 24 * 365;

/// Destination credentials. Immutable once loaded.
#[derive(Clone, Default)]
pub struct ChannelConfig {
    pub token: String,
    pub channel_id: String,
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub channel: ChannelConfig,
    pub story_count: usize,
    pub interval: Duration,
    pub hn_api_url: String,
    pub telegram_api_url: String,
    pub http_timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> RelayResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                load_dotenv(dotenvy::from_path(&env_path))?;
            }
        }
        // Fall back to current directory
        load_dotenv(dotenvy::dotenv())?;

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key-value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Not validated: an empty token or channel only shows up as send failures
        let token = get("TOKEN").unwrap_or_default();
        let channel_id = get("CHANNEL_ID").unwrap_or_default();
        if token.is_empty() {
            tracing::warn!("TOKEN is not set; messages cannot be delivered");
        }
        if channel_id.is_empty() {
            tracing::warn!("CHANNEL_ID is not set; messages cannot be delivered");
        }

        let story_count = parse_number(
            get("RELAY_STORY_COUNT"),
            "RELAY_STORY_COUNT",
            DEFAULT_STORY_COUNT as u64,
        )? as usize;

        let interval_hours = parse_number(
            get("RELAY_INTERVAL_HOURS"),
            "RELAY_INTERVAL_HOURS",
            DEFAULT_INTERVAL_HOURS,
        )?;
        if interval_hours == 0 || interval_hours > MAX_INTERVAL_HOURS {
            return Err(RelayError::Config(format!(
                "RELAY_INTERVAL_HOURS must be between 1 and {}, got {}",
                MAX_INTERVAL_HOURS, interval_hours
            )));
        }
        let interval_secs = interval_hours.checked_mul(60 * 60).ok_or_else(|| {
            RelayError::Config(format!("RELAY_INTERVAL_HOURS is too large: {}", interval_hours))
        })?;

        let timeout_secs = parse_number(
            get("HTTP_TIMEOUT_SECS"),
            "HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(RelayError::Config(
                "HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let hn_api_url = parse_base_url(
            get("HN_API_URL").unwrap_or_else(|| DEFAULT_HN_API_URL.to_string()),
            "HN_API_URL",
        )?;
        let telegram_api_url = parse_base_url(
            get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            "TELEGRAM_API_URL",
        )?;

        Ok(Self {
            channel: ChannelConfig { token, channel_id },
            story_count,
            interval: Duration::from_secs(interval_secs),
            hn_api_url,
            telegram_api_url,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// A missing `.env` is fine; one that exists but cannot be read or parsed is not
fn load_dotenv<T>(result: Result<T, dotenvy::Error>) -> RelayResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(RelayError::Config(format!("Failed to load .env: {}", e))),
    }
}

fn parse_number(value: Option<String>, key: &str, default: u64) -> RelayResult<u64> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            RelayError::Config(format!(
                "{} must be a non-negative integer, got '{}'",
                key, raw
            ))
        }),
    }
}

/// Validate an API root and strip its trailing slash so paths can be appended
fn parse_base_url(raw: String, key: &str) -> RelayResult<String> {
    let trimmed = raw.trim();
    let parsed =
        Url::parse(trimmed).map_err(|e| RelayError::InvalidUrl(format!("{}: {}", key, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(RelayError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            key,
            parsed.scheme()
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
