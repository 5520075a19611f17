use crate::error::{Result, ScanError};
use std::str::FromStr;

const API_URL_VARS: &[&str] = &["SCANNER_API_URL", "EXPO_PUBLIC_BACKEND_URL"];

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_DEDUP_WINDOW_MS: i64 = 2_000;
pub const DEFAULT_PRUNE_WINDOW_MS: i64 = 5_000;
pub const DEFAULT_SETTLE_DELAY_MS: i64 = 500;
pub const DEFAULT_MIN_FALLBACK_LEN: usize = 4;

fn load_env() {
    let _ = dotenvy::dotenv();
}

/// Time windows used by the candidate set and the session (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindows {
    /// Repeat detections of the same serial inside this window are dropped.
    pub dedup_ms: i64,
    /// Entries older than this are pruned before a new scan is appended.
    pub prune_ms: i64,
    /// A lone candidate is auto-selected once no new code arrived for this long.
    pub settle_ms: i64,
}

impl Default for ScanWindows {
    fn default() -> Self {
        Self {
            dedup_ms: DEFAULT_DEDUP_WINDOW_MS,
            prune_ms: DEFAULT_PRUNE_WINDOW_MS,
            settle_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl ScanWindows {
    /// The prune window never drops entries the dedup check still needs.
    pub fn normalized(mut self) -> Self {
        if self.prune_ms < self.dedup_ms {
            log::warn!(
                "prune window {}ms shorter than dedup window {}ms, using {}ms",
                self.prune_ms,
                self.dedup_ms,
                self.dedup_ms
            );
            self.prune_ms = self.dedup_ms;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub api_base_url: Option<String>,
    pub session_token: Option<String>,
    pub http_timeout_secs: u64,
    pub windows: ScanWindows,
    pub min_fallback_len: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            session_token: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            windows: ScanWindows::default(),
            min_fallback_len: DEFAULT_MIN_FALLBACK_LEN,
        }
    }
}

impl ScannerConfig {
    /// Read the configuration from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self> {
        load_env();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base_url = API_URL_VARS
            .iter()
            .find_map(|key| non_empty(*key))
            .map(|url| url.trim_end_matches('/').to_string());

        let windows = ScanWindows {
            dedup_ms: parse_or(&non_empty, "SCANNER_DEDUP_WINDOW_MS", DEFAULT_DEDUP_WINDOW_MS)?,
            prune_ms: parse_or(&non_empty, "SCANNER_PRUNE_WINDOW_MS", DEFAULT_PRUNE_WINDOW_MS)?,
            settle_ms: parse_or(&non_empty, "SCANNER_SETTLE_DELAY_MS", DEFAULT_SETTLE_DELAY_MS)?,
        };
        if windows.dedup_ms < 0 || windows.prune_ms < 0 || windows.settle_ms < 0 {
            return Err(ScanError::Config("scan windows must not be negative".to_string()));
        }

        Ok(Self {
            api_base_url,
            session_token: non_empty("SCANNER_SESSION_TOKEN"),
            http_timeout_secs: parse_or(
                &non_empty,
                "SCANNER_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?,
            windows: windows.normalized(),
            min_fallback_len: parse_or(
                &non_empty,
                "SCANNER_MIN_FALLBACK_LEN",
                DEFAULT_MIN_FALLBACK_LEN,
            )?,
        })
    }

    pub fn require_api_url(&self) -> Result<&str> {
        self.api_base_url.as_deref().ok_or_else(|| {
            ScanError::Config(format!("{} not set in .env", API_URL_VARS[0]))
        })
    }
}

fn parse_or<T, F>(get: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ScanError::Config(format!("{} is not a valid number: '{}'", key, raw))),
    }
}

/// "configured" when a backend URL is available, "not_configured" otherwise.
pub fn config_status() -> String {
    load_env();
    status_from_lookup(|key| std::env::var(key).ok()).to_string()
}

fn status_from_lookup<F>(get: F) -> &'static str
where
    F: Fn(&str) -> Option<String>,
{
    match ScannerConfig::from_lookup(get) {
        Ok(cfg) if cfg.api_base_url.is_some() => "configured",
        Ok(_) => "not_configured",
        Err(e) => {
            log::warn!("configuration unreadable: {}", e);
            "not_configured"
        }
    }
}
