// src/config.rs
//
// Runtime configuration, read from the environment (and a `.env` file when
// the binary loads one).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::services::catalog::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8585";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
///
/// | Env Var                         | Default                          |
/// |---------------------------------|----------------------------------|
/// | `MOVIEHUB_API_BASE_URL`         | `http://localhost:8585`          |
/// | `MOVIEHUB_REQUEST_TIMEOUT_SECS` | `30`                             |
/// | `MOVIEHUB_PAGE_SIZE`            | `10`                             |
/// | `MOVIEHUB_EXPORT_DIR`           | download dir, else current dir   |
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub page_size: usize,
    pub export_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from process environment variables with defaults.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_base_url = var("MOVIEHUB_API_BASE_URL")
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match var("MOVIEHUB_REQUEST_TIMEOUT_SECS") {
            Some(value) => parse_number::<u64>("MOVIEHUB_REQUEST_TIMEOUT_SECS", &value)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "MOVIEHUB_REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        let page_size = match var("MOVIEHUB_PAGE_SIZE") {
            Some(value) => parse_number::<usize>("MOVIEHUB_PAGE_SIZE", &value)?,
            None => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(AppError::Config(
                "MOVIEHUB_PAGE_SIZE must be at least 1".to_string(),
            ));
        }

        let export_dir = var("MOVIEHUB_EXPORT_DIR")
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            page_size,
            export_dir,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a non-negative integer, got {:?}", key, value)))
}
