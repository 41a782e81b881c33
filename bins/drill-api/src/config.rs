// Proxy configuration
// The judge credential lives only here; it is never echoed to clients.

use std::fmt;
use thiserror::Error;

pub const DEFAULT_JUDGE_URL: &str = "https://judge0-ce.p.rapidapi.com";
pub const DEFAULT_JUDGE_HOST: &str = "judge0-ce.p.rapidapi.com";
pub const API_KEY_VAR: &str = "RAPIDAPI_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

#[derive(Clone)]
pub struct Config {
    /// Base URL of the judge; `/submissions` is appended
    pub judge_url: String,
    /// Value of the `X-RapidAPI-Host` header
    pub judge_host: String,
    /// Value of the `X-RapidAPI-Key` header
    pub api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar(API_KEY_VAR))?;

        Ok(Self::with_key(api_key))
    }

    /// Production judge endpoint with the given credential
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            judge_url: DEFAULT_JUDGE_URL.to_string(),
            judge_host: DEFAULT_JUDGE_HOST.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn submissions_url(&self) -> String {
        format!("{}/submissions", self.judge_url.trim_end_matches('/'))
    }
}

// Keeps the key out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("judge_url", &self.judge_url)
            .field("judge_host", &self.judge_host)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
