use crate::sync::DEFAULT_POLL_INTERVAL;
use std::{env, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_API_URL: &str =
    "https://functions.poehali.dev/68cb9a0e-60ee-43ae-8b49-6aec14ef254f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            api_url: lookup("VOTE_API_URL")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.api_url),
            poll_interval: seconds_or(&lookup, "VOTE_POLL_SECS", defaults.poll_interval),
            request_timeout: seconds_or(&lookup, "VOTE_TIMEOUT_SECS", defaults.request_timeout),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("invalid {key} value '{raw}', using default");
            default
        }
    }
}

fn seconds_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Duration {
    match parse_or(lookup, key, default.as_secs()) {
        0 => {
            warn!("{key} must be positive, using default");
            default
        }
        secs => Duration::from_secs(secs),
    }
}
