use std::time::Duration;

use crate::error::RoutingError;

pub const HERE_ROUTE_API_URL: &str = "https://route.ls.hereapi.com/routing/7.2/calculateroute.json";
pub const HERE_MATRIX_API_URL: &str = "https://matrix.router.hereapi.com/v8/matrix";

const API_KEY_ENV_VAR: &str = "HERE_API_KEY";
const TIMEOUT_ENV_VAR: &str = "HERE_TIMEOUT_SECS";
const POLL_INTERVAL_ENV_VAR: &str = "HERE_MATRIX_POLL_INTERVAL_SECS";
const MAX_POLL_ATTEMPTS_ENV_VAR: &str = "HERE_MATRIX_MAX_POLL_ATTEMPTS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
// One hour at the default interval
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 720;

#[derive(Debug, Clone)]
pub struct RoutingClientParams {
    pub api_key: String,
    /// Bound on every single HTTP call.
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// `None` polls a matrix job until it reaches a terminal status.
    pub max_poll_attempts: Option<u32>,
    pub route_url: String,
    pub matrix_url: String,
}

impl RoutingClientParams {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: Some(DEFAULT_MAX_POLL_ATTEMPTS),
            route_url: HERE_ROUTE_API_URL.to_string(),
            matrix_url: HERE_MATRIX_API_URL.to_string(),
        }
    }

    /// Reads the parameters from the environment, loading `.env` first if
    /// there is one.
    pub fn from_env() -> Result<Self, RoutingError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RoutingError> {
        let api_key = lookup(API_KEY_ENV_VAR).ok_or_else(|| {
            RoutingError::Config(format!("{} is not set", API_KEY_ENV_VAR))
        })?;

        let mut params = Self::new(api_key);

        if let Some(secs) = parse_var::<u64>(&lookup, TIMEOUT_ENV_VAR)? {
            params.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, POLL_INTERVAL_ENV_VAR)? {
            params.poll_interval = Duration::from_secs(secs);
        }
        if let Some(attempts) = parse_var::<u32>(&lookup, MAX_POLL_ATTEMPTS_ENV_VAR)? {
            params.max_poll_attempts = (attempts > 0).then_some(attempts);
        }

        Ok(params)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, RoutingError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            RoutingError::Config(format!(
                "{} has an invalid value: {}",
                key, value
            ))
        }),
    }
}
