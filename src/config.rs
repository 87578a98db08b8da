//! Environment driven configuration shared by both servers.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_CUSTOM_API_VERSION: &str = "v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which product a server fronts. Decides the variable prefix and defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Jira,
    Confluence,
}

impl Product {
    fn prefix(self) -> &'static str {
        match self {
            Product::Jira => "JIRA",
            Product::Confluence => "CONFLUENCE",
        }
    }

    fn default_max_results(self) -> u32 {
        match self {
            Product::Jira => 50,
            Product::Confluence => 25,
        }
    }

    fn bearer_by_default(self) -> bool {
        matches!(self, Product::Confluence)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    Basic { username: String, api_token: String },
    Bearer(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Auth::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

/// The upstream a client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Atlassian's own REST API.
    Standard,
    /// An arbitrary REST API whose routes live under `/{version}/`.
    Custom { version: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub auth: Auth,
    pub backend: Backend,
    pub max_results_default: u32,
    pub timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env(product: Product) -> Result<Self, ConfigError> {
        Self::from_lookup(product, |name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(product: Product, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let flag = |name: &str, default: bool| {
            get(name)
                .map(|value| value.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let max_results_default = match get("MAX_RESULTS_DEFAULT") {
            Some(value) => parse_number("MAX_RESULTS_DEFAULT", &value)?,
            None => product.default_max_results(),
        };
        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => parse_number("REQUEST_TIMEOUT_SECS", &value)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let log_level = get("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let mut missing = Vec::new();
        let mut require = |name: String| {
            let value = get(&name);
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let (base_url, auth, backend) = if flag("USE_CUSTOM_API", false) {
            let base_url = require("CUSTOM_API_BASE_URL".to_string());
            let api_key = require("CUSTOM_API_KEY".to_string());
            let version = get("CUSTOM_API_VERSION")
                .unwrap_or_else(|| DEFAULT_CUSTOM_API_VERSION.to_string());
            (base_url, Auth::Bearer(api_key), Backend::Custom { version })
        } else {
            let prefix = product.prefix();
            let base_url = require(format!("{prefix}_BASE_URL"));
            let auth = if flag("USE_BEARER_TOKEN", product.bearer_by_default()) {
                Auth::Bearer(require(format!("{prefix}_ACCESS_TOKEN")))
            } else {
                Auth::Basic {
                    username: require(format!("{prefix}_USERNAME")),
                    api_token: require(format!("{prefix}_API_TOKEN")),
                }
            };
            (base_url, auth, Backend::Standard)
        };

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(Self {
            base_url,
            auth,
            backend,
            max_results_default,
            timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }

}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name: name.to_string(),
        value: value.to_string(),
    })
}
