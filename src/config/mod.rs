#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Settings};

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_base_url, Validate};
use serde::{Deserialize, Serialize};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";
/// Hero origin used when no base URL is configured.
pub const DEFAULT_HERO_ORIGIN: &str = "http://localhost:8000";

pub const HERO_PATH: &str = "/api/hero/";
pub const SERVICES_PATH: &str = "/api/services/";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ShowMode {
    /// Indented catalogue tree
    #[default]
    Tree,
    /// Normalized catalogue as JSON
    Json,
    /// Services with tariffs and their minimum price
    Prices,
    /// Price list as CSV
    Csv,
    /// Hero banner record
    Hero,
}

/// API location, fixed once at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    base_url: Option<String>,
}

impl ApiConfig {
    /// Whitespace is trimmed and one trailing slash removed; empty means unset.
    pub fn new(base_url: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .map(|url| url.strip_suffix('/').unwrap_or(url))
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        Self { base_url }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Origin for services requests; empty keeps the endpoint relative.
    pub fn services_origin(&self) -> &str {
        self.base_url().unwrap_or("")
    }
}

impl ConfigProvider for ApiConfig {
    fn hero_origin(&self) -> &str {
        self.base_url().unwrap_or(DEFAULT_HERO_ORIGIN)
    }

    fn hero_endpoint(&self) -> String {
        format!("{}{}", self.hero_origin(), HERO_PATH)
    }

    fn services_endpoint(&self) -> String {
        format!("{}{}", self.services_origin(), SERVICES_PATH)
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        match self.base_url() {
            Some(url) => validate_base_url("api.base_url", url),
            None => Ok(()),
        }
    }
}
