use crate::config::toml_config::TomlConfig;
use crate::config::{ApiConfig, ShowMode, BASE_URL_ENV};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "service-catalog")]
#[command(about = "Fetch and normalize the service catalogue and hero banner")]
pub struct CliConfig {
    #[arg(long, env = BASE_URL_ENV, help = "API base URL, e.g. https://example.com")]
    pub api_base_url: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, help = "What to print (default: tree)")]
    pub show: Option<ShowMode>,

    #[arg(long, help = "Print only the service at this slug path")]
    pub path: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// CLI flags merged over the optional TOML file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api: ApiConfig,
    pub show: ShowMode,
    pub path: Option<String>,
    pub log_level: Option<String>,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };

        if let Some(file) = &file {
            file.validate()?;
        }

        let api = match (&self.api_base_url, &file) {
            (Some(url), _) => ApiConfig::new(Some(url.as_str())),
            (None, Some(file)) => file.api_config(),
            (None, None) => ApiConfig::default(),
        };

        let settings = Settings {
            api,
            show: self
                .show
                .or_else(|| file.as_ref().and_then(TomlConfig::show))
                .unwrap_or_default(),
            path: self
                .path
                .clone()
                .or_else(|| file.as_ref().and_then(|f| f.output.as_ref()?.path.clone())),
            log_level: file.as_ref().and_then(|f| f.log_level().map(str::to_string)),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.api.validate()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        ApiConfig::new(self.api_base_url.as_deref()).validate()
    }
}
