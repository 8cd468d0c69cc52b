use crate::config::{ApiConfig, ShowMode};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_base_url, validate_non_empty_string, validate_one_of, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiSection>,
    pub output: Option<OutputSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub show: Option<ShowMode>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_BASE_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(url) = self.api.as_ref().and_then(|api| api.base_url.as_deref()) {
            if !url.trim().is_empty() {
                validate_base_url("api.base_url", url.trim())?;
            }
        }

        if let Some(level) = self.log_level() {
            validate_non_empty_string("logging.level", level)?;
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }

    /// 取得 API 設定
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.as_ref().and_then(|api| api.base_url.as_deref()))
    }

    pub fn show(&self) -> Option<ShowMode> {
        self.output.as_ref().and_then(|output| output.show)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|logging| logging.level.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
