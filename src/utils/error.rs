use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request to {url} returned status {status}")]
    HttpStatus { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CatalogError {
    /// 是否為傳輸層錯誤（網路、狀態碼、回應解析）
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CatalogError::ApiError(_)
                | CatalogError::HttpStatus { .. }
                | CatalogError::SerializationError(_)
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::ApiError(_) | CatalogError::HttpStatus { .. } => {
                "Check that the API is reachable and API_BASE_URL points to it"
            }
            CatalogError::SerializationError(_) => {
                "The API returned a body in an unexpected format"
            }
            CatalogError::CsvError(_) | CatalogError::IoError(_) => {
                "Check that the output can be written"
            }
            _ => "Fix the configuration value and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
