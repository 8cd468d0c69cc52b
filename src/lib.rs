pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::ReqwestSource;
pub use app::AppState;
pub use config::ApiConfig;
pub use crate::core::catalog::{LoadOutcome, ServiceCatalog};
pub use crate::core::hero::HeroLoader;
pub use crate::core::pricing::{find_min_tariff_price, format_price};
pub use crate::core::tree::ServiceTree;
pub use utils::error::{CatalogError, Result};
