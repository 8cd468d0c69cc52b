pub mod catalog;
pub mod coerce;
pub mod collation;
pub mod hero;
pub mod normalize;
pub mod pricing;
pub mod seed;
pub mod tree;

pub use crate::domain::model::{EntityId, Hero, Service, ServiceImage, ServiceWithTariffs, Tariff};
pub use crate::domain::ports::{ConfigProvider, JsonSource};
pub use crate::utils::error::Result;
