pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::catalog_pipeline::CatalogPipeline;
pub use config::cli::LocalStorage;
pub use config::rules::RulesConfig;
#[cfg(feature = "cli")]
pub use config::{CliConfig, LogFormat};
pub use crate::core::{etl::EtlEngine, rules::CatalogRules};
pub use domain::model::{Category, OutputFormat, PartRecord};
pub use utils::error::{EtlError, Result};
