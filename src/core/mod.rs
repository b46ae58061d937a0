pub mod classify;
pub mod describe;
pub mod etl;
pub mod rules;
pub mod segment;
pub mod transform;

pub use crate::domain::model::{CatalogEntry, PartRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
