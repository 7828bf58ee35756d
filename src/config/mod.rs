///! Configuration Module

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_pipeline_config, read_yaml};
pub use schema::{PipelineConfig, RawMapping, StepConfig};
pub use validation::validate_config;
