use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Raw shape of an aggregation mapping file, before validation:
///
/// ```yaml
/// dimension: Sector
/// aggregate:
///   - Fossil: [Coal, Oil, Gas]
///   - Renewable: [Solar, Wind]
/// ```
///
/// Each `aggregate` element is a single-key mapping from target label
/// to source labels; the exactly-one-key rule is enforced when the raw
/// shape is turned into a validated aggregator.
#[derive(Clone, Debug, Deserialize)]
pub struct RawMapping {
    pub dimension: String,
    pub aggregate: Vec<HashMap<String, Vec<String>>>,
}

/// Top-level pipeline configuration: the ordered list of processing
/// steps applied to a dataset.
#[derive(Clone, Debug, Deserialize)]
pub struct PipelineConfig {
    pub steps: Vec<StepConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StepConfig {
    pub kind: String,
    /// The step's own configuration file, relative to the pipeline
    /// configuration's directory.
    pub file: PathBuf,
}
