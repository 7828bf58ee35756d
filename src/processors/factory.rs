use super::aggregator::Aggregator;
use super::processor::Processor;

use anyhow::anyhow;
use std::path::Path;

/// Creates a processor for a pipeline step.
/// # Arguments
/// * `kind` - The step kind named in the pipeline configuration.
/// * `file` - The step's own configuration file.
/// # Returns
/// The constructed processor, or an error when the kind is unknown or
/// the step configuration fails to load or validate.
pub fn create_processor(kind: &str, file: &Path) -> anyhow::Result<Box<dyn Processor>> {
    tracing::info!("Creating processor '{}'", kind);

    match kind {
        "aggregate" => Ok(Box::new(Aggregator::from_file(file)?)),
        _ => Err(anyhow!("Unknown processor kind '{kind}'")),
    }
}

/// The step kinds the factory can build.
pub fn list_processors() -> Vec<&'static str> {
    vec!["aggregate"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = create_processor("transmogrify", Path::new("step.yaml")).unwrap_err();
        assert!(err.to_string().contains("transmogrify"));
    }
}
