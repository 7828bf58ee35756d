use super::schema::PipelineConfig;
use crate::error::{LoadError, LoadErrorKind};
use std::fs;
use std::path::Path;

/// Load the pipeline configuration from a YAML file
pub fn load_pipeline_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, LoadError> {
    read_yaml(path.as_ref())
}

/// Read a YAML-shaped value from a file; read and parse failures are
/// annotated with the file's relative path
pub fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content =
        fs::read_to_string(path).map_err(|e| LoadError::new(path, LoadErrorKind::Io(e)))?;
    serde_yaml::from_str(&content).map_err(|e| LoadError::new(path, LoadErrorKind::Parse(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_pipeline_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "steps:").unwrap();
        writeln!(file, "  - kind: aggregate").unwrap();
        writeln!(file, "    file: sector.yaml").unwrap();

        let config = load_pipeline_config(&path).unwrap();
        assert_eq!(config.steps.len(), 1);
        assert_eq!(config.steps[0].kind, "aggregate");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_pipeline_config("/no/such/pipeline.yaml").unwrap_err();
        assert!(err.to_string().contains("/no/such/pipeline.yaml"));
        assert!(matches!(err.kind, LoadErrorKind::Io(_)));
    }
}
