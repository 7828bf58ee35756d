use super::schema::PipelineConfig;

pub fn validate_config(config: &PipelineConfig) -> Result<(), String> {
    if config.steps.is_empty() {
        return Err("No processing steps defined".into());
    }

    for (index, step) in config.steps.iter().enumerate() {
        if step.kind.is_empty() {
            return Err(format!("Step {} has an empty kind", index + 1));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StepConfig;

    #[test]
    fn test_empty_pipeline_is_rejected() {
        let config = PipelineConfig { steps: vec![] };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_nonempty_pipeline_passes() {
        let config = PipelineConfig {
            steps: vec![StepConfig {
                kind: "aggregate".into(),
                file: "sector.yaml".into(),
            }],
        };
        assert!(validate_config(&config).is_ok());
    }
}
