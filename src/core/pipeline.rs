use crate::config::schema::PipelineConfig;
use crate::core::dataset::Dataset;
use crate::processors::{self, Processor};

use anyhow::Result;
use std::path::Path;

/// An ordered sequence of processing steps applied to a dataset.
pub struct Pipeline {
    steps: Vec<Box<dyn Processor>>,
}

impl Pipeline {
    /// Builds every step of the pipeline up front, so configuration and
    /// mapping errors surface before any data is touched. Step files
    /// are resolved relative to `base_dir`.
    pub fn build(config: &PipelineConfig, base_dir: &Path) -> Result<Self> {
        let mut steps = Vec::with_capacity(config.steps.len());

        for step_cfg in &config.steps {
            let file = base_dir.join(&step_cfg.file);
            let step = processors::create_processor(&step_cfg.kind, &file)?;
            steps.push(step);
        }

        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs the dataset through all steps in order, each step consuming
    /// the previous step's output.
    pub fn run(&self, dataset: Dataset) -> Result<Dataset> {
        let mut dataset = dataset;

        for step in &self.steps {
            tracing::info!("Applying step '{}'", step.name());
            dataset = step.apply(&dataset)?;
        }

        Ok(dataset)
    }
}
