use crate::core::dataset::Dataset;

/// This trait defines the interface for a processing step in a pipeline.
/// A step takes a dataset and produces a new, processed dataset.
pub trait Processor: Send + Sync + std::fmt::Debug {
    /// The name of the step, used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Applies the step to a dataset.
    /// # Arguments
    /// * `dataset` - Input data that the step is applied to.
    /// # Returns
    /// A result carrying the processed dataset, or the failure that
    /// aborted the step.
    /// # Note
    /// Implementations must not mutate the input dataset or keep state
    /// between calls; a step holds only the read-only configuration it
    /// was constructed with.
    fn apply(&self, dataset: &Dataset) -> anyhow::Result<Dataset>;
}
