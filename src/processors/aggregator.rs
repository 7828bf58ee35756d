use crate::config::loader::read_yaml;
use crate::config::schema::RawMapping;
use crate::core::dataset::Dataset;
use crate::core::paths::relative_path;
use crate::error::{ConflictError, ConflictKind, LoadError, LoadErrorKind, ValidationError};
use crate::processors::Processor;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One target label and the ordered source labels folded into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregationItem {
    name: String,
    components: Vec<String>,
}

impl AggregationItem {
    /// Creates an item. The target name must be non-empty and carry at
    /// least one component; this shape check is independent of the
    /// cross-item conflict checks run by [`Aggregator::new`].
    pub fn new(
        name: impl Into<String>,
        components: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyTargetName);
        }
        if components.is_empty() {
            return Err(ValidationError::EmptyComponents(name));
        }

        Ok(Self { name, components })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }
}

/// A validated aggregation mapping for one dimension of a dataset:
/// renames every source label to its target label, collapsing
/// fine-grained categories into coarser ones.
///
/// Validation runs once, at construction; afterwards the aggregator is
/// immutable and may be shared freely across threads.
#[derive(Clone, Debug)]
pub struct Aggregator {
    dimension: String,
    mapping: Vec<AggregationItem>,
    file: PathBuf,
}

impl Aggregator {
    /// Builds an aggregator from already-constructed items, running
    /// both conflict checks. The checks run independently; every
    /// conflict found is reported, none is dropped.
    pub fn new(
        dimension: impl Into<String>,
        mapping: Vec<AggregationItem>,
        file: impl Into<PathBuf>,
    ) -> Result<Self, ValidationError> {
        let aggregator = Self {
            dimension: dimension.into(),
            mapping,
            file: file.into(),
        };
        aggregator.validate()?;

        Ok(aggregator)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut conflicts = Vec::new();

        let names: Vec<&str> = self.mapping.iter().map(|item| item.name.as_str()).collect();
        if let Some(duplicates) = find_duplicates(&names) {
            conflicts.push(ConflictError {
                kind: ConflictKind::Target,
                duplicates,
                file: self.file.clone(),
            });
        }

        // A label repeated within one item's own list counts too, so
        // the flattened list keeps every occurrence.
        let components: Vec<&str> = self
            .mapping
            .iter()
            .flat_map(|item| item.components.iter().map(String::as_str))
            .collect();
        if let Some(duplicates) = find_duplicates(&components) {
            conflicts.push(ConflictError {
                kind: ConflictKind::Component,
                duplicates,
                file: self.file.clone(),
            });
        }

        if conflicts.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Conflicts(conflicts))
        }
    }

    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    pub fn mapping(&self) -> &[AggregationItem] {
        &self.mapping
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The source-to-target view of the mapping, rebuilt on demand.
    pub fn rename_mapping(&self) -> HashMap<String, String> {
        let mut rename = HashMap::new();

        for item in &self.mapping {
            for component in &item.components {
                rename.insert(component.clone(), item.name.clone());
            }
        }

        rename
    }

    /// Loads and validates an aggregation mapping from a YAML file:
    ///
    /// ```yaml
    /// dimension: Sector
    /// aggregate:
    ///   - Fossil: [Coal, Oil, Gas]
    ///   - Renewable: [Solar, Wind]
    /// ```
    ///
    /// Every failure along the way, from an unreadable file to a
    /// validation conflict, surfaces as a [`LoadError`] annotated with
    /// the file's relative path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw: RawMapping = read_yaml(path)?;

        let mut mapping = Vec::with_capacity(raw.aggregate.len());
        for entry in raw.aggregate {
            if entry.len() > 1 {
                return Err(LoadError::new(
                    path,
                    LoadErrorKind::Shape(format!(
                        "aggregate entries must name exactly one target label, found {}",
                        entry.len()
                    )),
                ));
            }
            let Some((name, components)) = entry.into_iter().next() else {
                return Err(LoadError::new(
                    path,
                    LoadErrorKind::Shape("aggregate entry names no target label".into()),
                ));
            };
            let item = AggregationItem::new(name, components)
                .map_err(|e| LoadError::new(path, e))?;
            mapping.push(item);
        }

        let file = relative_path(path);
        Aggregator::new(raw.dimension, mapping, file).map_err(|e| LoadError::new(path, e))
    }
}

impl Processor for Aggregator {
    fn name(&self) -> &str {
        "aggregate"
    }

    fn apply(&self, dataset: &Dataset) -> anyhow::Result<Dataset> {
        let rename = self.rename_mapping();
        tracing::debug!(
            "Aggregating dimension '{}' ({} source labels)",
            self.dimension,
            rename.len()
        );

        // Rows that collapse onto one target are left for the
        // dataset's own merge policy.
        let renamed = dataset.rename_dimension(&self.dimension, &rename, false)?;
        Ok(renamed)
    }
}

/// Values occurring more than once in `items`, each reported once, in
/// first-appearance order. `None` when every value is unique.
fn find_duplicates(items: &[&str]) -> Option<Vec<String>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(*item).or_insert(0) += 1;
    }

    let mut duplicates: Vec<String> = Vec::new();
    for item in items {
        if counts[*item] > 1 && !duplicates.iter().any(|d| d.as_str() == *item) {
            duplicates.push((*item).to_string());
        }
    }

    if duplicates.is_empty() {
        None
    } else {
        Some(duplicates)
    }
}
