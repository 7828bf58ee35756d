use crate::error::DatasetError;

use std::collections::HashMap;
use std::path::Path;

/// One observation: a label for every dimension, plus a numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub labels: Vec<String>,
    pub value: f64,
}

/// A minimal long-format tabular dataset: a fixed, ordered set of
/// categorical dimension columns and one numeric value column.
///
/// All operations follow functional-update semantics: they return a new
/// dataset and leave the input untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    dimensions: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates a dataset, checking that every row carries exactly one
    /// label per dimension.
    pub fn new(dimensions: Vec<String>, rows: Vec<Row>) -> Result<Self, DatasetError> {
        for row in &rows {
            if row.labels.len() != dimensions.len() {
                return Err(DatasetError::Malformed(format!(
                    "row has {} labels, expected {}",
                    row.labels.len(),
                    dimensions.len()
                )));
            }
        }

        Ok(Self { dimensions, rows })
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn dimension_index(&self, dimension: &str) -> Result<usize, DatasetError> {
        self.dimensions
            .iter()
            .position(|d| d == dimension)
            .ok_or_else(|| DatasetError::UnknownDimension(dimension.to_string()))
    }

    /// The values of one dimension column, in row order.
    pub fn dimension_values(&self, dimension: &str) -> Result<Vec<&str>, DatasetError> {
        let index = self.dimension_index(dimension)?;
        Ok(self.rows.iter().map(|row| row.labels[index].as_str()).collect())
    }

    /// Returns a new dataset with the labels of `dimension` replaced
    /// through `mapping`; labels without an entry pass through
    /// unchanged.
    ///
    /// With `check_duplicates` set, rows that end up sharing a label
    /// tuple are an error. Callers that collapse many labels onto one
    /// deliberately pass `false` and leave row merging to
    /// [`Dataset::merge_duplicates`].
    pub fn rename_dimension(
        &self,
        dimension: &str,
        mapping: &HashMap<String, String>,
        check_duplicates: bool,
    ) -> Result<Dataset, DatasetError> {
        let index = self.dimension_index(dimension)?;

        let mut rows = self.rows.clone();
        for row in &mut rows {
            if let Some(target) = mapping.get(&row.labels[index]) {
                row.labels[index] = target.clone();
            }
        }

        if check_duplicates {
            let mut counts: HashMap<&[String], usize> = HashMap::new();
            for row in &rows {
                *counts.entry(row.labels.as_slice()).or_insert(0) += 1;
            }
            let collisions = counts.values().filter(|&&n| n > 1).count();
            if collisions > 0 {
                return Err(DatasetError::DuplicateRows(collisions));
            }
        }

        Ok(Dataset {
            dimensions: self.dimensions.clone(),
            rows,
        })
    }

    /// Sums the values of rows sharing a label tuple. Rows keep the
    /// order in which their label tuple first appeared.
    pub fn merge_duplicates(&self) -> Dataset {
        let mut order: Vec<Vec<String>> = Vec::new();
        let mut totals: HashMap<Vec<String>, f64> = HashMap::new();

        for row in &self.rows {
            if !totals.contains_key(&row.labels) {
                order.push(row.labels.clone());
            }
            *totals.entry(row.labels.clone()).or_insert(0.0) += row.value;
        }

        let rows = order
            .into_iter()
            .map(|labels| {
                let value = totals[&labels];
                Row { labels, value }
            })
            .collect();

        Dataset {
            dimensions: self.dimensions.clone(),
            rows,
        }
    }

    /// Reads a long-format CSV file: one column per dimension and a
    /// trailing `value` column.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
        let mut reader = csv::Reader::from_path(path)?;

        let mut dimensions: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        match dimensions.pop() {
            Some(last) if last == "value" => {}
            _ => {
                return Err(DatasetError::Malformed(
                    "last column must be 'value'".into(),
                ));
            }
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let fields: Vec<&str> = record.iter().collect();
            let Some((raw_value, labels)) = fields.split_last() else {
                return Err(DatasetError::Malformed("empty record".into()));
            };
            if labels.len() != dimensions.len() {
                return Err(DatasetError::Malformed(format!(
                    "record has {} fields, expected {}",
                    fields.len(),
                    dimensions.len() + 1
                )));
            }
            let value: f64 = raw_value.trim().parse().map_err(|_| {
                DatasetError::Malformed(format!("non-numeric value '{raw_value}'"))
            })?;
            rows.push(Row {
                labels: labels.iter().map(|s| s.to_string()).collect(),
                value,
            });
        }

        Ok(Dataset { dimensions, rows })
    }

    /// Writes the dataset as long-format CSV to `path`.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), DatasetError> {
        self.write_csv(csv::Writer::from_path(path)?)
    }

    /// Writes the dataset as long-format CSV to an open writer.
    pub fn write_csv<W: std::io::Write>(&self, mut writer: csv::Writer<W>) -> Result<(), DatasetError> {
        let mut header: Vec<&str> = self.dimensions.iter().map(String::as_str).collect();
        header.push("value");
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record: Vec<String> = row.labels.clone();
            record.push(row.value.to_string());
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sector_dataset() -> Dataset {
        Dataset::new(
            vec!["Sector".into()],
            vec![
                Row { labels: vec!["Coal".into()], value: 1.0 },
                Row { labels: vec!["Solar".into()], value: 2.0 },
                Row { labels: vec!["Nuclear".into()], value: 3.0 },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_mismatched_row_width_is_rejected() {
        let result = Dataset::new(
            vec!["Sector".into(), "Region".into()],
            vec![Row { labels: vec!["Coal".into()], value: 1.0 }],
        );
        assert!(matches!(result, Err(DatasetError::Malformed(_))));
    }

    #[test]
    fn test_rename_passes_unmapped_labels_through() {
        let dataset = sector_dataset();
        let mapping = HashMap::from([("Coal".to_string(), "Fossil".to_string())]);

        let renamed = dataset.rename_dimension("Sector", &mapping, false).unwrap();
        assert_eq!(
            renamed.dimension_values("Sector").unwrap(),
            vec!["Fossil", "Solar", "Nuclear"]
        );
        // Input is untouched
        assert_eq!(
            dataset.dimension_values("Sector").unwrap(),
            vec!["Coal", "Solar", "Nuclear"]
        );
    }

    #[test]
    fn test_rename_unknown_dimension_fails() {
        let dataset = sector_dataset();
        let result = dataset.rename_dimension("Region", &HashMap::new(), false);
        assert!(matches!(result, Err(DatasetError::UnknownDimension(_))));
    }

    #[test]
    fn test_rename_with_duplicate_check_rejects_collapsing_rows() {
        let dataset = sector_dataset();
        let mapping = HashMap::from([
            ("Coal".to_string(), "Energy".to_string()),
            ("Solar".to_string(), "Energy".to_string()),
        ]);

        assert!(dataset.rename_dimension("Sector", &mapping, false).is_ok());
        let result = dataset.rename_dimension("Sector", &mapping, true);
        assert!(matches!(result, Err(DatasetError::DuplicateRows(1))));
    }

    #[test]
    fn test_merge_duplicates_sums_values() {
        let dataset = Dataset::new(
            vec!["Sector".into()],
            vec![
                Row { labels: vec!["Fossil".into()], value: 1.0 },
                Row { labels: vec!["Solar".into()], value: 2.0 },
                Row { labels: vec!["Fossil".into()], value: 4.0 },
            ],
        )
        .unwrap();

        let merged = dataset.merge_duplicates();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.rows()[0].labels, vec!["Fossil".to_string()]);
        assert_eq!(merged.rows()[0].value, 5.0);
        assert_eq!(merged.rows()[1].value, 2.0);
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Sector,Region,value").unwrap();
        writeln!(file, "Coal,Europe,10.5").unwrap();
        writeln!(file, "Solar,Asia,3").unwrap();

        let dataset = Dataset::from_csv(&path).unwrap();
        assert_eq!(dataset.dimensions(), ["Sector", "Region"]);
        assert_eq!(dataset.rows()[0].value, 10.5);

        let out = dir.path().join("out.csv");
        dataset.to_csv(&out).unwrap();
        assert_eq!(Dataset::from_csv(&out).unwrap(), dataset);
    }

    #[test]
    fn test_csv_without_value_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Sector,Region").unwrap();
        writeln!(file, "Coal,Europe").unwrap();

        assert!(matches!(
            Dataset::from_csv(&path),
            Err(DatasetError::Malformed(_))
        ));
    }
}
