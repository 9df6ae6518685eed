//! Dataset loading, synthetic sample generation and train/test splitting.

mod sample;
pub mod split;

use std::path::{Path, PathBuf};

use csv::Reader;
use tracing::{debug, info, warn};

use crate::core::records::{CrimeRecord, RawFeatures};
use crate::core::target::PredictionTarget;
use crate::error::{Error, Result};

pub use sample::{SAMPLE_SIZE, generate_sample, write_records};

/// Crime records loaded from a CSV file.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CrimeRecord>,
    columns: Vec<String>,
    source: PathBuf,
}

/// Complete rows for one target, in file order.
#[derive(Debug, Clone, Default)]
pub struct LabelledRows {
    pub features: Vec<RawFeatures>,
    pub labels: Vec<u8>,
}

impl LabelledRows {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `Year` of every row, used by the temporal split.
    pub fn years(&self) -> Vec<f64> {
        self.features
            .iter()
            .map(|f| f.numeric[9].unwrap_or(f64::NAN))
            .collect()
    }

    pub fn select(&self, indices: &[usize]) -> LabelledRows {
        LabelledRows {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

/// Reads a headed CSV file of crime records.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let mut reader = Reader::from_path(path)?;
    let columns = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    for row in reader.deserialize::<CrimeRecord>() {
        records.push(row?);
    }

    info!(
        "Loaded {} records with {} columns from {}",
        records.len(),
        columns.len(),
        path.display()
    );
    Ok(Dataset {
        records,
        columns,
        source: path.to_path_buf(),
    })
}

impl Dataset {
    pub fn from_records(records: Vec<CrimeRecord>, columns: Vec<String>) -> Self {
        Self {
            records,
            columns,
            source: PathBuf::new(),
        }
    }

    pub fn records(&self) -> &[CrimeRecord] {
        &self.records
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature rows and labels for `target`, skipping rows with any gap.
    pub fn labelled(&self, target: PredictionTarget) -> Result<LabelledRows> {
        let mut rows = LabelledRows::default();
        let mut dropped = 0usize;

        for record in &self.records {
            let features = record.raw_features();
            match record.label(target) {
                Some(label) if features.is_complete() => {
                    rows.features.push(features);
                    rows.labels.push(label);
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(
                "Dropped {dropped} of {} rows with missing features or `{}` label",
                self.records.len(),
                target.column()
            );
        }
        if rows.is_empty() {
            return Err(Error::EmptyDataset);
        }
        debug!("{} labelled rows for target {target}", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Latitude,Longitude,Beat,District,Ward,Community Area,Hour,DayOfWeek,Month,Year,Location_Description_Clean,TimeOfDay,Season,Arrest_Target";

    fn csv_file(rows: &[&str]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "{HEADER}").unwrap();
        for r in rows {
            writeln!(f, "{r}").unwrap();
        }
        f
    }

    #[test]
    fn loads_and_counts_columns() {
        let f = csv_file(&[
            "41.8,-87.6,1032,10,23,32,12,2,6,2020,STREET,Afternoon,Summer,0",
            "41.9,-87.7,111,1,42,8,23,5,1,2019,ALLEY,Night,Winter,1",
        ]);
        let ds = load_records(f.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns().len(), 14);
        assert!(ds.has_column("Arrest_Target"));
        assert!(!ds.has_column("Primary Type"));
        assert_eq!(ds.source(), f.path());
    }

    #[test]
    fn labelled_drops_incomplete_rows() {
        let f = csv_file(&[
            "41.8,-87.6,1032,10,23,32,12,2,6,2020,STREET,Afternoon,Summer,0",
            ",-87.7,111,1,42,8,23,5,1,2019,ALLEY,Night,Winter,1",
            "41.9,-87.7,111,1,42,8,23,5,1,2019,ALLEY,Night,Winter,",
            "41.9,-87.7,111,1,42,8,3,5,1,2019,ALLEY,,,1",
        ]);
        let ds = load_records(f.path()).unwrap();
        let rows = ds.labelled(PredictionTarget::Arrest).unwrap();
        assert_eq!(rows.labels, vec![0, 1]);
        assert_eq!(rows.years(), vec![2020.0, 2019.0]);
        assert_eq!(rows.features[1].categorical[1].as_deref(), Some("Night"));
    }

    #[test]
    fn labelled_without_target_column_is_empty() {
        let f = csv_file(&["41.8,-87.6,1032,10,23,32,12,2,6,2020,STREET,Afternoon,Summer,0"]);
        let ds = load_records(f.path()).unwrap();
        assert!(matches!(
            ds.labelled(PredictionTarget::ViolentCrime),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_records("/definitely/not/here.csv").is_err());
    }
}
