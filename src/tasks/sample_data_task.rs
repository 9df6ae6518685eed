use std::path::{Path, PathBuf};

use tracing::info;

use crate::data::{generate_sample, write_records};
use crate::error::{Error, Result};

/// Writes a synthetic crime CSV for trying the pipeline without real data.
pub struct SampleDataTask {
    output: PathBuf,
    n_samples: usize,
    seed: u64,
}

impl SampleDataTask {
    pub fn new<P: Into<PathBuf>>(output: P, n_samples: usize, seed: u64) -> Result<Self> {
        if n_samples == 0 {
            return Err(Error::InvalidParameter("n_samples must be > 0".into()));
        }
        Ok(Self {
            output: output.into(),
            n_samples,
            seed,
        })
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn run(self) -> Result<PathBuf> {
        let records = generate_sample(self.n_samples, self.seed);
        write_records(&self.output, &records)?;
        info!(
            "Sample data created with {} records at {}",
            records.len(),
            self.output.display()
        );
        Ok(self.output)
    }
}
