use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::FEATURE_COUNT;
use crate::core::feature_header::CRIME_HEADER;
use crate::core::records::{CATEGORICAL_COUNT, IncidentQuery, NUMERIC_COUNT, RawFeatures};
use crate::error::{Error, Result};
use crate::features::{LabelEncoder, StandardScaler};

/// Fitted preprocessing shared by training and inference: label-encodes the
/// nominal columns, then standardises all columns in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePipeline {
    encoders: Vec<LabelEncoder>,
    scaler: StandardScaler,
}

impl FeaturePipeline {
    /// Fits on training rows and returns the scaled training matrix.
    pub fn fit(rows: &[RawFeatures]) -> Result<(Self, Array2<f64>)> {
        if rows.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let encoders = (0..CATEGORICAL_COUNT)
            .map(|c| LabelEncoder::fit(rows.iter().filter_map(|r| r.categorical[c].as_deref())))
            .collect::<Vec<_>>();

        let encoded = encode_rows(&encoders, rows);
        let scaler = StandardScaler::fit(encoded.view())?;
        let scaled = scaler.transform(encoded.view())?;
        Ok((Self { encoders, scaler }, scaled))
    }

    pub fn feature_names(&self) -> Vec<String> {
        CRIME_HEADER.column_names()
    }

    pub fn encoders(&self) -> &[LabelEncoder] {
        &self.encoders
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Encoded and scaled matrix for rows of the same layout as the fit data.
    pub fn transform_rows(&self, rows: &[RawFeatures]) -> Result<Array2<f64>> {
        let encoded = encode_rows(&self.encoders, rows);
        self.scaler.transform(encoded.view())
    }

    /// Unscaled 13-value vector for a user query. Missing values become 0.
    pub fn encode_query(&self, query: &IncidentQuery) -> Array1<f64> {
        let raw = query.raw_features();
        for column in raw.missing_columns() {
            warn!("Feature {column} not provided, defaulting to 0");
        }
        encode(&self.encoders, &raw)
    }

    pub fn scale(&self, row: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.scaler.transform_row(row)
    }
}

fn encode_rows(encoders: &[LabelEncoder], rows: &[RawFeatures]) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros((rows.len(), FEATURE_COUNT));
    for (mut dst, raw) in out.rows_mut().into_iter().zip(rows) {
        dst.assign(&encode(encoders, raw));
    }
    out
}

fn encode(encoders: &[LabelEncoder], raw: &RawFeatures) -> Array1<f64> {
    let mut v = Array1::<f64>::zeros(FEATURE_COUNT);
    for (i, value) in raw.numeric.iter().enumerate() {
        v[i] = value.unwrap_or(0.0);
    }
    for (c, (value, encoder)) in raw.categorical.iter().zip(encoders).enumerate() {
        v[NUMERIC_COUNT + c] = value.as_deref().map_or(0.0, |s| encoder.transform(s));
    }
    v
}
