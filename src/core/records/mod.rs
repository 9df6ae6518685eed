mod crime_record;
pub(crate) mod csv_fields;
mod incident_query;
mod raw_features;

pub use crime_record::CrimeRecord;
pub use incident_query::IncidentQuery;
pub use raw_features::{CATEGORICAL_COUNT, NUMERIC_COUNT, RawFeatures};
