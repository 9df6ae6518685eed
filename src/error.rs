use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("dataset contains no usable records")]
    EmptyDataset,

    #[error("labels contain a single class ({0}); both classes are required")]
    SingleClass(u8),

    #[error("expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("model has not been fitted")]
    NotFitted,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("no trained model produced an AUC score")]
    NoModelWithAuc,

    #[error("unknown risk factor: {0}")]
    UnknownFactor(String),
}
