mod encoder;
mod pipeline;
mod scaler;

pub use encoder::LabelEncoder;
pub use pipeline::FeaturePipeline;
pub use scaler::StandardScaler;
