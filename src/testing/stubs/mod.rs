pub mod score_column_classifier;
pub mod scripted_driver;

pub use score_column_classifier::ScoreColumnClassifier;
pub use scripted_driver::ScriptedDriver;
