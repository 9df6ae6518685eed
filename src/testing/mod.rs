pub mod fixtures;
pub mod stubs;

pub use stubs::{ScoreColumnClassifier, ScriptedDriver};
