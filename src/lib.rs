pub mod analysis;
pub mod classifiers;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod inference;
pub mod tasks;
pub mod ui;

pub use error::{Error, Result};

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
