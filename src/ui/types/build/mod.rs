mod error;
mod models;
mod split;
mod tasks;

pub use error::BuildError;

pub use models::build_models;
pub use tasks::{Task, build_task};
