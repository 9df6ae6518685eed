pub mod drivers;
mod runner;
pub mod wizard;

pub use runner::run_task;
