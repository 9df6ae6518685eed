use std::env;
use std::fs;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crimecast::ui::cli::drivers::InquireDriver;
use crimecast::ui::cli::run_task;
use crimecast::ui::cli::wizard::prompt_choice;
use crimecast::ui::types::build::build_task;
use crimecast::ui::types::choices::TaskChoice;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crimecast=info,tower_http=info")),
        )
        .init();

    // a task file skips the wizard
    let choice: TaskChoice = match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("cannot read {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("invalid task file {path}"))?
        }
        None => prompt_choice(&InquireDriver)?,
    };

    let task = build_task(choice)?;
    run_task(task)
}
