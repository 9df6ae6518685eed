mod model_choice;
mod query_form;
mod schema;
mod split_choice;
mod task_choice;
mod ui_choice;

pub use model_choice::{ModelChoice, ModelChoiceKind};
pub use query_form::QueryForm;
pub use schema::*;
pub use split_choice::{SplitChoice, SplitKind, StratifiedParams, TemporalParams};
pub use task_choice::*;
pub use ui_choice::UIChoice;
