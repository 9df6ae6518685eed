use anyhow::Result;

pub trait PromptDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    /// One of `options`; `default` is preselected when present.
    fn ask_select(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        default: &str,
    ) -> Result<String>;
    /// Any subset of `options`; `defaults` start checked.
    fn ask_multi_select(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>>;
    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;
    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64>;
}
