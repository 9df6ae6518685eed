use std::fmt::Display;
use std::str::FromStr;

use anyhow::Result;
use inquire::{Confirm, CustomType, MultiSelect, Select, Text, validator::Validation};

use crate::ui::cli::drivers::PromptDriver;

/// Terminal prompts backed by `inquire`.
pub struct InquireDriver;

/// Why `x` falls outside `[min, max]`, if it does.
fn out_of_range<T: PartialOrd + Display>(x: &T, min: Option<T>, max: Option<T>) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) if *x < lo || *x > hi => Some(format!("Must be between {lo} and {hi}")),
        (Some(lo), None) if *x < lo => Some(format!("Must be ≥ {lo}")),
        (None, Some(hi)) if *x > hi => Some(format!("Must be ≤ {hi}")),
        _ => None,
    }
}

fn ask_number<T>(title: &str, help: &str, default: T, min: Option<T>, max: Option<T>) -> Result<T>
where
    T: Clone + Copy + PartialOrd + Display + FromStr + Send + Sync + 'static,
{
    let answer = CustomType::<T>::new(title)
        .with_default(default)
        .with_help_message(help)
        .with_validator(move |x: &T| {
            Ok(match out_of_range(x, min, max) {
                Some(msg) => Validation::Invalid(msg.into()),
                None => Validation::Valid,
            })
        })
        .prompt()?;
    Ok(answer)
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_select(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        default: &str,
    ) -> Result<String> {
        let start = options.iter().position(|o| o == default).unwrap_or(0);
        Ok(Select::new(title, options.to_vec())
            .with_starting_cursor(start)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_multi_select(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>> {
        let checked: Vec<usize> = options
            .iter()
            .enumerate()
            .filter(|(_, o)| defaults.contains(o))
            .map(|(i, _)| i)
            .collect();
        Ok(MultiSelect::new(title, options.to_vec())
            .with_default(&checked)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        ask_number(title, help, default, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        ask_number(title, help, default, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_messages() {
        assert_eq!(out_of_range(&23u64, Some(0), Some(23)), None);
        assert_eq!(
            out_of_range(&24u64, Some(0), Some(23)).as_deref(),
            Some("Must be between 0 and 23")
        );
        assert_eq!(out_of_range(&0.0, Some(0.5), None).as_deref(), Some("Must be ≥ 0.5"));
        assert_eq!(out_of_range(&2.0, None, Some(1.0)).as_deref(), Some("Must be ≤ 1"));
        assert_eq!(out_of_range(&7u64, None, None), None);
    }
}
