use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use anyhow::Result;

use crate::ui::cli::drivers::PromptDriver;

/// Answers string prompts from a queue, selects by prompt title, and
/// accepts every other default.
#[derive(Default)]
pub struct ScriptedDriver {
    pub strings: RefCell<VecDeque<String>>,
    pub selects: HashMap<&'static str, &'static str>,
    pub multi_selects: HashMap<&'static str, Vec<&'static str>>,
}

impl ScriptedDriver {
    pub fn with_strings(answers: &[&str]) -> Self {
        Self {
            strings: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, _: &str, _: &str, default: bool) -> Result<bool> {
        Ok(default)
    }

    fn ask_string(&self, _: &str, _: &str, default: &str) -> Result<String> {
        Ok(self
            .strings
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| default.to_string()))
    }

    fn ask_select(
        &self,
        title: &str,
        _: &str,
        options: &[String],
        default: &str,
    ) -> Result<String> {
        let answer = self.selects.get(title).copied().unwrap_or(default).to_string();
        assert!(options.contains(&answer), "{answer} is not an option of {title}");
        Ok(answer)
    }

    fn ask_multi_select(
        &self,
        title: &str,
        _: &str,
        options: &[String],
        defaults: &[String],
    ) -> Result<Vec<String>> {
        let Some(picked) = self.multi_selects.get(title) else {
            return Ok(defaults.to_vec());
        };
        let answers: Vec<String> = picked.iter().map(|s| s.to_string()).collect();
        for a in &answers {
            assert!(options.contains(a), "{a} is not an option of {title}");
        }
        Ok(answers)
    }

    fn ask_u64(
        &self,
        _: &str,
        _: &str,
        default: u64,
        _: Option<u64>,
        _: Option<u64>,
    ) -> Result<u64> {
        Ok(default)
    }

    fn ask_f64(
        &self,
        _: &str,
        _: &str,
        default: f64,
        _: Option<f64>,
        _: Option<f64>,
    ) -> Result<f64> {
        Ok(default)
    }
}
