use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Maps category strings to their rank among the sorted training values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: BTreeSet<&str> = values.into_iter().collect();
        Self {
            classes: classes.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Index of `value`, or `None` when it was never seen during fitting.
    pub fn lookup(&self, value: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
    }

    /// Encoded value; unseen categories fall back to code 0.
    pub fn transform(&self, value: &str) -> f64 {
        self.lookup(value).unwrap_or(0) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_sorted_order() {
        let enc = LabelEncoder::fit(["STREET", "ALLEY", "RESIDENCE", "ALLEY"]);
        assert_eq!(enc.classes(), ["ALLEY", "RESIDENCE", "STREET"]);
        assert_eq!(enc.transform("ALLEY"), 0.0);
        assert_eq!(enc.transform("RESIDENCE"), 1.0);
        assert_eq!(enc.transform("STREET"), 2.0);
    }

    #[test]
    fn unknown_value_encodes_to_zero() {
        let enc = LabelEncoder::fit(["Summer", "Winter"]);
        assert_eq!(enc.lookup("Monsoon"), None);
        assert_eq!(enc.transform("Monsoon"), 0.0);
    }
}
