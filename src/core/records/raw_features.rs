use crate::config::{CATEGORICAL_FEATURES, NUMERICAL_FEATURES};
use crate::core::categories::{Season, TimeOfDay};

pub const NUMERIC_COUNT: usize = NUMERICAL_FEATURES.len();
pub const CATEGORICAL_COUNT: usize = CATEGORICAL_FEATURES.len();

const HOUR: usize = 6;
const MONTH: usize = 8;
const TIME_OF_DAY: usize = 1;
const SEASON: usize = 2;

/// Unencoded feature values in header order, each possibly missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeatures {
    pub numeric: [Option<f64>; NUMERIC_COUNT],
    pub categorical: [Option<String>; CATEGORICAL_COUNT],
}

impl RawFeatures {
    pub fn new(
        numeric: [Option<f64>; NUMERIC_COUNT],
        categorical: [Option<String>; CATEGORICAL_COUNT],
    ) -> Self {
        let mut raw = Self {
            numeric,
            categorical,
        };
        raw.fill_derived();
        raw
    }

    /// Fills `TimeOfDay` from `Hour` and `Season` from `Month` when absent.
    fn fill_derived(&mut self) {
        if self.categorical[TIME_OF_DAY].is_none() {
            if let Some(hour) = self.numeric[HOUR].filter(|h| *h >= 0.0) {
                self.categorical[TIME_OF_DAY] =
                    Some(TimeOfDay::from_hour(hour as u32).to_string());
            }
        }
        if self.categorical[SEASON].is_none() {
            if let Some(month) = self.numeric[MONTH].filter(|m| *m >= 0.0) {
                self.categorical[SEASON] = Some(Season::from_month(month as u32).to_string());
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.numeric.iter().all(Option::is_some) && self.categorical.iter().all(Option::is_some)
    }

    pub fn missing_columns(&self) -> Vec<&'static str> {
        let numeric = self
            .numeric
            .iter()
            .zip(NUMERICAL_FEATURES)
            .filter(|(v, _)| v.is_none())
            .map(|(_, name)| name);
        let categorical = self
            .categorical
            .iter()
            .zip(CATEGORICAL_FEATURES)
            .filter(|(v, _)| v.is_none())
            .map(|(_, name)| name);
        numeric.chain(categorical).collect()
    }
}
