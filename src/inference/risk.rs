//! Risk bucketing, rule-based indicators and the single-factor explorer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::core::categories::{DayOfWeek, LocationType, Season, TimeOfDay};
use crate::core::records::IncidentQuery;
use crate::error::{Error, Result};
use crate::inference::ArrestPredictor;

const HIGH_THRESHOLD: f64 = 0.7;
const MEDIUM_THRESHOLD: f64 = 0.3;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// High above 0.7, Medium above 0.3, Low otherwise. Both bounds are exclusive.
    pub fn from_probability(p: f64) -> Self {
        if p > HIGH_THRESHOLD {
            RiskLevel::High
        } else if p > MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Dashboard colour for the level.
    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::High => "#ff4b4b",
            RiskLevel::Medium => "#ffa500",
            RiskLevel::Low => "#00cc96",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskIndicator {
    pub title: &'static str,
    pub detail: &'static str,
}

const fn indicator(title: &'static str, detail: &'static str) -> RiskIndicator {
    RiskIndicator { title, detail }
}

/// Contextual hints for a query, independent of the model.
pub fn indicators(query: &IncidentQuery) -> Vec<RiskIndicator> {
    let mut out = Vec::new();

    match query.effective_time_of_day() {
        Some(TimeOfDay::Night) => out.push(indicator("Night Time", "Higher risk period")),
        Some(TimeOfDay::Evening) => out.push(indicator("Evening Hours", "Moderate risk period")),
        _ => {}
    }

    let location = query
        .location_description
        .as_deref()
        .and_then(|l| l.parse::<LocationType>().ok());
    match location {
        Some(LocationType::Alley | LocationType::ParkingLot) => out.push(indicator(
            "High-Risk Location",
            "Areas with limited visibility",
        )),
        Some(LocationType::Residence | LocationType::School) => out.push(indicator(
            "Controlled Environment",
            "Lower risk location",
        )),
        _ => {}
    }

    if query.weekday().is_some_and(DayOfWeek::is_weekend_peak) {
        out.push(indicator("Weekend", "Higher activity periods"));
    }
    if query.effective_season() == Some(Season::Summer) {
        out.push(indicator("Summer Season", "Typically higher crime rates"));
    }
    out
}

pub fn recommendations(level: RiskLevel) -> [&'static str; 4] {
    match level {
        RiskLevel::High => [
            "Consider increased patrol presence",
            "Ensure emergency contacts are accessible",
            "Focus on high-visibility policing",
            "Monitor the area frequently",
        ],
        RiskLevel::Medium => [
            "Maintain regular patrol patterns",
            "Continue standard monitoring",
            "Stay alert for unusual activity",
            "Document any incidents",
        ],
        RiskLevel::Low => [
            "Normal patrol operations sufficient",
            "Continue community engagement",
            "Focus on preventive measures",
            "Maintain current safety protocols",
        ],
    }
}

/// Inputs the explorer can vary one at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    #[strum(to_string = "Location Type", serialize = "location_type")]
    LocationType,
    #[strum(to_string = "Time of Day", serialize = "time_of_day")]
    TimeOfDay,
    #[strum(to_string = "Day of Week", serialize = "day_of_week")]
    DayOfWeek,
    #[strum(to_string = "Season", serialize = "season")]
    Season,
}

const EXPLORED_LOCATIONS: [LocationType; 5] = [
    LocationType::Street,
    LocationType::Residence,
    LocationType::Apartment,
    LocationType::Sidewalk,
    LocationType::Other,
];

impl RiskFactor {
    /// Parses either the display name or the snake_case key.
    pub fn parse(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| Error::UnknownFactor(name.to_string()))
    }

    pub fn values(self) -> Vec<String> {
        match self {
            RiskFactor::LocationType => EXPLORED_LOCATIONS
                .iter()
                .map(|l| l.as_str().to_string())
                .collect(),
            RiskFactor::TimeOfDay => TimeOfDay::iter().map(|t| t.to_string()).collect(),
            RiskFactor::DayOfWeek => DayOfWeek::iter().map(|d| d.to_string()).collect(),
            RiskFactor::Season => Season::iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Copy of `base` with this factor set to `value`.
    fn apply(self, base: &IncidentQuery, value: &str) -> Result<IncidentQuery> {
        let mut q = base.clone();
        match self {
            RiskFactor::LocationType => q.location_description = Some(value.to_string()),
            RiskFactor::TimeOfDay => q.time_of_day = Some(value.to_string()),
            RiskFactor::Season => q.season = Some(value.to_string()),
            RiskFactor::DayOfWeek => {
                let day: DayOfWeek = value
                    .parse()
                    .map_err(|_| Error::InvalidParameter(format!("unknown day {value}")))?;
                q.day_of_week = Some(day.index() as f64);
            }
        }
        Ok(q)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorPoint {
    pub value: String,
    pub probability: f64,
}

/// Arrest probability of the baseline query as `factor` sweeps its values.
pub fn explore_factor(predictor: &ArrestPredictor, factor: RiskFactor) -> Result<Vec<FactorPoint>> {
    let base = IncidentQuery::baseline();
    factor
        .values()
        .into_iter()
        .map(|value| {
            let q = factor.apply(&base, &value)?;
            let probability = predictor.predict(&q)?.probability;
            Ok(FactorPoint { value, probability })
        })
        .collect()
}
