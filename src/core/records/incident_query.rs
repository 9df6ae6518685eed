use serde::{Deserialize, Serialize};

use crate::core::categories::{DayOfWeek, LocationType, Season, TimeOfDay};
use crate::core::records::raw_features::RawFeatures;

/// User-supplied incident description for a single prediction.
///
/// Accepts snake_case keys as well as the dataset column names, so a row
/// copied from the CSV can be posted as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentQuery {
    #[serde(default, alias = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(default, alias = "Beat")]
    pub beat: Option<f64>,
    #[serde(default, alias = "District")]
    pub district: Option<f64>,
    #[serde(default, alias = "Ward")]
    pub ward: Option<f64>,
    #[serde(default, alias = "Community Area")]
    pub community_area: Option<f64>,
    #[serde(default, alias = "Hour")]
    pub hour: Option<f64>,
    #[serde(default, alias = "DayOfWeek")]
    pub day_of_week: Option<f64>,
    #[serde(default, alias = "Month")]
    pub month: Option<f64>,
    #[serde(default, alias = "Year")]
    pub year: Option<f64>,
    #[serde(
        default,
        alias = "Location_Description_Clean",
        alias = "location_type"
    )]
    pub location_description: Option<String>,
    #[serde(default, alias = "TimeOfDay")]
    pub time_of_day: Option<String>,
    #[serde(default, alias = "Season")]
    pub season: Option<String>,
}

impl IncidentQuery {
    /// Reference scenario used by the risk-factor explorer: a weekday
    /// summer afternoon on a downtown street.
    pub fn baseline() -> Self {
        Self {
            latitude: Some(41.8781),
            longitude: Some(-87.6298),
            beat: Some(1032.0),
            district: Some(10.0),
            ward: Some(23.0),
            community_area: Some(32.0),
            hour: Some(12.0),
            day_of_week: Some(2.0),
            month: Some(6.0),
            year: Some(2020.0),
            location_description: Some(LocationType::Street.as_str().to_string()),
            time_of_day: Some(TimeOfDay::Afternoon.to_string()),
            season: Some(Season::Summer.to_string()),
        }
    }

    pub fn raw_features(&self) -> RawFeatures {
        RawFeatures::new(
            [
                self.latitude,
                self.longitude,
                self.beat,
                self.district,
                self.ward,
                self.community_area,
                self.hour,
                self.day_of_week,
                self.month,
                self.year,
            ],
            [
                self.location_description.clone(),
                self.time_of_day.clone(),
                self.season.clone(),
            ],
        )
    }

    /// Time of day as given, or derived from the hour.
    pub fn effective_time_of_day(&self) -> Option<TimeOfDay> {
        self.time_of_day
            .as_deref()
            .and_then(|s| s.parse().ok())
            .or_else(|| self.hour.map(|h| TimeOfDay::from_hour(h.max(0.0) as u32)))
    }

    /// Season as given, or derived from the month.
    pub fn effective_season(&self) -> Option<Season> {
        self.season
            .as_deref()
            .and_then(|s| s.parse().ok())
            .or_else(|| self.month.map(|m| Season::from_month(m.max(0.0) as u32)))
    }

    pub fn weekday(&self) -> Option<DayOfWeek> {
        self.day_of_week
            .filter(|d| *d >= 0.0)
            .and_then(|d| DayOfWeek::from_index(d as usize))
    }
}
