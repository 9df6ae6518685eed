use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::categories::{DayOfWeek, LocationType, Season, TimeOfDay};
use crate::core::records::IncidentQuery;

/// Prediction form answered field by field in the wizard. Time of day and
/// season are derived from the hour and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueryForm {
    #[schemars(title = "Latitude", range(min = 41.6, max = 42.1))]
    pub latitude: f64,
    #[schemars(title = "Longitude", range(min = -87.95, max = -87.5))]
    pub longitude: f64,
    #[schemars(title = "Beat", range(min = 111, max = 2535))]
    pub beat: u32,
    #[schemars(title = "District", range(min = 1, max = 31))]
    pub district: u32,
    #[schemars(title = "Ward", range(min = 1, max = 50))]
    pub ward: u32,
    #[schemars(title = "Community Area", range(min = 1, max = 77))]
    pub community_area: u32,
    #[schemars(title = "Location Type")]
    pub location_type: LocationType,
    #[schemars(title = "Year", range(min = 2001, max = 2023))]
    pub year: u32,
    #[schemars(title = "Month", range(min = 1, max = 12))]
    pub month: u32,
    #[schemars(title = "Hour of Day", range(min = 0, max = 23))]
    pub hour: u32,
    #[schemars(title = "Day of Week")]
    pub day_of_week: DayOfWeek,
}

impl Default for QueryForm {
    fn default() -> Self {
        Self {
            latitude: 41.8781,
            longitude: -87.6298,
            beat: 1032,
            district: 10,
            ward: 23,
            community_area: 32,
            location_type: LocationType::Street,
            year: 2020,
            month: 6,
            hour: 12,
            day_of_week: DayOfWeek::Monday,
        }
    }
}

impl From<QueryForm> for IncidentQuery {
    fn from(f: QueryForm) -> Self {
        IncidentQuery {
            latitude: Some(f.latitude),
            longitude: Some(f.longitude),
            beat: Some(f64::from(f.beat)),
            district: Some(f64::from(f.district)),
            ward: Some(f64::from(f.ward)),
            community_area: Some(f64::from(f.community_area)),
            hour: Some(f64::from(f.hour)),
            day_of_week: Some(f.day_of_week.index() as f64),
            month: Some(f64::from(f.month)),
            year: Some(f64::from(f.year)),
            location_description: Some(f.location_type.as_str().to_string()),
            time_of_day: Some(TimeOfDay::from_hour(f.hour).to_string()),
            season: Some(Season::from_month(f.month).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{specs_for_struct, schema_for};

    #[test]
    fn derives_time_of_day_and_season() {
        let form = QueryForm {
            hour: 22,
            month: 1,
            day_of_week: DayOfWeek::Saturday,
            location_type: LocationType::ParkingLot,
            ..QueryForm::default()
        };
        let q = IncidentQuery::from(form);
        assert_eq!(q.time_of_day.as_deref(), Some("Night"));
        assert_eq!(q.season.as_deref(), Some("Winter"));
        assert_eq!(q.day_of_week, Some(5.0));
        assert_eq!(q.location_description.as_deref(), Some("PARKING LOT"));
    }

    #[test]
    fn form_schema_offers_location_choices() {
        let specs = specs_for_struct(&schema_for::<QueryForm>()).unwrap();
        assert_eq!(specs.len(), 11);
        let location = specs.iter().find(|s| s.name == "location_type").unwrap();
        assert!(location.options.iter().any(|o| o == "PARKING LOT"));
        let beat = specs.iter().find(|s| s.name == "beat").unwrap();
        assert_eq!(beat.max, Some(2535.0));
    }

    #[test]
    fn default_form_round_trips_through_json() {
        let v = serde_json::to_value(QueryForm::default()).unwrap();
        assert_eq!(v["location_type"], "STREET");
        let back: QueryForm = serde_json::from_value(v).unwrap();
        assert_eq!(back, QueryForm::default());
    }
}
