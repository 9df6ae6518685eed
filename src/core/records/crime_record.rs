use serde::Deserialize;

use crate::core::records::csv_fields;
use crate::core::records::raw_features::RawFeatures;
use crate::core::target::PredictionTarget;

/// One incident row of the cleaned crime dataset.
///
/// Column names follow the dataset headers. Every field is optional: rows
/// with gaps still load and are filtered later by whoever needs complete
/// values (training drops them, analysis skips the missing cell).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CrimeRecord {
    #[serde(rename = "Latitude", default, deserialize_with = "csv_fields::number")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "csv_fields::number")]
    pub longitude: Option<f64>,
    #[serde(rename = "Beat", default, deserialize_with = "csv_fields::number")]
    pub beat: Option<f64>,
    #[serde(rename = "District", default, deserialize_with = "csv_fields::number")]
    pub district: Option<f64>,
    #[serde(rename = "Ward", default, deserialize_with = "csv_fields::number")]
    pub ward: Option<f64>,
    #[serde(
        rename = "Community Area",
        default,
        deserialize_with = "csv_fields::number"
    )]
    pub community_area: Option<f64>,
    #[serde(rename = "Hour", default, deserialize_with = "csv_fields::number")]
    pub hour: Option<f64>,
    #[serde(rename = "DayOfWeek", default, deserialize_with = "csv_fields::number")]
    pub day_of_week: Option<f64>,
    #[serde(rename = "Month", default, deserialize_with = "csv_fields::number")]
    pub month: Option<f64>,
    #[serde(rename = "Year", default, deserialize_with = "csv_fields::number")]
    pub year: Option<f64>,

    #[serde(
        rename = "Location_Description_Clean",
        default,
        deserialize_with = "csv_fields::text"
    )]
    pub location_description: Option<String>,
    #[serde(rename = "TimeOfDay", default, deserialize_with = "csv_fields::text")]
    pub time_of_day: Option<String>,
    #[serde(rename = "Season", default, deserialize_with = "csv_fields::text")]
    pub season: Option<String>,

    #[serde(rename = "Arrest_Target", default, deserialize_with = "csv_fields::flag")]
    pub arrest_target: Option<bool>,
    #[serde(rename = "Violent_Crime", default, deserialize_with = "csv_fields::flag")]
    pub violent_crime: Option<bool>,

    #[serde(rename = "Primary Type", default, deserialize_with = "csv_fields::text")]
    pub primary_type: Option<String>,
    #[serde(rename = "Arrest", default, deserialize_with = "csv_fields::flag")]
    pub arrest: Option<bool>,
    #[serde(
        rename = "Location Description",
        default,
        deserialize_with = "csv_fields::text"
    )]
    pub location_raw: Option<String>,
}

impl CrimeRecord {
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

    pub fn label(&self, target: PredictionTarget) -> Option<u8> {
        let flag = match target {
            PredictionTarget::Arrest => self.arrest_target,
            PredictionTarget::ViolentCrime => self.violent_crime,
        };
        flag.map(u8::from)
    }

    /// Arrest outcome for descriptive statistics: the raw `Arrest` column
    /// when present, otherwise the training label.
    pub fn arrest_outcome(&self) -> Option<bool> {
        self.arrest.or(self.arrest_target)
    }
}
