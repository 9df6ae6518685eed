use std::path::Path;

use csv::Writer;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::core::categories::{LocationType, Season, TimeOfDay};
use crate::core::records::CrimeRecord;
use crate::error::Result;

pub const SAMPLE_SIZE: usize = 5000;

const SAMPLE_LOCATIONS: [LocationType; 5] = [
    LocationType::Street,
    LocationType::Residence,
    LocationType::ParkingLot,
    LocationType::Apartment,
    LocationType::Sidewalk,
];

const ARREST_RATE: f64 = 0.2;

/// Synthetic records with uniformly drawn features and a 20% arrest rate.
///
/// Labels are independent of the features, so models trained on this data
/// sit near chance level. It exists to exercise the pipeline end to end.
pub fn generate_sample(n: usize, seed: u64) -> Vec<CrimeRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let times: Vec<TimeOfDay> = TimeOfDay::iter().collect();
    let seasons: Vec<Season> = Season::iter().collect();

    (0..n)
        .map(|_| {
            let location = SAMPLE_LOCATIONS
                .choose(&mut rng)
                .copied()
                .unwrap_or(LocationType::Street);
            let time_of_day = times.choose(&mut rng).copied().unwrap_or(TimeOfDay::Night);
            let season = seasons.choose(&mut rng).copied().unwrap_or(Season::Winter);

            CrimeRecord {
                latitude: Some(rng.random_range(41.6..42.1)),
                longitude: Some(rng.random_range(-87.95..-87.5)),
                beat: Some(rng.random_range(100..2000) as f64),
                district: Some(rng.random_range(1..25) as f64),
                ward: Some(rng.random_range(1..50) as f64),
                community_area: Some(rng.random_range(1..77) as f64),
                hour: Some(rng.random_range(0..24) as f64),
                day_of_week: Some(rng.random_range(0..7) as f64),
                month: Some(rng.random_range(1..13) as f64),
                year: Some(rng.random_range(2018..2024) as f64),
                location_description: Some(location.as_str().to_string()),
                time_of_day: Some(time_of_day.to_string()),
                season: Some(season.to_string()),
                arrest_target: Some(rng.random_bool(ARREST_RATE)),
                ..CrimeRecord::default()
            }
        })
        .collect()
}

#[derive(Serialize)]
struct SampleRow<'a> {
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
    #[serde(rename = "Beat")]
    beat: Option<i64>,
    #[serde(rename = "District")]
    district: Option<i64>,
    #[serde(rename = "Ward")]
    ward: Option<i64>,
    #[serde(rename = "Community Area")]
    community_area: Option<i64>,
    #[serde(rename = "Hour")]
    hour: Option<i64>,
    #[serde(rename = "DayOfWeek")]
    day_of_week: Option<i64>,
    #[serde(rename = "Month")]
    month: Option<i64>,
    #[serde(rename = "Year")]
    year: Option<i64>,
    #[serde(rename = "Location_Description_Clean")]
    location_description: Option<&'a str>,
    #[serde(rename = "TimeOfDay")]
    time_of_day: Option<&'a str>,
    #[serde(rename = "Season")]
    season: Option<&'a str>,
    #[serde(rename = "Arrest_Target")]
    arrest_target: Option<u8>,
    #[serde(rename = "Violent_Crime")]
    violent_crime: Option<u8>,
}

impl<'a> From<&'a CrimeRecord> for SampleRow<'a> {
    fn from(r: &'a CrimeRecord) -> Self {
        let whole = |v: Option<f64>| v.map(|x| x.round() as i64);
        Self {
            latitude: r.latitude,
            longitude: r.longitude,
            beat: whole(r.beat),
            district: whole(r.district),
            ward: whole(r.ward),
            community_area: whole(r.community_area),
            hour: whole(r.hour),
            day_of_week: whole(r.day_of_week),
            month: whole(r.month),
            year: whole(r.year),
            location_description: r.location_description.as_deref(),
            time_of_day: r.time_of_day.as_deref(),
            season: r.season.as_deref(),
            arrest_target: r.arrest_target.map(u8::from),
            violent_crime: r.violent_crime.map(u8::from),
        }
    }
}

/// Writes records in the cleaned-dataset column layout.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[CrimeRecord]) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = Writer::from_path(path)?;
    for r in records {
        writer.serialize(SampleRow::from(r))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::PredictionTarget;
    use crate::data::load_records;
    use tempfile::tempdir;

    #[test]
    fn sample_is_deterministic_for_a_seed() {
        assert_eq!(generate_sample(50, 42), generate_sample(50, 42));
        assert_ne!(generate_sample(50, 42), generate_sample(50, 7));
    }

    #[test]
    fn sample_values_stay_in_range() {
        for r in generate_sample(500, 42) {
            let lat = r.latitude.unwrap();
            assert!((41.6..42.1).contains(&lat));
            let lon = r.longitude.unwrap();
            assert!((-87.95..-87.5).contains(&lon));
            assert!((0.0..24.0).contains(&r.hour.unwrap()));
            assert!((1.0..13.0).contains(&r.month.unwrap()));
            assert!((2018.0..2024.0).contains(&r.year.unwrap()));
            assert!(r.raw_features().is_complete());
        }
    }

    #[test]
    fn arrest_rate_is_about_twenty_percent() {
        let rows = generate_sample(SAMPLE_SIZE, 42);
        let arrests = rows.iter().filter(|r| r.arrest_target == Some(true)).count();
        let rate = arrests as f64 / rows.len() as f64;
        assert!((0.17..0.23).contains(&rate), "rate {rate}");
    }

    #[test]
    fn written_sample_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.csv");
        let rows = generate_sample(20, 1);
        write_records(&path, &rows).unwrap();

        let ds = load_records(&path).unwrap();
        assert_eq!(ds.len(), 20);
        assert_eq!(ds.columns().len(), 15);
        let labelled = ds.labelled(PredictionTarget::Arrest).unwrap();
        assert_eq!(labelled.len(), 20);
        assert_eq!(ds.records()[3].hour, rows[3].hour);
        assert_eq!(ds.records()[3].location_description, rows[3].location_description);
        assert!(matches!(
            ds.labelled(PredictionTarget::ViolentCrime),
            Err(crate::error::Error::EmptyDataset)
        ));
    }

    #[test]
    fn violent_crime_labels_are_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("violent.csv");
        let mut rows = generate_sample(10, 2);
        for (i, r) in rows.iter_mut().enumerate() {
            r.violent_crime = Some(i % 2 == 0);
        }
        write_records(&path, &rows).unwrap();

        let labelled = load_records(&path)
            .unwrap()
            .labelled(PredictionTarget::ViolentCrime)
            .unwrap();
        assert_eq!(labelled.labels, [1, 0, 1, 0, 1, 0, 1, 0, 1, 0]);
    }
}
