//! Descriptive statistics over a loaded dataset, grouped into the views the
//! dashboard offers.

mod distribution;

use std::fmt::{Display, Formatter};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::core::categories::DayOfWeek;
use crate::core::records::CrimeRecord;
use crate::data::Dataset;

pub use distribution::{Chart, ChartPoint, counts_by_value, counts_over_range, rate_by, top_n};

pub const MAP_SAMPLE_LIMIT: usize = 1000;
const TOP_N: usize = 15;
const TOP_TYPES_SHARE: usize = 10;
const TOP_LOCATIONS: usize = 10;

/// Headline numbers shown above every analysis view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_records: usize,
    pub columns: usize,
    pub year_range: Option<(i64, i64)>,
    pub arrest_rate: Option<f64>,
}

impl DatasetOverview {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let records = dataset.records();
        let years = counts_by_value(records.iter().map(|r| r.year));
        let year_range = years
            .keys()
            .next()
            .zip(years.keys().next_back())
            .map(|(lo, hi)| (*lo, *hi));

        let outcomes: Vec<bool> = records.iter().filter_map(CrimeRecord::arrest_outcome).collect();
        let arrest_rate = (!outcomes.is_empty())
            .then(|| outcomes.iter().filter(|&&a| a).count() as f64 / outcomes.len() as f64);

        Self {
            total_records: records.len(),
            columns: dataset.columns().len(),
            year_range,
            arrest_rate,
        }
    }
}

impl Display for DatasetOverview {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Records: {}", self.total_records)?;
        writeln!(f, "Columns:       {}", self.columns)?;
        match self.year_range {
            Some((lo, hi)) => writeln!(f, "Date Range:    {lo}-{hi}")?,
            None => writeln!(f, "Date Range:    N/A")?,
        }
        match self.arrest_rate {
            Some(rate) => write!(f, "Arrest Rate:   {:.1}%", rate * 100.0),
            None => write!(f, "Arrest Rate:   N/A"),
        }
    }
}

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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AnalysisView {
    Trends,
    Spatial,
    CrimeTypes,
    Temporal,
    Arrests,
    Geographic,
    Locations,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Charts of one view, plus map points for the spatial view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisPanel {
    pub view: AnalysisView,
    pub charts: Vec<Chart>,
    pub map_points: Vec<GeoPoint>,
}

fn label_counts(counts: impl IntoIterator<Item = (i64, usize)>) -> Vec<ChartPoint> {
    counts
        .into_iter()
        .map(|(k, c)| ChartPoint::new(k.to_string(), c as f64))
        .collect()
}

fn label_top(top: Vec<(String, usize)>) -> Vec<ChartPoint> {
    top.into_iter()
        .map(|(k, c)| ChartPoint::new(k, c as f64))
        .collect()
}

fn top_numeric(values: impl IntoIterator<Item = Option<f64>>, n: usize) -> Vec<ChartPoint> {
    let keys = values
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()).map(|x| x.round() as i64));
    top_n(keys, n)
        .into_iter()
        .map(|(k, c)| ChartPoint::new(k.to_string(), c as f64))
        .collect()
}

/// Up to [`MAP_SAMPLE_LIMIT`] located incidents, drawn without replacement.
pub fn map_sample(records: &[CrimeRecord], seed: u64) -> Vec<GeoPoint> {
    let located: Vec<GeoPoint> = records
        .iter()
        .filter_map(|r| {
            Some(GeoPoint {
                latitude: r.latitude?,
                longitude: r.longitude?,
            })
        })
        .collect();
    if located.len() <= MAP_SAMPLE_LIMIT {
        return located;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    index::sample(&mut rng, located.len(), MAP_SAMPLE_LIMIT)
        .into_iter()
        .map(|i| located[i])
        .collect()
}

impl AnalysisView {
    pub fn render(self, dataset: &Dataset, seed: u64) -> AnalysisPanel {
        let r = dataset.records();
        let mut map_points = Vec::new();

        let charts = match self {
            AnalysisView::Trends => vec![
                Chart::new(
                    "Crimes by Year",
                    "Year",
                    "Number of Crimes",
                    label_counts(counts_by_value(r.iter().map(|x| x.year))),
                ),
                Chart::new(
                    "Crimes by Month",
                    "Month",
                    "Number of Crimes",
                    label_counts(counts_over_range(r.iter().map(|x| x.month), 1..13)),
                ),
            ],
            AnalysisView::Spatial => {
                map_points = map_sample(r, seed);
                vec![
                    Chart::new(
                        "Crimes by District",
                        "District",
                        "Number of Crimes",
                        label_counts(counts_by_value(r.iter().map(|x| x.district))),
                    ),
                    Chart::new(
                        "Top 15 Community Areas",
                        "Community Area",
                        "Number of Crimes",
                        top_numeric(r.iter().map(|x| x.community_area), TOP_N),
                    ),
                ]
            }
            AnalysisView::CrimeTypes => vec![
                Chart::new(
                    "Top 15 Crime Types",
                    "Crime Type",
                    "Number of Crimes",
                    label_top(top_n(r.iter().map(|x| x.primary_type.clone()), TOP_N)),
                ),
                Chart::new(
                    "Crime Type Distribution (Top 10)",
                    "Crime Type",
                    "Number of Crimes",
                    label_top(top_n(r.iter().map(|x| x.primary_type.clone()), TOP_TYPES_SHARE)),
                ),
            ],
            AnalysisView::Temporal => vec![
                Chart::new(
                    "Crimes by Hour of Day",
                    "Hour",
                    "Number of Crimes",
                    label_counts(counts_over_range(r.iter().map(|x| x.hour), 0..24)),
                ),
                Chart::new(
                    "Crimes by Day of Week",
                    "Day",
                    "Number of Crimes",
                    counts_over_range(r.iter().map(|x| x.day_of_week), 0..7)
                        .into_iter()
                        .filter_map(|(d, c)| {
                            let day = DayOfWeek::from_index(usize::try_from(d).ok()?)?;
                            Some(ChartPoint::new(day.to_string(), c as f64))
                        })
                        .collect(),
                ),
            ],
            AnalysisView::Arrests => {
                let mut by_type: Vec<(String, f64)> = rate_by(
                    r.iter()
                        .map(|x| (x.primary_type.clone(), x.arrest_outcome())),
                )
                .into_iter()
                .collect();
                by_type.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                by_type.truncate(TOP_N);

                let by_hour = rate_by(r.iter().map(|x| {
                    (
                        x.hour.filter(|h| h.is_finite()).map(|h| h.round() as i64),
                        x.arrest_outcome(),
                    )
                }));
                vec![
                    Chart::new(
                        "Arrest Rate by Crime Type (Top 15)",
                        "Crime Type",
                        "Arrest Rate",
                        by_type
                            .into_iter()
                            .map(|(k, v)| ChartPoint::new(k, v))
                            .collect(),
                    ),
                    Chart::new(
                        "Arrest Rate by Hour",
                        "Hour",
                        "Arrest Rate",
                        by_hour
                            .into_iter()
                            .map(|(h, v)| ChartPoint::new(h.to_string(), v))
                            .collect(),
                    ),
                ]
            }
            AnalysisView::Geographic => vec![
                Chart::new(
                    "Top 15 Wards by Crime Count",
                    "Ward",
                    "Number of Crimes",
                    top_numeric(r.iter().map(|x| x.ward), TOP_N),
                ),
                Chart::new(
                    "Top 15 Beats by Crime Count",
                    "Beat",
                    "Number of Crimes",
                    top_numeric(r.iter().map(|x| x.beat), TOP_N),
                ),
            ],
            AnalysisView::Locations => vec![Chart::new(
                "Top 10 Crime Locations",
                "Location",
                "Number of Crimes",
                label_top(top_n(r.iter().map(|x| x.location_raw.clone()), TOP_LOCATIONS)),
            )],
        };

        AnalysisPanel {
            view: self,
            charts,
            map_points,
        }
    }
}
