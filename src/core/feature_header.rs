use crate::config::{CATEGORICAL_FEATURES, FEATURE_COUNT, NUMERICAL_FEATURES};

/// One model input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureAttribute {
    /// Column name in the CSV dataset.
    pub column: &'static str,
    /// Human label used by charts.
    pub display_name: &'static str,
}

/// Ordered schema of the model inputs. Every feature vector built by the
/// crate follows this order: numeric columns first, then nominal ones.
#[derive(Debug, Clone, Copy)]
pub struct FeatureHeader {
    attributes: &'static [FeatureAttribute],
}

const fn numeric(column: &'static str) -> FeatureAttribute {
    FeatureAttribute {
        column,
        display_name: column,
    }
}

const fn nominal(column: &'static str, display_name: &'static str) -> FeatureAttribute {
    FeatureAttribute {
        column,
        display_name,
    }
}

const CRIME_ATTRIBUTES: [FeatureAttribute; FEATURE_COUNT] = [
    numeric(NUMERICAL_FEATURES[0]),
    numeric(NUMERICAL_FEATURES[1]),
    numeric(NUMERICAL_FEATURES[2]),
    numeric(NUMERICAL_FEATURES[3]),
    numeric(NUMERICAL_FEATURES[4]),
    numeric(NUMERICAL_FEATURES[5]),
    numeric(NUMERICAL_FEATURES[6]),
    numeric(NUMERICAL_FEATURES[7]),
    numeric(NUMERICAL_FEATURES[8]),
    numeric(NUMERICAL_FEATURES[9]),
    nominal(CATEGORICAL_FEATURES[0], "Location Type"),
    nominal(CATEGORICAL_FEATURES[1], "Time of Day"),
    nominal(CATEGORICAL_FEATURES[2], "Season"),
];

pub const CRIME_HEADER: FeatureHeader = FeatureHeader {
    attributes: &CRIME_ATTRIBUTES,
};

impl FeatureHeader {
    pub fn column_names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.column.to_string()).collect()
    }

    pub fn display_names(&self) -> Vec<String> {
        self.attributes
            .iter()
            .map(|a| a.display_name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lists_thirteen_features_in_model_order() {
        assert_eq!(
            CRIME_HEADER.column_names(),
            vec![
                "Latitude",
                "Longitude",
                "Beat",
                "District",
                "Ward",
                "Community Area",
                "Hour",
                "DayOfWeek",
                "Month",
                "Year",
                "Location_Description_Clean",
                "TimeOfDay",
                "Season",
            ]
        );
    }

    #[test]
    fn nominal_columns_use_chart_labels() {
        let names = CRIME_HEADER.display_names();
        assert_eq!(names.len(), FEATURE_COUNT);
        assert_eq!(names[0], "Latitude");
        assert_eq!(&names[10..], ["Location Type", "Time of Day", "Season"]);
    }
}
