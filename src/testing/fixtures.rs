use ndarray::{Array2, array};

use crate::classifiers::{Classifier, LogisticRegression, TrainedModel};
use crate::core::categories::TimeOfDay;
use crate::core::records::{CrimeRecord, RawFeatures};
use crate::core::target::PredictionTarget;
use crate::data::generate_sample;
use crate::features::FeaturePipeline;
use crate::inference::{ArrestPredictor, ModelArtifact};

/// Two informative features, six points per class, linearly separable.
pub fn separable_set() -> (Array2<f64>, Vec<u8>) {
    let x = array![
        [-2.0, -1.5],
        [-1.5, -2.0],
        [-1.0, -1.0],
        [-2.0, -1.0],
        [-1.2, -1.8],
        [-1.8, -0.9],
        [1.0, 1.5],
        [1.5, 1.0],
        [2.0, 2.0],
        [1.2, 1.8],
        [1.8, 1.1],
        [1.0, 1.0],
    ];
    let y = vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1];
    (x, y)
}

/// Sample records whose arrest label is "incident happened at night".
///
/// `TimeOfDay` is made consistent with `Hour`, so the rule is learnable
/// from either column.
pub fn night_arrest_records(n: usize, seed: u64) -> Vec<CrimeRecord> {
    generate_sample(n, seed)
        .into_iter()
        .map(|mut r| {
            let hour = r.hour.unwrap_or(0.0) as u32;
            let time_of_day = TimeOfDay::from_hour(hour);
            r.time_of_day = Some(time_of_day.to_string());
            r.arrest_target = Some(time_of_day == TimeOfDay::Night);
            r
        })
        .collect()
}

pub fn raw_rows(records: &[CrimeRecord]) -> (Vec<RawFeatures>, Vec<u8>) {
    records
        .iter()
        .filter_map(|r| Some((r.raw_features(), r.label(PredictionTarget::Arrest)?)))
        .unzip()
}

/// Logistic regression artifact fitted on [`night_arrest_records`].
pub fn trained_artifact() -> ModelArtifact {
    let records = night_arrest_records(300, 7);
    let (rows, labels) = raw_rows(&records);
    let (pipeline, x) = FeaturePipeline::fit(&rows).unwrap();

    let mut model = TrainedModel::LogisticRegression(LogisticRegression::default());
    model.fit(x.view(), &labels).unwrap();
    ModelArtifact::new(PredictionTarget::Arrest, model, pipeline, None)
}

pub fn trained_predictor() -> ArrestPredictor {
    ArrestPredictor::from_artifact(trained_artifact()).unwrap()
}
