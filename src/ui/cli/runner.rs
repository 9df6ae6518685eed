use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use tracing::warn;

use crate::evaluation::{ModelComparison, ModelResult};
use crate::inference::Prediction;
use crate::inference::risk::{indicators, recommendations};
use crate::tasks::{PredictTask, TrainingOutcome};
use crate::ui::types::build::Task;

/// Runs a built task and prints what it produced.
pub fn run_task(task: Task) -> Result<()> {
    match task {
        Task::Train(task) => {
            let (tx, rx) = mpsc::channel::<ModelResult>();
            let printer = thread::spawn(move || {
                for result in rx {
                    println!("  {:<22} {}", result.name, result.summary());
                }
            });

            let outcome = task.with_progress(tx).run();
            // the sender is dropped with the task, so the printer drains and exits
            if printer.join().is_err() {
                warn!("Progress printer panicked; some model lines may be missing");
            }
            print_training(&outcome.context("training failed")?);
        }
        Task::Predict(task) => {
            let (prediction, hints) = predict(task)?;
            print!("{}", format_prediction(&prediction, &hints));
        }
        Task::Serve(task) => task.run().context("dashboard server stopped")?,
        Task::GenerateSample(task) => {
            let path = task.run().context("could not write sample data")?;
            println!("Sample data written to {}", path.display());
        }
        Task::Analyze(task) => {
            let summary = task.run().context("analysis failed")?;
            print!("{summary}");
        }
    }
    Ok(())
}

fn predict(task: PredictTask) -> Result<(Prediction, Vec<String>)> {
    let query = task.query().clone();
    let prediction = task.run().context("prediction failed")?;
    let hints = indicators(&query)
        .into_iter()
        .map(|i| format!("{}: {}", i.title, i.detail))
        .collect();
    Ok((prediction, hints))
}

fn format_prediction(p: &Prediction, hints: &[String]) -> String {
    let verdict = if p.prediction == 1 { "ARREST" } else { "NO ARREST" };
    let mut out = format!(
        "Arrest probability: {:.1}%\nPrediction: {verdict}\nRisk level: {}\n",
        p.probability * 100.0,
        p.risk_level
    );
    if !hints.is_empty() {
        out.push_str("\nRisk indicators:\n");
        for h in hints {
            out.push_str(&format!("  - {h}\n"));
        }
    }
    out.push_str("\nRecommendations:\n");
    for r in recommendations(p.risk_level) {
        out.push_str(&format!("  - {r}\n"));
    }
    out
}

fn print_training(outcome: &TrainingOutcome) {
    let report = &outcome.report;
    println!(
        "\n{} train / {} test rows, positive rate {:.1}%",
        report.train_size,
        report.test_size,
        report.positive_rate * 100.0
    );

    println!("\n{:<22}{:>10}{:>10}", "Model", "Accuracy", "AUC");
    for row in ModelComparison::from_results(&report.results).ranked() {
        let auc = row.auc.map(|a| format!("{a:.4}")).unwrap_or_else(|| "N/A".into());
        println!("{:<22}{:>10.4}{:>10}", row.model, row.accuracy, auc);
    }

    let best = report
        .best_model
        .and_then(|kind| report.results.iter().find(|r| r.kind == kind));
    if let Some(best) = best {
        println!("\nClassification report for {}:\n{}", best.name, best.report);
    }
    println!("Best model saved to {}", outcome.artifact_path.display());
    println!("Training report saved to {}", outcome.report_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::RiskLevel;

    fn prediction(probability: f64) -> Prediction {
        Prediction {
            prediction: u8::from(probability > 0.5),
            probability,
            risk_level: RiskLevel::from_probability(probability),
            features_used: vec![],
            feature_values: vec![],
        }
    }

    #[test]
    fn prediction_text_lists_verdict_and_advice() {
        let text = format_prediction(&prediction(0.82), &["Night Time: x".to_string()]);
        assert!(text.contains("Arrest probability: 82.0%"));
        assert!(text.contains("Prediction: ARREST"));
        assert!(text.contains("Risk level: High"));
        assert!(text.contains("  - Night Time: x"));
        assert!(text.contains("Recommendations:"));
    }

    #[test]
    fn indicator_section_is_omitted_when_empty() {
        let text = format_prediction(&prediction(0.1), &[]);
        assert!(text.contains("NO ARREST"));
        assert!(!text.contains("Risk indicators"));
    }
}
