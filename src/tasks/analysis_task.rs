use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::info;

use crate::analysis::{AnalysisPanel, AnalysisView, DatasetOverview};
use crate::data::load_records;
use crate::error::Result;

/// Loads a dataset and renders the requested analysis views.
pub struct AnalysisTask {
    data_path: PathBuf,
    views: Vec<AnalysisView>,
    seed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub overview: DatasetOverview,
    pub panels: Vec<AnalysisPanel>,
}

impl AnalysisTask {
    /// An empty `views` list renders every view.
    pub fn new<P: Into<PathBuf>>(data_path: P, views: Vec<AnalysisView>, seed: u64) -> Self {
        let views = if views.is_empty() {
            AnalysisView::iter().collect()
        } else {
            views
        };
        Self {
            data_path: data_path.into(),
            views,
            seed,
        }
    }

    pub fn run(self) -> Result<AnalysisSummary> {
        let dataset = load_records(&self.data_path)?;
        let overview = DatasetOverview::from_dataset(&dataset);
        info!(
            "Analyzing {} records across {} views",
            overview.total_records,
            self.views.len()
        );
        let panels = self
            .views
            .into_iter()
            .map(|view| view.render(&dataset, self.seed))
            .collect();
        Ok(AnalysisSummary { overview, panels })
    }
}

impl Display for AnalysisSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.overview)?;
        for panel in &self.panels {
            writeln!(f)?;
            writeln!(f, "== {} ==", panel.view)?;
            for chart in &panel.charts {
                writeln!(f, "{chart}")?;
            }
            if panel.view == AnalysisView::Spatial {
                writeln!(f, "Map sample: {} points", panel.map_points.len())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_sample, write_records};
    use tempfile::tempdir;

    #[test]
    fn renders_requested_views_only() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("crimes.csv");
        write_records(&data, &generate_sample(120, 4)).unwrap();

        let summary = AnalysisTask::new(&data, vec![AnalysisView::Temporal], 1)
            .run()
            .unwrap();
        assert_eq!(summary.overview.total_records, 120);
        assert_eq!(summary.panels.len(), 1);
        assert_eq!(summary.panels[0].charts[0].points.len(), 24);

        let text = summary.to_string();
        assert!(text.contains("== temporal =="));
        assert!(text.contains("Crimes by Day of Week"));
    }

    #[test]
    fn no_views_means_all_views() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("crimes.csv");
        write_records(&data, &generate_sample(30, 4)).unwrap();

        let summary = AnalysisTask::new(&data, vec![], 1).run().unwrap();
        assert_eq!(summary.panels.len(), AnalysisView::iter().count());
        assert!(summary.to_string().contains("Map sample: 30 points"));
    }
}
