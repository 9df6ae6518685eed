use crate::data::split::SplitStrategy;
use crate::ui::types::choices::SplitChoice;

impl From<SplitChoice> for SplitStrategy {
    fn from(choice: SplitChoice) -> Self {
        match choice {
            SplitChoice::Stratified(p) => SplitStrategy::Stratified {
                test_size: p.test_size,
                seed: p.seed,
            },
            SplitChoice::Temporal(p) => SplitStrategy::Temporal {
                split_year: p.split_year,
            },
        }
    }
}
