pub mod bayes;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod logging;
pub mod split;

pub use bayes::{
    class_scores, density, get_predictions, predict, summarize_by_class,
    summarize_by_class_skipping_degenerate, ClassSummaries, FeatureSummary, NaiveBayesClassifier,
};
pub use dataset::{load_csv, read_records, Label, Record};
pub use error::{BayesError, Result};
pub use evaluate::{evaluate, ConfusionMatrix, Evaluation, Report};
pub use split::split;
