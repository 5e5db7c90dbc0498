//! Accuracy, precision, recall and the confusion matrix for binary labels.

use std::fmt;

use tracing::info;

use crate::{
    dataset::{Label, Record},
    error::{BayesError, Result},
};

/// Label treated as the positive class.
pub const POSITIVE: Label = 1;

/// 2x2 table of counts. `cells[predicted][actual]` counts the test vectors
/// predicted as `predicted` whose true label is `actual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    pub cells: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    #[inline]
    pub fn get(&self, predicted: usize, actual: usize) -> usize {
        self.cells[predicted][actual]
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    fn record(&mut self, predicted: Label, actual: Label) {
        if let (Ok(p @ 0..=1), Ok(a @ 0..=1)) =
            (usize::try_from(predicted), usize::try_from(actual))
        {
            self.cells[p][a] += 1;
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            writeln!(f, "[{:6} {:6}]", row[0], row[1])?;
        }
        Ok(())
    }
}

/// Counts gathered by comparing predictions to true labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub total: usize,
    pub correct: usize,
    pub total_pos: usize,
    pub pred_pos: usize,
    pub true_pos: usize,
    pub confusion_matrix: ConfusionMatrix,
}

impl Evaluation {
    /// Pairs `predictions[i]` with `test_set[i]`.
    pub fn new(test_set: &[Record], predictions: &[Label]) -> Result<Self> {
        if test_set.len() != predictions.len() {
            return Err(BayesError::LengthMismatch {
                records: test_set.len(),
                predictions: predictions.len(),
            });
        }

        let mut evaluation = Evaluation {
            total: test_set.len(),
            correct: 0,
            total_pos: 0,
            pred_pos: 0,
            true_pos: 0,
            confusion_matrix: ConfusionMatrix::default(),
        };
        for (record, &predicted) in test_set.iter().zip(predictions) {
            let actual = record.label;
            if predicted == POSITIVE {
                evaluation.pred_pos += 1;
            }
            if actual == POSITIVE {
                evaluation.total_pos += 1;
            }
            if predicted == actual {
                evaluation.correct += 1;
                if actual == POSITIVE {
                    evaluation.true_pos += 1;
                }
            }
            evaluation.confusion_matrix.record(predicted, actual);
        }

        Ok(evaluation)
    }

    /// Percentage of correct predictions, 0 to 100.
    pub fn accuracy(&self) -> Result<f64> {
        if self.total == 0 {
            return Err(BayesError::EmptyTestSet);
        }
        Ok(100.0 * self.correct as f64 / self.total as f64)
    }

    pub fn precision(&self) -> Result<f64> {
        if self.pred_pos == 0 {
            return Err(BayesError::EmptyPredictedPositive);
        }
        Ok(self.true_pos as f64 / self.pred_pos as f64)
    }

    pub fn recall(&self) -> Result<f64> {
        if self.total_pos == 0 {
            return Err(BayesError::EmptyPositiveSet);
        }
        Ok(self.true_pos as f64 / self.total_pos as f64)
    }
}

/// Everything the evaluator reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub confusion_matrix: ConfusionMatrix,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion matrix (rows=predicted, cols=actual):")?;
        write!(f, "{}", self.confusion_matrix)?;
        writeln!(f)?;
        writeln!(f, "recall: {}", self.recall)?;
        writeln!(f, "precision: {}", self.precision)?;
        write!(f, "Accuracy: {}%", self.accuracy)
    }
}

/// Builds the full report, failing if any ratio is undefined.
pub fn evaluate(test_set: &[Record], predictions: &[Label]) -> Result<Report> {
    let evaluation = Evaluation::new(test_set, predictions)?;
    let report = Report {
        accuracy: evaluation.accuracy()?,
        precision: evaluation.precision()?,
        recall: evaluation.recall()?,
        confusion_matrix: evaluation.confusion_matrix,
    };

    info!(
        "accuracy {:.2}% precision {:.4} recall {:.4}",
        report.accuracy, report.precision, report.recall
    );
    Ok(report)
}
