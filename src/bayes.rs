use std::{
    collections::{hash_map::Entry, HashMap},
    f64::consts::PI,
    path::Path,
};

use tracing::{debug, warn};

use crate::{
    dataset::{Label, Record},
    error::{BayesError, Result},
};

/// Smoothing added to the standard deviation so constant features don't
/// divide by zero.
pub const EPSILON: f64 = 1e-6;

/// Mean and sample standard deviation of one feature within one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSummary {
    pub mean: f64,
    pub stdev: f64,
}

/// Per-class feature summaries, kept in the order each label was first seen
/// in the training data. Prediction ties go to the earlier class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummaries {
    classes: Vec<(Label, Vec<FeatureSummary>)>,
}

impl ClassSummaries {
    pub fn iter(&self) -> impl Iterator<Item = (Label, &[FeatureSummary])> {
        self.classes
            .iter()
            .map(|(label, summaries)| (*label, summaries.as_slice()))
    }

    pub fn get(&self, label: Label) -> Option<&[FeatureSummary]> {
        self.iter()
            .find(|(class, _)| *class == label)
            .map(|(_, summaries)| summaries)
    }

    pub fn labels(&self) -> Vec<Label> {
        self.classes.iter().map(|(label, _)| *label).collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of features every vector must have, or 0 with no classes.
    pub fn feature_count(&self) -> usize {
        self.classes
            .first()
            .map(|(_, summaries)| summaries.len())
            .unwrap_or(0)
    }
}

/// Groups records by label in first-seen order.
fn separate_classes(dataset: &[Record]) -> Result<Vec<(Label, Vec<&Record>)>> {
    let feature_count = dataset
        .first()
        .ok_or(BayesError::EmptyDataset)?
        .features
        .len();

    let mut positions = HashMap::new();
    let mut classes: Vec<(Label, Vec<&Record>)> = Vec::new();
    for record in dataset {
        if record.features.len() != feature_count {
            return Err(BayesError::ShapeMismatch {
                expected: feature_count,
                found: record.features.len(),
            });
        }

        let position = match positions.entry(record.label) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                classes.push((record.label, Vec::new()));
                *entry.insert(classes.len() - 1)
            }
        };
        classes[position].1.push(record);
    }

    Ok(classes)
}

/// Mean and sample standard deviation of every feature. Needs at least two
/// instances.
fn summarize(instances: &[&Record]) -> Vec<FeatureSummary> {
    let n = instances.len() as f64;
    let feature_count = instances.first().map_or(0, |r| r.features.len());

    (0..feature_count)
        .map(|i| {
            let mean = instances.iter().map(|r| r.features[i]).sum::<f64>() / n;
            let variance = instances
                .iter()
                .map(|r| (r.features[i] - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            FeatureSummary {
                mean,
                stdev: variance.sqrt(),
            }
        })
        .collect()
}

/// Summarizes every class of the training set. A class with fewer than two
/// samples has no sample standard deviation and fails the whole call.
pub fn summarize_by_class(dataset: &[Record]) -> Result<ClassSummaries> {
    let classes = separate_classes(dataset)?
        .into_iter()
        .map(|(label, instances)| {
            if instances.len() < 2 {
                return Err(BayesError::DegenerateClass {
                    label,
                    count: instances.len(),
                });
            }
            Ok((label, summarize(&instances)))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("summarized {} classes from {} records", classes.len(), dataset.len());
    Ok(ClassSummaries { classes })
}

/// Like [`summarize_by_class`], but drops classes with fewer than two samples
/// and returns their labels instead of failing.
pub fn summarize_by_class_skipping_degenerate(
    dataset: &[Record],
) -> Result<(ClassSummaries, Vec<Label>)> {
    let mut classes = Vec::new();
    let mut skipped = Vec::new();
    for (label, instances) in separate_classes(dataset)? {
        if instances.len() < 2 {
            warn!("skipping class {label}: only {} training sample(s)", instances.len());
            skipped.push(label);
        } else {
            classes.push((label, summarize(&instances)));
        }
    }

    if classes.is_empty() {
        return Err(BayesError::NoClasses);
    }
    Ok((ClassSummaries { classes }, skipped))
}

/// Gaussian probability density at `x`, with [`EPSILON`] added to `stdev`
/// in the exponent and to the normalizer separately.
pub fn density(x: f64, mean: f64, stdev: f64) -> f64 {
    let exponent = (-(x - mean).powi(2) / (2.0 * (stdev + EPSILON).powi(2))).exp();
    exponent / ((2.0 * PI).sqrt() * stdev + EPSILON)
}

/// Product of the per-feature densities for each class, in summary order.
pub fn class_scores(summaries: &ClassSummaries, features: &[f64]) -> Result<Vec<(Label, f64)>> {
    let expected = summaries.feature_count();
    if features.len() != expected {
        return Err(BayesError::ShapeMismatch {
            expected,
            found: features.len(),
        });
    }

    Ok(summaries
        .iter()
        .map(|(label, class_summaries)| {
            let score = class_summaries
                .iter()
                .zip(features)
                .fold(1.0, |acc, (summary, &x)| {
                    acc * density(x, summary.mean, summary.stdev)
                });
            (label, score)
        })
        .collect())
}

/// The label with the highest score. Exact ties go to the class seen first
/// during training.
pub fn predict(summaries: &ClassSummaries, features: &[f64]) -> Result<Label> {
    let (best_label, _) = class_scores(summaries, features)?.into_iter().fold(
        (None, -1.0),
        |(best_label, best_score), (label, score)| {
            if best_label.is_none() || score > best_score {
                (Some(label), score)
            } else {
                (best_label, best_score)
            }
        },
    );

    best_label.ok_or(BayesError::NoClasses)
}

/// One prediction per record, in the same order.
pub fn get_predictions(summaries: &ClassSummaries, records: &[Record]) -> Result<Vec<Label>> {
    records
        .iter()
        .map(|record| predict(summaries, &record.features))
        .collect()
}

/// A trained Gaussian naive Bayes model.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    summaries: ClassSummaries,
}

impl NaiveBayesClassifier {
    pub fn fit(train: &[Record]) -> Result<Self> {
        Ok(NaiveBayesClassifier {
            summaries: summarize_by_class(train)?,
        })
    }

    pub fn from_summaries(summaries: ClassSummaries) -> Self {
        NaiveBayesClassifier { summaries }
    }

    pub fn summaries(&self) -> &ClassSummaries {
        &self.summaries
    }

    pub fn predict(&self, features: &[f64]) -> Result<Label> {
        predict(&self.summaries, features)
    }

    pub fn predict_all(&self, records: &[Record]) -> Result<Vec<Label>> {
        get_predictions(&self.summaries, records)
    }

    // Predicts every record and writes the results as an `ID,Label` csv:
    pub fn predict_to_csv<P: AsRef<Path>>(
        &self,
        records: &[Record],
        outpath: P,
    ) -> Result<Vec<Label>> {
        let results = self.predict_all(records)?;

        let mut writer = csv::Writer::from_path(outpath)?;
        writer.write_record(["ID", "Label"])?;
        for (i, result) in results.iter().enumerate() {
            writer.write_record(&[(i + 1).to_string(), result.to_string()])?;
        }
        writer.flush()?;

        Ok(results)
    }
}
