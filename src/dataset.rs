//! Loading labeled numeric vectors from delimited text.

use std::{io, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{BayesError, Result};

/// Class label. Only `0` and `1` are meaningful to the evaluator.
pub type Label = i64;

/// One labeled feature vector: every column of a row but the last is a
/// feature, the last is the label.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub features: Vec<f64>,
    pub label: Label,
}

impl Record {
    pub fn new(features: Vec<f64>, label: Label) -> Self {
        Record { features, label }
    }

    /// Splits a full row into features and label.
    pub fn from_row(row: &[f64]) -> Result<Self> {
        split_row(0, row)
    }
}

pub fn load_csv<P: AsRef<Path>>(path: P, has_headers: bool) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let records = read_records(file, has_headers)?;
    debug!(
        "loaded {} records with {} features from {}",
        records.len(),
        records[0].features.len(),
        path.display()
    );
    Ok(records)
}

/// Reads every row of `reader` into a record. Rows must all have the same
/// number of columns, at least two.
pub fn read_records<R: io::Read>(reader: R, has_headers: bool) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        records.push(parse_record(row + 1, &record)?);
    }

    if records.is_empty() {
        return Err(BayesError::EmptyDataset);
    }
    Ok(records)
}

fn parse_record(row: usize, record: &StringRecord) -> Result<Record> {
    let values = record
        .iter()
        .enumerate()
        .map(|(column, field)| {
            field.parse::<f64>().map_err(|_| BayesError::Parse {
                row,
                column: column + 1,
                value: field.to_string(),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    split_row(row, &values)
}

fn split_row(row: usize, values: &[f64]) -> Result<Record> {
    match values.split_last() {
        Some((&label, features)) if !features.is_empty() => Ok(Record {
            features: features.to_vec(),
            label: label_from_value(row, label)?,
        }),
        _ => Err(BayesError::ShapeMismatch {
            expected: 2,
            found: values.len(),
        }),
    }
}

fn label_from_value(row: usize, value: f64) -> Result<Label> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as Label)
    } else {
        Err(BayesError::NonIntegerLabel { row, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_features_and_label() {
        let data = "1.5,2.0,0\n3.0, 4.25 ,1\n";
        let records = read_records(data.as_bytes(), false).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new(vec![1.5, 2.0], 0),
                Record::new(vec![3.0, 4.25], 1)
            ]
        );
    }

    #[test]
    fn skips_header_row_when_asked() {
        let data = "a,b,class\n1,2,1\n";
        let records = read_records(data.as_bytes(), true).unwrap();
        assert_eq!(records, vec![Record::new(vec![1.0, 2.0], 1)]);
    }

    #[test]
    fn rejects_non_numeric_field() {
        let err = read_records("1,x,0\n".as_bytes(), false).unwrap_err();
        assert!(matches!(err, BayesError::Parse { row: 1, column: 2, .. }));
    }

    #[test]
    fn rejects_fractional_label() {
        let err = read_records("1,2,0.5\n".as_bytes(), false).unwrap_err();
        assert!(matches!(err, BayesError::NonIntegerLabel { row: 1, .. }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = read_records("1,2,0\n1,0\n".as_bytes(), false).unwrap_err();
        assert!(matches!(err, BayesError::Csv(_)));
    }

    #[test]
    fn rejects_single_column_rows() {
        let err = read_records("1\n0\n".as_bytes(), false).unwrap_err();
        assert!(matches!(
            err,
            BayesError::ShapeMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = read_records("".as_bytes(), false).unwrap_err();
        assert!(matches!(err, BayesError::EmptyDataset));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.1,0.2,0.3,1").unwrap();
        writeln!(file, "0.4,0.5,0.6,0").unwrap();
        let records = load_csv(file.path(), false).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].features, vec![0.4, 0.5, 0.6]);
        assert_eq!(records[1].label, 0);
    }

    #[test]
    fn record_from_row_splits_off_label() {
        let record = Record::from_row(&[1.0, 2.0, 1.0]).unwrap();
        assert_eq!(record, Record::new(vec![1.0, 2.0], 1));
    }
}
