//! Command-line configuration for the driver.

use std::path::PathBuf;

/// Fraction of the data used for training when `--ratio` is not given.
pub const DEFAULT_SPLIT_RATIO: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub data: PathBuf,
    pub ratio: f64,
    pub seed: Option<u64>,
    pub has_headers: bool,
    pub predictions_out: Option<PathBuf>,
    pub skip_degenerate: bool,
}

pub fn parse_args(args: Vec<String>) -> Result<RunConfig, String> {
    let mut data: Option<PathBuf> = None;
    let mut ratio = DEFAULT_SPLIT_RATIO;
    let mut seed = None;
    let mut has_headers = false;
    let mut predictions_out = None;
    let mut skip_degenerate = false;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--ratio" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--ratio requires a value".to_string())?;
                ratio = value
                    .parse::<f64>()
                    .ok()
                    .filter(|r| (0.0..=1.0).contains(r))
                    .ok_or_else(|| format!("Invalid --ratio value: {value}"))?;
            }
            "--seed" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--seed requires a value".to_string())?;
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --seed value: {value}"))?,
                );
            }
            "--predictions-out" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--predictions-out requires a value".to_string())?;
                predictions_out = Some(PathBuf::from(value));
            }
            "--has-headers" => has_headers = true,
            "--skip-degenerate" => skip_degenerate = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown argument: {other}\n\n{}", help_text()));
            }
            other => {
                if data.is_some() {
                    return Err(format!("Unexpected extra argument: {other}"));
                }
                data = Some(PathBuf::from(other));
            }
        }
        idx += 1;
    }

    let data = data.ok_or_else(|| format!("Missing DATA path\n\n{}", help_text()))?;
    Ok(RunConfig {
        data,
        ratio,
        seed,
        has_headers,
        predictions_out,
        skip_degenerate,
    })
}

fn help_text() -> String {
    [
        "Usage: gaussian_bayes DATA [options]",
        "",
        "Trains a Gaussian naive Bayes classifier on a random split of DATA (csv,",
        "last column is the 0/1 label) and reports test-set metrics.",
        "",
        "Options:",
        "  --ratio <f64>            Training fraction in [0, 1] (default 0.5)",
        "  --seed <u64>             Seed for the train/test split",
        "  --has-headers            Skip the first row of DATA",
        "  --predictions-out <PATH> Write test-set predictions as ID,Label csv",
        "  --skip-degenerate        Drop classes with fewer than 2 training samples",
        "  -h, --help               Show this help",
        "",
        "Log verbosity is read from RUST_LOG (default: info).",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let config = parse_args(args(&["spambase.csv"])).unwrap();
        assert_eq!(
            config,
            RunConfig {
                data: PathBuf::from("spambase.csv"),
                ratio: DEFAULT_SPLIT_RATIO,
                seed: None,
                has_headers: false,
                predictions_out: None,
                skip_degenerate: false,
            }
        );
    }

    #[test]
    fn all_options() {
        let config = parse_args(args(&[
            "--ratio",
            "0.67",
            "data.csv",
            "--seed",
            "7",
            "--has-headers",
            "--predictions-out",
            "out.csv",
            "--skip-degenerate",
        ]))
        .unwrap();
        assert_eq!(config.data, PathBuf::from("data.csv"));
        assert_eq!(config.ratio, 0.67);
        assert_eq!(config.seed, Some(7));
        assert!(config.has_headers);
        assert_eq!(config.predictions_out, Some(PathBuf::from("out.csv")));
        assert!(config.skip_degenerate);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args(args(&["d.csv", "--ratio", "1.2"])).is_err());
        assert!(parse_args(args(&["d.csv", "--ratio"])).is_err());
        assert!(parse_args(args(&["d.csv", "--seed", "-1"])).is_err());
        assert!(parse_args(args(&["d.csv", "--bogus"])).is_err());
        assert!(parse_args(args(&["a.csv", "b.csv"])).is_err());
        assert!(parse_args(args(&[])).is_err());
    }

    #[test]
    fn help_is_returned_as_error_text() {
        let err = parse_args(args(&["--help"])).unwrap_err();
        assert!(err.starts_with("Usage:"));
    }
}
