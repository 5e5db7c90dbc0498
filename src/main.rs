use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};

use gaussian_bayes::{
    bayes::{self, NaiveBayesClassifier},
    config, dataset, evaluate, logging, split,
};

fn main() -> Result<()> {
    let config = match config::parse_args(std::env::args().skip(1).collect()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };
    if let Err(err) = logging::init() {
        eprintln!("{err}");
    }

    let records = dataset::load_csv(&config.data, config.has_headers)
        .with_context(|| format!("failed to load {}", config.data.display()))?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let (train, test) = split::split(&records, config.ratio, &mut rng)?;
    info!("{} training records, {} test records", train.len(), test.len());

    let classifier = if config.skip_degenerate {
        let (summaries, skipped) = bayes::summarize_by_class_skipping_degenerate(&train)?;
        if !skipped.is_empty() {
            warn!("classes left out of the model: {skipped:?}");
        }
        NaiveBayesClassifier::from_summaries(summaries)
    } else {
        NaiveBayesClassifier::fit(&train).context("failed to train classifier")?
    };

    let predictions = match &config.predictions_out {
        Some(path) => classifier
            .predict_to_csv(&test, path)
            .with_context(|| format!("failed to write predictions to {}", path.display()))?,
        None => classifier.predict_all(&test)?,
    };

    let report =
        evaluate::evaluate(&test, &predictions).context("failed to evaluate predictions")?;
    println!("{report}");

    Ok(())
}
