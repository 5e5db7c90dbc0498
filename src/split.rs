//! Random train/test partitioning.

use rand::Rng;
use tracing::debug;

use crate::{
    dataset::Record,
    error::{BayesError, Result},
};

/// Randomly moves `floor(len * ratio)` records into the training set, one
/// uniformly chosen index at a time without replacement. Whatever is left,
/// in its original relative order, becomes the test set.
///
/// No stratification is done, so either side may end up missing a class.
pub fn split<R: Rng + ?Sized>(
    dataset: &[Record],
    ratio: f64,
    rng: &mut R,
) -> Result<(Vec<Record>, Vec<Record>)> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(BayesError::InvalidRatio(ratio));
    }

    let train_size = (dataset.len() as f64 * ratio).floor() as usize;
    let mut train = Vec::with_capacity(train_size);
    let mut remaining = dataset.to_vec();
    while train.len() < train_size {
        let index = rng.random_range(0..remaining.len());
        train.push(remaining.remove(index));
    }

    debug!(
        "split {} records into {} training / {} test",
        dataset.len(),
        train.len(),
        remaining.len()
    );
    Ok((train, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn dataset(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(vec![i as f64, (i * 2) as f64], (i % 2) as i64))
            .collect()
    }

    fn sorted_keys(records: &[Record]) -> Vec<i64> {
        let mut keys: Vec<i64> = records.iter().map(|r| r.features[0] as i64).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn sizes_follow_floor_of_ratio() {
        let data = dataset(7);
        let mut rng = StdRng::seed_from_u64(3);
        let (train, test) = split(&data, 0.5, &mut rng).unwrap();
        assert_eq!(train.len(), 3);
        assert_eq!(test.len(), 4);
    }

    #[test]
    fn every_record_lands_in_exactly_one_side() {
        let data = dataset(25);
        for (seed, ratio) in [(1, 0.0), (2, 0.2), (3, 0.5), (4, 0.9), (5, 1.0)] {
            let mut rng = StdRng::seed_from_u64(seed);
            let (train, test) = split(&data, ratio, &mut rng).unwrap();
            assert_eq!(train.len() + test.len(), data.len());

            let mut all = train.clone();
            all.extend(test);
            assert_eq!(sorted_keys(&all), sorted_keys(&data));
        }
    }

    #[test]
    fn same_seed_gives_same_split() {
        let data = dataset(20);
        let first = split(&data, 0.6, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = split(&data, 0.6, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_side_keeps_original_order() {
        let data = dataset(10);
        let (_, test) = split(&data, 0.3, &mut StdRng::seed_from_u64(8)).unwrap();
        let keys: Vec<i64> = test.iter().map(|r| r.features[0] as i64).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        let data = dataset(4);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            split(&data, 1.5, &mut rng),
            Err(BayesError::InvalidRatio(_))
        ));
        assert!(matches!(
            split(&data, f64::NAN, &mut rng),
            Err(BayesError::InvalidRatio(_))
        ));
    }
}
