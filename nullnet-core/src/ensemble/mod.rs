//! Ensemble averaging of per-trial results.
//!
//! A trial produces one keyed record (centrality per node, or global metrics
//! per statistic). The aggregator takes the union of keys over all trials and
//! averages each key over the trials that report a usable value for it.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use tracing::instrument;

use crate::{
    centrality::CentralityScores,
    error::{NetworkError, Result},
    global::GlobalMetrics,
};

static GLOBAL_METRIC_KEYS: [&str; 3] = GlobalMetrics::KEYS;

/// Keyed numeric record produced by one trial.
///
/// `None` marks a value the trial could not compute.
pub trait TrialRecord {
    /// Key type; averages are reported in its natural order.
    type Key: Ord + Clone;

    /// Iterates over the record's entries.
    fn entries(&self) -> impl Iterator<Item = (&Self::Key, Option<f64>)> + '_;
}

impl<K: Ord + Clone> TrialRecord for BTreeMap<K, f64> {
    type Key = K;

    fn entries(&self) -> impl Iterator<Item = (&K, Option<f64>)> + '_ {
        self.iter().map(|(key, &value)| (key, Some(value)))
    }
}

impl<K: Ord + Clone> TrialRecord for BTreeMap<K, Option<f64>> {
    type Key = K;

    fn entries(&self) -> impl Iterator<Item = (&K, Option<f64>)> + '_ {
        self.iter().map(|(key, &value)| (key, value))
    }
}

impl<K, S> TrialRecord for HashMap<K, f64, S>
where
    K: Ord + Clone + Hash,
    S: BuildHasher,
{
    type Key = K;

    fn entries(&self) -> impl Iterator<Item = (&K, Option<f64>)> + '_ {
        self.iter().map(|(key, &value)| (key, Some(value)))
    }
}

impl<K, S> TrialRecord for HashMap<K, Option<f64>, S>
where
    K: Ord + Clone + Hash,
    S: BuildHasher,
{
    type Key = K;

    fn entries(&self) -> impl Iterator<Item = (&K, Option<f64>)> + '_ {
        self.iter().map(|(key, &value)| (key, value))
    }
}

impl<N: Ord + Clone> TrialRecord for CentralityScores<N> {
    type Key = N;

    fn entries(&self) -> impl Iterator<Item = (&N, Option<f64>)> + '_ {
        self.iter().map(|(node, score)| (node, Some(score)))
    }
}

impl TrialRecord for GlobalMetrics {
    type Key = &'static str;

    fn entries(&self) -> impl Iterator<Item = (&&'static str, Option<f64>)> + '_ {
        GLOBAL_METRIC_KEYS.iter().map(|key| (key, self.get(key)))
    }
}

fn non_finite(value: f64) -> bool {
    !value.is_finite()
}

/// Averages trial records key by key.
///
/// Absent keys, `None` entries and non-finite values never contribute to a
/// mean. The predicate can mark further values as missing.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
///
/// use nullnet_core::EnsembleAggregator;
///
/// let trials = vec![
///     BTreeMap::from([("a", 1.0), ("b", f64::NAN)]),
///     BTreeMap::from([("a", 3.0), ("c", -1.0)]),
/// ];
/// let skip_negative = EnsembleAggregator::new().with_missing_predicate(|value| value < 0.0);
/// let average = skip_negative.average(&trials)?;
/// assert_eq!(average.keys(), &["a", "b", "c"]);
/// assert_eq!(average.get(&"a"), Some(2.0));
/// assert!(average.get(&"b").is_some_and(f64::is_nan));
/// assert!(average.get(&"c").is_some_and(f64::is_nan));
/// # Ok::<(), nullnet_core::NetworkError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EnsembleAggregator<P = fn(f64) -> bool> {
    is_missing: P,
}

impl EnsembleAggregator {
    /// Creates an aggregator that treats only non-finite values as missing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_missing: non_finite,
        }
    }
}

impl Default for EnsembleAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EnsembleAggregator<P>
where
    P: Fn(f64) -> bool,
{
    /// Replaces the predicate deciding which finite values count as missing.
    #[must_use]
    pub fn with_missing_predicate<Q>(self, is_missing: Q) -> EnsembleAggregator<Q>
    where
        Q: Fn(f64) -> bool,
    {
        EnsembleAggregator { is_missing }
    }

    /// Averages `records` over the union of their keys.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidInput`] when `records` is empty or no
    /// record has any key.
    #[instrument(name = "ensemble.average", err, skip_all, fields(trials = records.len()))]
    pub fn average<R>(&self, records: &[R]) -> Result<EnsembleAverage<R::Key>>
    where
        R: TrialRecord,
    {
        if records.is_empty() {
            return Err(NetworkError::invalid_input("no trial records to average"));
        }
        let mut totals: BTreeMap<R::Key, (f64, usize)> = BTreeMap::new();
        for record in records {
            for (key, value) in record.entries() {
                let usable = value.filter(|&value| value.is_finite() && !(self.is_missing)(value));
                if !totals.contains_key(key) {
                    totals.insert(key.clone(), (0.0, 0));
                }
                if let (Some(value), Some((sum, samples))) = (usable, totals.get_mut(key)) {
                    *sum += value;
                    *samples += 1;
                }
            }
        }
        if totals.is_empty() {
            return Err(NetworkError::invalid_input(
                "trial records contain no keys",
            ));
        }
        let mut average = EnsembleAverage::with_capacity(totals.len());
        for (key, (sum, samples)) in totals {
            let mean = if samples == 0 {
                f64::NAN
            } else {
                sum / samples as f64
            };
            average.keys.push(key);
            average.means.push(mean);
            average.samples.push(samples);
        }
        Ok(average)
    }
}

/// Per-key means in ascending key order.
#[derive(Clone, Debug, PartialEq)]
pub struct EnsembleAverage<K> {
    keys: Vec<K>,
    means: Vec<f64>,
    samples: Vec<usize>,
}

impl<K: Ord> EnsembleAverage<K> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            means: Vec::with_capacity(capacity),
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Returns the mean for `key`; NaN when no trial had a usable value.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<f64> {
        self.position(key).map(|index| self.means[index])
    }

    /// Returns how many trials contributed to the mean for `key`.
    #[must_use]
    pub fn samples(&self, key: &K) -> Option<usize> {
        self.position(key).map(|index| self.samples[index])
    }

    /// Returns the keys in ascending order.
    #[must_use]
    #[rustfmt::skip]
    pub fn keys(&self) -> &[K] { &self.keys }

    /// Returns the means in key order.
    #[must_use]
    #[rustfmt::skip]
    pub fn values(&self) -> &[f64] { &self.means }

    /// Returns the number of averaged keys.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.keys.len() }

    /// Returns whether no key was averaged.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Iterates over `(key, mean)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.keys.iter().zip(self.means.iter().copied())
    }

    /// Consumes the average, returning the means in key order.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.means
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.keys.binary_search(key).ok()
    }
}

/// Averages records with the default aggregator.
///
/// # Errors
/// See [`EnsembleAggregator::average`].
pub fn ensemble_average<R: TrialRecord>(records: &[R]) -> Result<EnsembleAverage<R::Key>> {
    EnsembleAggregator::new().average(records)
}

/// Averages per-trial centrality scores node by node.
///
/// # Errors
/// See [`EnsembleAggregator::average`].
pub fn average_centrality<N: Ord + Clone>(
    trials: &[CentralityScores<N>],
) -> Result<EnsembleAverage<N>> {
    ensemble_average(trials)
}

/// Averages normalised degree histograms over trials.
///
/// Each trial's degrees are binned on `0..=max_degree` and divided by the
/// number of in-range degrees, so each histogram sums to one. Degrees above
/// `max_degree` are ignored and a trial with no in-range degree contributes
/// an all-zero histogram.
///
/// # Errors
/// Returns [`NetworkError::InvalidInput`] when `degree_lists` is empty.
///
/// # Examples
/// ```
/// use nullnet_core::average_degree_histogram;
///
/// let histogram = average_degree_histogram(&[vec![1_usize, 1, 2, 2], vec![2, 2]], 2)?;
/// assert_eq!(histogram, vec![0.0, 0.25, 0.75]);
/// # Ok::<(), nullnet_core::NetworkError>(())
/// ```
pub fn average_degree_histogram<D>(degree_lists: &[D], max_degree: usize) -> Result<Vec<f64>>
where
    D: AsRef<[usize]>,
{
    if degree_lists.is_empty() {
        return Err(NetworkError::invalid_input(
            "no degree lists to build a histogram from",
        ));
    }
    let mut average = vec![0.0; max_degree + 1];
    for degrees in degree_lists {
        let mut counts = vec![0_usize; max_degree + 1];
        for &degree in degrees.as_ref() {
            if let Some(count) = counts.get_mut(degree) {
                *count += 1;
            }
        }
        let in_range: usize = counts.iter().sum();
        if in_range == 0 {
            continue;
        }
        for (bin, count) in average.iter_mut().zip(counts) {
            *bin += count as f64 / in_range as f64;
        }
    }
    let trials = degree_lists.len() as f64;
    for bin in &mut average {
        *bin /= trials;
    }
    Ok(average)
}

#[cfg(test)]
mod tests;
