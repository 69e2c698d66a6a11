/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency and spread,
/// plus the first and last values in the original (unsorted) order of the
/// dataset. Positional values matter for segment aggregation, where the first
/// paragraph of an essay is not the same as its shortest one.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The sum of all values.
    pub sum: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The population variance of the dataset.
    pub variance: f64,
    /// The first value in input order.
    pub first: f64,
    /// The last value in input order.
    pub last: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from values in their original order.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values. Order is preserved for
    ///   [`first`](Self::first) and [`last`](Self::last).
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use scribe_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.sum, 15.0);
    /// assert_eq!(stats.first, 5.0);
    /// assert_eq!(stats.last, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        Self::from_slice(&values)
    }

    /// Computes descriptive statistics from a slice in its original order.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the slice is non-empty
    /// * `None` - if the slice is empty
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let last = *values.last()?;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let sum = values.iter().sum::<f64>();
        let count = values.len();
        let n = count as f64;
        let mean = sum / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            count,
            min,
            max,
            sum,
            mean,
            variance,
            first,
            last,
        })
    }

    /// Population standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_returns_none() {
        assert_eq!(DescriptiveStats::new(std::iter::empty()), None);
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([42.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.max, 42.0);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.first, stats.last);
    }

    #[test]
    fn test_positional_values_follow_input_order() {
        let stats = DescriptiveStats::new([3.0, 9.0, 1.0, 4.0]).unwrap();
        assert_eq!(stats.first, 3.0);
        assert_eq!(stats.last, 4.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_variance_is_population_variance() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.variance - 4.0).abs() < 1e-12);
        assert!((stats.std_dev() - 2.0).abs() < 1e-12);
    }
}
