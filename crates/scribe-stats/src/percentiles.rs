/// Precomputed quantile values for a dataset.
///
/// This structure stores quantile-value pairs for efficient lookup
/// of commonly used quantile points. Quantiles are fractions in `[0.0, 1.0]`.
///
/// # Examples
///
/// ```
/// use scribe_stats::percentiles::Quantiles;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let quantiles = Quantiles::new(&values, &[0.25, 0.5, 0.75]);
///
/// assert_eq!(quantiles.get(0.25), Some(3.0));
/// assert_eq!(quantiles.get(0.75), Some(8.0));
/// ```
#[derive(Debug, Clone)]
pub struct Quantiles {
    /// Quantile-value pairs in the order they were requested.
    values: Vec<(f64, f64)>,
}

impl Quantiles {
    /// Computes quantiles from sorted values.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    /// * `quantile_points` - The quantiles to compute (e.g., [0.25, 0.75])
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], quantile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = quantile_points
            .iter()
            .map(|&q| (q, compute_quantile(sorted_values, q)))
            .collect();
        Self { values }
    }

    /// Computes quantiles from unsorted values.
    ///
    /// This method will sort the values internally before computing quantiles.
    #[must_use]
    pub fn new(values: &[f64], quantile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, quantile_points)
    }

    /// Gets the value at a specific quantile.
    ///
    /// Returns `None` if the quantile was not precomputed.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribe_stats::percentiles::Quantiles;
    ///
    /// let quantiles = Quantiles::new(&[1.0, 2.0, 3.0], &[0.5]);
    /// assert_eq!(quantiles.get(0.5), Some(2.0));
    /// assert_eq!(quantiles.get(0.9), None); // Not precomputed
    /// ```
    #[must_use]
    pub fn get(&self, quantile: f64) -> Option<f64> {
        self.values.iter().find_map(|(q, value)| {
            if (*q - quantile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }

    /// Returns an iterator over all (quantile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }
}

/// Computes a single quantile value from sorted data.
///
/// This function uses the nearest-rank method: for `n` values, the `q`-quantile
/// is the value at index `round((n - 1) * q)`, where halves round away from
/// zero.
///
/// # Returns
///
/// The value at the specified quantile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use scribe_stats::percentiles::compute_quantile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_quantile(&values, 0.25), 2.0); // index round(0.75) = 1
/// assert_eq!(compute_quantile(&values, 0.75), 3.0); // index round(2.25) = 2
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_quantile(sorted_values: &[f64], quantile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let idx = (last as f64 * quantile.clamp(0.0, 1.0)).round() as usize;
    sorted_values[idx.min(last)]
}
