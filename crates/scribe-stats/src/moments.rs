//! Higher standardized moments.

/// Computes the excess (Fisher) kurtosis of a dataset.
///
/// Uses the biased population estimator `m4 / m2² - 3`, where `m2` and `m4`
/// are the second and fourth central moments. A normal distribution has an
/// excess kurtosis of `0.0`.
///
/// # Returns
///
/// * `Some(k)` - if the dataset has at least two values and non-zero variance
/// * `None` - otherwise, since the fourth standardized moment is undefined
///
/// # Examples
///
/// ```
/// use scribe_stats::moments::excess_kurtosis;
///
/// // Two-point distributions have the minimum possible kurtosis.
/// assert_eq!(excess_kurtosis(&[0.0, 1.0]), Some(-2.0));
/// // Constant data has no spread to standardize by.
/// assert_eq!(excess_kurtosis(&[3.0, 3.0, 3.0]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let (m2, m4) = values.iter().fold((0.0, 0.0), |(m2, m4), v| {
        let d2 = (v - mean).powi(2);
        (m2 + d2, m4 + d2 * d2)
    });
    let m2 = m2 / n;
    let m4 = m4 / n;
    // relative to the data scale, so integer-valued counts of any size work
    if m2 <= f64::EPSILON * mean.abs().max(1.0).powi(2) {
        return None;
    }
    Some(m4 / (m2 * m2) - 3.0)
}
