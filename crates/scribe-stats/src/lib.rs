//! Statistical summaries used by the essay feature engines.
//!
//! This crate provides the reductions applied to per-segment measurements
//! (paragraph lengths, sentence word counts, ...) when they are aggregated
//! into one row per essay:
//!
//! - **Descriptive statistics**: min, max, sum, mean, variance and positional
//!   first/last values
//! - **Quantiles**: nearest-rank quantiles over sorted data
//! - **Moments**: excess (Fisher) kurtosis
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Quantile computation and storage
//! - [`moments`]: Higher standardized moments
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use scribe_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.first, 1.0);
//! ```
//!
//! ## Computing quantiles
//!
//! ```
//! use scribe_stats::percentiles::Quantiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let quantiles = Quantiles::new(&values, &[0.25, 0.5, 0.75]);
//! assert_eq!(quantiles.get(0.5), Some(3.0));
//! ```
//!
//! ## Computing excess kurtosis
//!
//! ```
//! use scribe_stats::moments::excess_kurtosis;
//!
//! let k = excess_kurtosis(&[1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert!((k - (-1.36)).abs() < 1e-9);
//! assert_eq!(excess_kurtosis(&[7.0]), None);
//! ```

pub mod descriptive;
pub mod moments;
pub mod percentiles;
