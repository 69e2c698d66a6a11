//! Per-essay aggregation of segment measurements.
//!
//! Paragraph and sentence engineering share this engine. Each engine is a
//! [`SegmentAggregation`] value: a declarative list of length thresholds plus
//! the names of the per-segment measures, from which the output columns are
//! derived:
//!
//! ```text
//! {prefix}_{threshold}_cnt      one per threshold, in declaration order
//! {measure}_{statistic}         statistic-major: all `_max`, then all `_mean`, ...
//! ```

use std::collections::HashMap;

use scribe_stats::{
    descriptive::DescriptiveStats, moments::excess_kurtosis, percentiles::Quantiles,
};

use crate::table::{FeatureTable, TableError};

/// Direction of a threshold count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Counts segments with `length >= threshold`.
    AtLeast,
    /// Counts segments with `length <= threshold`.
    AtMost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    pub value: u32,
    pub comparison: Comparison,
}

impl Threshold {
    #[must_use]
    pub const fn at_least(value: u32) -> Self {
        Self {
            value,
            comparison: Comparison::AtLeast,
        }
    }

    #[must_use]
    pub const fn at_most(value: u32) -> Self {
        Self {
            value,
            comparison: Comparison::AtMost,
        }
    }

    #[must_use]
    pub fn matches(self, length: f64) -> bool {
        let value = f64::from(self.value);
        match self.comparison {
            Comparison::AtLeast => length >= value,
            Comparison::AtMost => length <= value,
        }
    }
}

/// Reductions applied to every segment measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStatistic {
    Max,
    Mean,
    Min,
    First,
    Last,
    Sum,
    Kurtosis,
    Q1,
    Q3,
}

impl SegmentStatistic {
    pub const ALL: [Self; 9] = [
        Self::Max,
        Self::Mean,
        Self::Min,
        Self::First,
        Self::Last,
        Self::Sum,
        Self::Kurtosis,
        Self::Q1,
        Self::Q3,
    ];

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Mean => "mean",
            Self::Min => "min",
            Self::First => "first",
            Self::Last => "last",
            Self::Sum => "sum",
            Self::Kurtosis => "kurtosis",
            Self::Q1 => "q1",
            Self::Q3 => "q3",
        }
    }
}

/// Summary of one measure over one essay's segments.
#[derive(Debug, Clone)]
struct MeasureSummary {
    stats: DescriptiveStats,
    kurtosis: Option<f64>,
    quantiles: Quantiles,
}

impl MeasureSummary {
    fn new(values: &[f64]) -> Option<Self> {
        let stats = DescriptiveStats::from_slice(values)?;
        Some(Self {
            stats,
            kurtosis: excess_kurtosis(values),
            quantiles: Quantiles::new(values, &[0.25, 0.75]),
        })
    }

    fn get(&self, statistic: SegmentStatistic) -> Option<f64> {
        match statistic {
            SegmentStatistic::Max => Some(self.stats.max),
            SegmentStatistic::Mean => Some(self.stats.mean),
            SegmentStatistic::Min => Some(self.stats.min),
            SegmentStatistic::First => Some(self.stats.first),
            SegmentStatistic::Last => Some(self.stats.last),
            SegmentStatistic::Sum => Some(self.stats.sum),
            SegmentStatistic::Kurtosis => self.kurtosis,
            SegmentStatistic::Q1 => self.quantiles.get(0.25),
            SegmentStatistic::Q3 => self.quantiles.get(0.75),
        }
    }
}

/// Declarative description of a segment aggregation.
///
/// `measures[0]` is the segment length, which the thresholds compare against.
#[derive(Debug, Clone, Copy)]
pub struct SegmentAggregation<const N: usize> {
    pub prefix: &'static str,
    pub thresholds: &'static [Threshold],
    pub measures: [&'static str; N],
}

impl<const N: usize> SegmentAggregation<N> {
    /// Output column names, in the order [`aggregate`](Self::aggregate) writes them.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        let counts = self
            .thresholds
            .iter()
            .map(|t| format!("{}_{}_cnt", self.prefix, t.value));
        let stats = SegmentStatistic::ALL.iter().flat_map(|stat| {
            self.measures
                .iter()
                .map(move |measure| format!("{measure}_{}", stat.suffix()))
        });
        counts.chain(stats).collect()
    }

    /// Aggregates segments into one row per essay.
    ///
    /// `segments` yields `(essay_id, measures)` in original segment order;
    /// `first` and `last` follow that order. Every id in `essay_ids` gets a
    /// row, sorted ascending; essays without segments get `None` in every
    /// column.
    pub fn aggregate<'a, I>(
        &self,
        essay_ids: &[&str],
        segments: I,
    ) -> Result<FeatureTable, TableError>
    where
        I: IntoIterator<Item = (&'a str, [f64; N])>,
    {
        let mut groups: HashMap<&str, Vec<[f64; N]>> = HashMap::new();
        for (essay_id, measures) in segments {
            groups.entry(essay_id).or_default().push(measures);
        }

        let mut essay_ids = essay_ids.to_vec();
        essay_ids.sort_unstable();

        let names = self.column_names();
        let mut columns = vec![Vec::with_capacity(essay_ids.len()); names.len()];
        for essay_id in &essay_ids {
            let row = groups
                .get(essay_id)
                .map(|group| self.aggregate_group(group));
            for (idx, column) in columns.iter_mut().enumerate() {
                column.push(row.as_ref().and_then(|values| values[idx]));
            }
        }

        let mut table = FeatureTable::new(essay_ids.into_iter().map(str::to_owned).collect());
        for (name, values) in names.into_iter().zip(columns) {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    #[expect(clippy::cast_precision_loss)]
    fn aggregate_group(&self, group: &[[f64; N]]) -> Vec<Option<f64>> {
        let counts = self.thresholds.iter().map(|threshold| {
            let count = group.iter().filter(|m| threshold.matches(m[0])).count();
            Some(count as f64)
        });

        let summaries = (0..N)
            .map(|idx| {
                let values = group.iter().map(|m| m[idx]).collect::<Vec<_>>();
                MeasureSummary::new(&values)
            })
            .collect::<Vec<_>>();
        let stats = SegmentStatistic::ALL.iter().flat_map(|&stat| {
            summaries
                .iter()
                .map(move |summary| summary.as_ref().and_then(|s| s.get(stat)))
        });

        counts.chain(stats).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: &[Threshold] = &[
        Threshold::at_least(10),
        Threshold::at_least(20),
        Threshold::at_most(5),
    ];

    const AGGREGATION: SegmentAggregation<2> = SegmentAggregation {
        prefix: "seg",
        thresholds: THRESHOLDS,
        measures: ["seg_len", "seg_word_cnt"],
    };

    #[test]
    fn test_column_names() {
        let names = AGGREGATION.column_names();
        assert_eq!(names.len(), 3 + 9 * 2);
        assert_eq!(
            &names[..5],
            ["seg_10_cnt", "seg_20_cnt", "seg_5_cnt", "seg_len_max", "seg_word_cnt_max"]
        );
        assert_eq!(names.last().unwrap(), "seg_word_cnt_q3");
    }

    #[test]
    fn test_aggregate_values() {
        let segments = [
            ("e1", [12.0, 2.0]),
            ("e2", [3.0, 1.0]),
            ("e1", [25.0, 5.0]),
            ("e1", [4.0, 1.0]),
        ];
        let table = AGGREGATION.aggregate(&["e2", "e1"], segments).unwrap();
        assert_eq!(table.essay_ids(), ["e1", "e2"]);

        assert_eq!(table.value("e1", "seg_10_cnt"), Some(2.0));
        assert_eq!(table.value("e1", "seg_20_cnt"), Some(1.0));
        assert_eq!(table.value("e1", "seg_5_cnt"), Some(1.0));
        assert_eq!(table.value("e1", "seg_len_max"), Some(25.0));
        assert_eq!(table.value("e1", "seg_len_min"), Some(4.0));
        assert_eq!(table.value("e1", "seg_len_first"), Some(12.0));
        assert_eq!(table.value("e1", "seg_len_last"), Some(4.0));
        assert_eq!(table.value("e1", "seg_len_sum"), Some(41.0));
        assert_eq!(table.value("e1", "seg_word_cnt_mean"), Some(8.0 / 3.0));
        // sorted [4, 12, 25]: q1 -> index round(0.5) = 1, q3 -> index round(1.5) = 2
        assert_eq!(table.value("e1", "seg_len_q1"), Some(12.0));
        assert_eq!(table.value("e1", "seg_len_q3"), Some(25.0));
        assert!(table.value("e1", "seg_len_kurtosis").is_some());

        // a single segment has no kurtosis
        assert_eq!(table.value("e2", "seg_len_sum"), Some(3.0));
        assert_eq!(table.value("e2", "seg_len_kurtosis"), None);
        assert_eq!(table.value("e2", "seg_10_cnt"), Some(0.0));
    }

    #[test]
    fn test_essay_without_segments_is_all_none() {
        let table = AGGREGATION
            .aggregate(&["e1", "e2"], [("e1", [1.0, 1.0])])
            .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.columns().iter().all(|c| c.values[1].is_none()));
        assert_eq!(table.value("e1", "seg_5_cnt"), Some(1.0));
    }
}
