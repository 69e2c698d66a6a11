//! Column-oriented feature table keyed by essay identifier.
//!
//! Every engine produces a [`FeatureTable`]; the pipeline merges them with
//! [`FeatureTable::left_join`], which keeps the left row set exactly and fills
//! rows missing on the right with `None`.

use std::collections::HashMap;

use crate::essay::Essay;

/// Name of the identifier column.
pub const ESSAY_ID_COLUMN: &str = "essay_id";
/// Name of the label column.
pub const SCORE_COLUMN: &str = "score";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[display("column '{name}' already exists")]
    DuplicateColumn { name: String },
    #[display("essay_id '{essay_id}' appears more than once")]
    DuplicateEssayId { essay_id: String },
}

/// A named feature column. `None` marks a value that could not be measured.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    essay_ids: Vec<String>,
    scores: Option<Vec<Option<f64>>>,
    columns: Vec<FeatureColumn>,
}

impl FeatureTable {
    /// Creates a table with the given rows and no columns.
    #[must_use]
    pub fn new(essay_ids: Vec<String>) -> Self {
        Self {
            essay_ids,
            scores: None,
            columns: vec![],
        }
    }

    /// Creates the base table for a set of essays.
    ///
    /// The label column is kept when at least one essay carries a score.
    #[must_use]
    pub fn from_essays(essays: &[Essay]) -> Self {
        let essay_ids = essays.iter().map(|e| e.essay_id.clone()).collect();
        let scores = essays
            .iter()
            .any(|e| e.score.is_some())
            .then(|| essays.iter().map(|e| e.score).collect());
        Self {
            essay_ids,
            scores,
            columns: vec![],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.essay_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.essay_ids.is_empty()
    }

    #[must_use]
    pub fn essay_ids(&self) -> &[String] {
        &self.essay_ids
    }

    #[must_use]
    pub fn scores(&self) -> Option<&[Option<f64>]> {
        self.scores.as_deref()
    }

    #[must_use]
    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&FeatureColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Feature column names in table order, excluding identifier and label.
    #[must_use]
    pub fn feature_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Looks up one cell.
    #[must_use]
    pub fn value(&self, essay_id: &str, column: &str) -> Option<f64> {
        let row = self.essay_ids.iter().position(|id| id == essay_id)?;
        self.column(column)?.values[row]
    }

    /// Iterates over the feature values of row `row`, in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.columns.iter().map(move |c| c.values[row])
    }

    fn has_column(&self, name: &str) -> bool {
        name == ESSAY_ID_COLUMN || name == SCORE_COLUMN || self.column(name).is_some()
    }

    /// Appends a column. The name must be new and the values must cover every row.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if values.len() != self.len() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.len(),
                actual: values.len(),
            });
        }
        if self.has_column(&name) {
            return Err(TableError::DuplicateColumn { name });
        }
        self.columns.push(FeatureColumn { name, values });
        Ok(())
    }

    /// Appends every column of `other`, matched on essay identifier.
    ///
    /// Rows of `self` keep their order; rows absent from `other` get `None`,
    /// and rows only present in `other` are dropped. Nothing is written when
    /// an error is returned.
    pub fn left_join(&mut self, other: &FeatureTable) -> Result<(), TableError> {
        let mut lookup = HashMap::with_capacity(other.len());
        for (idx, id) in other.essay_ids.iter().enumerate() {
            if lookup.insert(id.as_str(), idx).is_some() {
                return Err(TableError::DuplicateEssayId {
                    essay_id: id.clone(),
                });
            }
        }
        if let Some(column) = other.columns.iter().find(|c| self.has_column(&c.name)) {
            return Err(TableError::DuplicateColumn {
                name: column.name.clone(),
            });
        }

        let rows = self
            .essay_ids
            .iter()
            .map(|id| lookup.get(id.as_str()).copied())
            .collect::<Vec<_>>();
        for column in &other.columns {
            let values = rows
                .iter()
                .map(|row| row.and_then(|r| column.values[r]))
                .collect();
            self.columns.push(FeatureColumn {
                name: column.name.clone(),
                values,
            });
        }
        Ok(())
    }

    /// Reorders the rows by essay identifier, ascending.
    pub fn sort_by_essay_id(&mut self) {
        let mut order = (0..self.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| self.essay_ids[a].cmp(&self.essay_ids[b]));

        self.essay_ids = order.iter().map(|&i| self.essay_ids[i].clone()).collect();
        if let Some(scores) = &mut self.scores {
            *scores = order.iter().map(|&i| scores[i]).collect();
        }
        for column in &mut self.columns {
            column.values = order.iter().map(|&i| column.values[i]).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ids: &[&str]) -> FeatureTable {
        FeatureTable::new(ids.iter().map(|&id| id.to_owned()).collect())
    }

    #[test]
    fn test_push_column_checks_length_and_name() {
        let mut t = table(&["a", "b"]);
        t.push_column("x", vec![Some(1.0), None]).unwrap();
        assert!(matches!(
            t.push_column("y", vec![Some(1.0)]),
            Err(TableError::LengthMismatch { expected: 2, actual: 1, .. })
        ));
        assert!(matches!(
            t.push_column("x", vec![None, None]),
            Err(TableError::DuplicateColumn { .. })
        ));
        assert!(matches!(
            t.push_column("essay_id", vec![None, None]),
            Err(TableError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_left_join_keeps_left_rows() {
        let mut left = table(&["b", "a", "c"]);
        left.push_column("x", vec![Some(1.0), Some(2.0), Some(3.0)])
            .unwrap();
        let mut right = table(&["a", "b", "z"]);
        right
            .push_column("y", vec![Some(10.0), Some(20.0), Some(99.0)])
            .unwrap();

        left.left_join(&right).unwrap();
        assert_eq!(left.essay_ids(), ["b", "a", "c"]);
        assert_eq!(left.column("y").unwrap().values, [Some(20.0), Some(10.0), None]);
        assert_eq!(left.feature_names(), ["x", "y"]);
    }

    #[test]
    fn test_left_join_rejects_collisions() {
        let mut left = table(&["a"]);
        left.push_column("x", vec![Some(1.0)]).unwrap();
        let mut right = table(&["a"]);
        right.push_column("x", vec![Some(2.0)]).unwrap();
        assert!(matches!(
            left.left_join(&right),
            Err(TableError::DuplicateColumn { .. })
        ));
        assert_eq!(left.columns().len(), 1);
    }

    #[test]
    fn test_left_join_rejects_duplicate_right_ids() {
        let mut left = table(&["a"]);
        let right = table(&["a", "a"]);
        assert!(matches!(
            left.left_join(&right),
            Err(TableError::DuplicateEssayId { .. })
        ));
    }

    #[test]
    fn test_sort_by_essay_id() {
        let essays = [
            Essay::new("c", "").with_score(3.0),
            Essay::new("a", "").with_score(1.0),
            Essay::new("b", ""),
        ];
        let mut t = FeatureTable::from_essays(&essays);
        t.push_column("x", vec![Some(3.0), Some(1.0), None]).unwrap();
        t.sort_by_essay_id();
        assert_eq!(t.essay_ids(), ["a", "b", "c"]);
        assert_eq!(t.scores().unwrap(), [Some(1.0), None, Some(3.0)]);
        assert_eq!(t.value("a", "x"), Some(1.0));
        assert_eq!(t.value("b", "x"), None);
        assert_eq!(t.row(2).collect::<Vec<_>>(), [Some(3.0)]);
    }

    #[test]
    fn test_scores_absent_without_labels() {
        let t = FeatureTable::from_essays(&[Essay::new("a", "")]);
        assert!(t.scores().is_none());
    }
}
