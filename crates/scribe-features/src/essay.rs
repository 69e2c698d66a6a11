//! Essay records and input validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One student essay, the unit of prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Essay {
    pub essay_id: String,
    pub full_text: String,
    /// Label, absent for evaluation sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Essay {
    pub fn new(essay_id: impl Into<String>, full_text: impl Into<String>) -> Self {
        Self {
            essay_id: essay_id.into(),
            full_text: full_text.into(),
            score: None,
        }
    }

    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// An unvalidated input row as read from a dataset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EssayRecord {
    pub essay_id: Option<String>,
    pub full_text: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum InvalidEssayError {
    #[display("row {row}: missing essay_id")]
    MissingEssayId { row: usize },
    #[display("row {row}: essay '{essay_id}' has no full_text")]
    MissingFullText { row: usize, essay_id: String },
    #[display("row {row}: duplicate essay_id '{essay_id}'")]
    DuplicateEssayId { row: usize, essay_id: String },
}

impl EssayRecord {
    /// Converts the record into an [`Essay`], failing on missing fields.
    ///
    /// `row` is only used in the error message. Missing values are never
    /// coerced to empty strings.
    pub fn into_essay(self, row: usize) -> Result<Essay, InvalidEssayError> {
        let essay_id = self
            .essay_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(InvalidEssayError::MissingEssayId { row })?;
        let Some(full_text) = self.full_text else {
            return Err(InvalidEssayError::MissingFullText { row, essay_id });
        };
        Ok(Essay {
            essay_id,
            full_text,
            score: self.score,
        })
    }
}

/// Validates a sequence of records into essays.
///
/// Rows are numbered from 1. Fails on the first malformed or duplicate row.
pub fn validate_records<I>(records: I) -> Result<Vec<Essay>, InvalidEssayError>
where
    I: IntoIterator<Item = EssayRecord>,
{
    let essays = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| record.into_essay(idx + 1))
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(&essays)?;
    Ok(essays)
}

/// Checks that no two essays share an identifier.
pub fn ensure_unique_ids(essays: &[Essay]) -> Result<(), InvalidEssayError> {
    let mut seen = HashSet::with_capacity(essays.len());
    for (idx, essay) in essays.iter().enumerate() {
        if !seen.insert(essay.essay_id.as_str()) {
            return Err(InvalidEssayError::DuplicateEssayId {
                row: idx + 1,
                essay_id: essay.essay_id.clone(),
            });
        }
    }
    Ok(())
}
