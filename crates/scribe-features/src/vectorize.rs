//! The two TF-IDF feature blocks.
//!
//! `tfid_{i}` columns come from character n-grams over the raw essay text;
//! `tfid_w_{i}` columns come from stopword-filtered words of the
//! [`TextVariant::WithContractionsAndPunctRemoved`] variant. Column `i` is
//! the `i`-th term of the fitted vocabulary.

use rayon::prelude::*;
use scribe_text::{normalize::TextVariant, stopwords::StopWords};
use serde::{Deserialize, Serialize};

use crate::{
    config::PipelineConfig,
    essay::Essay,
    table::{FeatureTable, TableError},
    tfidf::{FittedTfidf, TfidfError},
};

pub const FULL_TEXT_PREFIX: &str = "tfid";
pub const WORD_PREFIX: &str = "tfid_w";

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum VectorizeError {
    #[display("{_0}")]
    Tfidf(TfidfError),
    #[display("{_0}")]
    Table(TableError),
}

/// Both vectorizers, fitted on the same training corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedVectorizers {
    pub full_text: FittedTfidf,
    pub words: FittedTfidf,
}

fn word_documents(essays: &[Essay]) -> Vec<String> {
    essays
        .par_iter()
        .map(|essay| TextVariant::WithContractionsAndPunctRemoved.apply(&essay.full_text))
        .collect()
}

fn full_text_documents(essays: &[Essay]) -> Vec<&str> {
    essays.iter().map(|essay| essay.full_text.as_str()).collect()
}

/// Builds a table whose columns are `{prefix}_{i}` for each vocabulary index.
fn to_table(
    essays: &[Essay],
    prefix: &str,
    vocabulary_size: usize,
    rows: &[Vec<f64>],
) -> Result<FeatureTable, TableError> {
    let essay_ids = essays.iter().map(|e| e.essay_id.clone()).collect();
    let mut table = FeatureTable::new(essay_ids);
    for column in 0..vocabulary_size {
        let values = rows.iter().map(|row| Some(row[column])).collect();
        table.push_column(format!("{prefix}_{column}"), values)?;
    }
    Ok(table)
}

impl FittedVectorizers {
    /// Fits both vectorizers on `essays`.
    pub fn fit(
        essays: &[Essay],
        config: &PipelineConfig,
        stop_words: &StopWords,
    ) -> Result<Self, TfidfError> {
        let full_text = config
            .full_text_params()
            .fit(&full_text_documents(essays))?;
        let words = config
            .word_params(stop_words)
            .fit(&word_documents(essays))?;
        tracing::info!(
            full_text_terms = full_text.vocabulary_size(),
            word_terms = words.vocabulary_size(),
            "fitted vectorizers"
        );
        Ok(Self { full_text, words })
    }

    /// Transforms `essays` into the `tfid_*` and `tfid_w_*` blocks, in essay order.
    pub fn transform(
        &self,
        essays: &[Essay],
    ) -> Result<(FeatureTable, FeatureTable), VectorizeError> {
        let full_text_rows = self.full_text.transform(&full_text_documents(essays))?;
        let full_text = to_table(
            essays,
            FULL_TEXT_PREFIX,
            self.full_text.vocabulary_size(),
            &full_text_rows,
        )?;

        let word_rows = self.words.transform(&word_documents(essays))?;
        let words = to_table(
            essays,
            WORD_PREFIX,
            self.words.vocabulary_size(),
            &word_rows,
        )?;
        Ok((full_text, words))
    }
}
