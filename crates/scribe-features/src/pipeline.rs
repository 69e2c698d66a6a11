//! End-to-end feature construction.
//!
//! The pipeline validates the essays, computes every feature block and joins
//! them onto a base table sorted by `essay_id`:
//!
//! ```text
//! base (essay_id, score)
//!   ⟕ essay-level statistics
//!   ⟕ paragraph aggregates
//!   ⟕ sentence aggregates
//!   ⟕ tfid_*    (fitted)
//!   ⟕ tfid_w_*  (fitted)
//! ```
//!
//! Fitting happens once in [`FeaturePipeline::fit_transform`]; the returned
//! [`FittedPipeline`] transforms held-out essays into the same columns.

use scribe_text::{spelling::SpellDictionary, stopwords::StopWords};
use serde::{Deserialize, Serialize};

use crate::{
    config::PipelineConfig,
    essay::{Essay, InvalidEssayError, ensure_unique_ids},
    essay_level::EssayPreprocessor,
    paragraph::paragraph_features,
    sentence::sentence_features,
    table::{FeatureTable, TableError},
    tfidf::TfidfError,
    vectorize::{FittedVectorizers, VectorizeError},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PipelineError {
    #[display("{_0}")]
    InvalidEssay(InvalidEssayError),
    #[display("{_0}")]
    Table(TableError),
    #[display("{_0}")]
    Tfidf(TfidfError),
}

impl From<VectorizeError> for PipelineError {
    fn from(err: VectorizeError) -> Self {
        match err {
            VectorizeError::Tfidf(err) => Self::Tfidf(err),
            VectorizeError::Table(err) => Self::Table(err),
        }
    }
}

/// The merged feature table and its feature column names.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub table: FeatureTable,
    /// Table column order, without `essay_id` and `score`.
    pub feature_names: Vec<String>,
}

impl FeatureSet {
    fn new(table: FeatureTable) -> Self {
        let feature_names = table.feature_names();
        Self {
            table,
            feature_names,
        }
    }
}

#[derive(Debug)]
pub struct FeaturePipeline<'a> {
    config: PipelineConfig,
    dictionary: &'a SpellDictionary,
    stop_words: &'a StopWords,
}

impl<'a> FeaturePipeline<'a> {
    #[must_use]
    pub fn new(
        config: PipelineConfig,
        dictionary: &'a SpellDictionary,
        stop_words: &'a StopWords,
    ) -> Self {
        Self {
            config,
            dictionary,
            stop_words,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fits the vectorizers on `essays` and builds their feature table.
    pub fn fit_transform(
        &self,
        essays: &[Essay],
    ) -> Result<(FeatureSet, FittedPipeline), PipelineError> {
        ensure_unique_ids(essays)?;
        let vectorizers = FittedVectorizers::fit(essays, &self.config, self.stop_words)?;
        let fitted = FittedPipeline {
            config: self.config.clone(),
            vectorizers,
        };
        let features = fitted.build(essays, self.dictionary)?;
        Ok((features, fitted))
    }
}

/// A pipeline whose vectorizers have been fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    pub config: PipelineConfig,
    pub vectorizers: FittedVectorizers,
}

impl FittedPipeline {
    /// Builds the feature table of `essays` without refitting.
    pub fn transform(
        &self,
        essays: &[Essay],
        dictionary: &SpellDictionary,
    ) -> Result<FeatureSet, PipelineError> {
        ensure_unique_ids(essays)?;
        self.build(essays, dictionary)
    }

    fn build(
        &self,
        essays: &[Essay],
        dictionary: &SpellDictionary,
    ) -> Result<FeatureSet, PipelineError> {
        let mut table = FeatureTable::from_essays(essays);
        table.sort_by_essay_id();

        let essay_level = EssayPreprocessor::new(dictionary).process(essays)?;
        join_stage(&mut table, &essay_level, "essay-level statistics")?;

        let paragraphs = paragraph_features(essays)?;
        join_stage(&mut table, &paragraphs, "paragraph features")?;

        let sentences = sentence_features(essays)?;
        join_stage(&mut table, &sentences, "sentence features")?;

        let (full_text, words) = self.vectorizers.transform(essays)?;
        join_stage(&mut table, &full_text, "full-text tf-idf")?;
        join_stage(&mut table, &words, "word tf-idf")?;

        Ok(FeatureSet::new(table))
    }
}

fn join_stage(table: &mut FeatureTable, block: &FeatureTable, stage: &str) -> Result<(), TableError> {
    table.left_join(block)?;
    tracing::info!(
        stage,
        rows = table.len(),
        block_columns = block.columns().len(),
        columns = table.columns().len(),
        "joined feature block"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        essay_level::{PARAGRAPH_COUNT_COLUMN, SENTENCE_COUNT_COLUMN},
        tfidf::DocFrequency,
    };

    const TRAIN: [(&str, &str, f64); 4] = [
        (
            "e3",
            "Students should read more books.\n\nReading every day improves vocabulary.",
            4.0,
        ),
        (
            "e1",
            "Hello world.\n\nThis is fine.",
            1.0,
        ),
        (
            "e4",
            "I think that summer projects are helpful for students because they keep learning.",
            3.0,
        ),
        (
            "e2",
            "Libraries can't close early. Students need quiet places to study after school.",
            2.0,
        ),
    ];

    fn training_essays() -> Vec<Essay> {
        TRAIN
            .iter()
            .map(|&(id, text, score)| Essay::new(id, text).with_score(score))
            .collect()
    }

    fn dictionary() -> SpellDictionary {
        SpellDictionary::from_words([
            "hello", "world", "this", "is", "fine", "students", "should", "read", "more",
            "books", "reading", "every", "day", "improves", "vocabulary",
        ])
    }

    fn config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        for settings in [&mut config.full_text_tfidf, &mut config.word_tfidf] {
            settings.min_df = DocFrequency::Count(1);
            settings.max_df = DocFrequency::Fraction(1.0);
        }
        config
    }

    #[test]
    fn test_one_row_per_essay_sorted() {
        let dictionary = dictionary();
        let stop_words = StopWords::english();
        let pipeline = FeaturePipeline::new(config(), &dictionary, &stop_words);
        let (features, _) = pipeline.fit_transform(&training_essays()).unwrap();

        assert_eq!(features.table.essay_ids(), ["e1", "e2", "e3", "e4"]);
        assert_eq!(
            features.table.scores(),
            Some([Some(1.0), Some(2.0), Some(4.0), Some(3.0)].as_slice())
        );
        assert_eq!(features.feature_names, features.table.feature_names());
        assert!(!features.feature_names.iter().any(|n| n == "essay_id" || n == "score"));
    }

    #[test]
    fn test_example_essay_features() {
        let dictionary = dictionary();
        let stop_words = StopWords::english();
        let pipeline = FeaturePipeline::new(config(), &dictionary, &stop_words);
        let (features, _) = pipeline.fit_transform(&training_essays()).unwrap();
        let table = &features.table;

        assert_eq!(table.value("e1", PARAGRAPH_COUNT_COLUMN), Some(2.0));
        assert_eq!(table.value("e1", SENTENCE_COUNT_COLUMN), Some(3.0));
        assert_eq!(table.value("e1", "sentence_15_cnt"), None);
        assert_eq!(table.value("e1", "sentence_len_mean"), None);
        assert!(table.value("e2", "sentence_15_cnt").is_some());
    }

    #[test]
    fn test_held_out_transform_keeps_feature_names() {
        let dictionary = dictionary();
        let stop_words = StopWords::english();
        let pipeline = FeaturePipeline::new(config(), &dictionary, &stop_words);
        let (features, fitted) = pipeline.fit_transform(&training_essays()).unwrap();

        let held_out = [
            Essay::new("t2", "Completely unseen zebra xylophone."),
            Essay::new("t1", "Students read books."),
        ];
        let test_features = fitted.transform(&held_out, &dictionary).unwrap();
        assert_eq!(test_features.feature_names, features.feature_names);
        assert_eq!(test_features.table.essay_ids(), ["t1", "t2"]);
        assert_eq!(test_features.table.scores(), None);
    }

    #[test]
    fn test_fitted_pipeline_round_trips_through_json() {
        let dictionary = dictionary();
        let stop_words = StopWords::english();
        let pipeline = FeaturePipeline::new(config(), &dictionary, &stop_words);
        let (features, fitted) = pipeline.fit_transform(&training_essays()).unwrap();

        let json = serde_json::to_string(&fitted).unwrap();
        let restored: FittedPipeline = serde_json::from_str(&json).unwrap();
        let again = restored.transform(&training_essays(), &dictionary).unwrap();
        assert_eq!(again, features);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let dictionary = dictionary();
        let stop_words = StopWords::english();
        let pipeline = FeaturePipeline::new(config(), &dictionary, &stop_words);
        let essays = [Essay::new("x", "First essay."), Essay::new("x", "Second essay.")];
        assert!(matches!(
            pipeline.fit_transform(&essays),
            Err(PipelineError::InvalidEssay(InvalidEssayError::DuplicateEssayId { .. }))
        ));
    }
}
