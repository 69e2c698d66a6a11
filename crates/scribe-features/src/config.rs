//! Pipeline configuration.
//!
//! Every field is defaulted, so `{}` is a valid configuration and reproduces
//! the standard feature set. Segment thresholds are fixed and not configurable.

use scribe_text::stopwords::StopWords;
use serde::{Deserialize, Serialize};

use crate::tfidf::{Analyzer, DocFrequency, StripAccents, TfidfParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Character-token n-grams over the raw essay text.
    pub full_text_tfidf: TfidfSettings,
    /// Stopword-filtered words over the fully normalized text.
    pub word_tfidf: TfidfSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            full_text_tfidf: TfidfSettings {
                ngram_range: (1, 3),
                ..TfidfSettings::default()
            },
            word_tfidf: TfidfSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfSettings {
    pub ngram_range: (usize, usize),
    pub min_df: DocFrequency,
    pub max_df: DocFrequency,
    pub sublinear_tf: bool,
}

impl Default for TfidfSettings {
    fn default() -> Self {
        Self {
            ngram_range: (1, 1),
            min_df: DocFrequency::Fraction(0.05),
            max_df: DocFrequency::Fraction(0.95),
            sublinear_tf: true,
        }
    }
}

impl TfidfSettings {
    fn to_params(&self, analyzer: Analyzer, strip_accents: StripAccents) -> TfidfParams {
        TfidfParams {
            analyzer,
            strip_accents: Some(strip_accents),
            ngram_range: self.ngram_range,
            min_df: self.min_df,
            max_df: self.max_df,
            sublinear_tf: self.sublinear_tf,
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn full_text_params(&self) -> TfidfParams {
        self.full_text_tfidf
            .to_params(Analyzer::Characters, StripAccents::Unicode)
    }

    #[must_use]
    pub fn word_params(&self, stop_words: &StopWords) -> TfidfParams {
        let analyzer = Analyzer::words(Analyzer::DEFAULT_TOKEN_PATTERN, stop_words.to_sorted_vec());
        self.word_tfidf.to_params(analyzer, StripAccents::Ascii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.full_text_tfidf.ngram_range, (1, 3));
        assert_eq!(config.word_tfidf.ngram_range, (1, 1));
    }

    #[test]
    fn test_partial_override() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"word_tfidf": {"min_df": 2, "sublinear_tf": false}}"#)
                .unwrap();
        assert_eq!(config.word_tfidf.min_df, DocFrequency::Count(2));
        assert_eq!(config.word_tfidf.max_df, DocFrequency::Fraction(0.95));
        assert!(!config.word_tfidf.sublinear_tf);
        assert_eq!(config.full_text_tfidf, PipelineConfig::default().full_text_tfidf);
    }

    #[test]
    fn test_word_params_drop_stopwords() {
        let params = PipelineConfig::default().word_params(&StopWords::english());
        let Analyzer::Words { stop_words, .. } = &params.analyzer else {
            panic!("expected a word analyzer");
        };
        assert!(stop_words.iter().any(|w| w == "the"));
        assert_eq!(params.strip_accents, Some(StripAccents::Ascii));
    }
}
