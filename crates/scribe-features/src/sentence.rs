//! Sentence engineering.
//!
//! The whole essay is base-normalized first, then split on `'.'`. Pieces
//! shorter than [`MIN_SENTENCE_LEN`] are discarded before aggregation, so an
//! essay made only of short pieces has no sentences at all and gets `None`
//! in every sentence column.

use rayon::prelude::*;
use scribe_text::normalize::TextVariant;

use crate::{
    aggregate::{SegmentAggregation, Threshold},
    essay::Essay,
    segment::{char_len, space_word_count},
    table::{FeatureTable, TableError},
};

pub const SENTENCE_SEPARATOR: char = '.';

/// Sentences shorter than this many characters are dropped.
pub const MIN_SENTENCE_LEN: usize = 15;

pub const SENTENCE_THRESHOLDS: &[Threshold] = &[
    Threshold::at_least(15),
    Threshold::at_least(50),
    Threshold::at_least(100),
    Threshold::at_least(150),
    Threshold::at_least(200),
    Threshold::at_least(250),
    Threshold::at_least(300),
];

pub const SENTENCE_AGGREGATION: SegmentAggregation<2> = SegmentAggregation {
    prefix: "sentence",
    thresholds: SENTENCE_THRESHOLDS,
    measures: ["sentence_len", "sentence_word_cnt"],
};

/// One surviving sentence of an essay.
///
/// The text is a piece of the normalized essay and is not trimmed, so it
/// usually starts with a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub essay_id: &'a str,
    pub sentence_text: &'a str,
    pub sentence_len: usize,
    pub sentence_word_cnt: usize,
}

impl<'a> Sentence<'a> {
    /// Measures a normalized piece, returning `None` when it is too short.
    #[must_use]
    pub fn new(essay_id: &'a str, sentence_text: &'a str) -> Option<Self> {
        let sentence_len = char_len(sentence_text);
        if sentence_len < MIN_SENTENCE_LEN {
            return None;
        }
        Some(Self {
            essay_id,
            sentence_text,
            sentence_len,
            sentence_word_cnt: space_word_count(sentence_text),
        })
    }

    #[expect(clippy::cast_precision_loss)]
    fn measures(&self) -> [f64; 2] {
        [self.sentence_len as f64, self.sentence_word_cnt as f64]
    }
}

/// The base-normalized text of every essay, in essay order.
#[must_use]
pub fn normalize_essays(essays: &[Essay]) -> Vec<String> {
    essays
        .par_iter()
        .map(|essay| TextVariant::Base.apply(&essay.full_text))
        .collect()
}

/// Splits normalized essays into sentences and drops the short ones.
///
/// `normalized` must be aligned with `essays` (see [`normalize_essays`]).
#[must_use]
pub fn explode_sentences<'a>(
    essays: &'a [Essay],
    normalized: &'a [String],
) -> Vec<Sentence<'a>> {
    essays
        .iter()
        .zip(normalized)
        .flat_map(|(essay, text)| {
            text.split(SENTENCE_SEPARATOR)
                .filter_map(|piece| Sentence::new(&essay.essay_id, piece))
        })
        .collect()
}

/// Computes the sentence feature block, one row per essay, sorted by id.
pub fn sentence_features(essays: &[Essay]) -> Result<FeatureTable, TableError> {
    let normalized = normalize_essays(essays);
    let sentences = explode_sentences(essays, &normalized);
    tracing::debug!(sentences = sentences.len(), "exploded sentences");

    let essay_ids = essays.iter().map(|e| e.essay_id.as_str()).collect::<Vec<_>>();
    SENTENCE_AGGREGATION.aggregate(
        &essay_ids,
        sentences.iter().map(|s| (s.essay_id, s.measures())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sentences_are_dropped() {
        let essays = [Essay::new("e1", "Hello world.\n\nThis is fine.")];
        let normalized = normalize_essays(&essays);
        assert_eq!(normalized[0], "hello world. this is fine.");
        // pieces are 11, 13 and 0 chars long
        assert!(explode_sentences(&essays, &normalized).is_empty());

        let table = sentence_features(&essays).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.columns().iter().all(|c| c.values[0].is_none()));
    }

    #[test]
    fn test_surviving_sentences_are_long_enough() {
        let essays = [
            Essay::new(
                "e1",
                "Short one. This sentence is long enough. Tiny. Another long sentence here.",
            ),
            Essay::new("e2", "No. Yes. Fifteen chars!!"),
        ];
        let normalized = normalize_essays(&essays);
        let sentences = explode_sentences(&essays, &normalized);
        assert!(sentences.iter().all(|s| s.sentence_len >= MIN_SENTENCE_LEN));
        let texts = sentences.iter().map(|s| s.sentence_text).collect::<Vec<_>>();
        assert_eq!(
            texts,
            [
                " this sentence is long enough",
                " another long sentence here",
                " fifteen chars!!"
            ]
        );
    }

    #[test]
    fn test_word_count_on_normalized_text() {
        let sentence = Sentence::new("e1", " this sentence is long enough").unwrap();
        assert_eq!(sentence.sentence_len, 29);
        // the leading space produces an empty first token
        assert_eq!(sentence.sentence_word_cnt, 6);
    }

    #[test]
    fn test_feature_columns() {
        let essays = [Essay::new(
            "e1",
            "This sentence is long enough. And here is another fairly long one.",
        )];
        let table = sentence_features(&essays).unwrap();
        assert_eq!(table.columns().len(), 7 + 9 * 2);
        assert_eq!(table.value("e1", "sentence_15_cnt"), Some(2.0));
        assert_eq!(table.value("e1", "sentence_50_cnt"), Some(0.0));
        assert_eq!(table.value("e1", "sentence_len_first"), Some(28.0));
        assert_eq!(table.value("e1", "sentence_len_last"), Some(36.0));
        assert_eq!(table.value("e1", "sentence_word_cnt_sum"), Some(13.0));
    }
}
