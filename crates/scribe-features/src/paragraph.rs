//! Paragraph engineering.
//!
//! Each essay is split on blank lines, every paragraph is base-normalized and
//! measured, and the measurements are aggregated back to one row per essay.

use rayon::prelude::*;
use scribe_text::normalize::TextVariant;

use crate::{
    aggregate::{SegmentAggregation, Threshold},
    essay::Essay,
    segment::{char_len, sentence_piece_count, space_word_count},
    table::{FeatureTable, TableError},
};

pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

pub const PARAGRAPH_THRESHOLDS: &[Threshold] = &[
    Threshold::at_least(50),
    Threshold::at_least(75),
    Threshold::at_least(100),
    Threshold::at_least(125),
    Threshold::at_least(150),
    Threshold::at_least(175),
    Threshold::at_least(200),
    Threshold::at_least(250),
    Threshold::at_least(300),
    Threshold::at_least(350),
    Threshold::at_least(400),
    Threshold::at_least(500),
    Threshold::at_least(600),
    Threshold::at_least(700),
    Threshold::at_most(25),
    Threshold::at_most(49),
];

pub const PARAGRAPH_AGGREGATION: SegmentAggregation<3> = SegmentAggregation {
    prefix: "paragraph",
    thresholds: PARAGRAPH_THRESHOLDS,
    measures: [
        "paragraph_len",
        "paragraph_sentence_cnt",
        "paragraph_word_cnt",
    ],
};

/// One normalized paragraph of an essay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    pub essay_id: &'a str,
    pub paragraph_text: String,
    pub paragraph_len: usize,
    pub paragraph_sentence_cnt: usize,
    pub paragraph_word_cnt: usize,
}

impl<'a> Paragraph<'a> {
    /// Normalizes and measures a raw paragraph.
    #[must_use]
    pub fn new(essay_id: &'a str, raw_text: &str) -> Self {
        let paragraph_text = TextVariant::Base.apply(raw_text);
        Self {
            essay_id,
            paragraph_len: char_len(&paragraph_text),
            paragraph_sentence_cnt: sentence_piece_count(&paragraph_text),
            paragraph_word_cnt: space_word_count(&paragraph_text),
            paragraph_text,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn measures(&self) -> [f64; 3] {
        [
            self.paragraph_len as f64,
            self.paragraph_sentence_cnt as f64,
            self.paragraph_word_cnt as f64,
        ]
    }
}

/// Splits every essay into paragraphs, keeping essay and paragraph order.
///
/// Every essay yields at least one paragraph.
#[must_use]
pub fn explode_paragraphs(essays: &[Essay]) -> Vec<Paragraph<'_>> {
    essays
        .par_iter()
        .flat_map_iter(|essay| {
            essay
                .full_text
                .split(PARAGRAPH_SEPARATOR)
                .map(|raw| Paragraph::new(&essay.essay_id, raw))
        })
        .collect()
}

/// Computes the paragraph feature block, one row per essay, sorted by id.
pub fn paragraph_features(essays: &[Essay]) -> Result<FeatureTable, TableError> {
    let paragraphs = explode_paragraphs(essays);
    tracing::debug!(paragraphs = paragraphs.len(), "exploded paragraphs");

    let essay_ids = essays.iter().map(|e| e.essay_id.as_str()).collect::<Vec<_>>();
    PARAGRAPH_AGGREGATION.aggregate(
        &essay_ids,
        paragraphs.iter().map(|p| (p.essay_id, p.measures())),
    )
}
