//! Whole-essay text statistics.
//!
//! For the raw text and each normalization variant the preprocessor records
//! length, token count, distinct token count and misspelling count. Column
//! names carry the variant suffix (`text_length`, `text_length_p`,
//! `text_length_pc`, ...). Two structural counts on the raw text complete the
//! block.

use std::{borrow::Cow, collections::HashSet};

use rayon::prelude::*;
use scribe_text::{normalize::TextVariant, spelling::SpellDictionary, tokenize::word_tokenize};

use crate::{
    essay::Essay,
    paragraph::PARAGRAPH_SEPARATOR,
    segment::{char_len, sentence_piece_count, split_count},
    table::{FeatureTable, TableError},
};

pub const TEXT_STAT_NAMES: [&str; 4] = [
    "text_length",
    "word_count",
    "unique_word_count",
    "spelling_err_num",
];

pub const SENTENCE_COUNT_COLUMN: &str = "sentence_count";
pub const PARAGRAPH_COUNT_COLUMN: &str = "paragraph_count";

/// The text an essay-level statistic is computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm {
    Raw,
    Normalized(TextVariant),
}

impl TextForm {
    pub const ALL: [Self; 5] = [
        Self::Raw,
        Self::Normalized(TextVariant::Base),
        Self::Normalized(TextVariant::WithContractions),
        Self::Normalized(TextVariant::WithPunctRemoved),
        Self::Normalized(TextVariant::WithContractionsAndPunctRemoved),
    ];

    #[must_use]
    pub const fn column_suffix(self) -> &'static str {
        match self {
            Self::Raw => "",
            Self::Normalized(variant) => variant.column_suffix(),
        }
    }

    #[must_use]
    pub fn render(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Raw => Cow::Borrowed(text),
            Self::Normalized(variant) => Cow::Owned(variant.apply(text)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    pub text_length: usize,
    pub word_count: usize,
    pub unique_word_count: usize,
    pub spelling_err_num: usize,
}

impl TextStats {
    const fn to_array(self) -> [usize; 4] {
        [
            self.text_length,
            self.word_count,
            self.unique_word_count,
            self.spelling_err_num,
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EssayPreprocessor<'a> {
    dictionary: &'a SpellDictionary,
}

impl<'a> EssayPreprocessor<'a> {
    #[must_use]
    pub fn new(dictionary: &'a SpellDictionary) -> Self {
        Self { dictionary }
    }

    /// Column names in the order [`process`](Self::process) writes them.
    #[must_use]
    pub fn column_names() -> Vec<String> {
        TextForm::ALL
            .iter()
            .flat_map(|form| {
                TEXT_STAT_NAMES
                    .iter()
                    .map(move |name| format!("{name}{}", form.column_suffix()))
            })
            .chain([
                SENTENCE_COUNT_COLUMN.to_owned(),
                PARAGRAPH_COUNT_COLUMN.to_owned(),
            ])
            .collect()
    }

    #[must_use]
    pub fn text_stats(&self, text: &str) -> TextStats {
        let tokens = word_tokenize(text);
        let unique_word_count = tokens.iter().collect::<HashSet<_>>().len();
        TextStats {
            text_length: char_len(text),
            word_count: tokens.len(),
            unique_word_count,
            spelling_err_num: self.dictionary.count_misspellings(text),
        }
    }

    fn essay_row(&self, essay: &Essay) -> Vec<usize> {
        let text = &essay.full_text;
        TextForm::ALL
            .iter()
            .flat_map(|form| self.text_stats(&form.render(text)).to_array())
            .chain([
                sentence_piece_count(text),
                split_count(text, PARAGRAPH_SEPARATOR),
            ])
            .collect()
    }

    /// Computes the essay-level block, one row per input essay in input order.
    #[expect(clippy::cast_precision_loss)]
    pub fn process(&self, essays: &[Essay]) -> Result<FeatureTable, TableError> {
        let rows = essays
            .par_iter()
            .map(|essay| self.essay_row(essay))
            .collect::<Vec<_>>();

        let mut table = FeatureTable::new(essays.iter().map(|e| e.essay_id.clone()).collect());
        for (idx, name) in Self::column_names().into_iter().enumerate() {
            let values = rows.iter().map(|row| Some(row[idx] as f64)).collect();
            table.push_column(name, values)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> SpellDictionary {
        SpellDictionary::from_words(["hello", "world", "this", "is", "fine"])
    }

    #[test]
    fn test_column_names() {
        let names = EssayPreprocessor::column_names();
        assert_eq!(names.len(), 22);
        assert_eq!(&names[..4], TEXT_STAT_NAMES);
        assert_eq!(names[4], "text_length_p");
        assert_eq!(names[19], "spelling_err_num_pcpr");
        assert_eq!(&names[20..], [SENTENCE_COUNT_COLUMN, PARAGRAPH_COUNT_COLUMN]);
    }

    #[test]
    fn test_example_essay() {
        let dictionary = dictionary();
        let essays = [Essay::new("e1", "Hello world.\n\nThis is fine.")];
        let table = EssayPreprocessor::new(&dictionary).process(&essays).unwrap();

        assert_eq!(table.value("e1", "text_length"), Some(27.0));
        assert_eq!(table.value("e1", "word_count"), Some(7.0));
        assert_eq!(table.value("e1", "unique_word_count"), Some(6.0));
        // "world." and "fine." keep their periods
        assert_eq!(table.value("e1", "spelling_err_num"), Some(2.0));

        assert_eq!(table.value("e1", "text_length_pcpr"), Some(24.0));
        assert_eq!(table.value("e1", "word_count_pcpr"), Some(5.0));
        assert_eq!(table.value("e1", "spelling_err_num_pcpr"), Some(0.0));

        assert_eq!(table.value("e1", "sentence_count"), Some(3.0));
        assert_eq!(table.value("e1", "paragraph_count"), Some(2.0));
    }

    #[test]
    fn test_word_count_bounds_unique_count() {
        let dictionary = dictionary();
        let preprocessor = EssayPreprocessor::new(&dictionary);
        let texts = [
            "",
            "the the the the",
            "Don't stop, don't stop!",
            "<p>Mixed CASE case.</p>\n\nSecond paragraph, second line.",
        ];
        for text in texts {
            for form in TextForm::ALL {
                let stats = preprocessor.text_stats(&form.render(text));
                assert!(stats.word_count >= stats.unique_word_count, "{form:?}: {text}");
            }
        }
    }

    #[test]
    fn test_row_count_matches_input() {
        let dictionary = dictionary();
        let essays = [
            Essay::new("z", "one"),
            Essay::new("a", ""),
            Essay::new("m", "three words here"),
        ];
        let table = EssayPreprocessor::new(&dictionary).process(&essays).unwrap();
        assert_eq!(table.essay_ids(), ["z", "a", "m"]);
        assert_eq!(table.value("a", "word_count"), Some(0.0));
        assert_eq!(table.value("a", "paragraph_count"), Some(1.0));
    }
}
