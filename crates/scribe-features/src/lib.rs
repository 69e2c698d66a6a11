//! Feature engineering for automated essay scoring.
//!
//! A [`FeaturePipeline`](pipeline::FeaturePipeline) turns a batch of
//! [`Essay`](essay::Essay)s into a [`FeatureTable`](table::FeatureTable) with
//! one row per essay, sorted by `essay_id`. The table joins these blocks:
//!
//! - [`essay_level`]: length, token and misspelling counts per text variant
//! - [`paragraph`]: threshold counts and statistics over paragraphs
//! - [`sentence`]: threshold counts and statistics over sentences
//! - [`vectorize`]: two TF-IDF blocks fitted on the training corpus
//!
//! # Examples
//!
//! ```
//! use scribe_features::{
//!     config::PipelineConfig,
//!     essay::Essay,
//!     pipeline::FeaturePipeline,
//!     tfidf::DocFrequency,
//! };
//! use scribe_text::{spelling::SpellDictionary, stopwords::StopWords};
//!
//! let mut config = PipelineConfig::default();
//! config.full_text_tfidf.min_df = DocFrequency::Count(1);
//! config.word_tfidf.min_df = DocFrequency::Count(1);
//! config.word_tfidf.max_df = DocFrequency::Fraction(1.0);
//!
//! let dictionary = SpellDictionary::from_words(["hello", "world", "this", "is", "fine"]);
//! let stop_words = StopWords::english();
//! let pipeline = FeaturePipeline::new(config, &dictionary, &stop_words);
//!
//! let essays = [
//!     Essay::new("b", "Hello world.\n\nThis is fine."),
//!     Essay::new("a", "Essays about summer reading."),
//! ];
//! let (features, _fitted) = pipeline.fit_transform(&essays).unwrap();
//! assert_eq!(features.table.essay_ids(), ["a", "b"]);
//! assert_eq!(features.table.value("b", "paragraph_count"), Some(2.0));
//! assert_eq!(features.table.value("b", "sentence_len_mean"), None);
//! ```

pub mod aggregate;
pub mod config;
pub mod essay;
pub mod essay_level;
pub mod paragraph;
pub mod pipeline;
pub mod segment;
pub mod sentence;
pub mod table;
pub mod tfidf;
pub mod vectorize;
