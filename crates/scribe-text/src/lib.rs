//! Text primitives for essay feature engineering.
//!
//! This crate holds the pure, row-independent pieces of the pipeline:
//!
//! - [`normalize`]: the four text normalization variants
//! - [`contractions`]: English contraction expansion
//! - [`tokenize`]: a Treebank-style word tokenizer
//! - [`accents`]: Unicode and ASCII accent stripping
//! - [`spelling`]: the misspelling counter and its dictionary loader
//! - [`stopwords`]: stopword lists
//!
//! # Examples
//!
//! ```
//! use scribe_text::{normalize::TextVariant, spelling::SpellDictionary, tokenize::word_tokenize};
//!
//! let text = TextVariant::WithContractionsAndPunctRemoved.apply("It's <i>fine</i>, isn't it?");
//! assert_eq!(text, "it is fine is not it");
//! assert_eq!(word_tokenize(&text).len(), 6);
//!
//! let dictionary = SpellDictionary::from_words(["it", "is", "not", "fine"]);
//! assert_eq!(dictionary.count_misspellings(&text), 0);
//! ```

pub mod accents;
pub mod contractions;
pub mod normalize;
pub mod spelling;
pub mod stopwords;
pub mod tokenize;
