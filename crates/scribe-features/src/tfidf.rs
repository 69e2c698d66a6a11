//! TF-IDF vectorization with a fit/transform split.
//!
//! [`TfidfParams::fit`] learns a vocabulary and inverse document frequencies
//! from a corpus and returns a [`FittedTfidf`]. The fitted value is
//! serializable and transforms any other corpus into exactly the same
//! columns; terms unseen at fit time are ignored.
//!
//! # Weighting
//!
//! ```text
//! tf(t, d)  = count(t, d)            or 1 + ln(count(t, d)) when sublinear
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! row(d)    = l2_normalize([tf(t, d) * idf(t) for t in vocabulary])
//! ```
//!
//! # Examples
//!
//! ```
//! use scribe_features::tfidf::{Analyzer, DocFrequency, TfidfParams};
//!
//! let params = TfidfParams {
//!     analyzer: Analyzer::words(r"\b\w+\b", vec![]),
//!     min_df: DocFrequency::Count(1),
//!     max_df: DocFrequency::Fraction(1.0),
//!     ..TfidfParams::default()
//! };
//! let fitted = params.fit(&["a a b", "b b c"]).unwrap();
//! assert_eq!(fitted.terms(), ["a", "b", "c"]);
//!
//! let rows = fitted.transform(&["zzz"]).unwrap();
//! assert_eq!(rows[0], vec![0.0; 3]);
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use rayon::prelude::*;
use regex::Regex;
use scribe_text::accents::{strip_accents_ascii, strip_accents_unicode};
use serde::{Deserialize, Serialize};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TfidfError {
    #[display("cannot fit a vocabulary on an empty corpus")]
    EmptyCorpus,
    #[display("invalid n-gram range ({min}, {max})")]
    InvalidNgramRange { min: usize, max: usize },
    #[display("document frequency fraction {value} is outside [0, 1]")]
    InvalidDocFrequency { value: f64 },
    #[display("max_df corresponds to fewer documents than min_df ({max_docs} < {min_docs})")]
    MaxDfBelowMinDf { min_docs: f64, max_docs: f64 },
    #[display("after pruning, no terms remain; try a lower min_df or a higher max_df")]
    EmptyVocabulary,
    #[display("invalid token pattern")]
    TokenPattern(regex::Error),
}

/// A document frequency bound, absolute or relative to the corpus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocFrequency {
    Count(usize),
    Fraction(f64),
}

impl DocFrequency {
    /// The bound expressed as a number of documents.
    #[expect(clippy::cast_precision_loss)]
    fn resolve(self, n_docs: usize) -> Result<f64, TfidfError> {
        match self {
            Self::Count(count) => Ok(count as f64),
            Self::Fraction(value) if (0.0..=1.0).contains(&value) => Ok(value * n_docs as f64),
            Self::Fraction(value) => Err(TfidfError::InvalidDocFrequency { value }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripAccents {
    /// NFKD, then drop combining marks.
    Unicode,
    /// NFKD, then drop every non-ASCII character.
    Ascii,
}

impl StripAccents {
    fn apply(self, text: &str) -> String {
        match self {
            Self::Unicode => strip_accents_unicode(text),
            Self::Ascii => strip_accents_ascii(text),
        }
    }
}

/// How a document is turned into tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Analyzer {
    /// The document is already a token sequence: each character is a token.
    ///
    /// No lowercasing or tokenization happens.
    Characters,
    /// Regex word tokens, optionally lowercased, with stopwords removed.
    Words {
        token_pattern: String,
        lowercase: bool,
        /// Sorted stopword list.
        stop_words: Vec<String>,
    },
}

impl Analyzer {
    pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

    /// A lowercasing word analyzer; `stop_words` may be in any order.
    #[must_use]
    pub fn words(token_pattern: &str, mut stop_words: Vec<String>) -> Self {
        stop_words.sort_unstable();
        stop_words.dedup();
        Self::Words {
            token_pattern: token_pattern.to_owned(),
            lowercase: true,
            stop_words,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfParams {
    pub analyzer: Analyzer,
    pub strip_accents: Option<StripAccents>,
    /// Inclusive `(min_n, max_n)`.
    pub ngram_range: (usize, usize),
    pub min_df: DocFrequency,
    pub max_df: DocFrequency,
    pub sublinear_tf: bool,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            analyzer: Analyzer::words(Analyzer::DEFAULT_TOKEN_PATTERN, vec![]),
            strip_accents: None,
            ngram_range: (1, 1),
            min_df: DocFrequency::Count(1),
            max_df: DocFrequency::Fraction(1.0),
            sublinear_tf: false,
        }
    }
}

/// Turns documents into n-gram terms according to [`TfidfParams`].
struct DocumentAnalyzer<'a> {
    params: &'a TfidfParams,
    token_re: Option<Regex>,
}

impl<'a> DocumentAnalyzer<'a> {
    fn new(params: &'a TfidfParams) -> Result<Self, TfidfError> {
        let (min_n, max_n) = params.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(TfidfError::InvalidNgramRange {
                min: min_n,
                max: max_n,
            });
        }
        let token_re = match &params.analyzer {
            Analyzer::Characters => None,
            Analyzer::Words { token_pattern, .. } => {
                Some(Regex::new(token_pattern).map_err(TfidfError::TokenPattern)?)
            }
        };
        Ok(Self { params, token_re })
    }

    fn tokens(&self, document: &str) -> Vec<String> {
        match (&self.params.analyzer, &self.token_re) {
            (
                Analyzer::Words {
                    lowercase,
                    stop_words,
                    ..
                },
                Some(token_re),
            ) => {
                let mut text = if *lowercase {
                    document.to_lowercase()
                } else {
                    document.to_owned()
                };
                if let Some(strip) = self.params.strip_accents {
                    text = strip.apply(&text);
                }
                token_re
                    .find_iter(&text)
                    .map(|m| m.as_str())
                    .filter(|token| stop_words.binary_search_by(|w| w.as_str().cmp(token)).is_err())
                    .map(str::to_owned)
                    .collect()
            }
            _ => document
                .chars()
                .map(|c| {
                    let mut buf = [0; 4];
                    let token: &str = c.encode_utf8(&mut buf);
                    match self.params.strip_accents {
                        Some(strip) => strip.apply(token),
                        None => token.to_owned(),
                    }
                })
                .collect(),
        }
    }

    /// All n-grams of the document, tokens joined by a single space.
    fn terms(&self, document: &str) -> Vec<String> {
        let tokens = self.tokens(document);
        let (min_n, max_n) = self.params.ngram_range;
        if (min_n, max_n) == (1, 1) {
            return tokens;
        }
        let mut terms = vec![];
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }
}

impl TfidfParams {
    /// Learns the vocabulary and idf weights of `documents`.
    pub fn fit<S>(&self, documents: &[S]) -> Result<FittedTfidf, TfidfError>
    where
        S: AsRef<str> + Sync,
    {
        let analyzer = DocumentAnalyzer::new(self)?;
        let n_docs = documents.len();
        if n_docs == 0 {
            return Err(TfidfError::EmptyCorpus);
        }
        let min_docs = self.min_df.resolve(n_docs)?;
        let max_docs = self.max_df.resolve(n_docs)?;
        if max_docs < min_docs {
            return Err(TfidfError::MaxDfBelowMinDf { min_docs, max_docs });
        }

        let doc_terms = documents
            .par_iter()
            .map(|doc| {
                analyzer
                    .terms(doc.as_ref())
                    .into_iter()
                    .collect::<HashSet<_>>()
            })
            .collect::<Vec<_>>();
        let mut doc_freq = BTreeMap::<String, usize>::new();
        for terms in doc_terms {
            for term in terms {
                *doc_freq.entry(term).or_default() += 1;
            }
        }
        let seen_terms = doc_freq.len();

        #[expect(clippy::cast_precision_loss)]
        let (terms, idf): (Vec<_>, Vec<_>) = doc_freq
            .into_iter()
            .filter(|&(_, df)| {
                let df = df as f64;
                min_docs <= df && df <= max_docs
            })
            .map(|(term, df)| {
                let idf = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
                (term, idf)
            })
            .unzip();
        if terms.is_empty() {
            return Err(TfidfError::EmptyVocabulary);
        }
        tracing::debug!(
            documents = n_docs,
            seen_terms,
            kept_terms = terms.len(),
            "fitted tf-idf vocabulary"
        );

        Ok(FittedTfidf {
            params: self.clone(),
            terms,
            idf,
        })
    }
}

/// A fitted TF-IDF model: sorted vocabulary plus one idf weight per term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedTfidf {
    params: TfidfParams,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl FittedTfidf {
    #[must_use]
    pub fn params(&self) -> &TfidfParams {
        &self.params
    }

    /// Vocabulary terms in column order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Column index of `term`, if it is in the vocabulary.
    #[must_use]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }

    /// Transforms documents into dense rows of [`vocabulary_size`](Self::vocabulary_size) values.
    pub fn transform<S>(&self, documents: &[S]) -> Result<Vec<Vec<f64>>, TfidfError>
    where
        S: AsRef<str> + Sync,
    {
        let analyzer = DocumentAnalyzer::new(&self.params)?;
        Ok(documents
            .par_iter()
            .map(|doc| self.transform_one(&analyzer, doc.as_ref()))
            .collect())
    }

    #[expect(clippy::cast_precision_loss)]
    fn transform_one(&self, analyzer: &DocumentAnalyzer<'_>, document: &str) -> Vec<f64> {
        let mut counts = HashMap::<usize, usize>::new();
        for term in analyzer.terms(document) {
            if let Some(idx) = self.term_index(&term) {
                *counts.entry(idx).or_default() += 1;
            }
        }

        let mut row = vec![0.0; self.terms.len()];
        for (idx, count) in counts {
            let count = count as f64;
            let tf = if self.params.sublinear_tf {
                1.0 + count.ln()
            } else {
                count
            };
            row[idx] = tf * self.idf[idx];
        }
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }
        row
    }
}
