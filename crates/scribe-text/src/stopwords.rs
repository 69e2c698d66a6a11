//! Stopword lists for vocabulary filtering.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadStopWordsError {
    #[display("failed to read stopword file {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("stopword file {} contains no words", path.display())]
    Empty { path: PathBuf },
}

/// A set of words excluded from a vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The standard English stopword list (179 words).
    #[must_use]
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads one stopword per line; blank lines and `#` comments are skipped.
    pub fn from_file<P>(path: P) -> Result<Self, LoadStopWordsError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadStopWordsError::Io {
            path: path.to_owned(),
            source,
        })?;
        let stopwords = Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        if stopwords.is_empty() {
            return Err(LoadStopWordsError::Empty {
                path: path.to_owned(),
            });
        }
        Ok(stopwords)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Returns the stopwords in sorted order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut words = self.words.iter().cloned().collect::<Vec<_>>();
        words.sort_unstable();
        words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_english_list() {
        let stopwords = StopWords::english();
        assert_eq!(stopwords.len(), 179);
        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("wouldn't"));
        assert!(!stopwords.contains("essay"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom\nfoo\n\n  bar  ").unwrap();
        let stopwords = StopWords::from_file(file.path()).unwrap();
        assert_eq!(stopwords, StopWords::from_words(["foo", "bar"]));
    }

    #[test]
    fn test_from_missing_file_fails() {
        let err = StopWords::from_file("/nonexistent/stopwords.txt").unwrap_err();
        assert!(matches!(err, LoadStopWordsError::Io { .. }));
    }
}
