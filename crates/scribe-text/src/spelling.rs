//! Dictionary-backed misspelling counter.
//!
//! The dictionary is loaded once, up front, and then only read. Callers hold a
//! [`SpellDictionary`] and pass it by reference to whatever needs spelling
//! counts.

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fs::File,
    io::{self, BufRead as _, BufReader},
    path::{Path, PathBuf},
};

use crate::normalize::ASCII_PUNCTUATION;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadDictionaryError {
    #[display("failed to read dictionary file {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse dictionary file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("invalid word frequency '{value}' on line {line} of {}", path.display())]
    InvalidFrequency {
        path: PathBuf,
        line: usize,
        value: String,
    },
    #[display("dictionary file {} contains no words", path.display())]
    Empty { path: PathBuf },
}

/// A case-insensitive set of known words.
#[derive(Debug, Clone, Default)]
pub struct SpellDictionary {
    words: HashSet<String>,
    longest_word_len: usize,
}

impl SpellDictionary {
    /// Builds a dictionary from an iterator of words.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribe_text::spelling::SpellDictionary;
    ///
    /// let dictionary = SpellDictionary::from_words(["the", "cat", "sat"]);
    /// assert_eq!(dictionary.count_misspellings("The cat szat on teh mat"), 4);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();
        for word in words {
            dictionary.insert(word.as_ref());
        }
        dictionary
    }

    /// Loads a dictionary, choosing the format from the file extension.
    ///
    /// `.json` files are read with [`from_json_file`](Self::from_json_file),
    /// anything else with [`from_word_list_file`](Self::from_word_list_file).
    pub fn load<P>(path: P) -> Result<Self, LoadDictionaryError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_word_list_file(path)
        }
    }

    /// Loads a word-frequency JSON object (`{"word": frequency, ...}`).
    pub fn from_json_file<P>(path: P) -> Result<Self, LoadDictionaryError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadDictionaryError::Io {
            path: path.to_owned(),
            source,
        })?;
        let frequencies: HashMap<String, u64> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| LoadDictionaryError::Parse {
                path: path.to_owned(),
                source,
            })?;
        let dictionary = Self::from_words(frequencies.keys());
        dictionary.non_empty(path)
    }

    /// Loads a plain word list: one `word [frequency]` entry per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_word_list_file<P>(path: P) -> Result<Self, LoadDictionaryError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let io_error = |source| LoadDictionaryError::Io {
            path: path.to_owned(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(io_error)?);

        let mut dictionary = Self::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(io_error)?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            if let Some(value) = fields.next() {
                if value.parse::<u64>().is_err() {
                    return Err(LoadDictionaryError::InvalidFrequency {
                        path: path.to_owned(),
                        line: idx + 1,
                        value: value.to_owned(),
                    });
                }
            }
            dictionary.insert(word);
        }
        dictionary.non_empty(path)
    }

    fn non_empty(self, path: &Path) -> Result<Self, LoadDictionaryError> {
        if self.is_empty() {
            return Err(LoadDictionaryError::Empty {
                path: path.to_owned(),
            });
        }
        Ok(self)
    }

    fn insert(&mut self, word: &str) {
        let word = word.to_lowercase();
        self.longest_word_len = self.longest_word_len.max(word.chars().count());
        self.words.insert(word);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Returns the distinct lowercased whitespace tokens of `text` that are
    /// checkable and not in the dictionary.
    #[must_use]
    pub fn unknown_words(&self, text: &str) -> BTreeSet<String> {
        text.split_whitespace()
            .map(str::to_lowercase)
            .filter(|word| self.should_check(word) && !self.words.contains(word))
            .collect()
    }

    /// Counts distinct unknown words in `text`.
    #[must_use]
    pub fn count_misspellings(&self, text: &str) -> usize {
        self.unknown_words(text).len()
    }

    // Single punctuation marks, numbers, `nan` and tokens far longer than any
    // known word are never reported.
    fn should_check(&self, word: &str) -> bool {
        let len = word.chars().count();
        if len == 1 && ASCII_PUNCTUATION.contains(word) {
            return false;
        }
        if len > self.longest_word_len + 3 {
            return false;
        }
        if word == "nan" || word.parse::<f64>().is_ok() {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn dictionary() -> SpellDictionary {
        SpellDictionary::from_words(["the", "quick", "brown", "fox", "Jumps", "over"])
    }

    #[test]
    fn test_known_words_case_insensitive() {
        let dictionary = dictionary();
        assert!(dictionary.contains("JUMPS"));
        assert_eq!(dictionary.count_misspellings("The QUICK brown fox jumps"), 0);
    }

    #[test]
    fn test_repeated_unknown_word_counts_once() {
        let dictionary = dictionary();
        assert_eq!(dictionary.count_misspellings("teh teh Teh fox"), 1);
    }

    #[test]
    fn test_no_normalization_before_lookup() {
        // trailing punctuation makes the token unknown
        let dictionary = dictionary();
        assert_eq!(dictionary.count_misspellings("the fox."), 1);
    }

    #[test]
    fn test_unchecked_tokens() {
        let dictionary = dictionary();
        assert_eq!(dictionary.count_misspellings(", 42 3.5 nan !"), 0);
        // longest word is 5 chars, so 9+ chars are skipped
        assert_eq!(dictionary.count_misspellings("abcdefghi abcdefgh"), 1);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(dictionary().count_misspellings(""), 0);
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"hello": 10, "World": 3}}"#).unwrap();
        let dictionary = SpellDictionary::load(file.path()).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.contains("world"));
    }

    #[test]
    fn test_load_word_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment\nhello 10\n\nworld").unwrap();
        let dictionary = SpellDictionary::load(file.path()).unwrap();
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn test_load_word_list_bad_frequency() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello ten").unwrap();
        let err = SpellDictionary::from_word_list_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadDictionaryError::InvalidFrequency { line: 1, .. }
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = SpellDictionary::load("/nonexistent/dictionary.json").unwrap_err();
        assert!(matches!(err, LoadDictionaryError::Io { .. }));
    }

    #[test]
    fn test_load_empty_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = SpellDictionary::load(file.path()).unwrap_err();
        assert!(matches!(err, LoadDictionaryError::Empty { .. }));
    }
}
