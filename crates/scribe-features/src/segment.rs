//! Length and count measures shared by the segment engines.

/// Length in Unicode scalar values.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Number of pieces produced by splitting on `separator`.
///
/// Like any split, an empty string yields one (empty) piece.
#[must_use]
pub fn split_count(text: &str, separator: &str) -> usize {
    text.split(separator).count()
}

/// Number of `'.'`-delimited segments.
#[must_use]
pub fn sentence_piece_count(text: &str) -> usize {
    split_count(text, ".")
}

/// Number of single-space-delimited tokens, empty tokens included.
#[must_use]
pub fn space_word_count(text: &str) -> usize {
    split_count(text, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_chars_not_bytes() {
        assert_eq!(char_len("naïve"), 5);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_split_counts() {
        assert_eq!(sentence_piece_count("a. b. c"), 3);
        assert_eq!(sentence_piece_count("a. b."), 3);
        assert_eq!(sentence_piece_count(""), 1);
        assert_eq!(space_word_count("a  b"), 3);
        assert_eq!(space_word_count(" this is fine"), 4);
    }
}
