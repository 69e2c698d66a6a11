//! Treebank-style word tokenizer.
//!
//! Splits on whitespace, then separates leading brackets and quotes, trailing
//! punctuation and English clitics (`n't`, `'s`, `'re`, ...) into their own
//! tokens. Tokens borrow from the input.

const OPENING: &[char] = &['"', '(', '[', '{', '<', '`'];
const CLOSING: &[char] = &['.', ',', ';', ':', '!', '?', '"', '\'', ')', ']', '}', '>'];
const CLITICS: &[&str] = &["n't", "'s", "'m", "'d", "'re", "'ve", "'ll"];

/// Tokenizes `text` into words and punctuation.
///
/// # Examples
///
/// ```
/// use scribe_text::tokenize::word_tokenize;
///
/// assert_eq!(
///     word_tokenize("Hello, world! I can't go..."),
///     ["Hello", ",", "world", "!", "I", "ca", "n't", "go", "..."]
/// );
/// ```
#[must_use]
pub fn word_tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        push_chunk_tokens(chunk, &mut tokens);
    }
    tokens
}

fn push_chunk_tokens<'a>(chunk: &'a str, tokens: &mut Vec<&'a str>) {
    let mut core = chunk;
    while let Some(c) = core.chars().next().filter(|c| OPENING.contains(c)) {
        let (head, rest) = core.split_at(c.len_utf8());
        tokens.push(head);
        core = rest;
    }

    let mut trailing = vec![];
    while let Some(c) = core.chars().next_back().filter(|c| CLOSING.contains(c)) {
        // an ellipsis stays one token
        let run = if c == '.' {
            core.len() - core.trim_end_matches('.').len()
        } else {
            c.len_utf8()
        };
        let (rest, tail) = core.split_at(core.len() - run);
        trailing.push(tail);
        core = rest;
    }

    match split_clitic(core) {
        Some((stem, clitic)) => tokens.extend([stem, clitic]),
        None if !core.is_empty() => tokens.push(core),
        None => {}
    }
    tokens.extend(trailing.into_iter().rev());
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        let split = word.len().checked_sub(clitic.len())?;
        if split == 0 || !word.is_char_boundary(split) {
            return None;
        }
        let (stem, suffix) = word.split_at(split);
        suffix.eq_ignore_ascii_case(clitic).then_some((stem, suffix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(word_tokenize("").is_empty());
        assert!(word_tokenize(" \n ").is_empty());
    }

    #[test]
    fn test_clitics_split() {
        assert_eq!(word_tokenize("It's"), ["It", "'s"]);
        assert_eq!(word_tokenize("we'll they're I'm"), ["we", "'ll", "they", "'re", "I", "'m"]);
        assert_eq!(word_tokenize("DON'T"), ["DO", "N'T"]);
    }

    #[test]
    fn test_bare_clitic_is_kept() {
        assert_eq!(word_tokenize("n't 's"), ["n't", "'s"]);
    }

    #[test]
    fn test_brackets_and_quotes() {
        assert_eq!(
            word_tokenize("(\"quoted\") [x]."),
            ["(", "\"", "quoted", "\"", ")", "[", "x", "]", "."]
        );
    }

    #[test]
    fn test_pure_punctuation_chunk() {
        assert_eq!(word_tokenize("!!"), ["!", "!"]);
    }

    #[test]
    fn test_non_ascii_words() {
        assert_eq!(word_tokenize("café, naïve."), ["café", ",", "naïve", "."]);
    }
}
