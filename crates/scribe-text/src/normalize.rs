//! Deterministic text-cleaning pipeline.
//!
//! Every variant runs the same fixed sequence of passes and differs only in
//! two optional steps:
//!
//! ```text
//! lowercase
//!   → strip HTML tags
//!   → strip @mentions
//!   → strip 'digits, then digit runs
//!   → strip http tokens
//!   → collapse whitespace
//!   → [expand contractions]
//!   → collapse repeated '.' and ','
//!   → [remove punctuation]
//!   → trim
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::contractions::expand_contractions;

/// ASCII punctuation characters removed by [`remove_punctuation`].
pub const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"<.*?>"));
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"@\w+"));
static QUOTED_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"'\d+"));
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\d+"));
static HTTP_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"http\w+"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));
static DOTS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\.+"));
static COMMAS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r",+"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern is valid")
}

/// Optional steps of the normalization pipeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub expand_contractions: bool,
    pub strip_punctuation: bool,
}

/// The four named normalization variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextVariant {
    Base,
    WithContractions,
    WithPunctRemoved,
    WithContractionsAndPunctRemoved,
}

impl TextVariant {
    pub const ALL: [Self; 4] = [
        Self::Base,
        Self::WithContractions,
        Self::WithPunctRemoved,
        Self::WithContractionsAndPunctRemoved,
    ];

    #[must_use]
    pub const fn options(self) -> NormalizeOptions {
        match self {
            Self::Base => NormalizeOptions {
                expand_contractions: false,
                strip_punctuation: false,
            },
            Self::WithContractions => NormalizeOptions {
                expand_contractions: true,
                strip_punctuation: false,
            },
            Self::WithPunctRemoved => NormalizeOptions {
                expand_contractions: false,
                strip_punctuation: true,
            },
            Self::WithContractionsAndPunctRemoved => NormalizeOptions {
                expand_contractions: true,
                strip_punctuation: true,
            },
        }
    }

    /// Suffix appended to feature columns computed on this variant.
    #[must_use]
    pub const fn column_suffix(self) -> &'static str {
        match self {
            Self::Base => "_p",
            Self::WithContractions => "_pc",
            Self::WithPunctRemoved => "_ppr",
            Self::WithContractionsAndPunctRemoved => "_pcpr",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::WithContractions => "with_contractions",
            Self::WithPunctRemoved => "with_punct_removed",
            Self::WithContractionsAndPunctRemoved => "with_contractions_and_punct_removed",
        }
    }

    #[must_use]
    pub fn apply(self, text: &str) -> String {
        normalize(text, self.options())
    }
}

/// Runs the normalization pipeline over `text`.
///
/// # Examples
///
/// ```
/// use scribe_text::normalize::{NormalizeOptions, normalize};
///
/// let options = NormalizeOptions {
///     expand_contractions: true,
///     strip_punctuation: true,
/// };
/// assert_eq!(normalize("<p>I can't   go...</p>", options), "i cannot go");
/// assert_eq!(normalize("  \n\t ", options), "");
/// ```
#[must_use]
pub fn normalize(text: &str, options: NormalizeOptions) -> String {
    let text = text.to_lowercase();
    let text = remove_html(&text);
    let text = MENTION_RE.replace_all(&text, "");
    let text = QUOTED_DIGITS_RE.replace_all(&text, "");
    let text = DIGITS_RE.replace_all(&text, "");
    let text = HTTP_RE.replace_all(&text, "");
    let mut text = WHITESPACE_RE.replace_all(&text, " ").into_owned();
    if options.expand_contractions {
        text = expand_contractions(&text);
    }
    let text = DOTS_RE.replace_all(&text, ".");
    let mut text = COMMAS_RE.replace_all(&text, ",").into_owned();
    if options.strip_punctuation {
        text = remove_punctuation(&text);
    }
    text.trim().to_owned()
}

/// Removes every `<...>` span; a span never crosses a newline.
#[must_use]
pub fn remove_html(text: &str) -> String {
    HTML_TAG_RE.replace_all(text, "").into_owned()
}

/// Deletes every ASCII punctuation character.
#[must_use]
pub fn remove_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !ASCII_PUNCTUATION.contains(*c))
        .collect()
}
