//! Text normalization for the two downstream consumers.
//!
//! - [`clean_for_classifier`] reproduces the preprocessing the category classifier was
//!   trained on. Its output, [`CleanedText`], is the only input the classifier accepts.
//! - [`normalize_for_ats`] builds the keyword set used by the overlap scorer. It keeps
//!   technical tokens such as `c++`, `c#`, `node.js` and compounds such as `ci/cd` intact.
//!
//! The two outputs are distinct types so one policy's output can never reach the other
//! policy's consumer.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::stopwords::is_stop_word;

static SHORT_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w{1,2}\b").expect("valid short word regex"));
static NON_ALPHA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z]").expect("valid non-alpha regex"));

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\|,;:()\[\]{}"']"#).expect("valid separator regex"));
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w+#.]+").expect("valid token regex"));
// Segments use the same character class as plain tokens, so a match always starts at
// the beginning of a token run (`.net/c#`, never `net/c#`).
static COMPOUND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w+#.]+(?:[/-][\w+#.]+)+").expect("valid compound regex")
});

// ────────────────────────────────────────────────────────────────────────────
// Classifier cleaning
// ────────────────────────────────────────────────────────────────────────────

/// Text cleaned the way the category classifier expects: words of one or two
/// characters removed, every non-ASCII-letter replaced by a space, lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText(String);

impl CleanedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

pub fn clean_for_classifier(text: &str) -> CleanedText {
    let without_short = SHORT_WORD_RE.replace_all(text, "");
    let letters_only = NON_ALPHA_RE.replace_all(&without_short, " ");
    CleanedText(letters_only.to_lowercase())
}

// ────────────────────────────────────────────────────────────────────────────
// ATS keyword normalization
// ────────────────────────────────────────────────────────────────────────────

/// Keyword set produced by [`normalize_for_ats`]. Iterates in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtsTokens(BTreeSet<String>);

impl AtsTokens {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

pub fn normalize_for_ats(text: &str) -> AtsTokens {
    let lowered = text.to_lowercase();

    // Compounds are taken before separators are blanked, otherwise `ci/cd` is lost.
    let compounds = COMPOUND_RE
        .find_iter(&lowered)
        .map(|m| finish_token(m.as_str()))
        .filter(|c| is_meaningful_compound(c));

    let separated = SEPARATOR_RE.replace_all(&lowered, " ");
    let plain = TOKEN_RE.find_iter(&separated).map(|m| finish_token(m.as_str()));

    let tokens = plain
        .chain(compounds)
        .filter(|t| has_word_char(t) && !is_stop_word(t))
        .map(String::from)
        .collect();

    AtsTokens(tokens)
}

/// Drops sentence-final periods (`node.js.` → `node.js`); leading dots survive for `.net`.
fn finish_token(raw: &str) -> &str {
    raw.trim_end_matches('.')
}

/// Rejects symbol-only tokens such as a lone `+`, `#` or `...`.
fn has_word_char(token: &str) -> bool {
    token.chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Every segment must carry a word character, and at least one must not be a stop word.
fn is_meaningful_compound(compound: &str) -> bool {
    let segments: Vec<&str> = compound.split(['/', '-']).map(finish_token).collect();
    segments.iter().all(|s| has_word_char(s)) && !segments.iter().all(|s| is_stop_word(s))
}
