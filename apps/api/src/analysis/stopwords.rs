//! Process-wide stop-word table for ATS keyword matching.
//!
//! Built once on first use and never mutated, so concurrent readers need no lock.

use std::collections::HashSet;

use once_cell::sync::Lazy;

const STOP_WORD_LIST: &[&str] = &[
    // articles, conjunctions, prepositions
    "a", "an", "the", "and", "or", "but", "nor", "so", "if", "than", "then", "in", "on", "at",
    "to", "for", "of", "with", "by", "from", "into", "onto", "about", "as", "per", "via",
    // auxiliaries and modals
    "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "shall",
    // pronouns and determiners
    "i", "me", "my", "we", "our", "you", "your", "he", "him", "his", "she", "her", "they",
    "them", "their", "this", "that", "these", "those", "who", "whom", "which", "what", "all",
    "any", "some", "such", "each", "other",
    // filler common to postings
    "also", "very", "not", "no", "need", "needs", "want", "wants", "looking", "etc",
];

/// Tokens excluded from ATS keyword sets. Entries are lowercase.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORD_LIST.iter().copied().collect());

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_words_are_stop_words() {
        for word in ["the", "and", "with", "a", "i", "have", "need"] {
            assert!(is_stop_word(word), "{word} should be a stop word");
        }
    }

    #[test]
    fn test_skill_words_are_not_stop_words() {
        for word in ["python", "sql", "experience", "skills", "rust", "it"] {
            assert!(!is_stop_word(word), "{word} should not be a stop word");
        }
    }

    #[test]
    fn test_entries_are_lowercase() {
        assert!(STOP_WORDS.iter().all(|w| *w == w.to_lowercase()));
    }
}
