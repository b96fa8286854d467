//! Text tokenizer for the full-text engine
//!
//! Pipeline: UAX#29 word boundaries → strip possessives → remove non-alphanumerics
//!           → lowercase → remove stopwords
//!
//! Every word boundary advances the position counter, including words that
//! are later dropped, so phrase adjacency is measured on the original text.

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Standard English stopwords (Lucene's default set).
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

#[inline]
fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Strip English possessive suffix (`'s` / `\u{2019}s`).
#[inline]
fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .unwrap_or(word)
}

/// Normalize a single word; `None` if it is not a searchable term
fn normalize(word: &str) -> Option<String> {
    let token: String = strip_possessive(word)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if token.is_empty() || is_stopword(&token) {
        return None;
    }
    Some(token)
}

/// Tokenize text into searchable terms
///
/// # Example
///
/// ```
/// use textindex_search::tokenizer::tokenize;
///
/// let tokens = tokenize("The Quick Brown Fox's den");
/// assert_eq!(tokens, vec!["quick", "brown", "fox", "den"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().filter_map(normalize).collect()
}

/// Tokenize and deduplicate, preserving first-occurrence order
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Tokenize text and keep each term's word position
///
/// Returns the terms in document order together with the number of word
/// positions the text spans (dropped words included).
///
/// ```
/// use textindex_search::tokenizer::tokenize_with_positions;
///
/// let (terms, span) = tokenize_with_positions("the brown fox");
/// assert_eq!(terms, vec![("brown".to_string(), 1), ("fox".to_string(), 2)]);
/// assert_eq!(span, 3);
/// ```
pub fn tokenize_with_positions(text: &str) -> (Vec<(String, u32)>, u32) {
    let mut terms = Vec::new();
    let mut pos = 0u32;
    for word in text.unicode_words() {
        if let Some(token) = normalize(word) {
            terms.push((token, pos));
        }
        pos += 1;
    }
    (terms, pos)
}
