/*!
 * Word tokenizer.
 *
 * Splits text into word tokens: runs of letters and digits, allowing
 * apostrophes and hyphens between them ("пам'ять", "будь-що").
 * Punctuation and whitespace are never returned.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’ʼ\-][\p{L}\p{N}]+)*").expect("word pattern is valid")
});

/// Tokenize text into word tokens, preserving surface form and order
pub fn tokenize_words(text: &str) -> Vec<&str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Split text on whitespace, keeping punctuation attached to its word
pub fn split_whitespace_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
