/*!
 * Morphological analysis capability.
 *
 * The indexer never analyzes words itself; it is handed an implementation of
 * [`MorphAnalyzer`] at construction time. This module contains:
 * - The analyzer trait and its result type
 * - Typed grammatical tags
 * - The word tokenizer
 * - A lexicon-backed analyzer (`DictionaryAnalyzer`)
 */

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod dictionary;
pub mod grammemes;
pub mod tokenizer;

pub use dictionary::DictionaryAnalyzer;
pub use grammemes::{Aspect, Gender, Number, PartOfSpeech, Person, Tense, VerbFeatures};

/// Result of analyzing one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Normal form of the token
    pub lemma: String,
    /// Part of speech
    pub pos: PartOfSpeech,
    /// Verb features, present only when `pos` is `VERB`
    pub verb: Option<VerbFeatures>,
}

impl Analysis {
    /// Create an analysis for a non-verb token
    pub fn new(lemma: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
            verb: None,
        }
    }

    /// Create an analysis for a finite verb form
    pub fn verb(lemma: impl Into<String>, features: VerbFeatures) -> Self {
        Self {
            lemma: lemma.into(),
            pos: PartOfSpeech::Verb,
            verb: Some(features),
        }
    }
}

/// Common trait for morphological analyzers
///
/// Implementations are stateless per call: analyzing the same token twice
/// yields the same result.
pub trait MorphAnalyzer: Send + Sync + Debug {
    /// Analyze a single token
    ///
    /// # Returns
    /// * `Some(Analysis)` - The most probable parse of the token
    /// * `None` - The token has no recognizable part of speech
    fn analyze(&self, token: &str) -> Option<Analysis>;
}
