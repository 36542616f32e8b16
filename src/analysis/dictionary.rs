/*!
 * Lexicon-backed morphological analyzer.
 *
 * The lexicon is a JSON object mapping surface forms to their analysis:
 *
 * ```json
 * {
 *   "працює": { "lemma": "працювати", "pos": "VERB", "aspect": "impf",
 *               "number": "sing", "person": "3per", "tense": "pres" },
 *   "плода":  { "lemma": "плід", "pos": "NOUN" }
 * }
 * ```
 *
 * Lookup is case-insensitive. Forms missing from the lexicon have no
 * recognizable part of speech.
 */

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{Analysis, MorphAnalyzer, PartOfSpeech, VerbFeatures};
use crate::errors::AnalyzerError;

/// One lexicon record as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LexiconEntry {
    lemma: String,
    pos: PartOfSpeech,
    #[serde(flatten)]
    features: VerbFeatures,
}

impl From<LexiconEntry> for Analysis {
    fn from(entry: LexiconEntry) -> Self {
        if entry.pos == PartOfSpeech::Verb {
            Analysis::verb(entry.lemma, entry.features)
        } else {
            Analysis::new(entry.lemma, entry.pos)
        }
    }
}

/// Analyzer answering from an in-memory lexicon
#[derive(Debug, Clone, Default)]
pub struct DictionaryAnalyzer {
    forms: HashMap<String, Analysis>,
}

impl DictionaryAnalyzer {
    /// Create an empty analyzer
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the lexicon from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| AnalyzerError::LexiconUnreadable(format!("{}: {}", path.display(), e)))?;
        let analyzer = Self::from_json_str(&json)?;
        info!("Loaded lexicon with {} forms from {:?}", analyzer.len(), path);
        Ok(analyzer)
    }

    /// Parse the lexicon from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, AnalyzerError> {
        let entries: HashMap<String, LexiconEntry> =
            serde_json::from_str(json).map_err(|e| AnalyzerError::LexiconMalformed(e.to_string()))?;

        let mut analyzer = Self::new();
        for (surface, entry) in entries {
            analyzer.insert(&surface, entry.into());
        }
        Ok(analyzer)
    }

    /// Register the analysis of a surface form, replacing any previous one
    pub fn insert(&mut self, surface: &str, analysis: Analysis) {
        self.forms.insert(surface.to_lowercase(), analysis);
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with_form(mut self, surface: &str, analysis: Analysis) -> Self {
        self.insert(surface, analysis);
        self
    }

    /// Number of known surface forms
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Whether the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl MorphAnalyzer for DictionaryAnalyzer {
    fn analyze(&self, token: &str) -> Option<Analysis> {
        let found = self.forms.get(&token.to_lowercase()).cloned();
        if found.is_none() {
            debug!("No analysis for token '{}'", token);
        }
        found
    }
}
