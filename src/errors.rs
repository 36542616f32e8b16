/*!
 * Error types for the paremia application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when loading or querying the morphological analyzer
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The lexicon file could not be read
    #[error("Failed to read lexicon: {0}")]
    LexiconUnreadable(String),

    /// The lexicon file is not valid JSON or has the wrong shape
    #[error("Failed to parse lexicon: {0}")]
    LexiconMalformed(String),

    /// A grammatical tag that the analyzer does not know
    #[error("Unknown {kind} tag: {tag}")]
    UnknownTag {
        /// Grammeme category (pos, aspect, number...)
        kind: &'static str,
        /// The offending tag
        tag: String,
    },
}

/// Errors that can occur while building the index
#[derive(Error, Debug)]
pub enum IngestError {
    /// The corpus document could not be read
    #[error("Failed to read corpus: {0}")]
    CorpusUnreadable(String),

    /// The corpus document is not a category -> proverb -> description mapping
    #[error("Failed to parse corpus: {0}")]
    CorpusMalformed(String),

    /// Writing to the store failed
    #[error("Store write failed: {0}")]
    Store(String),
}

/// Errors that can occur while generating quiz questions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The category does not exist in the store
    #[error("Unknown category: {0}")]
    UnknownCategory(i64),

    /// Not enough distinct decoys to build the option set
    #[error("Cannot generate question for proverb {proverb_id}: {available} decoys available, {required} required")]
    InsufficientPool {
        /// Proverb the question was being built for
        proverb_id: i64,
        /// Distinct decoy candidates found
        available: usize,
        /// Decoys needed for a full option set
        required: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the analyzer
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// Error from ingestion
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Error from quiz generation
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
