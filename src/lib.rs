/*!
 * # Paremia - proverb index, search and quizzes
 *
 * A Rust library that indexes a corpus of proverbs and idioms with their
 * descriptions, searches it, and generates quiz questions from it.
 *
 * ## Features
 *
 * - Ingest a category -> proverb -> description corpus into SQLite
 * - Unfold synonym sub-entries into proverbs of their own
 * - Lemma and surface-word indices built through an injected morphological analyzer
 * - Paginated search by lemma, first letter or substring
 * - Meaning, verb and word-order quizzes with seedable randomness
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `analysis`: Morphological analyzer trait, grammatical tags, tokenizer
 * - `database`: SQLite store, schema and repository
 * - `indexer`: Corpus ingestion and synonym unfolding
 * - `search`: Filter engine over the store
 * - `quiz`: Quiz engines and caller-held sessions
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod analysis;
pub mod app_config;
pub mod database;
pub mod errors;
pub mod indexer;
pub mod quiz;
pub mod search;

// Re-export main types for easier usage
pub use analysis::{Analysis, DictionaryAnalyzer, MorphAnalyzer};
pub use app_config::Config;
pub use database::{DatabaseConnection, Repository};
pub use errors::{AnalyzerError, AppError, IngestError, QuizError};
pub use indexer::{Corpus, Indexer, IngestReport};
pub use quiz::{AssembleQuiz, MeaningQuiz, QuizOutcome, QuizSession, VerbQuiz};
pub use search::{ProverbFilter, SearchEngine, PAGE_SIZE};
