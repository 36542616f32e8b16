/*!
 * Database module for the persistent proverb index.
 *
 * This module provides SQLite-based persistence for:
 * - Categories, proverbs and their descriptions
 * - Lemmas with per-proverb usage frequencies
 * - Surface words with their grammatical features
 * - Materialized per-category lemma statistics
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use repository::Repository;
