/*!
 * Common test utilities for the paremia test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use paremia::analysis::DictionaryAnalyzer;
use paremia::app_config::IngestConfig;
use paremia::indexer::{self, Corpus, Indexer};
use paremia::Repository;

/// Category ids of the fixture corpus, in ingestion order
pub const WORK_CATEGORY: i64 = 1;
pub const FRIENDSHIP_CATEGORY: i64 = 2;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Analyzer loaded from the fixture lexicon
pub fn fixture_analyzer() -> DictionaryAnalyzer {
    DictionaryAnalyzer::from_path(test_resource_path("lexicon.json")).expect("fixture lexicon loads")
}

/// The fixture corpus: two categories, one entry carrying a synonym
pub fn fixture_corpus() -> Corpus {
    indexer::load_corpus(test_resource_path("corpus.json")).expect("fixture corpus loads")
}

/// In-memory store with the fixture corpus ingested
pub async fn indexed_repository() -> Repository {
    let repository = Repository::new_in_memory().expect("in-memory store opens");
    ingest_into(&repository, &fixture_corpus()).await;
    repository
}

/// Ingest a corpus with the fixture analyzer and default markers
pub async fn ingest_into(repository: &Repository, corpus: &Corpus) {
    let indexer = Indexer::new(
        repository.clone(),
        Arc::new(fixture_analyzer()),
        IngestConfig::default(),
    );
    indexer.ingest(corpus, None).await.expect("ingestion succeeds");
}
