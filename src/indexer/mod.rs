/*!
 * Corpus indexer.
 *
 * Turns a corpus document (category -> proverb -> description) into store
 * rows. Each proverb is analyzed once per usage site:
 * - lemma occurrences are counted per distinct `(lemma, pos)` pair
 * - surface words are lower-cased and deduplicated with their grammatical form
 *
 * Analysis is pure; a whole category is then written in one transaction.
 */

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use indicatif::ProgressBar;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

use crate::analysis::tokenizer::tokenize_words;
use crate::analysis::{MorphAnalyzer, PartOfSpeech};
use crate::app_config::IngestConfig;
use crate::database::models::{LemmaCount, NewProverb, NewWord, StoredCategory, UsageType, WordForm};
use crate::database::Repository;
use crate::errors::IngestError;

pub mod synonyms;

pub use synonyms::{unfold_synonyms, UnfoldedEntry};

/// Category name -> (proverb text -> description), in document order
pub type Corpus = IndexMap<String, IndexMap<String, String>>;

/// Read a corpus document from disk
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus, IngestError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| IngestError::CorpusUnreadable(format!("{}: {}", path.display(), e)))?;
    parse_corpus(&json)
}

/// Parse a corpus document
pub fn parse_corpus(json: &str) -> Result<Corpus, IngestError> {
    serde_json::from_str(json).map_err(|e| IngestError::CorpusMalformed(e.to_string()))
}

/// Summary of one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub categories: usize,
    /// Stored proverbs, unfolded synonyms included
    pub proverbs: usize,
    pub statistics_rows: usize,
}

/// Builds the lemma and word indices from a corpus
pub struct Indexer {
    repository: Repository,
    analyzer: Arc<dyn MorphAnalyzer>,
    config: IngestConfig,
}

impl Indexer {
    /// Create an indexer writing through `repository` and analyzing with `analyzer`
    pub fn new(repository: Repository, analyzer: Arc<dyn MorphAnalyzer>, config: IngestConfig) -> Self {
        Self {
            repository,
            analyzer,
            config,
        }
    }

    /// Ingest a whole corpus, then materialize the category statistics
    ///
    /// A failure part-way leaves earlier categories stored; rebuild the
    /// store from scratch to recover.
    pub async fn ingest(&self, corpus: &Corpus, progress: Option<&ProgressBar>) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        for (category, entries) in corpus {
            if let Some(pb) = progress {
                pb.set_message(category.clone());
            }

            let stored = self.ingest_category(category, entries).await?;
            report.categories += 1;
            report.proverbs += stored.proverb_ids.len();

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        report.statistics_rows = self
            .repository
            .materialize_category_lemma_statistics()
            .await
            .context("Failed to materialize category lemma statistics")?;

        info!(
            "Indexed {} categories, {} proverbs, {} statistic rows",
            report.categories, report.proverbs, report.statistics_rows
        );

        Ok(report)
    }

    /// Create one category and store all of its proverbs
    pub async fn ingest_category(
        &self,
        category: &str,
        entries: &IndexMap<String, String>,
    ) -> Result<StoredCategory> {
        info!("Processing category: {}", category);

        let proverbs: Vec<NewProverb> = entries
            .iter()
            .flat_map(|(proverb, description)| unfold_synonyms(proverb, description, &self.config))
            .map(|entry| self.process_proverb(&entry.proverb, &entry.description))
            .collect();

        self.repository
            .store_category(category, proverbs)
            .await
            .map_err(|e| IngestError::Store(format!("{:#}", e)))
            .with_context(|| format!("Failed to store category '{}'", category))
    }

    /// Analyze one already-unfolded proverb
    pub fn process_proverb(&self, value: &str, description: &str) -> NewProverb {
        let mut lemmas = Vec::new();
        let mut words = Vec::new();

        for (usage_type, text) in [(UsageType::Value, value), (UsageType::Description, description)] {
            let tokens = tokenize_words(text);
            lemmas.extend(count_lemmas(self.analyzer.as_ref(), &tokens, usage_type));
            words.extend(collect_words(self.analyzer.as_ref(), &tokens, usage_type));
        }

        debug!(
            "Proverb '{}': {} lemma usages, {} words",
            value,
            lemmas.len(),
            words.len()
        );

        NewProverb {
            value: value.to_string(),
            description: description.to_string(),
            lemmas,
            words,
        }
    }
}

/// Count occurrences of each distinct `(lemma, pos)` pair, in first-seen order
pub fn count_lemmas(analyzer: &dyn MorphAnalyzer, tokens: &[&str], usage_type: UsageType) -> Vec<LemmaCount> {
    let mut counts: IndexMap<(String, PartOfSpeech), i64> = IndexMap::new();

    for analysis in tokens.iter().filter_map(|token| analyzer.analyze(token)) {
        *counts.entry((analysis.lemma, analysis.pos)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((lemma, pos), frequency)| LemmaCount {
            usage_type,
            lemma,
            pos,
            frequency,
        })
        .collect()
}

/// Distinct lower-cased words with their grammatical form, in first-seen order
pub fn collect_words(analyzer: &dyn MorphAnalyzer, tokens: &[&str], usage_type: UsageType) -> Vec<NewWord> {
    let mut seen: IndexSet<(String, WordForm)> = IndexSet::new();

    for token in tokens {
        let Some(analysis) = analyzer.analyze(token) else {
            continue;
        };

        let form = match (analysis.pos, analysis.verb) {
            (PartOfSpeech::Verb, features) => WordForm::Verb(features.unwrap_or_default()),
            (pos, _) => WordForm::Plain(pos),
        };

        seen.insert((token.to_lowercase(), form));
    }

    seen.into_iter()
        .map(|(value, form)| NewWord {
            usage_type,
            value,
            form,
        })
        .collect()
}
