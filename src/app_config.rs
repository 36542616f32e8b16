use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::database::DatabaseConnection;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Database file; the per-user data directory is used when absent
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// JSON lexicon consumed by the bundled analyzer
    #[serde(default = "default_lexicon_path")]
    pub lexicon_path: PathBuf,

    /// Corpus ingestion settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Quiz generation settings
    #[serde(default)]
    pub quiz: QuizConfig,

    /// Categories shown per browsing page
    #[serde(default = "default_category_page_size")]
    pub category_page_size: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How synonym sub-entries are embedded in corpus text
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngestConfig {
    /// Phrase introducing the synonym list
    #[serde(default = "default_synonym_marker")]
    pub synonym_marker: String,

    /// Separator between synonym items
    #[serde(default = "default_synonym_separator")]
    pub synonym_separator: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            synonym_marker: default_synonym_marker(),
            synonym_separator: default_synonym_separator(),
        }
    }
}

/// Quiz settings shared by all quiz engines
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizConfig {
    /// Wrong options presented next to the correct one
    #[serde(default = "default_decoy_count")]
    pub decoy_count: usize,

    /// Joins multi-verb decoy groups for display
    #[serde(default = "default_group_separator")]
    pub group_separator: String,

    /// Replaces the hidden verb in the verb quiz prompt
    #[serde(default = "default_blank_marker")]
    pub blank_marker: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            decoy_count: default_decoy_count(),
            group_separator: default_group_separator(),
            blank_marker: default_blank_marker(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_lexicon_path() -> PathBuf {
    PathBuf::from("lexicon.json")
}

fn default_synonym_marker() -> String {
    "Синонім.".to_string()
}

fn default_synonym_separator() -> String {
    "; ".to_string()
}

fn default_decoy_count() -> usize {
    3
}

fn default_group_separator() -> String {
    ", ".to_string()
}

fn default_blank_marker() -> String {
    "──────".to_string()
}

fn default_category_page_size() -> usize {
    7
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Database location, falling back to the per-user data directory
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DatabaseConnection::default_database_path(),
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.ingest.synonym_marker.trim().is_empty() {
            return Err(anyhow!("Synonym marker must not be empty"));
        }

        if self.ingest.synonym_separator.is_empty() {
            return Err(anyhow!("Synonym separator must not be empty"));
        }

        if self.quiz.decoy_count == 0 {
            return Err(anyhow!("Quiz decoy count must be at least 1"));
        }

        if self.quiz.blank_marker.is_empty() {
            return Err(anyhow!("Quiz blank marker must not be empty"));
        }

        if self.quiz.group_separator.is_empty() {
            return Err(anyhow!("Quiz group separator must not be empty"));
        }

        if self.category_page_size == 0 {
            return Err(anyhow!("Category page size must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            lexicon_path: default_lexicon_path(),
            ingest: IngestConfig::default(),
            quiz: QuizConfig::default(),
            category_page_size: default_category_page_size(),
            log_level: LogLevel::default(),
        }
    }
}
