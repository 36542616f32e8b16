/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::{PartOfSpeech, VerbFeatures};

/// Where inside a proverb record a lemma or word was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsageType {
    /// The saying's literal text
    Value,
    /// The explanatory description
    Description,
}

impl UsageType {
    /// Both usage sites, in storage order
    pub const ALL: [UsageType; 2] = [UsageType::Value, UsageType::Description];

    /// Column value persisted in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageType::Value => "VALUE",
            UsageType::Description => "DESCRIPTION",
        }
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UsageType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VALUE" => Ok(UsageType::Value),
            "DESCRIPTION" => Ok(UsageType::Description),
            _ => Err(anyhow::anyhow!("Invalid usage type: {}", s)),
        }
    }
}

/// Topic grouping proverbs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Database ID
    pub id: i64,
    /// Human-readable topic label
    pub name: String,
}

/// A saying with its explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverbRecord {
    /// Database ID
    pub id: i64,
    /// Literal text of the saying
    pub value: String,
    /// Explanation of the saying
    pub description: String,
    /// Owning category
    pub category_id: i64,
}

/// Normalized word form, unique on `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaRecord {
    /// Database ID
    pub id: i64,
    /// Normal form
    pub value: String,
    /// Part of speech of the first occurrence
    pub pos: PartOfSpeech,
}

/// How often a lemma occurs in one usage site of one proverb
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaUsageRecord {
    pub lemma_id: i64,
    pub proverb_id: i64,
    pub usage_type: UsageType,
    pub frequency: i64,
}

/// Grammatical shape of a stored word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordForm {
    /// Any part of speech other than a finite verb
    Plain(PartOfSpeech),
    /// Finite verb with its features
    Verb(VerbFeatures),
}

impl WordForm {
    /// Part of speech of this form
    pub fn pos(&self) -> PartOfSpeech {
        match self {
            WordForm::Plain(pos) => *pos,
            WordForm::Verb(_) => PartOfSpeech::Verb,
        }
    }

    /// Verb features, if this is a verb
    pub fn verb_features(&self) -> Option<&VerbFeatures> {
        match self {
            WordForm::Plain(_) => None,
            WordForm::Verb(features) => Some(features),
        }
    }
}

/// Surface word observed in a proverb or its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub proverb_id: i64,
    pub usage_type: UsageType,
    /// Lower-cased surface form
    pub value: String,
    pub form: WordForm,
}

/// One search hit: (category, proverb, description)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverbSearchResult {
    pub category: String,
    pub proverb: String,
    pub description: String,
}

/// Ranked lemma frequency inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLemmaStatisticRecord {
    pub category_id: i64,
    pub category_name: String,
    pub lemma_id: i64,
    pub lemma_value: String,
    pub frequency: i64,
}

/// A page of categories for browsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPage {
    pub categories: Vec<CategoryRecord>,
    /// Whether another page follows
    pub has_more: bool,
}

/// Occurrence count of one (lemma, part of speech) pair in one usage site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaCount {
    pub usage_type: UsageType,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub frequency: i64,
}

/// Distinct surface word ready to be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub usage_type: UsageType,
    pub value: String,
    pub form: WordForm,
}

/// Proverb with its analyzed lemmas and words, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProverb {
    pub value: String,
    pub description: String,
    pub lemmas: Vec<LemmaCount>,
    pub words: Vec<NewWord>,
}

/// Outcome of storing one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCategory {
    pub category_id: i64,
    /// Proverb IDs in insertion order
    pub proverb_ids: Vec<i64>,
}
