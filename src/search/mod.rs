/*!
 * Proverb filter engine.
 *
 * Each filter variant maps to one fixed, fully parameterized query template.
 * Results come back in pages of [`PAGE_SIZE`] ordered by ascending proverb id,
 * so the same filter and offset always yield the same page. The engine keeps
 * no state between calls; callers track the offset themselves.
 */

use anyhow::Result;
use log::debug;
use rusqlite::types::Value;

use crate::database::models::{ProverbSearchResult, UsageType};
use crate::database::Repository;

/// Maximum number of results per page
pub const PAGE_SIZE: usize = 5;

const LEMMA_QUERY: &str = r#"
    SELECT c.name, p.value, p.description
    FROM proverb p
    JOIN category c ON c.id = p.category_id
    WHERE p.id IN (
        SELECT lu.proverb_id
        FROM lemma_usage lu
        JOIN lemma l ON l.id = lu.lemma_id
        WHERE l.value = ?1 AND lu.usage_type IN (?2, ?3)
    )
    ORDER BY p.id
    LIMIT ?4 OFFSET ?5
"#;

const FIRST_LETTER_QUERY: &str = r#"
    SELECT c.name, p.value, p.description
    FROM proverb p
    JOIN category c ON c.id = p.category_id
    WHERE substr(p.value, 1, 1) IN (?1, ?2)
    ORDER BY p.id
    LIMIT ?3 OFFSET ?4
"#;

const SUBSTRING_QUERY: &str = r#"
    SELECT c.name, p.value, p.description
    FROM proverb p
    JOIN category c ON c.id = p.category_id
    WHERE instr(p.value, ?1) > 0 OR instr(p.description, ?1) > 0
    ORDER BY p.id
    LIMIT ?2 OFFSET ?3
"#;

/// One of the three mutually exclusive search predicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProverbFilter {
    /// Proverbs using `lemma` in any of the given usage sites
    Lemma { lemma: String, sites: Vec<UsageType> },
    /// Proverbs whose text starts with the letter, ignoring case
    FirstLetter(char),
    /// Proverbs whose text or description contains the literal substring
    Substring(String),
}

impl ProverbFilter {
    /// Lemma filter over the given usage sites
    pub fn lemma(lemma: impl Into<String>, sites: &[UsageType]) -> Self {
        Self::Lemma {
            lemma: lemma.into(),
            sites: sites.to_vec(),
        }
    }

    /// Query template and bound parameters for one page, or `None` when
    /// the filter cannot match anything
    pub fn to_query(&self, offset: usize) -> Option<(&'static str, Vec<Value>)> {
        let limit = Value::Integer(PAGE_SIZE as i64);
        // Offsets past i64::MAX clamp to it
        let offset = Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX));

        match self {
            Self::Lemma { lemma, sites } => {
                if sites.is_empty() {
                    return None;
                }
                let site = |usage: UsageType| {
                    if sites.contains(&usage) {
                        Value::Text(usage.as_str().to_string())
                    } else {
                        Value::Null
                    }
                };
                Some((
                    LEMMA_QUERY,
                    vec![
                        Value::Text(lemma.clone()),
                        site(UsageType::Value),
                        site(UsageType::Description),
                        limit,
                        offset,
                    ],
                ))
            }
            Self::FirstLetter(letter) => {
                let lower: String = letter.to_lowercase().collect();
                let upper: String = letter.to_uppercase().collect();
                Some((
                    FIRST_LETTER_QUERY,
                    vec![Value::Text(lower), Value::Text(upper), limit, offset],
                ))
            }
            Self::Substring(substring) => {
                if substring.is_empty() {
                    return None;
                }
                Some((SUBSTRING_QUERY, vec![Value::Text(substring.clone()), limit, offset]))
            }
        }
    }
}

/// Read-only search over the indexed corpus
#[derive(Clone)]
pub struct SearchEngine {
    repository: Repository,
}

impl SearchEngine {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Fetch the page starting `offset` matches in
    pub async fn search(&self, filter: &ProverbFilter, offset: usize) -> Result<Vec<ProverbSearchResult>> {
        let Some((template, params)) = filter.to_query(offset) else {
            debug!("Filter {:?} cannot match, returning empty page", filter);
            return Ok(Vec::new());
        };

        let page = self.repository.search_proverbs(template, params).await?;
        debug!("Filter {:?} at offset {}: {} result(s)", filter, offset, page.len());
        Ok(page)
    }

    /// Walk pages forward until a short page and return every match
    pub async fn search_all(&self, filter: &ProverbFilter) -> Result<Vec<ProverbSearchResult>> {
        let mut results = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.search(filter, offset).await?;
            let full = page.len() == PAGE_SIZE;
            results.extend(page);
            if !full {
                break;
            }
            offset += PAGE_SIZE;
        }

        Ok(results)
    }

    /// Sorted distinct lemmas starting with `letter` in the given usage site
    pub async fn lemmas_by_first_letter(&self, letter: char, usage_type: UsageType) -> Result<Vec<String>> {
        self.repository.lemmas_by_first_letter(letter, usage_type).await
    }
}
