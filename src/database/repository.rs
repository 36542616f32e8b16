/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 * Ingestion is the only writer; every other operation is a single
 * read-only statement.
 */

use anyhow::{Context, Result};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{
    CategoryLemmaStatisticRecord, CategoryPage, CategoryRecord, LemmaRecord, LemmaUsageRecord,
    NewProverb, NewWord, ProverbRecord, ProverbSearchResult, StoredCategory, UsageType, WordForm,
    WordRecord,
};
use crate::analysis::grammemes::parse_optional;
use crate::analysis::{PartOfSpeech, VerbFeatures};

/// Word columns as read from the store, before tag parsing
type RawWord = (
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

const WORD_COLUMNS: &str =
    "proverb_id, usage_type, value, pos, aspect, number, person, gender, tense";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Get the underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Store a category and all of its proverbs in one transaction
    pub async fn store_category(
        &self,
        name: &str,
        proverbs: Vec<NewProverb>,
    ) -> Result<StoredCategory> {
        let name = name.to_string();

        self.db
            .transaction_async(move |tx| {
                let category_id = Self::insert_category_sync(tx, &name)?;
                let mut proverb_ids = Vec::with_capacity(proverbs.len());

                for proverb in &proverbs {
                    let proverb_id = Self::insert_proverb_sync(tx, proverb, category_id)?;

                    for count in &proverb.lemmas {
                        let lemma_id = Self::find_or_insert_lemma_sync(tx, &count.lemma, count.pos)?;
                        Self::insert_lemma_usage_sync(
                            tx,
                            lemma_id,
                            proverb_id,
                            count.usage_type,
                            count.frequency,
                        )?;
                    }

                    for word in &proverb.words {
                        Self::insert_word_sync(tx, proverb_id, word)?;
                    }

                    proverb_ids.push(proverb_id);
                }

                debug!(
                    "Stored category '{}' (id {}) with {} proverbs",
                    name,
                    category_id,
                    proverb_ids.len()
                );

                Ok(StoredCategory {
                    category_id,
                    proverb_ids,
                })
            })
            .await
    }

    fn insert_category_sync(conn: &Connection, name: &str) -> Result<i64> {
        conn.execute("INSERT INTO category (name) VALUES (?1)", [name])
            .with_context(|| format!("Failed to insert category '{}'", name))?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_proverb_sync(conn: &Connection, proverb: &NewProverb, category_id: i64) -> Result<i64> {
        conn.execute(
            "INSERT INTO proverb (value, description, category_id) VALUES (?1, ?2, ?3)",
            params![proverb.value, proverb.description, category_id],
        )
        .with_context(|| format!("Failed to insert proverb '{}'", proverb.value))?;
        Ok(conn.last_insert_rowid())
    }

    /// Look the lemma up by value and insert it on a miss
    fn find_or_insert_lemma_sync(conn: &Connection, value: &str, pos: PartOfSpeech) -> Result<i64> {
        let existing: Option<i64> = conn
            .query_row("SELECT id FROM lemma WHERE value = ?1", [value], |row| row.get(0))
            .optional()?;

        if let Some(id) = existing {
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO lemma (value, pos) VALUES (?1, ?2)",
            params![value, pos.as_tag()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_lemma_usage_sync(
        conn: &Connection,
        lemma_id: i64,
        proverb_id: i64,
        usage_type: UsageType,
        frequency: i64,
    ) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO lemma_usage (lemma_id, proverb_id, usage_type, frequency)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(lemma_id, proverb_id, usage_type)
            DO UPDATE SET frequency = frequency + excluded.frequency
            "#,
            params![lemma_id, proverb_id, usage_type.as_str(), frequency],
        )?;
        Ok(())
    }

    fn insert_word_sync(conn: &Connection, proverb_id: i64, word: &NewWord) -> Result<()> {
        let features = word.form.verb_features().copied().unwrap_or_default();
        conn.execute(
            r#"
            INSERT INTO word (proverb_id, usage_type, value, pos, aspect, number, person, gender, tense)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                proverb_id,
                word.usage_type.as_str(),
                word.value,
                word.form.pos().as_tag(),
                features.aspect.map(|v| v.to_string()),
                features.number.map(|v| v.to_string()),
                features.person.map(|v| v.to_string()),
                features.gender.map(|v| v.to_string()),
                features.tense.map(|v| v.to_string()),
            ],
        )?;
        Ok(())
    }

    /// Rebuild the per-category lemma ranking from lemma usages in proverb texts
    pub async fn materialize_category_lemma_statistics(&self) -> Result<usize> {
        self.db
            .transaction_async(|tx| {
                tx.execute("DELETE FROM category_lemma_statistics", [])?;
                let inserted = tx.execute(
                    r#"
                    INSERT INTO category_lemma_statistics
                        (category_id, category_name, lemma_id, lemma_value, frequency)
                    SELECT c.id, c.name, l.id, l.value, SUM(lu.frequency) AS total
                    FROM lemma_usage lu
                    JOIN lemma l ON l.id = lu.lemma_id
                    JOIN proverb p ON p.id = lu.proverb_id
                    JOIN category c ON c.id = p.category_id
                    WHERE lu.usage_type = 'VALUE'
                    GROUP BY c.id, l.id
                    ORDER BY c.id, total DESC, l.value
                    "#,
                    [],
                )?;
                Ok(inserted)
            })
            .await
    }

    // =========================================================================
    // Categories and proverbs
    // =========================================================================

    /// Get a category by ID
    pub async fn get_category(&self, category_id: i64) -> Result<Option<CategoryRecord>> {
        self.db
            .execute_async(move |conn| {
                let category = conn
                    .query_row(
                        "SELECT id, name FROM category WHERE id = ?1",
                        [category_id],
                        |row| {
                            Ok(CategoryRecord {
                                id: row.get(0)?,
                                name: row.get(1)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(category)
            })
            .await
    }

    /// List one page of categories (pages start at 1)
    pub async fn list_categories(&self, page: usize, page_size: usize) -> Result<CategoryPage> {
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let sql_limit = i64::try_from(page_size).unwrap_or(i64::MAX);
        let sql_offset = i64::try_from(offset).unwrap_or(i64::MAX);

        self.db
            .execute_async(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT id, name FROM category ORDER BY id LIMIT ?1 OFFSET ?2")?;
                let categories: Vec<CategoryRecord> = stmt
                    .query_map(params![sql_limit, sql_offset], |row| {
                        Ok(CategoryRecord {
                            id: row.get(0)?,
                            name: row.get(1)?,
                        })
                    })?
                    .collect::<rusqlite::Result<_>>()?;

                let total: i64 =
                    conn.query_row("SELECT COUNT(*) FROM category", [], |row| row.get(0))?;

                Ok(CategoryPage {
                    categories,
                    has_more: total as usize > offset.saturating_add(page_size),
                })
            })
            .await
    }

    /// All proverbs of a category in insertion order
    pub async fn get_proverbs_by_category(&self, category_id: i64) -> Result<Vec<ProverbRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, value, description, category_id
                    FROM proverb
                    WHERE category_id = ?1
                    ORDER BY id
                    "#,
                )?;
                let proverbs = stmt
                    .query_map([category_id], Self::parse_proverb_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(proverbs)
            })
            .await
    }

    fn parse_proverb_row(row: &rusqlite::Row) -> rusqlite::Result<ProverbRecord> {
        Ok(ProverbRecord {
            id: row.get(0)?,
            value: row.get(1)?,
            description: row.get(2)?,
            category_id: row.get(3)?,
        })
    }

    // =========================================================================
    // Lemmas and words
    // =========================================================================

    /// Find a lemma by its normalized value
    pub async fn find_lemma(&self, value: &str) -> Result<Option<LemmaRecord>> {
        let value = value.to_string();

        self.db
            .execute_async(move |conn| {
                let raw: Option<(i64, String, String)> = conn
                    .query_row(
                        "SELECT id, value, pos FROM lemma WHERE value = ?1",
                        [&value],
                        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                    )
                    .optional()?;

                raw.map(|(id, value, pos)| {
                    Ok(LemmaRecord {
                        id,
                        value,
                        pos: pos.parse()?,
                    })
                })
                .transpose()
            })
            .await
    }

    /// Lemma usages recorded for a proverb
    pub async fn get_lemma_usages(&self, proverb_id: i64) -> Result<Vec<LemmaUsageRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT lemma_id, proverb_id, usage_type, frequency
                    FROM lemma_usage
                    WHERE proverb_id = ?1
                    ORDER BY rowid
                    "#,
                )?;
                let raw = stmt
                    .query_map([proverb_id], |row| {
                        Ok((
                            row.get::<_, i64>(0)?,
                            row.get::<_, i64>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, i64>(3)?,
                        ))
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                raw.into_iter()
                    .map(|(lemma_id, proverb_id, usage_type, frequency)| {
                        Ok(LemmaUsageRecord {
                            lemma_id,
                            proverb_id,
                            usage_type: usage_type.parse()?,
                            frequency,
                        })
                    })
                    .collect()
            })
            .await
    }

    /// Words recorded for a proverb
    pub async fn get_words(&self, proverb_id: i64) -> Result<Vec<WordRecord>> {
        self.db
            .execute_async(move |conn| {
                let sql = format!(
                    "SELECT {} FROM word WHERE proverb_id = ?1 ORDER BY rowid",
                    WORD_COLUMNS
                );
                Self::query_words_sync(conn, &sql, params![proverb_id])
            })
            .await
    }

    /// Distinct lemma values whose first letter matches, alphabetically
    pub async fn lemmas_by_first_letter(
        &self,
        letter: char,
        usage_type: UsageType,
    ) -> Result<Vec<String>> {
        let letter: String = letter.to_lowercase().collect();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT DISTINCT l.value
                    FROM lemma_usage lu
                    JOIN lemma l ON lu.lemma_id = l.id
                    WHERE lu.usage_type = ?1 AND substr(l.value, 1, 1) = ?2
                    ORDER BY l.value
                    "#,
                )?;
                let lemmas = stmt
                    .query_map(params![usage_type.as_str(), letter], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(lemmas)
            })
            .await
    }

    /// Most frequent lemmas of a category, from the materialized statistics
    pub async fn top_category_lemmas(
        &self,
        category_id: i64,
        limit: usize,
    ) -> Result<Vec<CategoryLemmaStatisticRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT category_id, category_name, lemma_id, lemma_value, frequency
                    FROM category_lemma_statistics
                    WHERE category_id = ?1
                    ORDER BY frequency DESC, lemma_value
                    LIMIT ?2
                    "#,
                )?;
                let rows = stmt
                    .query_map(params![category_id, limit as i64], |row| {
                        Ok(CategoryLemmaStatisticRecord {
                            category_id: row.get(0)?,
                            category_name: row.get(1)?,
                            lemma_id: row.get(2)?,
                            lemma_value: row.get(3)?,
                            frequency: row.get(4)?,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await
    }

    fn query_words_sync<P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> Result<Vec<WordRecord>> {
        let mut stmt = conn.prepare(sql)?;
        let raw = stmt
            .query_map(params, |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<RawWord>>>()?;

        raw.into_iter().map(Self::word_from_columns).collect()
    }

    fn word_from_columns(raw: RawWord) -> Result<WordRecord> {
        let (proverb_id, usage_type, value, pos, aspect, number, person, gender, tense) = raw;
        let pos: PartOfSpeech = pos.parse()?;

        let form = if pos == PartOfSpeech::Verb {
            WordForm::Verb(VerbFeatures {
                aspect: parse_optional(aspect)?,
                number: parse_optional(number)?,
                person: parse_optional(person)?,
                gender: parse_optional(gender)?,
                tense: parse_optional(tense)?,
            })
        } else {
            WordForm::Plain(pos)
        };

        Ok(WordRecord {
            proverb_id,
            usage_type: usage_type.parse()?,
            value,
            form,
        })
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Run one of the fixed search templates and collect its result triples
    pub async fn search_proverbs(
        &self,
        template: &'static str,
        params: Vec<Value>,
    ) -> Result<Vec<ProverbSearchResult>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare_cached(template)?;
                let results = stmt
                    .query_map(params_from_iter(params.iter()), |row| {
                        Ok(ProverbSearchResult {
                            category: row.get(0)?,
                            proverb: row.get(1)?,
                            description: row.get(2)?,
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(results)
            })
            .await
    }

    // =========================================================================
    // Quiz reads
    // =========================================================================

    /// Distinct descriptions of other proverbs in the category, excluding
    /// the given description by value
    pub async fn get_decoy_descriptions(
        &self,
        category_id: i64,
        proverb_id: i64,
        correct_description: &str,
    ) -> Result<Vec<String>> {
        let correct_description = correct_description.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT description
                    FROM proverb
                    WHERE category_id = ?1 AND id != ?2 AND description != ?3
                    GROUP BY description
                    ORDER BY MIN(id)
                    "#,
                )?;
                let descriptions = stmt
                    .query_map(params![category_id, proverb_id, correct_description], |row| {
                        row.get(0)
                    })?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(descriptions)
            })
            .await
    }

    /// Proverbs of a category whose text contains at least one verb
    pub async fn get_verb_proverbs(&self, category_id: i64) -> Result<Vec<ProverbRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT p.id, p.value, p.description, p.category_id
                    FROM proverb p
                    WHERE p.category_id = ?1
                      AND EXISTS (
                        SELECT 1 FROM word w
                        WHERE w.proverb_id = p.id AND w.pos = 'VERB' AND w.usage_type = 'VALUE'
                      )
                    ORDER BY p.id
                    "#,
                )?;
                let proverbs = stmt
                    .query_map([category_id], Self::parse_proverb_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(proverbs)
            })
            .await
    }

    /// Verbs in a proverb's text, in order of first appearance
    pub async fn get_value_verbs(&self, proverb_id: i64) -> Result<Vec<WordRecord>> {
        self.db
            .execute_async(move |conn| {
                let sql = format!(
                    r#"
                    SELECT {}
                    FROM word
                    WHERE proverb_id = ?1 AND pos = 'VERB' AND usage_type = 'VALUE'
                    ORDER BY rowid
                    "#,
                    WORD_COLUMNS
                );
                Self::query_words_sync(conn, &sql, params![proverb_id])
            })
            .await
    }

    /// Distinct verbs from the text of other proverbs that agree with the
    /// given features on aspect, number, gender and tense
    pub async fn find_agreeing_verbs(
        &self,
        proverb_id: i64,
        exclude_value: &str,
        features: VerbFeatures,
    ) -> Result<Vec<String>> {
        let exclude_value = exclude_value.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT w.value
                    FROM word w
                    WHERE w.pos = 'VERB'
                      AND w.usage_type = 'VALUE'
                      AND w.proverb_id != ?1
                      AND w.value != ?2
                      AND w.aspect IS ?3
                      AND w.number IS ?4
                      AND w.gender IS ?5
                      AND w.tense IS ?6
                    GROUP BY w.value
                    ORDER BY MIN(w.rowid)
                    "#,
                )?;
                let verbs = stmt
                    .query_map(
                        params![
                            proverb_id,
                            exclude_value,
                            features.aspect.map(|v| v.to_string()),
                            features.number.map(|v| v.to_string()),
                            features.gender.map(|v| v.to_string()),
                            features.tense.map(|v| v.to_string()),
                        ],
                        |row| row.get(0),
                    )?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(verbs)
            })
            .await
    }
}
