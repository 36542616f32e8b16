/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for all database tables. A store
 * written under another schema version is rejected; it is rebuilt from the
 * corpus rather than migrated.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // Foreign keys are a per-connection setting
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version != SCHEMA_VERSION {
        return Err(anyhow!(
            "Unsupported schema version v{} (expected v{}); rebuild the store with --reset",
            current_version,
            SCHEMA_VERSION
        ));
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS proverb (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value TEXT NOT NULL,
            description TEXT NOT NULL,
            category_id INTEGER NOT NULL REFERENCES category(id)
        );

        CREATE INDEX IF NOT EXISTS idx_proverb_category ON proverb(category_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS lemma (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value TEXT NOT NULL UNIQUE,
            pos TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS lemma_usage (
            lemma_id INTEGER NOT NULL REFERENCES lemma(id),
            proverb_id INTEGER NOT NULL REFERENCES proverb(id),
            usage_type TEXT NOT NULL CHECK (usage_type IN ('VALUE', 'DESCRIPTION')),
            frequency INTEGER NOT NULL CHECK (frequency > 0),
            UNIQUE(lemma_id, proverb_id, usage_type)
        );

        CREATE INDEX IF NOT EXISTS idx_lemma_usage_proverb ON lemma_usage(proverb_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS word (
            proverb_id INTEGER NOT NULL REFERENCES proverb(id),
            usage_type TEXT NOT NULL CHECK (usage_type IN ('VALUE', 'DESCRIPTION')),
            value TEXT NOT NULL,
            pos TEXT NOT NULL,
            aspect TEXT,
            number TEXT,
            person TEXT,
            gender TEXT,
            tense TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_word_proverb ON word(proverb_id);
        CREATE INDEX IF NOT EXISTS idx_word_pos_usage ON word(pos, usage_type);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS category_lemma_statistics (
            category_id INTEGER NOT NULL REFERENCES category(id),
            category_name TEXT NOT NULL,
            lemma_id INTEGER NOT NULL REFERENCES lemma(id),
            lemma_value TEXT NOT NULL,
            frequency INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_statistics_category ON category_lemma_statistics(category_id);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}

/// Drop all tables
pub fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS category_lemma_statistics;
        DROP TABLE IF EXISTS word;
        DROP TABLE IF EXISTS lemma_usage;
        DROP TABLE IF EXISTS lemma;
        DROP TABLE IF EXISTS proverb;
        DROP TABLE IF EXISTS category;
        DROP TABLE IF EXISTS schema_version;
        "#,
    )?;
    Ok(())
}
