/*!
 * Synonym unfolding.
 *
 * A corpus entry may embed further sayings after a marker phrase, either in
 * the proverb text or in its description:
 *
 * ```text
 * "Без труда нема плода. Синонім. Хто не працює, той не їсть" -> "старанність дає результат"
 * ```
 *
 * Every item after the marker becomes its own proverb carrying the primary
 * description. Items and descriptions are stored as written, trimmed of
 * surrounding whitespace; only a primary proverb directly before an in-text
 * marker loses its closing period. Unfolding runs over an explicit worklist; each step either
 * emits an entry or removes one marker occurrence, so the number of steps is
 * bounded by the input size.
 */

use log::{debug, warn};
use std::collections::VecDeque;

use crate::app_config::IngestConfig;

/// A proverb text with the description it will be stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfoldedEntry {
    pub proverb: String,
    pub description: String,
}

impl UnfoldedEntry {
    fn new(proverb: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            proverb: proverb.into(),
            description: description.into(),
        }
    }
}

/// Expand one corpus entry into the proverbs it defines, primary entry first
pub fn unfold_synonyms(proverb: &str, description: &str, config: &IngestConfig) -> Vec<UnfoldedEntry> {
    let marker = config.synonym_marker.as_str();
    let mut worklist = VecDeque::from([UnfoldedEntry::new(proverb, description)]);
    let mut unfolded = Vec::new();

    while let Some(entry) = worklist.pop_front() {
        if let Some((primary, block)) = entry.description.split_once(marker) {
            let primary_description = primary.trim().to_string();
            let synonyms = split_items(block, &config.synonym_separator);
            debug!(
                "Description of '{}' carries {} synonym(s)",
                entry.proverb,
                synonyms.len()
            );

            worklist.push_back(UnfoldedEntry::new(entry.proverb, primary_description.clone()));
            for synonym in synonyms {
                worklist.push_back(UnfoldedEntry::new(synonym, primary_description.clone()));
            }
            continue;
        }

        if let Some((primary, block)) = entry.proverb.split_once(marker) {
            let primary_proverb = normalize_primary(primary);
            let synonyms = split_items(block, &config.synonym_separator);
            debug!(
                "Proverb '{}' carries {} synonym(s)",
                primary_proverb,
                synonyms.len()
            );

            if primary_proverb.is_empty() {
                warn!("Dropping empty primary proverb before synonym marker");
            } else {
                worklist.push_back(UnfoldedEntry::new(primary_proverb, entry.description.clone()));
            }
            for synonym in synonyms {
                worklist.push_back(UnfoldedEntry::new(synonym, entry.description.clone()));
            }
            continue;
        }

        unfolded.push(entry);
    }

    unfolded
}

/// Trim whitespace and the period closing the sentence before the marker
fn normalize_primary(text: &str) -> String {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    trimmed.trim_end().to_string()
}

fn split_items(block: &str, separator: &str) -> Vec<String> {
    block
        .split(separator)
        .map(|item| item.trim().to_string())
        .filter(|item| {
            if item.is_empty() {
                warn!("Skipping empty synonym item");
                return false;
            }
            true
        })
        .collect()
}
