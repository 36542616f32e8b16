/*!
 * Verb quiz: restore the verb hidden in a proverb.
 *
 * Decoys are verbs from the text of other proverbs that agree with the
 * hidden verb on aspect, number, gender and tense, so every option fits the
 * sentence grammatically. Candidates are grouped into combinations as large
 * as the answer, shuffled, and the first distinct groups become decoys.
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
use regex::Regex;
use std::collections::BTreeSet;

use super::{require_category, shuffle_options, ChoiceQuestion, QuizOutcome, QuizSession};
use crate::analysis::VerbFeatures;
use crate::app_config::QuizConfig;
use crate::database::models::ProverbRecord;
use crate::database::Repository;
use crate::errors::QuizError;

/// Verbs making up one answer
const ANSWER_VERB_COUNT: usize = 1;

/// Verb quiz question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbQuestion {
    pub question: ChoiceQuestion,
    /// Hidden verb, lower-cased surface form
    pub verb: String,
    pub features: VerbFeatures,
}

/// Picks a proverb with a verb and grammatically agreeing decoy verbs
pub struct VerbQuiz {
    repository: Repository,
    rng: Mutex<StdRng>,
    config: QuizConfig,
}

impl VerbQuiz {
    pub fn new(repository: Repository, config: QuizConfig) -> Self {
        Self {
            repository,
            rng: Mutex::new(StdRng::from_os_rng()),
            config,
        }
    }

    /// Deterministic variant for reproducible question sequences
    pub fn with_seed(repository: Repository, config: QuizConfig, seed: u64) -> Self {
        Self {
            repository,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            config,
        }
    }

    /// Next question for an unused verb-bearing proverb of the category
    ///
    /// # Errors
    /// * [`QuizError::UnknownCategory`] - The category does not exist
    /// * [`QuizError::InsufficientPool`] - Fewer distinct decoy groups than required
    pub async fn next_question(&self, session: &QuizSession) -> Result<QuizOutcome<VerbQuestion>> {
        self.next_question_excluding(session, &BTreeSet::new()).await
    }

    /// Like [`next_question`](Self::next_question), but proverbs without
    /// enough decoys are skipped until one works or none remain
    pub async fn next_playable_question(&self, session: &QuizSession) -> Result<QuizOutcome<VerbQuestion>> {
        let mut unplayable = BTreeSet::new();

        loop {
            match self.next_question_excluding(session, &unplayable).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) => match e.downcast_ref::<QuizError>() {
                    Some(QuizError::InsufficientPool { proverb_id, available, .. }) => {
                        warn!(
                            "Skipping proverb {}: only {} decoy group(s) available",
                            proverb_id, available
                        );
                        unplayable.insert(*proverb_id);
                    }
                    _ => return Err(e),
                },
            }
        }
    }

    async fn next_question_excluding(
        &self,
        session: &QuizSession,
        unplayable: &BTreeSet<i64>,
    ) -> Result<QuizOutcome<VerbQuestion>> {
        require_category(&self.repository, session.category_id).await?;

        let proverbs = self.repository.get_verb_proverbs(session.category_id).await?;
        let remaining: Vec<&ProverbRecord> = proverbs
            .iter()
            .filter(|p| !session.is_used(p.id) && !unplayable.contains(&p.id))
            .collect();

        let picked = {
            let mut rng = self.rng.lock();
            remaining.choose(&mut *rng).map(|p| (*p).clone())
        };
        let Some(proverb) = picked else {
            return Ok(QuizOutcome::Exhausted {
                correct_answers: session.correct_answers,
                total: proverbs.len(),
            });
        };

        let question = self.build_question(&proverb, session).await?;
        Ok(QuizOutcome::Question(question))
    }

    async fn build_question(&self, proverb: &ProverbRecord, session: &QuizSession) -> Result<VerbQuestion> {
        let verbs = self.repository.get_value_verbs(proverb.id).await?;
        let Some(correct) = verbs.into_iter().next() else {
            return Err(QuizError::InsufficientPool {
                proverb_id: proverb.id,
                available: 0,
                required: self.config.decoy_count,
            }
            .into());
        };
        let features = correct.form.verb_features().copied().unwrap_or_default();

        let candidates = self
            .repository
            .find_agreeing_verbs(proverb.id, &correct.value, features)
            .await?;

        let (options, correct_index) = {
            let mut rng = self.rng.lock();
            let mut groups = combinations(&candidates, ANSWER_VERB_COUNT);
            groups.shuffle(&mut *rng);

            if groups.len() < self.config.decoy_count {
                return Err(QuizError::InsufficientPool {
                    proverb_id: proverb.id,
                    available: groups.len(),
                    required: self.config.decoy_count,
                }
                .into());
            }

            let decoys: Vec<String> = groups
                .into_iter()
                .take(self.config.decoy_count)
                .map(|group| group.join(&self.config.group_separator))
                .collect();
            shuffle_options(correct.value.clone(), decoys, &mut rng)
        };

        let prompt = mask_word(&proverb.value, &correct.value, &self.config.blank_marker)?;

        debug!(
            "Verb question for proverb {}: hidden '{}', {} candidates",
            proverb.id,
            correct.value,
            candidates.len()
        );

        Ok(VerbQuestion {
            question: ChoiceQuestion {
                proverb_id: proverb.id,
                prompt,
                options,
                correct_index,
                session: session.with_used(proverb.id),
            },
            verb: correct.value,
            features,
        })
    }
}

/// All `k`-element combinations of `items`, preserving item order
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k > items.len() {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();

    loop {
        result.push(indices.iter().map(|&i| items[i].clone()).collect());

        // Rightmost index that can still advance
        let Some(pos) = (0..k).rev().find(|&i| indices[i] != i + items.len() - k) else {
            break;
        };
        indices[pos] += 1;
        for i in pos + 1..k {
            indices[i] = indices[i - 1] + 1;
        }
    }

    result
}

/// Replace every whole-word, case-insensitive occurrence of `word` with `blank`
pub fn mask_word(text: &str, word: &str, blank: &str) -> Result<String> {
    let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        .with_context(|| format!("Failed to build mask pattern for '{}'", word))?;
    Ok(pattern.replace_all(text, regex::NoExpand(blank)).into_owned())
}
