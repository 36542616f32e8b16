/*!
 * Meaning quiz: match a proverb with its description.
 */

use anyhow::Result;
use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::{require_category, shuffle_options, ChoiceQuestion, QuizOutcome, QuizSession};
use crate::app_config::QuizConfig;
use crate::database::models::ProverbRecord;
use crate::database::Repository;
use crate::errors::QuizError;

/// Picks a proverb and decoy descriptions from the same category
pub struct MeaningQuiz {
    repository: Repository,
    rng: Mutex<StdRng>,
    config: QuizConfig,
}

impl MeaningQuiz {
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

    /// Next question for an unused proverb of the session's category
    ///
    /// # Errors
    /// * [`QuizError::UnknownCategory`] - The category does not exist
    /// * [`QuizError::InsufficientPool`] - Fewer distinct decoy descriptions than required
    pub async fn next_question(&self, session: &QuizSession) -> Result<QuizOutcome<ChoiceQuestion>> {
        require_category(&self.repository, session.category_id).await?;

        let proverbs = self
            .repository
            .get_proverbs_by_category(session.category_id)
            .await?;
        let remaining: Vec<&ProverbRecord> = proverbs.iter().filter(|p| !session.is_used(p.id)).collect();

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

        let candidates = self
            .repository
            .get_decoy_descriptions(session.category_id, proverb.id, &proverb.description)
            .await?;

        if candidates.len() < self.config.decoy_count {
            return Err(QuizError::InsufficientPool {
                proverb_id: proverb.id,
                available: candidates.len(),
                required: self.config.decoy_count,
            }
            .into());
        }

        let (options, correct_index) = {
            let mut rng = self.rng.lock();
            let decoys: Vec<String> = candidates
                .choose_multiple(&mut *rng, self.config.decoy_count)
                .cloned()
                .collect();
            shuffle_options(proverb.description.clone(), decoys, &mut rng)
        };

        debug!(
            "Meaning question for proverb {} with {} options",
            proverb.id,
            options.len()
        );

        Ok(QuizOutcome::Question(ChoiceQuestion {
            proverb_id: proverb.id,
            prompt: proverb.value,
            options,
            correct_index,
            session: session.with_used(proverb.id),
        }))
    }
}
