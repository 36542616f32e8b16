/*!
 * Word-order quiz: reassemble a proverb from its shuffled words.
 */

use anyhow::Result;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
use regex::Regex;

use super::{require_category, QuizOutcome, QuizSession};
use crate::analysis::tokenizer::split_whitespace_words;
use crate::database::models::ProverbRecord;
use crate::database::Repository;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\W_]").expect("non-word pattern is valid"));

/// Shuffled words of one proverb
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleQuestion {
    pub proverb_id: i64,
    pub words: Vec<String>,
    /// Proverb text in its original order
    pub answer: String,
    /// Session with this proverb marked as used
    pub session: QuizSession,
}

impl AssembleQuestion {
    /// Whether `attempt` spells the proverb, ignoring punctuation, spacing and case
    pub fn is_correct(&self, attempt: &str) -> bool {
        normalize_answer(attempt) == normalize_answer(&self.answer)
    }
}

/// Strip every non-word character and lower-case the rest
pub fn normalize_answer(text: &str) -> String {
    NON_WORD.replace_all(text, "").to_lowercase()
}

/// Picks a proverb and shuffles its words
pub struct AssembleQuiz {
    repository: Repository,
    rng: Mutex<StdRng>,
}

impl AssembleQuiz {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic variant for reproducible question sequences
    pub fn with_seed(repository: Repository, seed: u64) -> Self {
        Self {
            repository,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub async fn next_question(&self, session: &QuizSession) -> Result<QuizOutcome<AssembleQuestion>> {
        require_category(&self.repository, session.category_id).await?;

        let proverbs = self
            .repository
            .get_proverbs_by_category(session.category_id)
            .await?;
        let remaining: Vec<&ProverbRecord> = proverbs.iter().filter(|p| !session.is_used(p.id)).collect();

        let mut rng = self.rng.lock();
        let Some(proverb) = remaining.choose(&mut *rng) else {
            return Ok(QuizOutcome::Exhausted {
                correct_answers: session.correct_answers,
                total: proverbs.len(),
            });
        };

        let mut words = split_whitespace_words(&proverb.value);
        words.shuffle(&mut *rng);

        Ok(QuizOutcome::Question(AssembleQuestion {
            proverb_id: proverb.id,
            words,
            answer: proverb.value.clone(),
            session: session.with_used(proverb.id),
        }))
    }
}
