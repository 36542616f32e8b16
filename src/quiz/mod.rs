/*!
 * Quiz engines.
 *
 * Three quiz modes read from the store and never write to it:
 * - `meaning`: pick the description matching a proverb
 * - `verb`: pick the verb hidden in a proverb
 * - `assemble`: put a proverb's shuffled words back in order
 *
 * Progress lives in a caller-held [`QuizSession`]. Every question hands back
 * an updated copy of the session with the asked proverb marked as used.
 */

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::database::models::CategoryRecord;
use crate::database::Repository;
use crate::errors::QuizError;

pub mod assemble;
pub mod meaning;
pub mod verb;

pub use assemble::{AssembleQuestion, AssembleQuiz};
pub use meaning::MeaningQuiz;
pub use verb::{VerbQuestion, VerbQuiz};

/// Caller-held progress through one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    pub category_id: i64,
    /// Proverbs already asked
    pub used_proverbs: BTreeSet<i64>,
    pub correct_answers: usize,
    /// Answers recorded so far
    pub asked: usize,
}

impl QuizSession {
    pub fn new(category_id: i64) -> Self {
        Self {
            category_id,
            ..Default::default()
        }
    }

    pub fn is_used(&self, proverb_id: i64) -> bool {
        self.used_proverbs.contains(&proverb_id)
    }

    /// Copy of this session with `proverb_id` marked as used
    pub fn with_used(&self, proverb_id: i64) -> Self {
        let mut next = self.clone();
        next.used_proverbs.insert(proverb_id);
        next
    }

    /// Record the outcome of one answered question
    pub fn record_answer(&mut self, correct: bool) {
        self.asked += 1;
        if correct {
            self.correct_answers += 1;
        }
    }
}

/// Either the next question or the end of the category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome<Q> {
    Question(Q),
    /// Every proverb of the category has been asked
    Exhausted { correct_answers: usize, total: usize },
}

impl<Q> QuizOutcome<Q> {
    pub fn question(self) -> Option<Q> {
        match self {
            QuizOutcome::Question(q) => Some(q),
            QuizOutcome::Exhausted { .. } => None,
        }
    }
}

/// Multiple-choice question with exactly one correct option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub proverb_id: i64,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    /// Session with this proverb marked as used
    pub session: QuizSession,
}

impl ChoiceQuestion {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Look the category up, failing with [`QuizError::UnknownCategory`]
pub(crate) async fn require_category(repository: &Repository, category_id: i64) -> Result<CategoryRecord> {
    repository
        .get_category(category_id)
        .await?
        .ok_or_else(|| QuizError::UnknownCategory(category_id).into())
}

/// Shuffle the correct option in among the decoys and report where it landed
pub(crate) fn shuffle_options(correct: String, decoys: Vec<String>, rng: &mut StdRng) -> (Vec<String>, usize) {
    let mut options: Vec<(bool, String)> = std::iter::once((true, correct))
        .chain(decoys.into_iter().map(|d| (false, d)))
        .collect();
    options.shuffle(rng);

    let correct_index = options.iter().position(|(is_correct, _)| *is_correct).unwrap_or(0);
    (options.into_iter().map(|(_, option)| option).collect(), correct_index)
}
