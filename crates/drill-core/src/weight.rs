//! Weight model: turns frequency priors and mastery scores into sampling
//! weights, and applies verdicts back onto the score table.
//!
//! # Algorithm
//!
//! * `score_factor = max(1, 5 - score)`
//! * `weight = frequency_prior * score_factor`
//!
//! A score of 4 or more leaves the item at its bare prior, so mastered items
//! stay drillable. Below that the factor grows linearly and without bound
//! unless a cap is configured.

use serde::Deserialize;

use crate::{Catalog, Item, ScoreTable};

/// `score_factor = max(1, MASTERY_OFFSET - score)`
pub const MASTERY_OFFSET: i64 = 5;

/// Upper bound on a single correct-answer increment.
pub const CORRECT_INCREMENT_CAP: i64 = 10;

/// Score removed for an incorrect answer.
pub const INCORRECT_PENALTY: i64 = 2;

// NOTE: likely off-by-design, growth accelerates with score
/// Correct-answer rule used unless configured otherwise.
pub const DEFAULT_CORRECT_INCREMENT: CorrectIncrement = CorrectIncrement::Compounding;

/// The user's verdict for a whole round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The user pronounced the round correctly
    Correct,
    /// The user got the round wrong
    Incorrect,
}

/// How much a correct answer adds to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectIncrement {
    /// `score += min(score + 1, 10)`
    Compounding,
    /// `score += 1`
    Unit,
}

impl CorrectIncrement {
    /// Amount added to `score` for a correct answer.
    pub const fn increment(self, score: i64) -> i64 {
        match self {
            Self::Compounding => {
                let next = score.saturating_add(1);
                if next < CORRECT_INCREMENT_CAP {
                    next
                } else {
                    CORRECT_INCREMENT_CAP
                }
            }
            Self::Unit => 1,
        }
    }
}

impl Default for CorrectIncrement {
    fn default() -> Self {
        DEFAULT_CORRECT_INCREMENT
    }
}

/// Parameters of the weighting and feedback rules.
///
/// The default model uses [`CorrectIncrement::Compounding`] and leaves the
/// score factor unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightModel {
    correct_increment: CorrectIncrement,
    score_factor_cap: Option<i64>,
}

impl WeightModel {
    /// Create a model.
    ///
    /// # Arguments
    ///
    /// * `correct_increment` - Rule applied on a correct verdict
    /// * `score_factor_cap` - Upper bound on the score factor, raised to at
    ///   least 1 when given
    pub fn new(correct_increment: CorrectIncrement, score_factor_cap: Option<i64>) -> Self {
        Self {
            correct_increment,
            score_factor_cap: score_factor_cap.map(|cap| cap.max(1)),
        }
    }

    /// Multiplier applied to the frequency prior for a given score.
    pub fn score_factor(&self, score: i64) -> i64 {
        let factor = MASTERY_OFFSET.saturating_sub(score).max(1);
        match self.score_factor_cap {
            Some(cap) => factor.min(cap),
            None => factor,
        }
    }

    /// Sampling weight of `item` given the current scores.
    pub fn weight(&self, item: &Item, scores: &ScoreTable) -> f64 {
        f64::from(item.frequency_prior) * self.score_factor(scores.get(&item.id)) as f64
    }

    /// Weights for every catalog item, in catalog order.
    pub fn weights(&self, catalog: &Catalog, scores: &ScoreTable) -> Vec<f64> {
        catalog
            .items()
            .iter()
            .map(|item| self.weight(item, scores))
            .collect()
    }

    /// Apply a verdict to one item and return its new score.
    pub fn apply_feedback(&self, id: &str, verdict: Verdict, scores: &mut ScoreTable) -> i64 {
        let delta = match verdict {
            Verdict::Correct => self.correct_increment.increment(scores.get(id)),
            Verdict::Incorrect => -INCORRECT_PENALTY,
        };
        scores.adjust(id, delta)
    }
}
