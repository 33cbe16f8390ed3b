use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mastery score per item id.
///
/// Ids that have never been scored read as `0`. Serialises as a flat
/// `{ "id": score }` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable {
    scores: BTreeMap<String, i64>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mastery score of `id`, `0` if it was never scored.
    pub fn get(&self, id: &str) -> i64 {
        self.scores.get(id).copied().unwrap_or(0)
    }

    /// Overwrite the score of `id`.
    pub fn set(&mut self, id: impl Into<String>, score: i64) {
        self.scores.insert(id.into(), score);
    }

    /// Add `delta` to the score of `id`, creating the entry if needed.
    /// Returns the new score.
    pub fn adjust(&mut self, id: &str, delta: i64) -> i64 {
        let score = self.scores.entry(id.to_string()).or_insert(0);
        *score = score.saturating_add(delta);
        *score
    }

    /// Whether `id` has ever been scored.
    pub fn contains(&self, id: &str) -> bool {
        self.scores.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scored ids and their scores, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.scores.iter().map(|(id, score)| (id.as_str(), *score))
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().map(|(id, score)| (id.into(), score)).collect(),
        }
    }
}
