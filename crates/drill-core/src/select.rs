//! Selection engine: draws the items of each drill round.
//!
//! Weights are recomputed from the score table on every call. Each draw is
//! an independent weighted pick over the whole catalog, so the same item can
//! appear more than once in a round.

use rand::{
    Rng,
    distributions::{Distribution, WeightedError, WeightedIndex},
};
use thiserror::Error;

use crate::{Catalog, Item, ScoreTable, WeightModel};

/// Smallest number of items in a round.
pub const MIN_ROUND_SIZE: usize = 1;

/// Default largest number of items in a round.
pub const DEFAULT_MAX_ROUND_SIZE: usize = 2;

/// Why a round could not be drawn.
#[derive(Error, Debug)]
pub enum SelectionError {
    /// There is nothing to draw from
    #[error("the catalog is empty")]
    EmptyCatalog,
    /// Every weight is zero, or one is not finite
    #[error("invalid sampling weights: {0}")]
    InvalidWeights(#[from] WeightedError),
}

/// Draws drill rounds from a catalog.
///
/// Combines a [`WeightModel`] with the largest round size. A round holds
/// between [`MIN_ROUND_SIZE`] and `max_round_size` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    model: WeightModel,
    max_round_size: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(WeightModel::default(), DEFAULT_MAX_ROUND_SIZE)
    }
}

impl Selector {
    /// Create a selector. A `max_round_size` below [`MIN_ROUND_SIZE`] is
    /// raised to it.
    pub fn new(model: WeightModel, max_round_size: usize) -> Self {
        Self {
            model,
            max_round_size: max_round_size.max(MIN_ROUND_SIZE),
        }
    }

    /// The weight model draws are made with.
    pub const fn model(&self) -> &WeightModel {
        &self.model
    }

    pub const fn max_round_size(&self) -> usize {
        self.max_round_size
    }

    /// Draw one round: a size picked uniformly from
    /// `MIN_ROUND_SIZE..=max_round_size`, then that many weighted draws.
    pub fn select_round<'c, R: Rng>(
        &self,
        catalog: &'c Catalog,
        scores: &ScoreTable,
        rng: &mut R,
    ) -> Result<Vec<&'c Item>, SelectionError> {
        let count = rng.gen_range(MIN_ROUND_SIZE..=self.max_round_size);
        self.draw(catalog, scores, count, rng)
    }

    /// Perform `count` independent weighted draws with replacement.
    pub fn draw<'c, R: Rng>(
        &self,
        catalog: &'c Catalog,
        scores: &ScoreTable,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<&'c Item>, SelectionError> {
        if catalog.is_empty() {
            return Err(SelectionError::EmptyCatalog);
        }

        let weights = self.model.weights(catalog, scores);
        let distribution = WeightedIndex::new(&weights)?;
        let items = catalog.items();

        Ok((0..count)
            .map(|_| &items[distribution.sample(rng)])
            .collect())
    }
}
