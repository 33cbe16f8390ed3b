//! Adaptive drill engine for Syllable Drill
//!
//! This crate provides the weighted-sampling and scoring core: the catalog of
//! drillable syllables, the per-syllable mastery scores, the weight model that
//! turns both into sampling weights, and the selection engine that draws each
//! round. It performs no I/O.

pub mod catalog;
pub mod pinyin;
pub mod score;
pub mod select;
pub mod weight;

pub use catalog::{Catalog, Item};
pub use score::ScoreTable;
pub use select::{SelectionError, Selector};
pub use weight::{CorrectIncrement, Verdict, WeightModel};
