use std::path::PathBuf;

use drill_core::{CorrectIncrement, Selector, WeightModel, select::DEFAULT_MAX_ROUND_SIZE};
use serde::Deserialize;

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "DRILL_";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DrillConfig {
    #[serde(default = "default_score_file")]
    pub score_file: PathBuf,
    #[serde(default = "default_catalog_file")]
    pub catalog_file: PathBuf,
    #[serde(default = "default_sounds_dir")]
    pub sounds_dir: PathBuf,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default)]
    pub env: Environment,
    /// Save the score table after every scored round, not only on quit
    #[serde(default = "default_autosave")]
    pub autosave: bool,
    #[serde(default)]
    pub correct_increment: CorrectIncrement,
    /// Upper bound on the score factor; unbounded when unset
    #[serde(default)]
    pub score_factor_cap: Option<i64>,
    #[serde(default = "default_max_round_size")]
    pub max_round_size: usize,
}

fn default_score_file() -> PathBuf {
    PathBuf::from("score_tracker.json")
}

fn default_catalog_file() -> PathBuf {
    PathBuf::from("pinyin_paths.json")
}

fn default_sounds_dir() -> PathBuf {
    PathBuf::from("sounds")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

const fn default_autosave() -> bool {
    true
}

const fn default_max_round_size() -> usize {
    DEFAULT_MAX_ROUND_SIZE
}

impl DrillConfig {
    /// Read the configuration from `DRILL_*` environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::from_vars(std::env::vars())
    }

    /// Read the configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }

    pub fn weight_model(&self) -> WeightModel {
        WeightModel::new(self.correct_increment, self.score_factor_cap)
    }

    pub fn selector(&self) -> Selector {
        Selector::new(self.weight_model(), self.max_round_size)
    }
}
