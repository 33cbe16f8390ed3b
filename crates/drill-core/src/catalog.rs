//! The drill vocabulary.
//!
//! A catalog entry is keyed by its audio file name (e.g. `shi4.mp3`) and
//! carries the locator its audio is fetched from. The item id, which is what
//! scores are tracked against, is the key up to its first `.`.

/// Frequency prior for syllables missing from [`FREQUENCY_PRIORS`].
pub const DEFAULT_FREQUENCY_PRIOR: u32 = 10;

/// Static importance weights for common syllables, highest first.
pub const FREQUENCY_PRIORS: &[(&str, u32)] = &[
    // High frequency
    ("shi4", 100),
    ("de5", 95),
    ("bu4", 90),
    ("le5", 88),
    ("ren2", 85),
    ("zai4", 83),
    ("you3", 80),
    ("wo3", 78),
    ("ta1", 75),
    ("zhe4", 73),
    ("yi1", 70),
    ("ge4", 68),
    ("he2", 65),
    ("ye3", 62),
    ("zhong1", 60),
    ("guo2", 58),
    ("shang4", 55),
    ("xue2", 53),
    ("xiao3", 50),
    // Medium frequency
    ("hao3", 45),
    ("ma1", 42),
    ("ni3", 40),
    ("men5", 38),
    ("lai2", 36),
    ("kan4", 34),
    ("shuo1", 32),
    ("xin1", 30),
    ("dui4", 28),
    ("na3", 26),
    ("qu4", 24),
    ("hui4", 22),
    ("chi1", 20),
];

/// Look up the frequency prior of an item id.
pub fn frequency_prior(id: &str) -> u32 {
    FREQUENCY_PRIORS
        .iter()
        .find(|(syllable, _)| *syllable == id)
        .map_or(DEFAULT_FREQUENCY_PRIOR, |(_, prior)| *prior)
}

/// Derive the item id from a catalog key: everything before the first `.`.
pub fn item_id_from_key(key: &str) -> &str {
    key.split_once('.').map_or(key, |(id, _)| id)
}

/// A drillable syllable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Score key, e.g. `shi4`
    pub id: String,
    /// Catalog key, also the cached asset file name, e.g. `shi4.mp3`
    pub key: String,
    /// Where the audio asset is fetched from
    pub locator: String,
    /// Static importance weight
    pub frequency_prior: u32,
}

impl Item {
    /// Build an item from its catalog key, using the built-in prior table.
    pub fn new(key: impl Into<String>, locator: impl Into<String>) -> Self {
        let key = key.into();
        let id = item_id_from_key(&key).to_string();
        let frequency_prior = frequency_prior(&id);

        Self {
            id,
            key,
            locator: locator.into(),
            frequency_prior,
        }
    }

    /// Override the frequency prior.
    pub fn with_frequency_prior(mut self, frequency_prior: u32) -> Self {
        self.frequency_prior = frequency_prior;
        self
    }
}

/// The full, fixed set of drillable items, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog, sorting by key and keeping the first item of each
    /// duplicated key.
    pub fn new(mut items: Vec<Item>) -> Self {
        items.sort_by(|a, b| a.key.cmp(&b.key));
        items.dedup_by(|a, b| a.key == b.key);
        Self { items }
    }

    /// Build a catalog from `(key, locator)` pairs.
    pub fn from_locators<I, K, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        Self::new(
            entries
                .into_iter()
                .map(|(key, locator)| Item::new(key, locator))
                .collect(),
        )
    }

    /// All items, ordered by key.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Catalog keys, ordered.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.key.as_str())
    }

    /// Locator of the item stored under `key`, if any.
    pub fn locator_for(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.locator.as_str())
    }
}
