use std::{
    collections::{HashSet, VecDeque},
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use drill_core::{Catalog, CorrectIncrement, Item, ScoreTable, Selector, WeightModel};
use drill_session::{
    Session,
    assets::{AssetError, AssetResolver},
    audio::{AudioPlayer, PlaybackError},
    input::{InputError, InputReader, Key},
};
use drill_store::ScoreStore;
use rand::{SeedableRng, rngs::StdRng};
use tempfile::TempDir;

/// Replays a fixed key sequence, skipping keys the caller does not accept,
/// and reports an interruption once the script runs out or the shutdown
/// flag is set.
pub struct ScriptedInput {
    keys: VecDeque<Key>,
    pub shutdown: Arc<AtomicBool>,
    pub requests: Vec<Vec<Key>>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            shutdown: Arc::new(AtomicBool::new(false)),
            requests: Vec::new(),
        }
    }
}

impl InputReader for ScriptedInput {
    fn wait_for_key(&mut self, allowed: &[Key]) -> Result<Key, InputError> {
        self.requests.push(allowed.to_vec());
        if self.is_interrupted() {
            return Err(InputError::Interrupted);
        }
        while let Some(key) = self.keys.pop_front() {
            if allowed.contains(&key) {
                return Ok(key);
            }
        }
        Err(InputError::Interrupted)
    }

    fn is_interrupted(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Resolves every item to `<dir>/<key>` without touching the network,
/// failing for the configured ids. Can raise a shutdown flag mid-resolve to
/// stand in for a signal arriving during a download.
pub struct FakeAssets {
    dir: PathBuf,
    failing: HashSet<String>,
    shutdown_on_resolve: Option<Arc<AtomicBool>>,
    pub resolved: Vec<String>,
}

impl FakeAssets {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            failing: HashSet::new(),
            shutdown_on_resolve: None,
            resolved: Vec::new(),
        }
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn shutdown_on_resolve(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown_on_resolve = Some(shutdown);
        self
    }
}

impl AssetResolver for FakeAssets {
    fn resolve(&mut self, item: &Item) -> Result<PathBuf, AssetError> {
        self.resolved.push(item.id.clone());
        if let Some(shutdown) = &self.shutdown_on_resolve {
            shutdown.store(true, Ordering::SeqCst);
        }
        if self.failing.contains(&item.id) {
            return Err(AssetError::InvalidKey(item.key.clone()));
        }
        Ok(self.dir.join(&item.key))
    }
}

/// Records played handles, failing for the configured ones.
#[derive(Default)]
pub struct RecordingPlayer {
    failing: HashSet<PathBuf>,
    pub played: Vec<PathBuf>,
}

impl RecordingPlayer {
    pub fn failing(mut self, handle: PathBuf) -> Self {
        self.failing.insert(handle);
        self
    }
}

impl AudioPlayer for RecordingPlayer {
    fn play(&mut self, handle: &Path) -> Result<(), PlaybackError> {
        if self.failing.contains(handle) {
            return Err(PlaybackError::Open {
                path: handle.to_path_buf(),
                source: std::io::Error::other("device busy"),
            });
        }
        self.played.push(handle.to_path_buf());
        Ok(())
    }
}

/// Everything a scripted session needs, kept alive for inspection after
/// the run.
pub struct Harness {
    pub dir: TempDir,
    pub input: ScriptedInput,
    pub assets: FakeAssets,
    pub player: RecordingPlayer,
    pub out: Vec<u8>,
    pub catalog: Catalog,
    pub scores: ScoreTable,
    pub max_round_size: usize,
    pub autosave: bool,
}

impl Harness {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let assets = FakeAssets::new(&dir.path().join("sounds"));
        Self {
            dir,
            input: ScriptedInput::new(keys),
            assets,
            player: RecordingPlayer::default(),
            out: Vec::new(),
            catalog: Catalog::from_locators([("ma1.mp3", "https://example.com/ma1.mp3")]),
            scores: ScoreTable::new(),
            max_round_size: 1,
            autosave: true,
        }
    }

    pub fn store(&self) -> ScoreStore {
        ScoreStore::new(self.dir.path().join("score_tracker.json"))
    }

    pub fn sound(&self, key: &str) -> PathBuf {
        self.dir.path().join("sounds").join(key)
    }

    pub fn session(
        &mut self,
    ) -> Session<&mut ScriptedInput, &mut FakeAssets, &mut RecordingPlayer, &mut Vec<u8>> {
        let selector = Selector::new(
            WeightModel::new(CorrectIncrement::Compounding, None),
            self.max_round_size,
        );
        let store = self.store();
        Session::new(
            self.catalog.clone(),
            self.scores.clone(),
            store,
            &mut self.input,
            &mut self.assets,
            &mut self.player,
            &mut self.out,
        )
        .with_selector(selector)
        .with_autosave(self.autosave)
        .with_rng(StdRng::seed_from_u64(17))
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    pub fn saved_scores(&self) -> ScoreTable {
        self.store().load().unwrap()
    }
}
