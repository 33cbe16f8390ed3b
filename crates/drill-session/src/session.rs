//! The drill loop.
//!
//! A session moves through the states
//!
//! * `AwaitingRound` → `Presenting`: a round is selected and its prompt shown
//! * `Presenting` → `Playing` on Enter, → `Terminated` on Esc
//! * `Playing` → `AwaitingVerdict` once every asset has played
//! * `AwaitingVerdict` → `AwaitingRound` once `y`/`n` has been applied
//!
//! An interrupted wait (termination signal or Ctrl+C) ends the session from
//! any state. A pending termination request is also honoured between asset
//! downloads. Every way into `Terminated` saves the score table first,
//! including a failed transition.

use std::{io::Write, mem, path::PathBuf};

use drill_core::{Catalog, ScoreTable, Selector, Verdict, pinyin};
use drill_store::ScoreStore;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    SessionError,
    assets::AssetResolver,
    audio::AudioPlayer,
    input::{InputError, InputReader, Key},
};

/// Keys accepted while a prompt is shown: continue or quit.
pub const CONTINUE_KEYS: [Key; 2] = [Key::Enter, Key::Esc];

/// Keys accepted for the verdict.
pub const VERDICT_KEYS: [Key; 2] = [Key::Char('y'), Key::Char('n')];

/// One drawn item, ready to be shown and played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundEntry {
    pub item_id: String,
    pub display: String,
    /// `None` when the asset could not be resolved
    pub asset: Option<PathBuf>,
}

/// The items of one round, in draw order, which is also playback order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillRound {
    pub entries: Vec<RoundEntry>,
}

impl DrillRound {
    pub fn prompt(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.display.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingRound,
    Presenting(DrillRound),
    Playing(DrillRound),
    AwaitingVerdict(DrillRound),
    Terminated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Rounds that received a verdict
    pub rounds: usize,
    pub correct: usize,
}

pub struct Session<I, A, P, W> {
    catalog: Catalog,
    scores: ScoreTable,
    store: ScoreStore,
    selector: Selector,
    input: I,
    assets: A,
    player: P,
    out: W,
    rng: StdRng,
    autosave: bool,
    state: SessionState,
    summary: SessionSummary,
}

impl<I, A, P, W> Session<I, A, P, W>
where
    I: InputReader,
    A: AssetResolver,
    P: AudioPlayer,
    W: Write,
{
    pub fn new(
        catalog: Catalog,
        scores: ScoreTable,
        store: ScoreStore,
        input: I,
        assets: A,
        player: P,
        out: W,
    ) -> Self {
        Self {
            catalog,
            scores,
            store,
            selector: Selector::default(),
            input,
            assets,
            player,
            out,
            rng: StdRng::from_entropy(),
            autosave: true,
            state: SessionState::AwaitingRound,
            summary: SessionSummary::default(),
        }
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub const fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub const fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, SessionState::Terminated)
    }

    /// Drive the session until it terminates.
    pub fn run(&mut self) -> Result<SessionSummary, SessionError> {
        tracing::info!(items = self.catalog.len(), scored = self.scores.len(), "Session started");
        while !self.is_terminated() {
            self.step()?;
        }
        Ok(self.summary)
    }

    /// Perform a single state transition.
    ///
    /// An error leaves the session terminated, with the scores saved on a
    /// best-effort basis.
    pub fn step(&mut self) -> Result<(), SessionError> {
        let state = mem::replace(&mut self.state, SessionState::Terminated);
        match self.transition(state) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Session failed: {e}");
                if let Err(save_err) = self.store.save(&self.scores) {
                    tracing::error!("Failed to save scores after session failure: {save_err}");
                }
                Err(e)
            }
        }
    }

    fn transition(&mut self, state: SessionState) -> Result<SessionState, SessionError> {
        let next = match state {
            SessionState::AwaitingRound => match self.prepare_round()? {
                Some(round) => SessionState::Presenting(round),
                None => {
                    tracing::info!("Termination requested while preparing a round");
                    self.terminate()?
                }
            },
            SessionState::Presenting(round) => {
                writeln!(
                    self.out,
                    "Pronounce: {}\nHit Enter to continue or Esc to end",
                    round.prompt()
                )?;
                self.out.flush()?;

                match self.await_key(&CONTINUE_KEYS)? {
                    Some(Key::Enter) => SessionState::Playing(round),
                    _ => self.terminate()?,
                }
            }
            SessionState::Playing(round) => {
                self.play_round(&round)?;
                SessionState::AwaitingVerdict(round)
            }
            SessionState::AwaitingVerdict(round) => {
                writeln!(self.out, "Did you get it right? (y/n)")?;
                self.out.flush()?;

                match self.await_key(&VERDICT_KEYS)? {
                    Some(Key::Char('y')) => self.score_round(&round, Verdict::Correct)?,
                    Some(_) => self.score_round(&round, Verdict::Incorrect)?,
                    None => self.terminate()?,
                }
            }
            SessionState::Terminated => SessionState::Terminated,
        };
        Ok(next)
    }

    /// Select the next round and resolve its assets. `None` means a
    /// termination request arrived before every asset was resolved.
    fn prepare_round(&mut self) -> Result<Option<DrillRound>, SessionError> {
        let items = self
            .selector
            .select_round(&self.catalog, &self.scores, &mut self.rng)?;

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            if self.input.is_interrupted() {
                return Ok(None);
            }

            let asset = match self.assets.resolve(item) {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!(key = %item.key, "Skipping unavailable asset: {e}");
                    None
                }
            };
            tracing::debug!(
                id = %item.id,
                score = self.scores.get(&item.id),
                weight = self.selector.model().weight(item, &self.scores),
                "Selected item"
            );
            entries.push(RoundEntry {
                item_id: item.id.clone(),
                display: pinyin::to_display_form(&item.id),
                asset,
            });
        }

        Ok(Some(DrillRound { entries }))
    }

    fn play_round(&mut self, round: &DrillRound) -> Result<(), SessionError> {
        for entry in &round.entries {
            let Some(asset) = &entry.asset else {
                writeln!(self.out, "No audio available for {}", entry.display)?;
                continue;
            };
            if let Err(e) = self.player.play(asset) {
                tracing::warn!(path = %asset.display(), "Playback failed: {e}");
                writeln!(self.out, "Error playing audio file {}: {e}", asset.display())?;
            }
        }
        Ok(())
    }

    fn score_round(
        &mut self,
        round: &DrillRound,
        verdict: Verdict,
    ) -> Result<SessionState, SessionError> {
        let model = *self.selector.model();
        for entry in &round.entries {
            let score = model.apply_feedback(&entry.item_id, verdict, &mut self.scores);
            writeln!(self.out, "  New score for {}: {score}", entry.item_id)?;
        }
        writeln!(self.out)?;

        self.summary.rounds += 1;
        if verdict == Verdict::Correct {
            self.summary.correct += 1;
        }

        if self.autosave {
            if let Err(e) = self.store.save(&self.scores) {
                tracing::error!("Failed to autosave scores: {e}");
            }
        }

        Ok(SessionState::AwaitingRound)
    }

    /// Wait for one of `allowed`. `None` means the wait was interrupted and
    /// the session should end.
    fn await_key(&mut self, allowed: &[Key]) -> Result<Option<Key>, SessionError> {
        match self.input.wait_for_key(allowed) {
            Ok(key) => Ok(Some(key)),
            Err(InputError::Interrupted) => {
                tracing::info!("Input interrupted, ending session");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn terminate(&mut self) -> Result<SessionState, SessionError> {
        self.store.save(&self.scores)?;
        tracing::info!(
            path = %self.store.path().display(),
            rounds = self.summary.rounds,
            correct = self.summary.correct,
            "Session ended, scores saved"
        );
        Ok(SessionState::Terminated)
    }
}
