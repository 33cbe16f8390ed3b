//! Blocking key input from a restricted alphabet.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use thiserror::Error;

/// How often a waiting reader checks the shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Esc,
    Char(char),
}

impl Key {
    /// Map a terminal key code, lowercasing characters.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Esc => Some(Self::Esc),
            KeyCode::Char(c) => c.to_lowercase().next().map(Self::Char),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("interrupted by a termination request")]
    Interrupted,
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Source of key presses for the drill loop.
pub trait InputReader {
    /// Block until one of `allowed` is pressed and return it. Keys outside
    /// `allowed` are ignored.
    fn wait_for_key(&mut self, allowed: &[Key]) -> Result<Key, InputError>;

    /// Whether a termination request is pending. Checked between blocking
    /// operations that do not wait for a key.
    fn is_interrupted(&self) -> bool {
        false
    }
}

impl<T: InputReader + ?Sized> InputReader for &mut T {
    fn wait_for_key(&mut self, allowed: &[Key]) -> Result<Key, InputError> {
        (**self).wait_for_key(allowed)
    }

    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}

/// Reads single key presses from the terminal in raw mode.
///
/// Reports [`InputError::Interrupted`] once the shared shutdown flag is set,
/// or when Ctrl+C is pressed (raw mode swallows the signal).
#[derive(Debug, Clone)]
pub struct TerminalInput {
    shutdown: Arc<AtomicBool>,
}

impl TerminalInput {
    pub const fn new(shutdown: Arc<AtomicBool>) -> Self {
        Self { shutdown }
    }

    fn is_interrupt(event: &KeyEvent) -> bool {
        event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c')
    }
}

impl InputReader for TerminalInput {
    fn wait_for_key(&mut self, allowed: &[Key]) -> Result<Key, InputError> {
        if self.is_interrupted() {
            return Err(InputError::Interrupted);
        }
        let _raw_mode = RawModeGuard::enable()?;

        loop {
            if self.is_interrupted() {
                return Err(InputError::Interrupted);
            }
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            if Self::is_interrupt(&key_event) {
                return Err(InputError::Interrupted);
            }

            match Key::from_code(key_event.code) {
                Some(key) if allowed.contains(&key) => return Ok(key),
                _ => tracing::trace!(code = ?key_event.code, "Ignoring key"),
            }
        }
    }

    fn is_interrupted(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Keeps the terminal in raw mode while alive.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to leave raw mode: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_code() {
        assert_eq!(Key::from_code(KeyCode::Enter), Some(Key::Enter));
        assert_eq!(Key::from_code(KeyCode::Esc), Some(Key::Esc));
        assert_eq!(Key::from_code(KeyCode::Char('y')), Some(Key::Char('y')));
        assert_eq!(Key::from_code(KeyCode::Char('N')), Some(Key::Char('n')));
        assert_eq!(Key::from_code(KeyCode::Tab), None);
        assert_eq!(Key::from_code(KeyCode::F(1)), None);
    }

    #[test]
    fn test_ctrl_c_is_an_interrupt() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(TerminalInput::is_interrupt(&ctrl_c));

        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!TerminalInput::is_interrupt(&plain_c));
    }

    #[test]
    fn test_pending_shutdown_interrupts_without_a_terminal() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut input = TerminalInput::new(Arc::clone(&shutdown));
        assert!(!input.is_interrupted());

        shutdown.store(true, Ordering::SeqCst);
        assert!(input.is_interrupted());
        assert!(matches!(
            input.wait_for_key(&[Key::Enter]),
            Err(InputError::Interrupted)
        ));
    }
}
