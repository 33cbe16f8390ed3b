//! Synchronous audio playback.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use rodio::{Decoder, OutputStream, OutputStreamHandle, PlayError, Sink, StreamError, decoder::DecoderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("no audio output available: {0}")]
    Unavailable(#[from] StreamError),
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecoderError,
    },
    #[error("failed to create audio sink: {0}")]
    Sink(#[from] PlayError),
}

/// Plays one local asset to completion.
pub trait AudioPlayer {
    fn play(&mut self, handle: &Path) -> Result<(), PlaybackError>;
}

impl<T: AudioPlayer + ?Sized> AudioPlayer for &mut T {
    fn play(&mut self, handle: &Path) -> Result<(), PlaybackError> {
        (**self).play(handle)
    }
}

/// Plays through the default output device.
///
/// The output stream is not `Send`; create the player on the thread that
/// runs the session.
pub struct RodioPlayer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioPlayer {
    /// Open the default output device. Fails when no audio output is
    /// available, which is fatal at startup.
    pub fn try_default() -> Result<Self, PlaybackError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        tracing::info!("Audio output initialized");
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&mut self, handle: &Path) -> Result<(), PlaybackError> {
        let file = File::open(handle).map_err(|source| PlaybackError::Open {
            path: handle.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
            path: handle.to_path_buf(),
            source,
        })?;

        let sink = Sink::try_new(&self.stream_handle)?;
        sink.append(source);
        tracing::debug!(path = %handle.display(), "Playing audio asset");
        sink.sleep_until_end();

        Ok(())
    }
}
