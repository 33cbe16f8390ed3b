use std::io;

use drill_core::SelectionError;
use drill_store::StoreError;
use thiserror::Error;

use crate::input::InputError;

/// Errors that end a drill session.
///
/// Per-asset fetch and playback failures never surface here; they are logged
/// and the round carries on without that asset.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}
