pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod session;
pub mod tracing;

pub use config::{DrillConfig, Environment};
pub use error::SessionError;
pub use session::{DrillRound, RoundEntry, Session, SessionState, SessionSummary};
