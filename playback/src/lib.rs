//! Replays a recorded matching trace one step at a time, either on demand or
//! on a timer.

mod config;
mod controller;
pub mod timer;

pub use config::{ConfigError, PlaybackConfig};
pub use controller::{Controller, MatchInput, Phase, PlaybackEvent, PlaybackState, Progress};
pub use timer::{TickTimer, TimerToken};

pub use algos::{Algorithm, Step, Trace};
