use std::fmt;
use std::time::Duration;

use algos::{Algorithm, Step, Trace, run_match};

use crate::config::PlaybackConfig;
use crate::timer::TickTimer;

/// The (text, pattern, algorithm) tuple a trace was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInput {
    pub text: String,
    pub pattern: String,
    pub algorithm: Algorithm,
}

impl Default for MatchInput {
    fn default() -> Self {
        Self {
            text: "AABAACAADAABAABA".to_string(),
            pattern: "AABA".to_string(),
            algorithm: Algorithm::Naive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// Index of the step on display, `0..=trace.len()`.
    pub cursor: usize,
    pub is_playing: bool,
    pub speed_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Advanced { cursor: usize },
    /// The cursor reached the end of the trace.
    Finished,
}

/// Status line data: "Step X of Y • Matches found: Z".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub step: usize,
    pub total: usize,
    pub matches: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {} of {} • Matches found: {}",
            self.step, self.total, self.matches
        )
    }
}

/// Owns one trace and a cursor over it.
///
/// All mutation goes through `&mut self`, and automatic advancement happens
/// only inside [`Controller::advance`]. The timer holds at most one pending
/// tick and every commit, pause and reset cancels it, so a tick meant for the
/// previous trace never fires against a new one.
#[derive(Debug)]
pub struct Controller {
    config: PlaybackConfig,
    input: MatchInput,
    trace: Trace,
    state: PlaybackState,
    timer: TickTimer,
}

impl Controller {
    pub fn new(config: PlaybackConfig, input: MatchInput) -> Self {
        let trace = run_match(&input.text, &input.pattern, input.algorithm);
        Self {
            state: PlaybackState {
                cursor: 0,
                is_playing: false,
                speed_ms: config.default_speed_ms(),
            },
            config,
            input,
            trace,
            timer: TickTimer::new(),
        }
    }

    /// Replaces the trace with a fresh run over the new input and rewinds.
    /// The playback speed is kept.
    pub fn commit(
        &mut self,
        text: impl Into<String>,
        pattern: impl Into<String>,
        algorithm: Algorithm,
    ) {
        self.cancel_tick();

        let input = MatchInput {
            text: text.into(),
            pattern: pattern.into(),
            algorithm,
        };
        self.trace = run_match(&input.text, &input.pattern, input.algorithm);
        self.input = input;
        self.state.cursor = 0;
        self.state.is_playing = false;

        log::info!(
            "commit: {} over {} bytes, {} steps, {} matches",
            algorithm,
            self.input.text.len(),
            self.trace.len(),
            self.trace.matches().len()
        );
    }

    pub fn start(&mut self) {
        if self.at_end() {
            log::debug!("start: trace already finished");
            return;
        }
        if self.state.is_playing {
            return;
        }
        self.state.is_playing = true;
        self.schedule_tick();
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
        self.cancel_tick();
    }

    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Moves the cursor forward by one, whether playing or not.
    pub fn step(&mut self) -> Option<PlaybackEvent> {
        if self.at_end() {
            return None;
        }
        self.state.cursor += 1;

        if self.at_end() {
            if self.state.is_playing {
                self.state.is_playing = false;
                self.cancel_tick();
            }
            log::debug!("playback finished after {} steps", self.trace.len());
            return Some(PlaybackEvent::Finished);
        }

        if self.state.is_playing {
            self.schedule_tick();
        }
        Some(PlaybackEvent::Advanced {
            cursor: self.state.cursor,
        })
    }

    pub fn reset(&mut self) {
        self.cancel_tick();
        self.state.cursor = 0;
        self.state.is_playing = false;
    }

    /// Sets the delay between automatic steps, clamped to the configured
    /// range. A pending tick restarts with the new delay.
    pub fn set_speed(&mut self, speed_ms: u64) {
        self.state.speed_ms = self.config.clamp(speed_ms);
        if self.timer.pending().is_some() {
            self.schedule_tick();
        }
    }

    /// Lets `elapsed` pass on the playback clock, firing at most one tick.
    pub fn advance(&mut self, elapsed: Duration) -> Option<PlaybackEvent> {
        let fired = self.timer.advance(elapsed)?;
        log::trace!("advance: tick {:?} fired", fired);
        if !self.state.is_playing {
            return None;
        }
        self.step()
    }

    /// Time until the next automatic step, if one is scheduled.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.trace.step(self.state.cursor)
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn input(&self) -> &MatchInput {
        &self.input
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_playing {
            Phase::Playing
        } else if self.at_end() && !self.trace.is_empty() {
            Phase::Finished
        } else if self.state.cursor == 0 {
            Phase::Idle
        } else {
            Phase::Paused
        }
    }

    /// Offsets whose `Found` step is at or before the cursor.
    pub fn revealed_matches(&self) -> Vec<usize> {
        let end = (self.state.cursor + 1).min(self.trace.len());
        self.trace.steps()[..end]
            .iter()
            .filter_map(|step| match *step {
                Step::Found { offset, .. } => Some(offset),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            step: self.state.cursor,
            total: self.trace.len(),
            matches: self.trace.matches().len(),
        }
    }

    fn at_end(&self) -> bool {
        self.state.cursor >= self.trace.len()
    }

    fn schedule_tick(&mut self) {
        self.timer.schedule(PlaybackConfig::delay(self.state.speed_ms));
    }

    fn cancel_tick(&mut self) {
        if let Some(token) = self.timer.cancel_pending() {
            log::trace!("cancelled tick {:?}", token);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(PlaybackConfig::default(), MatchInput::default())
    }
}
