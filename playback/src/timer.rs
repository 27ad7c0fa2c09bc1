//! Cancellable one-shot timer driven by elapsed time.
//!
//! The timer has no clock of its own. Whoever owns it reports how much time
//! passed through [`TickTimer::advance`], which makes playback deterministic
//! under test and lets a real-time driver sleep for [`TickTimer::remaining`].

use std::time::Duration;

/// Identifies one scheduled tick. Never reused within a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: TimerToken,
    remaining: Duration,
}

#[derive(Debug, Default)]
pub struct TickTimer {
    next_token: u64,
    pending: Option<Pending>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer, replacing whatever was pending.
    pub fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        if let Some(old) = self.pending.replace(Pending {
            token,
            remaining: delay,
        }) {
            log::trace!("timer: {:?} superseded by {:?}", old.token, token);
        }
        token
    }

    /// Cancels `token` if it is still the pending one.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel_pending(&mut self) -> Option<TimerToken> {
        self.pending.take().map(|p| p.token)
    }

    pub fn pending(&self) -> Option<TimerToken> {
        self.pending.map(|p| p.token)
    }

    /// Time left until the pending tick fires.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|p| p.remaining)
    }

    /// Lets `elapsed` pass. Returns the token of the tick that fired, if any.
    ///
    /// At most one tick fires per call; time past its deadline is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> Option<TimerToken> {
        let pending = self.pending.as_mut()?;
        if elapsed < pending.remaining {
            pending.remaining -= elapsed;
            return None;
        }
        self.pending.take().map(|p| p.token)
    }
}
