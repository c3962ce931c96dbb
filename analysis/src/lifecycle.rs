//! Tracks where the match is in its round lifecycle.
//!
//! The recorded warm-up round must never contribute statistics, so nothing is
//! counted until the match has started and its first round has ended.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundLifecycleState {
    pub match_started: bool,
    pub first_round_ended: bool,
    pub entry_kill_done_this_round: bool,
}

#[derive(Debug, Default)]
pub struct RoundLifecycle {
    state: RoundLifecycleState,
}

impl RoundLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RoundLifecycleState {
        self.state
    }

    pub fn on_match_start(&mut self) {
        self.state.match_started = true;
    }

    pub fn on_round_start(&mut self) {
        self.state.entry_kill_done_this_round = false;
    }

    pub fn on_round_end(&mut self) {
        if self.state.match_started {
            self.state.first_round_ended = true;
        }
    }

    pub fn counting_enabled(&self) -> bool {
        self.state.match_started && self.state.first_round_ended
    }

    /// Returns `true` for the first call after a round started and `false`
    /// for every later call in the same round.
    pub fn consume_entry_kill_flag(&mut self) -> bool {
        !std::mem::replace(&mut self.state.entry_kill_done_this_round, true)
    }
}
