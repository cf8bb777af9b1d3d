// SPDX-License-Identifier: GPL-3.0-only

//! Photo countdown state machine
//!
//! ```text
//! Three ─1s─▶ Two ─1s─▶ One ─1s─▶ Done (capture)
//! ```
//!
//! The machine only counts ticks; the caller schedules one tick per
//! [`COUNTDOWN_STEP_MS`](crate::constants::timing::COUNTDOWN_STEP_MS).

use crate::constants::timing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Three,
    Two,
    One,
    Done,
}

impl CountdownState {
    /// State that shows `remaining`; anything outside 1..=3 is `Done`
    pub fn from_remaining(remaining: u32) -> Self {
        match remaining {
            3 => CountdownState::Three,
            2 => CountdownState::Two,
            1 => CountdownState::One,
            _ => CountdownState::Done,
        }
    }

    fn next(self) -> Self {
        match self {
            CountdownState::Three => CountdownState::Two,
            CountdownState::Two => CountdownState::One,
            CountdownState::One | CountdownState::Done => CountdownState::Done,
        }
    }

    /// Number shown in the overlay, 0 once done
    pub fn remaining(self) -> u32 {
        match self {
            CountdownState::Three => 3,
            CountdownState::Two => 2,
            CountdownState::One => 1,
            CountdownState::Done => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    state: CountdownState,
    elapsed_ticks: u32,
}

impl Countdown {
    /// Start at [`COUNTDOWN_START`](timing::COUNTDOWN_START)
    pub fn start() -> Self {
        Self {
            state: CountdownState::from_remaining(timing::COUNTDOWN_START),
            elapsed_ticks: 0,
        }
    }

    /// Advance by one step; `Done` is terminal
    pub fn tick(&mut self) -> CountdownState {
        if self.state != CountdownState::Done {
            self.state = self.state.next();
            self.elapsed_ticks += 1;
        }
        self.state
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.state.remaining()
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn is_done(&self) -> bool {
        self.state == CountdownState::Done
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_transitions_to_done() {
        let mut countdown = Countdown::start();
        assert_eq!(countdown.remaining(), 3);

        assert_eq!(countdown.tick(), CountdownState::Two);
        assert_eq!(countdown.tick(), CountdownState::One);
        assert!(!countdown.is_done());
        assert_eq!(countdown.tick(), CountdownState::Done);

        assert!(countdown.is_done());
        assert_eq!(countdown.elapsed_ticks(), 3);
    }

    #[test]
    fn test_starts_at_configured_value() {
        assert_eq!(Countdown::start().remaining(), timing::COUNTDOWN_START);
        for state in [
            CountdownState::Three,
            CountdownState::Two,
            CountdownState::One,
            CountdownState::Done,
        ] {
            assert_eq!(CountdownState::from_remaining(state.remaining()), state);
        }
    }

    #[test]
    fn test_done_is_terminal() {
        let mut countdown = Countdown::start();
        for _ in 0..10 {
            countdown.tick();
        }
        assert_eq!(countdown.state(), CountdownState::Done);
        assert_eq!(countdown.elapsed_ticks(), 3);
        assert_eq!(countdown.remaining(), 0);
    }
}
