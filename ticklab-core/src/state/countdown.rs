//! Programmable countdown timer
//!
//! Two buttons: one adds time, one starts or pauses. While running, every
//! `ticks_per_second` ticks take one second off; reaching zero expires
//! the timer. Adding time to an expired timer leaves it paused.

use super::Transition;
use crate::config::CountdownConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    Paused,
    Running,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownTrigger {
    Tick,
    AddTime,
    StartPause,
}

/// Something the display and status LED need to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownOutput {
    Status { state: TimerState, remaining_s: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    state: TimerState,
    remaining_s: u32,
    /// Ticks into the current second
    elapsed_ticks: u32,
    config: CountdownConfig,
}

impl Countdown {
    /// Power-on state: expired with nothing left
    pub fn new(config: CountdownConfig) -> Self {
        Self {
            state: TimerState::Expired,
            remaining_s: 0,
            elapsed_ticks: 0,
            config,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_s(&self) -> u32 {
        self.remaining_s
    }

    pub fn status(&self) -> CountdownOutput {
        CountdownOutput::Status {
            state: self.state,
            remaining_s: self.remaining_s,
        }
    }

    /// Apply one trigger
    pub fn step(self, trigger: CountdownTrigger) -> Transition<Self, CountdownOutput> {
        let mut next = self;
        match trigger {
            CountdownTrigger::Tick => {
                if self.state != TimerState::Running {
                    return Transition::quiet(self);
                }
                next.elapsed_ticks += 1;
                if next.elapsed_ticks < self.config.ticks_per_second {
                    return Transition::quiet(next);
                }
                next.elapsed_ticks = 0;
                next.remaining_s = self.remaining_s.saturating_sub(1);
                if next.remaining_s == 0 {
                    next.state = TimerState::Expired;
                }
            }

            CountdownTrigger::AddTime => {
                next.remaining_s = self.remaining_s.saturating_add(self.config.add_seconds);
                if self.state == TimerState::Expired {
                    next.state = TimerState::Paused;
                    next.elapsed_ticks = 0;
                }
            }

            CountdownTrigger::StartPause => {
                next.state = match self.state {
                    TimerState::Running => TimerState::Paused,
                    _ if self.remaining_s > 0 => TimerState::Running,
                    TimerState::Expired => TimerState::Paused,
                    TimerState::Paused => return Transition::quiet(self),
                };
            }
        }
        Transition::emit(next, next.status())
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(CountdownConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(timer: Countdown, trigger: CountdownTrigger) -> Countdown {
        timer.step(trigger).state
    }

    #[test]
    fn test_add_time_from_expired() {
        let timer = Countdown::default();
        assert_eq!(timer.state(), TimerState::Expired);

        let t = timer.step(CountdownTrigger::AddTime);
        assert_eq!(t.state.state(), TimerState::Paused);
        assert_eq!(t.state.remaining_s(), 5);
        assert_eq!(
            t.outputs.as_slice(),
            &[CountdownOutput::Status {
                state: TimerState::Paused,
                remaining_s: 5
            }]
        );

        let timer = apply(t.state, CountdownTrigger::AddTime);
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.remaining_s(), 10);
    }

    #[test]
    fn test_runs_down_and_expires_once() {
        let mut timer = apply(Countdown::default(), CountdownTrigger::AddTime);
        timer = apply(timer, CountdownTrigger::StartPause);
        assert_eq!(timer.state(), TimerState::Running);

        let mut expirations = 0;
        let mut updates = 0;
        for _ in 0..5000 {
            let t = timer.step(CountdownTrigger::Tick);
            if t.has_outputs() {
                updates += 1;
            }
            if t.state.state() == TimerState::Expired && timer.state() != TimerState::Expired {
                expirations += 1;
            }
            timer = t.state;
        }
        assert_eq!(timer.remaining_s(), 0);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(expirations, 1);
        assert_eq!(updates, 5);

        // Further ticks change nothing
        let t = timer.step(CountdownTrigger::Tick);
        assert!(!t.has_outputs());
    }

    #[test]
    fn test_pause_keeps_partial_second() {
        let mut timer = apply(Countdown::default(), CountdownTrigger::AddTime);
        timer = apply(timer, CountdownTrigger::StartPause);
        for _ in 0..600 {
            timer = apply(timer, CountdownTrigger::Tick);
        }
        timer = apply(timer, CountdownTrigger::StartPause);
        assert_eq!(timer.state(), TimerState::Paused);

        for _ in 0..5000 {
            timer = apply(timer, CountdownTrigger::Tick);
        }
        assert_eq!(timer.remaining_s(), 5);

        timer = apply(timer, CountdownTrigger::StartPause);
        for _ in 0..400 {
            timer = apply(timer, CountdownTrigger::Tick);
        }
        assert_eq!(timer.remaining_s(), 4);
    }

    #[test]
    fn test_start_with_nothing_left() {
        let timer = Countdown::default();
        let t = timer.step(CountdownTrigger::StartPause);
        assert_eq!(t.state.state(), TimerState::Paused);
        assert!(t.has_outputs());

        // Paused at zero stays put without output
        let t = t.state.step(CountdownTrigger::StartPause);
        assert_eq!(t.state.state(), TimerState::Paused);
        assert!(!t.has_outputs());
    }

    #[test]
    fn test_add_time_while_paused_at_zero() {
        let timer = apply(Countdown::default(), CountdownTrigger::StartPause);
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.remaining_s(), 0);

        let t = timer.step(CountdownTrigger::AddTime);
        assert_eq!(t.state.state(), TimerState::Paused);
        assert_eq!(t.state.remaining_s(), 5);
        assert_eq!(
            t.outputs.as_slice(),
            &[CountdownOutput::Status {
                state: TimerState::Paused,
                remaining_s: 5
            }]
        );
    }
}
