//! Programmable countdown timer with LCD and status LED
//!
//! Buttons: add five seconds, start/pause. The RGB status LED shows red
//! while paused, green while running and blue once expired.

use ticklab_hal::gpio::drive_mask;
use ticklab_hal::{InputPin, OutputPin};

use crate::bridge::{RequestFlag, Shared};
use crate::config::{CountdownConfig, DebounceConfig};
use crate::debounce::{DebounceCell, Edge};
use crate::state::{Countdown, CountdownOutput, CountdownTrigger, TimerState};
use crate::text::{fit_line, format_line, LcdLine};
use crate::tick::TickHandler;
use crate::traits::{FrameCache, TextDisplay};

/// State touched by both contexts
pub struct CountdownShared {
    timer: Shared<Countdown>,
    add: RequestFlag,
    start_pause: RequestFlag,
    status_changed: RequestFlag,
}

impl CountdownShared {
    pub fn new(config: CountdownConfig) -> Self {
        Self {
            timer: Shared::new(Countdown::new(config)),
            add: RequestFlag::new(),
            start_pause: RequestFlag::new(),
            status_changed: RequestFlag::new(),
        }
    }

    pub fn snapshot(&self) -> Countdown {
        self.timer.get()
    }

    /// Button edges lost because the previous one was still pending
    pub fn overruns(&self) -> u32 {
        u32::from(self.add.overruns()) + u32::from(self.start_pause.overruns())
    }

    fn apply(&self, trigger: CountdownTrigger) -> Option<CountdownOutput> {
        self.timer.with(|timer| {
            let transition = timer.step(trigger);
            *timer = transition.state;
            transition.outputs.first().copied()
        })
    }
}

/// Tick-context half: buttons and the running second counter
pub struct CountdownTick<'a, I> {
    shared: &'a CountdownShared,
    add_button: I,
    start_button: I,
    add_cell: DebounceCell,
    start_cell: DebounceCell,
}

impl<'a, I: InputPin> CountdownTick<'a, I> {
    pub fn new(
        shared: &'a CountdownShared,
        add_button: I,
        start_button: I,
        debounce: DebounceConfig,
    ) -> Self {
        Self {
            shared,
            add_button,
            start_button,
            add_cell: DebounceCell::new(false, debounce.threshold_ticks),
            start_cell: DebounceCell::new(false, debounce.threshold_ticks),
        }
    }
}

impl<I: InputPin> TickHandler for CountdownTick<'_, I> {
    fn on_tick(&mut self) {
        let add = self.add_cell.update(self.add_button.is_high());
        let start = self.start_cell.update(self.start_button.is_high());

        if add == Some(Edge::Rising) {
            self.shared.add.raise();
        }
        if start == Some(Edge::Rising) {
            self.shared.start_pause.raise();
        }

        if self.shared.apply(CountdownTrigger::Tick).is_some() {
            self.shared.status_changed.raise();
        }
    }
}

/// The two display rows for a timer status
pub fn status_lines(state: TimerState, remaining_s: u32) -> [LcdLine; 2] {
    let headline = match state {
        TimerState::Paused => "     PAUSED     ",
        TimerState::Running => "    RUNNING     ",
        TimerState::Expired => "    EXPIRED     ",
    };
    let detail = match state {
        TimerState::Expired => fit_line("0s  GOOD JOB!   "),
        _ => format_line(format_args!("{} seconds left", remaining_s)),
    };
    [fit_line(headline), detail]
}

/// RGB LED mask for a timer state (bit 0 red, bit 1 green, bit 2 blue)
pub fn status_led(state: TimerState) -> u8 {
    match state {
        TimerState::Paused => 0b001,
        TimerState::Running => 0b010,
        TimerState::Expired => 0b100,
    }
}

/// Main-loop half: requests, LCD and status LED
pub struct CountdownMain<'a, P, D> {
    shared: &'a CountdownShared,
    led: [P; 3],
    display: D,
    frame: FrameCache<16, 2>,
}

impl<'a, P: OutputPin, D: TextDisplay> CountdownMain<'a, P, D> {
    pub fn new(shared: &'a CountdownShared, led: [P; 3], display: D) -> Self {
        Self {
            shared,
            led,
            display,
            frame: FrameCache::new(),
        }
    }

    /// Clear the display and show the power-on status
    pub fn init(&mut self) -> Result<(), D::Error> {
        self.frame.clear(&mut self.display)?;
        let CountdownOutput::Status { state, remaining_s } = self.shared.snapshot().status();
        self.render(state, remaining_s)
    }

    /// Handle pending requests and status changes
    ///
    /// Returns the status that was rendered, if any.
    pub fn poll(&mut self) -> Result<Option<TimerState>, D::Error> {
        let mut status = None;

        if self.shared.start_pause.take() {
            status = self.shared.apply(CountdownTrigger::StartPause).or(status);
        }
        if self.shared.add.take() {
            status = self.shared.apply(CountdownTrigger::AddTime).or(status);
        }
        if self.shared.status_changed.take() {
            status = Some(self.shared.snapshot().status());
        }

        // Render the latest state, not the first output seen
        if status.is_none() {
            return Ok(None);
        }
        let CountdownOutput::Status { state, remaining_s } = self.shared.snapshot().status();
        self.render(state, remaining_s)?;
        Ok(Some(state))
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn led(&self) -> &[P; 3] {
        &self.led
    }

    fn render(&mut self, state: TimerState, remaining_s: u32) -> Result<(), D::Error> {
        drive_mask(&mut self.led, status_led(state));
        let [top, bottom] = status_lines(state, remaining_s);
        self.frame.write_row(&mut self.display, 0, &top)?;
        self.frame.write_row(&mut self.display, 1, &bottom)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::tick::run_ticks;
    use crate::traits::mock::{MockDisplay, MockPin, LevelInput};

    type Main<'a> = CountdownMain<'a, MockPin, MockDisplay>;

    fn led_mask(main: &Main<'_>) -> u8 {
        ticklab_hal::gpio::read_mask(main.led())
    }

    fn press(tick: &mut CountdownTick<'_, LevelInput<'_>>, level: &Cell<bool>) {
        level.set(true);
        run_ticks(tick, 10);
        level.set(false);
        run_ticks(tick, 10);
    }

    #[test]
    fn test_status_lines() {
        let [top, bottom] = status_lines(TimerState::Paused, 5);
        assert_eq!(top.as_str(), "     PAUSED     ");
        assert_eq!(bottom.as_str(), "5 seconds left");

        let [top, bottom] = status_lines(TimerState::Expired, 0);
        assert_eq!(top.as_str(), "    EXPIRED     ");
        assert_eq!(bottom.as_str(), "0s  GOOD JOB!   ");
    }

    #[test]
    fn test_add_start_and_expire() {
        let shared = CountdownShared::new(CountdownConfig::default());
        let add = Cell::new(false);
        let start = Cell::new(false);
        let mut tick = CountdownTick::new(
            &shared,
            LevelInput(&add),
            LevelInput(&start),
            DebounceConfig::default(),
        );
        let mut main: Main<'_> = CountdownMain::new(
            &shared,
            [MockPin::default(), MockPin::default(), MockPin::default()],
            MockDisplay::default(),
        );
        main.init().unwrap();
        assert_eq!(led_mask(&main), 0b100);
        assert_eq!(main.display().row(0), "    EXPIRED     ");

        press(&mut tick, &add);
        assert_eq!(main.poll().unwrap(), Some(TimerState::Paused));
        assert_eq!(led_mask(&main), 0b001);
        assert_eq!(main.display().row(1), "5 seconds left  ");

        press(&mut tick, &start);
        assert_eq!(main.poll().unwrap(), Some(TimerState::Running));
        assert_eq!(led_mask(&main), 0b010);

        run_ticks(&mut tick, 1000);
        assert_eq!(main.poll().unwrap(), Some(TimerState::Running));
        assert_eq!(main.display().row(1), "4 seconds left  ");

        run_ticks(&mut tick, 4000);
        assert_eq!(main.poll().unwrap(), Some(TimerState::Expired));
        assert_eq!(led_mask(&main), 0b100);
        assert_eq!(main.display().row(1), "0s  GOOD JOB!   ");

        assert_eq!(main.poll().unwrap(), None);
    }

    #[test]
    fn test_unchanged_status_is_not_redrawn() {
        let shared = CountdownShared::new(CountdownConfig::default());
        let add = Cell::new(false);
        let start = Cell::new(false);
        let mut tick = CountdownTick::new(
            &shared,
            LevelInput(&add),
            LevelInput(&start),
            DebounceConfig::default(),
        );
        let mut main: Main<'_> = CountdownMain::new(
            &shared,
            [MockPin::default(), MockPin::default(), MockPin::default()],
            MockDisplay::default(),
        );
        main.init().unwrap();
        let writes = main.display().writes;

        press(&mut tick, &add);
        main.poll().unwrap();
        let after_add = main.display().writes;
        assert!(after_add > writes);

        // Paused: time passes without a status change
        run_ticks(&mut tick, 3000);
        assert_eq!(main.poll().unwrap(), None);
        assert_eq!(main.display().writes, after_add);
    }
}
