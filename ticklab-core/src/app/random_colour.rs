//! Random RGB LED colour on each button press

use ticklab_hal::gpio::drive_mask;
use ticklab_hal::{InputPin, OutputPin};

use crate::bridge::RequestFlag;
use crate::config::DebounceConfig;
use crate::debounce::{DebounceCell, Edge};
use crate::tick::TickHandler;

/// Seed used at power-on
pub const DEFAULT_SEED: u32 = 123_456_789;

/// Marsaglia xorshift32 generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// A zero seed would get stuck at zero and is replaced by the default
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Pick an LED mask (bit 0 red, bit 1 green, bit 2 blue) that is never all off
pub fn colour_mask(value: u32) -> u8 {
    match (value & 0b111) as u8 {
        0 => 0b001,
        mask => mask,
    }
}

pub struct RandomColourShared {
    pressed: RequestFlag,
}

impl RandomColourShared {
    pub const fn new() -> Self {
        Self {
            pressed: RequestFlag::new(),
        }
    }
}

impl Default for RandomColourShared {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RandomColourTick<'a, I> {
    shared: &'a RandomColourShared,
    button: I,
    cell: DebounceCell,
}

impl<'a, I: InputPin> RandomColourTick<'a, I> {
    pub fn new(shared: &'a RandomColourShared, button: I, debounce: DebounceConfig) -> Self {
        Self {
            shared,
            button,
            cell: DebounceCell::new(false, debounce.threshold_ticks),
        }
    }
}

impl<I: InputPin> TickHandler for RandomColourTick<'_, I> {
    fn on_tick(&mut self) {
        if self.cell.update(self.button.is_high()) == Some(Edge::Rising) {
            self.shared.pressed.raise();
        }
    }
}

pub struct RandomColourMain<'a, P> {
    shared: &'a RandomColourShared,
    led: [P; 3],
    rng: Xorshift32,
}

impl<'a, P: OutputPin> RandomColourMain<'a, P> {
    pub fn new(shared: &'a RandomColourShared, led: [P; 3], rng: Xorshift32) -> Self {
        Self { shared, led, rng }
    }

    /// Returns the new LED mask after a press
    pub fn poll(&mut self) -> Option<u8> {
        if !self.shared.pressed.take() {
            return None;
        }
        let mask = colour_mask(self.rng.next_u32());
        drive_mask(&mut self.led, mask);
        Some(mask)
    }

    pub fn led(&self) -> &[P; 3] {
        &self.led
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::tick::run_ticks;
    use crate::traits::mock::{MockPin, LevelInput};

    #[test]
    fn test_xorshift_sequence() {
        let mut rng = Xorshift32::default();
        let mut reference = DEFAULT_SEED;
        for _ in 0..16 {
            reference ^= reference << 13;
            reference ^= reference >> 17;
            reference ^= reference << 5;
            assert_eq!(rng.next_u32(), reference);
            assert_ne!(reference, 0);
        }
    }

    #[test]
    fn test_colour_never_off() {
        assert_eq!(colour_mask(0), 0b001);
        assert_eq!(colour_mask(8), 0b001);
        assert_eq!(colour_mask(6), 0b110);
        assert_eq!(colour_mask(0xFFFF_FFFF), 0b111);
    }

    #[test]
    fn test_press_changes_led() {
        let shared = RandomColourShared::new();
        let level = Cell::new(false);
        let mut tick =
            RandomColourTick::new(&shared, LevelInput(&level), DebounceConfig::default());
        let mut main = RandomColourMain::new(
            &shared,
            [MockPin::default(), MockPin::default(), MockPin::default()],
            Xorshift32::default(),
        );

        assert_eq!(main.poll(), None);
        level.set(true);
        run_ticks(&mut tick, 10);

        let mut expected = Xorshift32::default();
        let mask = main.poll().unwrap();
        assert_eq!(mask, colour_mask(expected.next_u32()));
        assert_eq!(ticklab_hal::gpio::read_mask(main.led()), mask);
        assert_eq!(main.poll(), None);
    }
}
