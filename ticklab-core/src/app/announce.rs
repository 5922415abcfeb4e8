//! Four buttons announced over the UART
//!
//! The tick half debounces four buttons and posts the id of the most
//! recent press to a mailbox. The main half turns the id into a line of
//! text and queues it for the interrupt-driven transmitter.

use core::fmt::Write;

use heapless::String;
use portable_atomic::{AtomicU32, Ordering};
use ticklab_hal::{ByteTransport, InputPin};

use crate::bridge::{Mailbox, SendReport, TxQueue};
use crate::config::DebounceConfig;
use crate::debounce::{DebounceCell, Edge};
use crate::tick::TickHandler;

/// Transmit queue size
pub const TX_CAPACITY: usize = 128;

/// Ids reported for the four buttons, in pin order
pub const BUTTON_IDS: [u8; 4] = [4, 5, 6, 7];

/// State touched by both contexts
pub struct AnnounceShared<T> {
    pressed: Mailbox<u8>,
    lost_presses: AtomicU32,
    tx: TxQueue<T, TX_CAPACITY>,
}

impl<T: ByteTransport> AnnounceShared<T> {
    pub const fn new(port: T) -> Self {
        Self {
            pressed: Mailbox::new(0),
            lost_presses: AtomicU32::new(0),
            tx: TxQueue::new(port),
        }
    }

    /// Transmitter ready event
    pub fn on_uart_ready(&self) {
        self.tx.on_ready();
    }

    pub fn tx(&self) -> &TxQueue<T, TX_CAPACITY> {
        &self.tx
    }

    /// Presses overwritten in the mailbox before the main loop saw them
    pub fn lost_presses(&self) -> u32 {
        self.lost_presses.load(Ordering::Relaxed)
    }

    fn post_press(&self, id: u8) {
        if self.pressed.post(id) {
            self.lost_presses.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Tick-context half: four debounced buttons
pub struct AnnounceTick<'a, T, I> {
    shared: &'a AnnounceShared<T>,
    buttons: [I; 4],
    cells: [DebounceCell; 4],
}

impl<'a, T: ByteTransport, I: InputPin> AnnounceTick<'a, T, I> {
    pub fn new(shared: &'a AnnounceShared<T>, buttons: [I; 4], debounce: DebounceConfig) -> Self {
        Self {
            shared,
            buttons,
            cells: [DebounceCell::new(false, debounce.threshold_ticks); 4],
        }
    }
}

impl<T: ByteTransport, I: InputPin> TickHandler for AnnounceTick<'_, T, I> {
    fn on_tick(&mut self) {
        for ((button, cell), id) in self.buttons.iter().zip(&mut self.cells).zip(BUTTON_IDS) {
            if cell.update(button.is_high()) == Some(Edge::Rising) {
                // Later buttons in the same tick win
                self.shared.post_press(id);
            }
        }
    }
}

/// Text sent for one press
pub fn announcement(id: u8) -> String<32> {
    let mut line = String::new();
    // 32 bytes fits any u8 id
    let _ = write!(line, "Button C{} Pressed!\r\n", id);
    line
}

/// Main-loop half: formats presses and queues them
pub struct AnnounceMain<'a, T> {
    shared: &'a AnnounceShared<T>,
}

impl<'a, T: ByteTransport> AnnounceMain<'a, T> {
    pub fn new(shared: &'a AnnounceShared<T>) -> Self {
        Self { shared }
    }

    /// Queue an announcement for the latest press, if there was one
    pub fn poll(&mut self) -> Option<(u8, SendReport)> {
        let id = self.shared.pressed.take()?;
        let report = self.shared.tx.send(announcement(id).as_bytes());
        Some((id, report))
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::bridge::transmit::tests::{drain, MockPort};
    use crate::tick::run_ticks;
    use crate::traits::mock::LevelInput;

    #[test]
    fn test_announcement_text() {
        assert_eq!(announcement(4).as_str(), "Button C4 Pressed!\r\n");
        assert_eq!(announcement(7).as_str(), "Button C7 Pressed!\r\n");
    }

    #[test]
    fn test_press_is_sent() {
        let shared = AnnounceShared::new(MockPort::new());
        let levels = [
            Cell::new(false),
            Cell::new(false),
            Cell::new(false),
            Cell::new(false),
        ];
        let buttons = [
            LevelInput(&levels[0]),
            LevelInput(&levels[1]),
            LevelInput(&levels[2]),
            LevelInput(&levels[3]),
        ];
        let mut tick = AnnounceTick::new(&shared, buttons, DebounceConfig::default());
        let mut main = AnnounceMain::new(&shared);

        levels[1].set(true);
        run_ticks(&mut tick, 10);
        let (id, report) = main.poll().unwrap();
        assert_eq!(id, 5);
        assert!(report.is_complete());

        // Holding the button does not repeat
        run_ticks(&mut tick, 100);
        assert_eq!(main.poll(), None);
        assert_eq!(shared.lost_presses(), 0);

        drain(shared.tx());
        shared
            .tx()
            .with_port(|port| assert_eq!(port.written.as_slice(), b"Button C5 Pressed!\r\n"));
    }

    #[test]
    fn test_latest_press_wins() {
        let shared = AnnounceShared::new(MockPort::new());
        let levels = [
            Cell::new(false),
            Cell::new(false),
            Cell::new(false),
            Cell::new(false),
        ];
        let buttons = [
            LevelInput(&levels[0]),
            LevelInput(&levels[1]),
            LevelInput(&levels[2]),
            LevelInput(&levels[3]),
        ];
        let mut tick = AnnounceTick::new(&shared, buttons, DebounceConfig::default());
        let mut main = AnnounceMain::new(&shared);

        levels[0].set(true);
        run_ticks(&mut tick, 10);
        levels[3].set(true);
        run_ticks(&mut tick, 10);

        assert_eq!(main.poll().map(|(id, _)| id), Some(7));
        assert_eq!(main.poll(), None);
        // C4 was overwritten before the main loop polled
        assert_eq!(shared.lost_presses(), 1);
    }

    #[test]
    fn test_full_queue_truncates() {
        let shared = AnnounceShared::new(MockPort::new());
        let levels = [
            Cell::new(false),
            Cell::new(false),
            Cell::new(false),
            Cell::new(false),
        ];
        let buttons = [
            LevelInput(&levels[0]),
            LevelInput(&levels[1]),
            LevelInput(&levels[2]),
            LevelInput(&levels[3]),
        ];
        let mut tick = AnnounceTick::new(&shared, buttons, DebounceConfig::default());
        let mut main = AnnounceMain::new(&shared);

        // 20 bytes per line, 127 usable: the seventh line is cut short
        let mut accepted = 0;
        for _ in 0..7 {
            levels[2].set(true);
            run_ticks(&mut tick, 10);
            levels[2].set(false);
            run_ticks(&mut tick, 10);
            let (_, report) = main.poll().unwrap();
            accepted += report.accepted;
        }
        assert_eq!(accepted, 127);
        assert_eq!(shared.tx().dropped(), 13);
    }
}
