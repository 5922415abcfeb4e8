//! Latest-value mailbox

use super::shared::Shared;

#[derive(Clone, Copy)]
struct Slot<T> {
    value: T,
    fresh: bool,
}

/// Single-slot handoff with an "is new" flag
///
/// The producer overwrites the slot and marks it fresh; the consumer
/// copies it out and clears the mark. Payload and flag move together in
/// one critical section, so a wide payload (e.g. a 16-bit ADC result on
/// an 8-bit bus) is never torn.
pub struct Mailbox<T> {
    slot: Shared<Slot<T>>,
}

impl<T: Copy> Mailbox<T> {
    /// Create an empty mailbox holding `initial` as its (stale) payload
    pub const fn new(initial: T) -> Self {
        Self {
            slot: Shared::new(Slot {
                value: initial,
                fresh: false,
            }),
        }
    }

    /// Publish a value
    ///
    /// Returns `true` if an unread value was overwritten.
    pub fn post(&self, value: T) -> bool {
        self.slot.with(|slot| {
            let overwritten = slot.fresh;
            slot.value = value;
            slot.fresh = true;
            overwritten
        })
    }

    /// Take the value if it has not been read since the last `post`
    pub fn take(&self) -> Option<T> {
        self.slot.with(|slot| {
            if slot.fresh {
                slot.fresh = false;
                Some(slot.value)
            } else {
                None
            }
        })
    }

    /// Last posted value, fresh or not
    pub fn latest(&self) -> T {
        self.slot.with(|slot| slot.value)
    }

    /// Whether an unread value is waiting
    pub fn is_fresh(&self) -> bool {
        self.slot.with(|slot| slot.fresh)
    }
}
