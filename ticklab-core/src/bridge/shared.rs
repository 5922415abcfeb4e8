//! Critical-section protected shared state

use core::cell::RefCell;

use critical_section::Mutex;

/// Value shared between the tick context and the main loop
///
/// Every access runs inside `critical_section::with`, so a multi-field
/// read or write can never be observed half-done by the other context.
/// Keep the closures short: interrupts are masked while they run.
///
/// Closures must not access the same `Shared` again (the inner
/// `RefCell` would panic on the nested borrow).
pub struct Shared<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> Shared<T> {
    /// Wrap an initial value
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access to the value
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Replace the value, returning the previous one
    pub fn replace(&self, value: T) -> T {
        self.with(|slot| core::mem::replace(slot, value))
    }
}

impl<T: Copy> Shared<T> {
    /// Copy the value out
    pub fn get(&self) -> T {
        self.with(|slot| *slot)
    }

    /// Overwrite the value
    pub fn set(&self, value: T) {
        self.with(|slot| *slot = value);
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Pair {
        a: u32,
        b: u32,
    }

    #[test]
    fn test_multi_field_update() {
        let shared = Shared::new(Pair { a: 1, b: 2 });
        shared.with(|p| {
            p.a += 10;
            p.b += 20;
        });
        assert_eq!(shared.get(), Pair { a: 11, b: 22 });
    }

    #[test]
    fn test_replace_and_set() {
        let shared = Shared::new(5u32);
        assert_eq!(shared.replace(7), 5);
        shared.set(9);
        assert_eq!(shared.get(), 9);
    }
}
