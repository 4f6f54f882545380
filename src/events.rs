//! Press event queue
//!
//! Interrupt handlers should only record that something happened. A
//! [`PressQueue`] carries accepted presses from interrupt context to the main
//! loop, and a [`PressForwarder`] is the [`PinHandler`] that fills it.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::dispatch::PinHandler;

/// Returned when the queue has no room left; carries the rejected pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub u8);

impl core::fmt::Display for QueueFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "press queue full, dropped press on pin {}", self.0)
    }
}

struct Pending<const SIZE: usize> {
    pins: Deque<u8, SIZE>,
    dropped: u32,
}

/// Bounded, interrupt-safe queue of pressed pin numbers.
pub struct PressQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Pending<SIZE>>>,
}

impl<const SIZE: usize> PressQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Pending {
                pins: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Record a press on `pin`.
    ///
    /// A full queue rejects the press and counts it as dropped.
    pub fn push(&self, pin: u8) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut pending = self.inner.borrow(cs).borrow_mut();
            if pending.pins.push_back(pin).is_err() {
                pending.dropped = pending.dropped.saturating_add(1);
                return Err(QueueFull(pin));
            }
            Ok(())
        })
    }

    /// Take the oldest press, if any.
    pub fn pop(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pins.pop_front())
    }

    /// Hand every queued press to `f`, oldest first.
    ///
    /// Presses are taken one at a time so interrupts are never held off
    /// while `f` runs. Returns the number of presses handled.
    pub fn drain(&self, mut f: impl FnMut(u8)) -> usize {
        let mut handled = 0;
        while let Some(pin) = self.pop() {
            f(pin);
            handled += 1;
        }
        handled
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().pins.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Presses rejected because the queue was full.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().dropped)
    }
}

impl<const SIZE: usize> Default for PressQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler that pushes its pin into a [`PressQueue`].
///
/// ```ignore
/// static PRESSES: PressQueue<8> = PressQueue::new();
/// static BUTTON_A: PressForwarder<8> = PressForwarder::new(5, &PRESSES);
///
/// button_a.attach_callback(&BUTTON_A);
/// ```
pub struct PressForwarder<const SIZE: usize> {
    pin: u8,
    queue: &'static PressQueue<SIZE>,
}

impl<const SIZE: usize> PressForwarder<SIZE> {
    pub const fn new(pin: u8, queue: &'static PressQueue<SIZE>) -> Self {
        Self { pin, queue }
    }

    pub const fn pin(&self) -> u8 {
        self.pin
    }
}

impl<const SIZE: usize> PinHandler for PressForwarder<SIZE> {
    fn on_event(&self) {
        // Overflow is already counted by the queue.
        let _ = self.queue.push(self.pin);
    }
}
