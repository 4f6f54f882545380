//! Debounced push button
//!
//! Buttons are wired active-low: the pin is pulled up internally and the
//! switch shorts it to ground, so a press is a falling edge.

use crate::dispatch::{DispatchManager, Handler};
use crate::edge::{EdgeDetector, EdgeMask};
use crate::gpio::{Gpio, PinDirection};

/// Edge that marks a press on a pulled-up input.
pub const PRESS_EDGE: EdgeMask = EdgeMask::EDGE_FALL;

/// One physical button.
///
/// Reading is a plain poll of the pin level and has nothing to do with the
/// debounce state kept by the dispatch manager; the two can disagree for a
/// moment while the contacts settle.
///
/// Two buttons must not be created on the same pin: the second
/// [`attach_callback`](Self::attach_callback) would replace the first
/// button's handler.
pub struct Button<'a, G, E, const MAX_PINS: usize> {
    pin: u8,
    last_state: bool,
    gpio: &'a G,
    manager: &'a DispatchManager<E, MAX_PINS>,
}

impl<'a, G, E, const MAX_PINS: usize> Button<'a, G, E, MAX_PINS>
where
    G: Gpio,
    E: EdgeDetector,
{
    /// Configure `pin` as a pulled-up input and sample its level.
    pub fn new(gpio: &'a G, pin: u8, manager: &'a DispatchManager<E, MAX_PINS>) -> Self {
        gpio.configure(pin, PinDirection::Input);
        gpio.set_pull_up(pin);

        Self {
            pin,
            last_state: !gpio.read_level(pin),
            gpio,
            manager,
        }
    }

    pub const fn pin(&self) -> u8 {
        self.pin
    }

    /// Pressed state seen by the last [`read`](Self::read), or at construction.
    pub const fn last_state(&self) -> bool {
        self.last_state
    }

    /// Returns true while the button is held down.
    pub fn read(&mut self) -> bool {
        self.last_state = !self.gpio.read_level(self.pin);
        self.last_state
    }

    /// Call `handler` from interrupt context on every debounced press.
    ///
    /// Makes sure the dispatch manager is initialized first. Release edges
    /// are not observed.
    pub fn attach_callback(&self, handler: Handler) {
        self.manager.initialize();
        self.manager.register(self.pin, handler, PRESS_EDGE);
    }

    /// Stop delivering press events for this button.
    pub fn detach_callback(&self) {
        self.manager.remove(self.pin, PRESS_EDGE);
    }
}
