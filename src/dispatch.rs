//! GPIO interrupt dispatch
//!
//! A single [`DispatchManager`] owns the per-pin handler table and the
//! debounce clock. The platform interrupt vector forwards every pin event to
//! [`DispatchManager::dispatch`], which filters contact bounce and calls the
//! registered handler for that pin.
//!
//! All table access happens inside a critical section, so the manager can
//! live in a `static` shared between the main loop and interrupt context.
//! Handlers themselves run after the critical section is released and may
//! call back into the manager.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::edge::{EdgeDetector, EdgeMask};

/// Number of user GPIO pins on the RP2040.
pub const DEFAULT_MAX_PINS: usize = 30;

/// Minimum spacing between two accepted events on the same pin.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Something that can be invoked when a pin event is accepted.
///
/// Handlers run in interrupt context and must return quickly without
/// blocking. Plain functions and non-capturing closures implement this
/// trait automatically.
pub trait PinHandler: Sync {
    fn on_event(&self);
}

impl<F: Fn() + Sync> PinHandler for F {
    fn on_event(&self) {
        self();
    }
}

/// Handler reference stored in the dispatch table.
pub type Handler = &'static dyn PinHandler;

/// Configuration for the dispatch manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Events closer than this to the last accepted event are dropped
    pub debounce: Duration,
}

impl DispatchConfig {
    pub const fn new() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub const fn with_debounce(debounce: Duration) -> Self {
        Self { debounce }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Error returned by the checked table operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Pin index is not below the table capacity
    PinOutOfRange(u8),
}

impl core::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DispatchError::PinOutOfRange(pin) => {
                write!(f, "pin {pin} is outside the dispatch table")
            }
        }
    }
}

/// What happened to a single dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Pin out of range or nothing registered for it
    Ignored,
    /// Event arrived inside the debounce window and was dropped
    Debounced,
    /// Handler was invoked
    Delivered,
}

impl DispatchOutcome {
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

struct PinTable<E, const MAX_PINS: usize> {
    detector: E,
    initialized: bool,
    handlers: [Option<Handler>; MAX_PINS],
    last_event: [Instant; MAX_PINS],
}

/// Demultiplexes GPIO interrupt events to per-pin handlers.
///
/// `MAX_PINS` bounds the table; every operation treats a pin at or above it
/// as a no-op.
///
/// # Usage
///
/// ```ignore
/// static DISPATCH: DispatchManager<BankIrq> = DispatchManager::new(BankIrq::new());
///
/// #[interrupt]
/// fn IO_IRQ_BANK0() {
///     while let Some((pin, events)) = BankIrq::take_pending() {
///         DISPATCH.dispatch(pin, events);
///     }
/// }
/// ```
pub struct DispatchManager<E, const MAX_PINS: usize = DEFAULT_MAX_PINS> {
    config: DispatchConfig,
    table: Mutex<RefCell<PinTable<E, MAX_PINS>>>,
}

impl<E: EdgeDetector, const MAX_PINS: usize> DispatchManager<E, MAX_PINS> {
    /// Create a manager with the default 200 ms debounce window.
    pub const fn new(detector: E) -> Self {
        Self::with_config(detector, DispatchConfig::new())
    }

    /// Create a manager with a custom configuration.
    pub const fn with_config(detector: E, config: DispatchConfig) -> Self {
        Self {
            config,
            table: Mutex::new(RefCell::new(PinTable {
                detector,
                initialized: false,
                handlers: [None; MAX_PINS],
                last_event: [Instant::from_ticks(0); MAX_PINS],
            })),
        }
    }

    pub const fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Number of pins the table can hold.
    pub const fn capacity(&self) -> usize {
        MAX_PINS
    }

    /// Enable the GPIO interrupt line.
    ///
    /// Safe to call any number of times: only the first call touches the
    /// hardware, and registered handlers are never reset.
    pub fn initialize(&self) {
        critical_section::with(|cs| {
            let mut table = self.table.borrow(cs).borrow_mut();
            if table.initialized {
                return;
            }
            table.detector.enable_interrupt_line(true);
            table.initialized = true;

            #[cfg(feature = "esp32-log")]
            println!("[dispatch] interrupt line enabled ({} pins)", MAX_PINS);
        });
    }

    pub fn is_initialized(&self) -> bool {
        critical_section::with(|cs| self.table.borrow(cs).borrow().initialized)
    }

    /// Register `handler` for `pin` and arm `events` on it.
    ///
    /// Replaces any previous handler for the pin. Out-of-range pins are
    /// ignored.
    pub fn register(&self, pin: u8, handler: Handler, events: EdgeMask) {
        let _ = self.try_register(pin, handler, events);
    }

    /// Like [`register`](Self::register), but reports an out-of-range pin.
    pub fn try_register(
        &self,
        pin: u8,
        handler: Handler,
        events: EdgeMask,
    ) -> Result<(), DispatchError> {
        let index = Self::slot(pin)?;
        critical_section::with(|cs| {
            let mut table = self.table.borrow(cs).borrow_mut();
            table.handlers[index] = Some(handler);
            table.detector.set_trigger_enabled(pin, events, true);
        });

        #[cfg(feature = "esp32-log")]
        println!("[dispatch] handler registered on pin {} (events {:#x})", pin, events.bits());

        Ok(())
    }

    /// Clear the handler for `pin` and disarm `events` on it.
    ///
    /// An interrupt that was already latched before this call may still
    /// deliver once. Out-of-range pins are ignored.
    pub fn remove(&self, pin: u8, events: EdgeMask) {
        let _ = self.try_remove(pin, events);
    }

    /// Like [`remove`](Self::remove), but reports an out-of-range pin.
    pub fn try_remove(&self, pin: u8, events: EdgeMask) -> Result<(), DispatchError> {
        let index = Self::slot(pin)?;
        critical_section::with(|cs| {
            let mut table = self.table.borrow(cs).borrow_mut();
            table.handlers[index] = None;
            table.detector.set_trigger_enabled(pin, events, false);
        });

        #[cfg(feature = "esp32-log")]
        println!("[dispatch] handler removed from pin {}", pin);

        Ok(())
    }

    /// Returns true if a handler is registered for `pin`.
    pub fn is_registered(&self, pin: u8) -> bool {
        let Ok(index) = Self::slot(pin) else {
            return false;
        };
        critical_section::with(|cs| self.table.borrow(cs).borrow().handlers[index].is_some())
    }

    /// Timestamp of the last accepted event on `pin`.
    pub fn last_event(&self, pin: u8) -> Option<Instant> {
        let index = Self::slot(pin).ok()?;
        Some(critical_section::with(|cs| {
            self.table.borrow(cs).borrow().last_event[index]
        }))
    }

    /// Interrupt entry point, stamped with the current time.
    pub fn dispatch(&self, pin: u8, events: EdgeMask) -> DispatchOutcome {
        self.dispatch_at(pin, events, Instant::now())
    }

    /// Interrupt entry point with an explicit timestamp.
    ///
    /// The handler runs synchronously on the caller's stack once the event
    /// passes the debounce filter. A dropped event leaves the debounce
    /// clock untouched.
    pub fn dispatch_at(&self, pin: u8, _events: EdgeMask, now: Instant) -> DispatchOutcome {
        let Ok(index) = Self::slot(pin) else {
            return DispatchOutcome::Ignored;
        };

        let accepted = critical_section::with(|cs| {
            let mut table = self.table.borrow(cs).borrow_mut();
            let handler = table.handlers[index]?;

            let elapsed = now.saturating_duration_since(table.last_event[index]);
            if elapsed <= self.config.debounce {
                return Some(Err(()));
            }

            table.last_event[index] = now;
            Some(Ok(handler))
        });

        match accepted {
            None => DispatchOutcome::Ignored,
            Some(Err(())) => DispatchOutcome::Debounced,
            Some(Ok(handler)) => {
                handler.on_event();
                DispatchOutcome::Delivered
            }
        }
    }

    fn slot(pin: u8) -> Result<usize, DispatchError> {
        let index = usize::from(pin);
        if index < MAX_PINS {
            Ok(index)
        } else {
            Err(DispatchError::PinOutOfRange(pin))
        }
    }
}
