//! Digital GPIO access

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Input,
    Output,
}

/// Platform GPIO bank
///
/// Implement this trait to support different hardware platforms. Methods
/// take `&self` because GPIO registers are shared between every driver
/// that owns a pin on the bank; implementations use the SIO set/clear
/// registers or equivalent atomic accesses.
pub trait Gpio {
    /// Route `pin` to the GPIO function and set its direction.
    fn configure(&self, pin: u8, direction: PinDirection);

    /// Enable the internal pull-up resistor on `pin`.
    fn set_pull_up(&self, pin: u8);

    /// Current input level, `true` for high.
    fn read_level(&self, pin: u8) -> bool;

    fn write_level(&self, pin: u8, high: bool);
}
