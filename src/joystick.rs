//! Two-axis analog joystick with push button
//!
//! The axes are read through the 12-bit ADC (0..=4095, rest position near
//! the middle of the range). The stick button is wired active-low like the
//! other buttons on the board.

use core::cmp::Ordering;

use crate::gpio::{Gpio, PinDirection};

/// Full-scale ADC reading.
pub const ADC_MAX: u16 = 4095;

/// ADC reading at rest.
pub const DEFAULT_CENTER: u16 = 2048;

/// Offset from center that still counts as centered.
pub const DEFAULT_DEADZONE: u16 = 500;

/// Platform ADC
pub trait AnalogInput {
    /// Select `channel` and return one conversion.
    fn read_channel(&mut self, channel: u8) -> u16;
}

/// ADC channels and GPIO pin the joystick is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickPins {
    pub x_channel: u8,
    pub y_channel: u8,
    pub button_pin: u8,
}

impl JoystickPins {
    /// BitDogLab wiring: X on ADC1 (GP27), Y on ADC0 (GP26), button on GP22.
    pub const BITDOGLAB: Self = Self {
        x_channel: 1,
        y_channel: 0,
        button_pin: 22,
    };
}

/// Direction classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickConfig {
    pub center: u16,
    pub deadzone: u16,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            deadzone: DEFAULT_DEADZONE,
        }
    }
}

/// Direction the stick is pushed towards. Up is increasing Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Center,
    Up,
    Down,
    Left,
    Right,
    UpRight,
    DownRight,
    UpLeft,
    DownLeft,
}

/// One sample of both axes and the button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoystickState {
    pub x: u16,
    pub y: u16,
    pub button: bool,
}

impl JoystickState {
    /// Classify with the default center and deadzone.
    pub fn direction(&self) -> Direction {
        self.direction_with(&JoystickConfig::default())
    }

    pub fn direction_with(&self, config: &JoystickConfig) -> Direction {
        // A sample sitting exactly on the deadzone edge of either axis is
        // neither inside nor beyond it and reads as centered.
        let (Some(dx), Some(dy)) = (axis_step(self.x, config), axis_step(self.y, config)) else {
            return Direction::Center;
        };

        match (dx, dy) {
            (0, 0) => Direction::Center,
            (1, 0) => Direction::Right,
            (-1, 0) => Direction::Left,
            (0, 1) => Direction::Up,
            (0, -1) => Direction::Down,
            (1, 1) => Direction::UpRight,
            (1, -1) => Direction::DownRight,
            (-1, 1) => Direction::UpLeft,
            _ => Direction::DownLeft,
        }
    }
}

/// -1, 0 or 1 depending on which side of the deadzone `value` falls, or
/// `None` when it lies exactly on the edge.
fn axis_step(value: u16, config: &JoystickConfig) -> Option<i8> {
    let offset = i32::from(value) - i32::from(config.center);
    let deadzone = i32::from(config.deadzone);
    match offset.abs().cmp(&deadzone) {
        Ordering::Less => Some(0),
        Ordering::Equal => None,
        Ordering::Greater => Some(if offset > 0 { 1 } else { -1 }),
    }
}

/// Joystick driver
pub struct Joystick<'a, A, G> {
    adc: A,
    gpio: &'a G,
    pins: JoystickPins,
}

impl<'a, A: AnalogInput, G: Gpio> Joystick<'a, A, G> {
    /// Take the ADC and set the button pin up as a pulled-up input.
    pub fn new(adc: A, gpio: &'a G, pins: JoystickPins) -> Self {
        gpio.configure(pins.button_pin, PinDirection::Input);
        gpio.set_pull_up(pins.button_pin);
        Self { adc, gpio, pins }
    }

    pub fn read(&mut self) -> JoystickState {
        JoystickState {
            x: self.read_x(),
            y: self.read_y(),
            button: self.read_button(),
        }
    }

    pub fn read_x(&mut self) -> u16 {
        self.adc.read_channel(self.pins.x_channel).min(ADC_MAX)
    }

    pub fn read_y(&mut self) -> u16 {
        self.adc.read_channel(self.pins.y_channel).min(ADC_MAX)
    }

    /// Returns true while the stick is pressed in.
    pub fn read_button(&self) -> bool {
        !self.gpio.read_level(self.pins.button_pin)
    }

    /// Release the ADC.
    pub fn into_inner(self) -> A {
        self.adc
    }
}

/// Linearly map `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// `value` is clamped to the input range first. An empty input range maps
/// everything to `out_min`.
pub fn map_value(value: u16, in_min: u16, in_max: u16, out_min: i16, out_max: i16) -> i16 {
    if in_max <= in_min {
        return out_min;
    }
    // Full u16 span times full i16 span does not fit in i32.
    let value = i64::from(value.clamp(in_min, in_max));
    let span_in = i64::from(in_max) - i64::from(in_min);
    let span_out = i64::from(out_max) - i64::from(out_min);
    let mapped = (value - i64::from(in_min)) * span_out / span_in + i64::from(out_min);
    i16::try_from(mapped).unwrap_or(out_max)
}
