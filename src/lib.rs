#![no_std]

pub mod button;
pub mod buzzer;
pub mod dispatch;
pub mod edge;
pub mod events;
pub mod gpio;
pub mod joystick;
pub mod matrix;
pub mod text;

pub use button::{Button, PRESS_EDGE};
pub use buzzer::{MelodyPlayer, Note, Tone, ToneOutput, beep_pattern};
pub use dispatch::{
    DEFAULT_DEBOUNCE, DEFAULT_MAX_PINS, DispatchConfig, DispatchError, DispatchManager,
    DispatchOutcome, Handler, PinHandler,
};
pub use edge::{EdgeDetector, EdgeMask};
pub use events::{PressForwarder, PressQueue, QueueFull};
pub use gpio::{Gpio, PinDirection};
pub use joystick::{AnalogInput, Direction, Joystick, JoystickConfig, JoystickPins, JoystickState, map_value};
pub use matrix::{Frame, LedMatrix};
pub use text::{Glyph, TextMode, TextScroller, glyph};

pub use embassy_time::{Duration, Instant};
pub use smart_leds::RGB8;
