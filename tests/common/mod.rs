//! Host-side stand-ins for the board peripherals

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use pico_peripheral_kit::joystick::AnalogInput;
use pico_peripheral_kit::{EdgeDetector, EdgeMask, Gpio, PinDirection, RGB8, ToneOutput};
use smart_leds::SmartLedsWrite;

/// GPIO bank with settable input levels. Pins float high.
pub struct MockGpio {
    levels: RefCell<[bool; 32]>,
    pull_ups: Cell<u32>,
    inputs: Cell<u32>,
}

impl MockGpio {
    pub fn new() -> Self {
        Self {
            levels: RefCell::new([true; 32]),
            pull_ups: Cell::new(0),
            inputs: Cell::new(0),
        }
    }

    pub fn set_level(&self, pin: u8, high: bool) {
        self.levels.borrow_mut()[pin as usize] = high;
    }

    pub fn has_pull_up(&self, pin: u8) -> bool {
        self.pull_ups.get() & (1 << pin) != 0
    }

    pub fn is_input(&self, pin: u8) -> bool {
        self.inputs.get() & (1 << pin) != 0
    }
}

impl Gpio for MockGpio {
    fn configure(&self, pin: u8, direction: PinDirection) {
        let mask = 1 << pin;
        match direction {
            PinDirection::Input => self.inputs.set(self.inputs.get() | mask),
            PinDirection::Output => self.inputs.set(self.inputs.get() & !mask),
        }
    }

    fn set_pull_up(&self, pin: u8) {
        self.pull_ups.set(self.pull_ups.get() | (1 << pin));
    }

    fn read_level(&self, pin: u8) -> bool {
        self.levels.borrow()[pin as usize]
    }

    fn write_level(&self, pin: u8, high: bool) {
        self.set_level(pin, high);
    }
}

/// Everything the dispatch manager asked the edge hardware to do
#[derive(Default)]
pub struct EdgeLog {
    pub triggers: RefCell<Vec<(u8, EdgeMask, bool)>>,
    pub line_enables: Cell<u32>,
}

pub struct RecordingEdges<'a>(pub &'a EdgeLog);

impl EdgeDetector for RecordingEdges<'_> {
    fn set_trigger_enabled(&mut self, pin: u8, events: EdgeMask, enabled: bool) {
        self.0.triggers.borrow_mut().push((pin, events, enabled));
    }

    fn enable_interrupt_line(&mut self, enabled: bool) {
        if enabled {
            self.0.line_enables.set(self.0.line_enables.get() + 1);
        }
    }
}

/// Edge hardware that does nothing, for managers kept in statics.
pub struct NoEdges;

impl EdgeDetector for NoEdges {
    fn set_trigger_enabled(&mut self, _pin: u8, _events: EdgeMask, _enabled: bool) {}

    fn enable_interrupt_line(&mut self, _enabled: bool) {}
}

/// ADC returning fixed per-channel readings
pub struct MockAdc {
    pub channels: [u16; 4],
    pub selected: Vec<u8>,
}

impl MockAdc {
    pub fn new(channels: [u16; 4]) -> Self {
        Self {
            channels,
            selected: Vec::new(),
        }
    }
}

impl AnalogInput for MockAdc {
    fn read_channel(&mut self, channel: u8) -> u16 {
        self.selected.push(channel);
        self.channels[channel as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerEvent {
    Start(u32),
    Stop,
}

#[derive(Default)]
pub struct MockBuzzer {
    pub events: Vec<BuzzerEvent>,
}

impl ToneOutput for MockBuzzer {
    fn start_tone(&mut self, frequency_hz: u32) {
        self.events.push(BuzzerEvent::Start(frequency_hz));
    }

    fn stop_tone(&mut self) {
        self.events.push(BuzzerEvent::Stop);
    }
}

/// LED strip keeping every written frame
#[derive(Default)]
pub struct MockStrip {
    pub frames: Vec<Vec<RGB8>>,
    pub fail: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct StripError;

impl SmartLedsWrite for MockStrip {
    type Error = StripError;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.fail {
            return Err(StripError);
        }
        self.frames.push(iterator.into_iter().map(Into::into).collect());
        Ok(())
    }
}
