//! Buzzer tones and melody playback
//!
//! Playback is non-blocking: [`MelodyPlayer::tick`] switches the output to
//! the current step and returns the instant at which it wants to be called
//! again. The caller is responsible for sleeping in between.

use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Pause inserted after each beep by [`beep_pattern`].
pub const BEEP_GAP: Duration = Duration::from_millis(500);

/// If a tick arrives later than this after a step should have ended, the
/// next step starts from the tick instead of the missed deadline.
pub const MAX_LAG: Duration = Duration::from_millis(50);

/// Square-wave tone generator (typically a PWM slice at 50% duty)
pub trait ToneOutput {
    fn start_tone(&mut self, frequency_hz: u32);
    fn stop_tone(&mut self);
}

/// Equal-tempered note, stored as a MIDI note number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Note(pub u8);

impl Note {
    pub const A3: Note = Note(57);
    pub const C4: Note = Note(60);
    pub const D4: Note = Note(62);
    pub const E4: Note = Note(64);
    pub const F4: Note = Note(65);
    pub const G4: Note = Note(67);
    pub const A4: Note = Note(69);
    pub const B4: Note = Note(71);
    pub const C5: Note = Note(72);
    pub const D5: Note = Note(74);
    pub const E5: Note = Note(76);

    /// Frequency in hertz, rounded, with A4 tuned to 440 Hz.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frequency(self) -> u32 {
        let semitones = f32::from(self.0) - 69.0;
        libm::roundf(440.0 * libm::powf(2.0, semitones / 12.0)) as u32
    }

    pub fn tone(self, duration: Duration) -> Tone {
        Tone::new(self.frequency(), duration)
    }
}

/// One melody step. A zero frequency is a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration: Duration) -> Self {
        Self {
            frequency_hz,
            duration,
        }
    }

    pub const fn rest(duration: Duration) -> Self {
        Self::new(0, duration)
    }

    pub const fn is_rest(&self) -> bool {
        self.frequency_hz == 0
    }
}

/// Build `repetitions` beeps, each followed by [`BEEP_GAP`] of silence.
///
/// Stops early if `N` cannot hold the whole pattern.
pub fn beep_pattern<const N: usize>(
    frequency_hz: u32,
    duration: Duration,
    repetitions: usize,
) -> Vec<Tone, N> {
    let mut steps = Vec::new();
    for _ in 0..repetitions {
        if steps.push(Tone::new(frequency_hz, duration)).is_err()
            || steps.push(Tone::rest(BEEP_GAP)).is_err()
        {
            break;
        }
    }
    steps
}

/// Plays a melody on a [`ToneOutput`] without blocking.
///
/// # Usage
///
/// ```ignore
/// let mut player = MelodyPlayer::new(&MELODY);
/// let mut deadline = player.start(Instant::now(), &mut buzzer);
/// while let Some(next) = deadline {
///     Timer::at(next).await;
///     deadline = player.tick(Instant::now(), &mut buzzer);
/// }
/// ```
pub struct MelodyPlayer<'m> {
    melody: &'m [Tone],
    index: usize,
    step_end: Option<Instant>,
}

impl<'m> MelodyPlayer<'m> {
    pub const fn new(melody: &'m [Tone]) -> Self {
        Self {
            melody,
            index: 0,
            step_end: None,
        }
    }

    pub const fn is_playing(&self) -> bool {
        self.step_end.is_some()
    }

    /// Index of the step currently sounding.
    pub fn position(&self) -> Option<usize> {
        self.step_end.map(|_| self.index)
    }

    /// Start from the first step. Returns when the first step ends, or
    /// `None` for an empty melody.
    pub fn start<O: ToneOutput>(&mut self, now: Instant, output: &mut O) -> Option<Instant> {
        self.index = 0;
        self.begin_step(now, output)
    }

    /// Advance playback.
    ///
    /// Returns the deadline of the step now sounding, or `None` once the
    /// melody has finished (the output is silenced at that point).
    pub fn tick<O: ToneOutput>(&mut self, now: Instant, output: &mut O) -> Option<Instant> {
        let step_end = self.step_end?;
        if now < step_end {
            return Some(step_end);
        }

        let start = if now.saturating_duration_since(step_end) > MAX_LAG {
            now
        } else {
            step_end
        };

        self.index += 1;
        self.begin_step(start, output)
    }

    /// Silence the output and forget the current position.
    pub fn stop<O: ToneOutput>(&mut self, output: &mut O) {
        output.stop_tone();
        self.step_end = None;
    }

    fn begin_step<O: ToneOutput>(&mut self, start: Instant, output: &mut O) -> Option<Instant> {
        let Some(step) = self.melody.get(self.index) else {
            self.stop(output);
            return None;
        };

        if step.is_rest() {
            output.stop_tone();
        } else {
            output.start_tone(step.frequency_hz);
        }

        self.step_end = Some(start + step.duration);
        self.step_end
    }
}
