//! 5x5 font and non-blocking text animation for the LED matrix
//!
//! Glyphs are row masks in the [`LedMatrix::draw_mask`] layout: bit 4 of
//! each row is the leftmost pixel.

use embassy_time::{Duration, Instant};
use smart_leds::{RGB8, SmartLedsWrite};

use crate::matrix::{HEIGHT, LedMatrix, WIDTH};

/// One character, top row first.
pub type Glyph = [u8; HEIGHT];

/// How late a tick may run before the schedule restarts from `now`.
pub const MAX_LAG: Duration = Duration::from_millis(50);

/// Multiple of the frame delay the first glyph of a scroll is held for.
pub const LEAD_IN_FRAMES: u32 = 3;

const ROW_MASK: u8 = (1 << WIDTH) - 1;

/// Upper-case letters, digits and space.
pub const FONT: [(char, Glyph); 37] = [
    (' ', [0b00000, 0b00000, 0b00000, 0b00000, 0b00000]),
    ('A', [0b01110, 0b10001, 0b11111, 0b10001, 0b10001]),
    ('B', [0b11110, 0b10001, 0b11110, 0b10001, 0b11110]),
    ('C', [0b01111, 0b10000, 0b10000, 0b10000, 0b01111]),
    ('D', [0b11110, 0b10001, 0b10001, 0b10001, 0b11110]),
    ('E', [0b11111, 0b10000, 0b11110, 0b10000, 0b11111]),
    ('F', [0b11111, 0b10000, 0b11110, 0b10000, 0b10000]),
    ('G', [0b01111, 0b10000, 0b10011, 0b10001, 0b01111]),
    ('H', [0b10001, 0b10001, 0b11111, 0b10001, 0b10001]),
    ('I', [0b11111, 0b00100, 0b00100, 0b00100, 0b11111]),
    ('J', [0b00111, 0b00010, 0b00010, 0b10010, 0b01100]),
    ('K', [0b10010, 0b10100, 0b11000, 0b10100, 0b10010]),
    ('L', [0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
    ('M', [0b10001, 0b11011, 0b10101, 0b10001, 0b10001]),
    ('N', [0b10001, 0b11001, 0b10101, 0b10011, 0b10001]),
    ('O', [0b01110, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('P', [0b11110, 0b10001, 0b11110, 0b10000, 0b10000]),
    ('Q', [0b01110, 0b10001, 0b10101, 0b10010, 0b01101]),
    ('R', [0b11110, 0b10001, 0b11110, 0b10100, 0b10010]),
    ('S', [0b01111, 0b10000, 0b01110, 0b00001, 0b11110]),
    ('T', [0b11111, 0b00100, 0b00100, 0b00100, 0b00100]),
    ('U', [0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
    ('V', [0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
    ('W', [0b10001, 0b10001, 0b10101, 0b11011, 0b10001]),
    ('X', [0b10001, 0b01010, 0b00100, 0b01010, 0b10001]),
    ('Y', [0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
    ('Z', [0b11111, 0b00010, 0b00100, 0b01000, 0b11111]),
    ('0', [0b01110, 0b10011, 0b10101, 0b11001, 0b01110]),
    ('1', [0b00100, 0b01100, 0b00100, 0b00100, 0b01110]),
    ('2', [0b11110, 0b00001, 0b01110, 0b10000, 0b11111]),
    ('3', [0b11110, 0b00001, 0b00110, 0b00001, 0b11110]),
    ('4', [0b10010, 0b10010, 0b11111, 0b00010, 0b00010]),
    ('5', [0b11111, 0b10000, 0b11110, 0b00001, 0b11110]),
    ('6', [0b01110, 0b10000, 0b11110, 0b10001, 0b01110]),
    ('7', [0b11111, 0b00001, 0b00010, 0b00100, 0b00100]),
    ('8', [0b01110, 0b10001, 0b01110, 0b10001, 0b01110]),
    ('9', [0b01110, 0b10001, 0b01111, 0b00001, 0b01110]),
];

/// Look up `c`, ignoring case. `None` for characters the font lacks.
pub fn glyph(c: char) -> Option<Glyph> {
    let c = c.to_ascii_uppercase();
    FONT.iter()
        .find(|(character, _)| *character == c)
        .map(|(_, rows)| *rows)
}

/// Window `offset` columns into `current` followed by `next`.
///
/// Offset 0 is `current` unchanged and offset [`WIDTH`] (or more) is `next`.
pub fn scroll_mask(current: &Glyph, next: &Glyph, offset: usize) -> Glyph {
    let offset = offset.min(WIDTH);
    let mut rows = [0; HEIGHT];
    for (row, (cur, nxt)) in rows.iter_mut().zip(current.iter().zip(next)) {
        let left = u16::from(*cur) << offset;
        let right = u16::from(*nxt) >> (WIDTH - offset);
        *row = u8::try_from((left | right) & u16::from(ROW_MASK)).unwrap_or(0);
    }
    rows
}

impl<W> LedMatrix<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Draw one character. Returns false, leaving the buffer untouched, if
    /// the font has no glyph for `c`.
    pub fn draw_char(&mut self, c: char, color: RGB8) -> bool {
        match glyph(c) {
            Some(rows) => {
                self.draw_mask(&rows, color);
                true
            }
            None => false,
        }
    }

    /// Draw the `n`th displayable character of `text`.
    ///
    /// Characters without a glyph are skipped when counting. Returns false if
    /// `text` has fewer than `n + 1` of them.
    pub fn draw_str(&mut self, text: &str, n: usize, color: RGB8) -> bool {
        match text.chars().filter_map(glyph).nth(n) {
            Some(rows) => {
                self.draw_mask(&rows, color);
                true
            }
            None => false,
        }
    }
}

/// How a [`TextScroller`] moves from one character to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Swap whole characters, each held for one delay.
    Step,
    /// Slide left one column per delay. The first character is held for
    /// [`LEAD_IN_FRAMES`] delays.
    Scroll,
}

/// Non-blocking text display
///
/// Like [`MelodyPlayer`](crate::MelodyPlayer), it never sleeps: each call
/// draws the frame that is due, shows it, and returns when the next one is.
///
/// ```ignore
/// let mut text = TextScroller::new("ROUND 3", GREEN, Duration::from_millis(120));
/// let mut deadline = text.start(Instant::now(), &mut matrix)?;
/// while let Some(next) = deadline {
///     Timer::at(next).await;
///     deadline = text.tick(Instant::now(), &mut matrix)?;
/// }
/// ```
pub struct TextScroller<'t> {
    text: &'t str,
    color: RGB8,
    delay: Duration,
    mode: TextMode,
    frame: usize,
    frame_end: Option<Instant>,
}

impl<'t> TextScroller<'t> {
    /// Scroll `text` one column every `delay`.
    pub const fn new(text: &'t str, color: RGB8, delay: Duration) -> Self {
        Self::with_mode(text, color, delay, TextMode::Scroll)
    }

    /// Show `text` one whole character every `delay`.
    pub const fn letter_by_letter(text: &'t str, color: RGB8, delay: Duration) -> Self {
        Self::with_mode(text, color, delay, TextMode::Step)
    }

    pub const fn with_mode(text: &'t str, color: RGB8, delay: Duration, mode: TextMode) -> Self {
        Self {
            text,
            color,
            delay,
            mode,
            frame: 0,
            frame_end: None,
        }
    }

    pub const fn mode(&self) -> TextMode {
        self.mode
    }

    pub const fn is_running(&self) -> bool {
        self.frame_end.is_some()
    }

    /// Number of frames the whole text takes.
    pub fn frame_count(&self) -> usize {
        let glyphs = self.text.chars().filter_map(glyph).count();
        match self.mode {
            TextMode::Step => glyphs,
            TextMode::Scroll if glyphs == 0 => 0,
            TextMode::Scroll => 1 + (glyphs - 1) * WIDTH,
        }
    }

    /// Glyph index and column offset shown by frame `frame` in scroll mode.
    ///
    /// Frame 0 is the first glyph. After that every glyph takes [`WIDTH`]
    /// frames to slide in, ending fully on screen.
    pub const fn scroll_position(frame: usize) -> (usize, usize) {
        if frame == 0 {
            (0, 0)
        } else {
            ((frame - 1) / WIDTH, (frame - 1) % WIDTH + 1)
        }
    }

    /// Draw and show the first frame. Returns when it ends, or `None` if
    /// `text` has nothing to display.
    pub fn start<W>(&mut self, now: Instant, matrix: &mut LedMatrix<W>) -> Result<Option<Instant>, W::Error>
    where
        W: SmartLedsWrite<Color = RGB8>,
    {
        self.frame = 0;
        self.begin_frame(now, matrix)
    }

    /// Advance the animation.
    ///
    /// Returns the deadline of the frame now on screen, or `None` once the
    /// text is done. The last frame stays in the buffer.
    pub fn tick<W>(&mut self, now: Instant, matrix: &mut LedMatrix<W>) -> Result<Option<Instant>, W::Error>
    where
        W: SmartLedsWrite<Color = RGB8>,
    {
        let Some(frame_end) = self.frame_end else {
            return Ok(None);
        };
        if now < frame_end {
            return Ok(Some(frame_end));
        }

        let start = if now.saturating_duration_since(frame_end) > MAX_LAG {
            now
        } else {
            frame_end
        };

        self.frame += 1;
        self.begin_frame(start, matrix)
    }

    pub fn stop(&mut self) {
        self.frame_end = None;
    }

    fn rows(&self, frame: usize) -> Option<Glyph> {
        let mut glyphs = self.text.chars().filter_map(glyph);
        match self.mode {
            TextMode::Step => glyphs.nth(frame),
            TextMode::Scroll => {
                let (current, offset) = Self::scroll_position(frame);
                let first = glyphs.nth(current)?;
                if offset == 0 {
                    return Some(first);
                }
                let second = glyphs.next()?;
                Some(scroll_mask(&first, &second, offset))
            }
        }
    }

    fn begin_frame<W>(&mut self, start: Instant, matrix: &mut LedMatrix<W>) -> Result<Option<Instant>, W::Error>
    where
        W: SmartLedsWrite<Color = RGB8>,
    {
        let Some(rows) = self.rows(self.frame) else {
            self.frame_end = None;
            return Ok(None);
        };

        matrix.draw_mask(&rows, self.color);
        matrix.show()?;

        let hold = if self.mode == TextMode::Scroll && self.frame == 0 {
            self.delay * LEAD_IN_FRAMES
        } else {
            self.delay
        };
        self.frame_end = Some(start + hold);
        Ok(self.frame_end)
    }
}
