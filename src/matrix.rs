//! 5x5 addressable RGB LED matrix
//!
//! The LEDs form a single serpentine chain that starts at the bottom-right
//! corner, so logical coordinates (origin top-left, `y` growing downwards)
//! are remapped before the buffer is written out. The wire protocol itself
//! is left to any [`SmartLedsWrite`] driver.

use smart_leds::{RGB8, SmartLedsWrite};

pub const WIDTH: usize = 5;
pub const HEIGHT: usize = 5;
pub const LED_COUNT: usize = WIDTH * HEIGHT;

/// A full image, indexed `[y][x]`.
pub type Frame = [[RGB8; WIDTH]; HEIGHT];

/// Chain position of the LED at (`x`, `y`).
///
/// Even rows run one way along the chain and odd rows the other.
/// Returns `None` outside the matrix.
pub const fn index(x: usize, y: usize) -> Option<usize> {
    if x >= WIDTH || y >= HEIGHT {
        return None;
    }
    let column = if y % 2 == 0 { x } else { WIDTH - 1 - x };
    Some(LED_COUNT - 1 - (y * WIDTH + column))
}

/// Frame buffer bound to an LED driver
pub struct LedMatrix<W> {
    driver: W,
    pixels: [RGB8; LED_COUNT],
}

impl<W> LedMatrix<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Create a matrix with every LED off. Nothing is sent until [`show`](Self::show).
    pub fn new(driver: W) -> Self {
        Self {
            driver,
            pixels: [RGB8::default(); LED_COUNT],
        }
    }

    /// Set one pixel. Returns false if the coordinates are outside the matrix.
    pub fn set(&mut self, x: usize, y: usize, color: RGB8) -> bool {
        match index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    /// Set a pixel by chain position.
    pub fn set_index(&mut self, i: usize, color: RGB8) -> bool {
        match self.pixels.get_mut(i) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<RGB8> {
        index(x, y).map(|i| self.pixels[i])
    }

    pub fn fill(&mut self, color: RGB8) {
        self.pixels = [color; LED_COUNT];
    }

    pub fn clear(&mut self) {
        self.fill(RGB8::default());
    }

    /// Fill a rectangle, clipped to the matrix.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: RGB8) {
        let x_end = x.saturating_add(width).min(WIDTH);
        let y_end = y.saturating_add(height).min(HEIGHT);
        for row in y..y_end {
            for column in x..x_end {
                self.set(column, row, color);
            }
        }
    }

    /// Copy a whole frame into the buffer.
    pub fn set_frame(&mut self, frame: &Frame) {
        for (y, row) in frame.iter().enumerate() {
            for (x, color) in row.iter().enumerate() {
                self.set(x, y, *color);
            }
        }
    }

    /// Draw a 1-bit image: bit 4 of `rows[y]` is the leftmost pixel.
    ///
    /// Lit bits get `color`, clear bits are switched off.
    pub fn draw_mask(&mut self, rows: &[u8; HEIGHT], color: RGB8) {
        for (y, bits) in rows.iter().enumerate() {
            for x in 0..WIDTH {
                let lit = bits & (1 << (WIDTH - 1 - x)) != 0;
                self.set(x, y, if lit { color } else { RGB8::default() });
            }
        }
    }

    /// Buffer in chain order.
    pub fn pixels(&self) -> &[RGB8; LED_COUNT] {
        &self.pixels
    }

    /// Send the buffer to the LEDs.
    pub fn show(&mut self) -> Result<(), W::Error> {
        self.driver.write(self.pixels.iter().copied())
    }

    pub fn into_inner(self) -> W {
        self.driver
    }
}
