//! In-memory RGB565 framebuffer for ST7789V2.

use core::convert::TryFrom;

use crate::protocol::{HEIGHT, WIDTH};

/// Total pixel count of the visible panel area.
pub const PIXELS: usize = WIDTH * HEIGHT;

/// 16bpp framebuffer, row-major, landscape orientation.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: [u16; PIXELS],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Creates a new black framebuffer.
    pub const fn new() -> Self {
        Self {
            pixels: [0u16; PIXELS],
        }
    }

    pub fn pixels(&self) -> &[u16; PIXELS] {
        &self.pixels
    }

    /// Fills the whole buffer with one color.
    pub fn fill(&mut self, color: u16) {
        self.pixels.fill(color);
    }

    /// Sets a pixel.
    ///
    /// Returns `true` when the pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u16) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        self.pixels[y * WIDTH + x] = color;
        true
    }

    /// Reads a pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        Some(self.pixels[y * WIDTH + x])
    }

    /// Returns one row of pixels for row 0..HEIGHT.
    pub fn row(&self, y: usize) -> Option<&[u16; WIDTH]> {
        if y >= HEIGHT {
            return None;
        }

        let start = y * WIDTH;
        <&[u16; WIDTH]>::try_from(&self.pixels[start..start + WIDTH]).ok()
    }
}
