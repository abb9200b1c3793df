//! ST7789V2-backed drawing surface.
//!
//! Icons are raw RGB565 blobs linked into the firmware image and
//! registered under the asset paths screens draw with. A path nobody
//! registered is a recoverable miss, matching how screens treat absent
//! assets.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
use log::info;
use st7789v2::{FrameBuffer, St7789, protocol};
use stickshell_core::surface::{Color, Surface, SurfaceError};

const GLYPH_WIDTH: i16 = 5;
const GLYPH_HEIGHT: i16 = 7;
const GLYPH_ADVANCE: i16 = 6;

const MAX_IMAGES: usize = 32;

/// Raw RGB565 image, row-major, linked into flash.
#[derive(Clone, Copy, Debug)]
pub struct RawImage {
    pub width: u16,
    pub height: u16,
    pub data: &'static [u16],
}

/// Path-keyed lookup table for linked-in image assets.
#[derive(Default)]
pub struct ImageStore {
    entries: heapless::Vec<(&'static str, RawImage), MAX_IMAGES>,
}

impl ImageStore {
    pub const fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }

    /// Registers an asset. Returns `false` when the table is full.
    pub fn register(&mut self, path: &'static str, image: RawImage) -> bool {
        self.entries.push((path, image)).is_ok()
    }

    fn lookup(&self, path: &str) -> Option<RawImage> {
        self.entries
            .iter()
            .find(|(key, _)| *key == path)
            .map(|(_, image)| *image)
    }
}

/// Framebuffer surface flushed over SPI on `present`.
pub struct LcdSurface<SPI, DC, CS, D> {
    lcd: St7789<SPI, DC, CS>,
    delay: D,
    frame: &'static mut FrameBuffer,
    images: ImageStore,
    fault_logged: bool,
}

impl<SPI, DC, CS, D> LcdSurface<SPI, DC, CS, D>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    /// Wraps an uninitialized panel. Call `initialize` before drawing.
    pub fn new(
        lcd: St7789<SPI, DC, CS>,
        delay: D,
        frame: &'static mut FrameBuffer,
        images: ImageStore,
    ) -> Self {
        Self {
            lcd,
            delay,
            frame,
            images,
            fault_logged: false,
        }
    }

    pub fn initialize(
        &mut self,
    ) -> Result<(), st7789v2::Error<SPI::Error, DC::Error, CS::Error>> {
        self.lcd.initialize(&mut self.delay)
    }

    fn draw_glyph(&mut self, x: i16, y: i16, columns: &[u8; 5], fg: Color, bg: Color) {
        for (cx, column) in columns.iter().enumerate() {
            for cy in 0..GLYPH_HEIGHT {
                let on = column & (1 << cy) != 0;
                let color = if on { fg } else { bg };
                let px = x + cx as i16;
                let py = y + cy;
                if px >= 0 && py >= 0 {
                    self.frame.set_pixel(px as usize, py as usize, color.0);
                }
            }
        }
    }
}

impl<SPI, DC, CS, D> Surface for LcdSurface<SPI, DC, CS, D>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    type Image = RawImage;

    fn width(&self) -> u16 {
        protocol::WIDTH as u16
    }

    fn height(&self) -> u16 {
        protocol::HEIGHT as u16
    }

    fn clear(&mut self) {
        self.frame.fill(Color::BLACK.0);
    }

    fn draw_text(&mut self, x: i16, y: i16, text: &str, fg: Color, bg: Color) {
        let mut pen_x = x;
        for c in text.chars() {
            if let Some(columns) = glyph(c) {
                self.draw_glyph(pen_x, y, columns, fg, bg);
            }
            pen_x += GLYPH_ADVANCE;
        }
    }

    fn load_image(&mut self, path: &str) -> Result<RawImage, SurfaceError> {
        let image = self.images.lookup(path).ok_or(SurfaceError::ImageMissing)?;
        if image.data.len() != usize::from(image.width) * usize::from(image.height) {
            return Err(SurfaceError::ImageInvalid);
        }
        Ok(image)
    }

    fn image_size(&self, image: &RawImage) -> (u16, u16) {
        (image.width, image.height)
    }

    fn draw_image(&mut self, image: &RawImage, x: i16, y: i16) {
        for row in 0..image.height {
            let py = y + row as i16;
            if py < 0 {
                continue;
            }
            let start = usize::from(row) * usize::from(image.width);
            for col in 0..image.width {
                let px = x + col as i16;
                if px < 0 {
                    continue;
                }
                let pixel = image.data[start + usize::from(col)];
                self.frame.set_pixel(px as usize, py as usize, pixel);
            }
        }
    }

    /// A flush failure loses one frame, not the session; the first failure
    /// is logged and later ones stay quiet until a flush succeeds again.
    fn present(&mut self) {
        match self.lcd.flush_frame(self.frame) {
            Ok(()) => {
                self.fault_logged = false;
            }
            Err(err) => {
                if !self.fault_logged {
                    info!("display: flush failed: {:?}", err);
                    self.fault_logged = true;
                }
            }
        }
    }
}

/// 5x7 column-major glyphs, bit 0 at the top. Lowercase folds to
/// uppercase; anything else renders as a gap.
fn glyph(c: char) -> Option<&'static [u8; 5]> {
    let index = match c.to_ascii_uppercase() {
        'A'..='Z' => c.to_ascii_uppercase() as usize - 'A' as usize,
        '0'..='9' => 26 + (c as usize - '0' as usize),
        ' ' => 36,
        '.' => 37,
        ':' => 38,
        '%' => 39,
        '-' => 40,
        '/' => 41,
        _ => return None,
    };
    Some(&FONT_5X7[index])
}

#[rustfmt::skip]
const FONT_5X7: [[u8; 5]; 42] = [
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
];
