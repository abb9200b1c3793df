//! Command-level protocol helpers for ST7789V2.

/// Visible width in pixels, landscape orientation.
pub const WIDTH: usize = 240;
/// Visible height in pixels, landscape orientation.
pub const HEIGHT: usize = 135;

/// First visible column in controller RAM (the panel is smaller than the
/// controller's 240x320 RAM).
pub const X_OFFSET: u16 = 40;
/// First visible row in controller RAM.
pub const Y_OFFSET: u16 = 52;

pub const CMD_SWRESET: u8 = 0x01;
pub const CMD_SLPOUT: u8 = 0x11;
pub const CMD_NORON: u8 = 0x13;
pub const CMD_INVON: u8 = 0x21;
pub const CMD_DISPON: u8 = 0x29;
pub const CMD_CASET: u8 = 0x2A;
pub const CMD_RASET: u8 = 0x2B;
pub const CMD_RAMWR: u8 = 0x2C;
pub const CMD_MADCTL: u8 = 0x36;
pub const CMD_COLMOD: u8 = 0x3A;

/// 16 bits per pixel, RGB565.
pub const COLMOD_16BPP: u8 = 0x55;
/// Row/column exchange + mirror for landscape with the connector on the
/// left.
pub const MADCTL_LANDSCAPE: u8 = 0x60;

/// Builds the CASET payload for an inclusive column span, applying the
/// panel offset. Returns `None` when the span is empty or off-panel.
#[inline]
pub fn build_column_window(x0: u16, x1: u16) -> Option<[u8; 4]> {
    if x0 > x1 || x1 >= WIDTH as u16 {
        return None;
    }

    let start = (x0 + X_OFFSET).to_be_bytes();
    let end = (x1 + X_OFFSET).to_be_bytes();
    Some([start[0], start[1], end[0], end[1]])
}

/// Builds the RASET payload for an inclusive row span, applying the panel
/// offset. Returns `None` when the span is empty or off-panel.
#[inline]
pub fn build_row_window(y0: u16, y1: u16) -> Option<[u8; 4]> {
    if y0 > y1 || y1 >= HEIGHT as u16 {
        return None;
    }

    let start = (y0 + Y_OFFSET).to_be_bytes();
    let end = (y1 + Y_OFFSET).to_be_bytes();
    Some([start[0], start[1], end[0], end[1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_width_window_covers_the_offset_ram_span() {
        // Columns 0..=239 live at RAM 40..=279.
        assert_eq!(
            build_column_window(0, WIDTH as u16 - 1),
            Some([0x00, 0x28, 0x01, 0x17])
        );
    }

    #[test]
    fn full_height_window_covers_the_offset_ram_span() {
        // Rows 0..=134 live at RAM 52..=186.
        assert_eq!(
            build_row_window(0, HEIGHT as u16 - 1),
            Some([0x00, 0x34, 0x00, 0xBA])
        );
    }

    #[test]
    fn single_pixel_window_is_valid() {
        assert_eq!(build_column_window(10, 10), Some([0x00, 0x32, 0x00, 0x32]));
    }

    #[test]
    fn inverted_or_off_panel_spans_are_rejected() {
        assert_eq!(build_column_window(5, 4), None);
        assert_eq!(build_column_window(0, WIDTH as u16), None);
        assert_eq!(build_row_window(0, HEIGHT as u16), None);
    }
}
