//! Collaborator traits the shell draws through.
//!
//! The core never talks to SPI or the PMU directly; the firmware hands it
//! one platform object implementing these seams, which keeps every state
//! machine in this crate testable on the host.

/// RGB565 color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SurfaceError {
    /// No image registered under the requested path.
    ImageMissing,
    /// Registered data does not describe a drawable image.
    ImageInvalid,
}

/// Buffered drawing target. `present` pushes the composed frame to the
/// panel; nothing is visible before it.
pub trait Surface {
    type Image;

    fn width(&self) -> u16;
    fn height(&self) -> u16;

    fn clear(&mut self);
    fn draw_text(&mut self, x: i16, y: i16, text: &str, fg: Color, bg: Color);

    /// Decoded-image lookup by path. A miss is recoverable: callers skip
    /// the image and keep drawing the frame.
    fn load_image(&mut self, path: &str) -> Result<Self::Image, SurfaceError>;
    fn image_size(&self, image: &Self::Image) -> (u16, u16);
    fn draw_image(&mut self, image: &Self::Image, x: i16, y: i16);

    fn present(&mut self);
}

/// Instantaneous battery reading from the PMU.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatterySample {
    pub millivolts: f32,
    pub charging: bool,
}

/// Services the shell and screens need from the board.
pub trait Platform {
    type Surface: Surface;

    fn surface(&mut self) -> &mut Self::Surface;

    /// `None` when the sample could not be read this frame; the caller
    /// draws without battery info rather than aborting.
    fn battery_sample(&mut self) -> Option<BatterySample>;

    /// Bounded post-frame memory-reclamation pass. Drawing allocates
    /// sizeable transient buffers; reclaiming right after each frame keeps
    /// fragmentation from starving the constrained heap.
    fn reclaim(&mut self);
}
