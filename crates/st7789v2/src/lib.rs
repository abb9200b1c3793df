#![cfg_attr(not(test), no_std)]

//! ST7789V2 (1.14" 240x135 IPS TFT) driver primitives.

mod framebuffer;
pub mod protocol;

pub use framebuffer::{FrameBuffer, PIXELS};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use protocol::{HEIGHT, WIDTH};

/// Driver errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error<SpiErr, DcErr, CsErr> {
    /// SPI transfer failed.
    Spi(SpiErr),
    /// Data/command pin operation failed.
    Dc(DcErr),
    /// Chip-select pin operation failed.
    Cs(CsErr),
    /// Requested window is outside the panel.
    InvalidWindow,
}

pub type DriverResult<SpiErr, DcErr, CsErr> = Result<(), Error<SpiErr, DcErr, CsErr>>;

/// ST7789V2 driver over a 4-wire SPI interface.
#[derive(Debug)]
pub struct St7789<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> St7789<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Releases the owned bus and pins.
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    fn command(&mut self, command: u8) -> DriverResult<SPI::Error, DC::Error, CS::Error> {
        self.dc.set_low().map_err(Error::Dc)?;
        self.spi.write(&[command]).map_err(Error::Spi)
    }

    fn data(&mut self, data: &[u8]) -> DriverResult<SPI::Error, DC::Error, CS::Error> {
        self.dc.set_high().map_err(Error::Dc)?;
        self.spi.write(data).map_err(Error::Spi)
    }

    /// Resets the controller and brings the panel to normal display mode:
    /// 16bpp, landscape addressing, inversion on (the IPS panel expects it).
    pub fn initialize<D>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, DC::Error, CS::Error>
    where
        D: DelayNs,
    {
        self.cs.set_low().map_err(Error::Cs)?;

        self.command(protocol::CMD_SWRESET)?;
        delay.delay_ms(150);

        self.command(protocol::CMD_SLPOUT)?;
        delay.delay_ms(120);

        self.command(protocol::CMD_COLMOD)?;
        self.data(&[protocol::COLMOD_16BPP])?;
        self.command(protocol::CMD_MADCTL)?;
        self.data(&[protocol::MADCTL_LANDSCAPE])?;
        self.command(protocol::CMD_INVON)?;
        self.command(protocol::CMD_NORON)?;
        self.command(protocol::CMD_DISPON)?;
        delay.delay_ms(10);

        self.spi.flush().map_err(Error::Spi)?;
        self.cs.set_high().map_err(Error::Cs)
    }

    /// Sets the RAM write window and issues RAMWR; pixel data follows.
    fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> DriverResult<SPI::Error, DC::Error, CS::Error> {
        let columns = protocol::build_column_window(x0, x1).ok_or(Error::InvalidWindow)?;
        let rows = protocol::build_row_window(y0, y1).ok_or(Error::InvalidWindow)?;

        self.command(protocol::CMD_CASET)?;
        self.data(&columns)?;
        self.command(protocol::CMD_RASET)?;
        self.data(&rows)?;
        self.command(protocol::CMD_RAMWR)
    }

    /// Pushes a full framebuffer in one CS-low transaction, row by row,
    /// big-endian as the controller expects.
    pub fn flush_frame(
        &mut self,
        frame: &FrameBuffer,
    ) -> DriverResult<SPI::Error, DC::Error, CS::Error> {
        self.cs.set_low().map_err(Error::Cs)?;
        self.set_window(0, 0, WIDTH as u16 - 1, HEIGHT as u16 - 1)?;

        self.dc.set_high().map_err(Error::Dc)?;
        let mut line = [0u8; WIDTH * 2];
        for y in 0..HEIGHT {
            let Some(row) = frame.row(y) else {
                break;
            };
            for (pixel, bytes) in row.iter().zip(line.chunks_exact_mut(2)) {
                bytes.copy_from_slice(&pixel.to_be_bytes());
            }
            self.spi.write(&line).map_err(Error::Spi)?;
        }

        self.spi.flush().map_err(Error::Spi)?;
        self.cs.set_high().map_err(Error::Cs)
    }
}
