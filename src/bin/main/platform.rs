use core::cell::RefCell;

use axp192::Axp192;
use esp_hal::{Blocking, delay::Delay, gpio::Output, i2c::master::I2c, spi::master::Spi};
use log::{debug, trace};
use stickshell_core::surface::{BatterySample, Platform};
use stickshell_hal_esp32s3::platform::display::LcdSurface;

pub type Pmu = Axp192<I2c<'static, Blocking>>;
pub type BoardSurface =
    LcdSurface<Spi<'static, Blocking>, Output<'static>, Output<'static>, Delay>;

/// Board services handed to the shell. The PMU cell is shared with the
/// power-key poll task; borrows are short and never held across awaits.
pub struct BoardPlatform<'a> {
    surface: BoardSurface,
    pmu: &'a RefCell<Pmu>,
}

impl<'a> BoardPlatform<'a> {
    pub fn new(surface: BoardSurface, pmu: &'a RefCell<Pmu>) -> Self {
        Self { surface, pmu }
    }
}

impl Platform for BoardPlatform<'_> {
    type Surface = BoardSurface;

    fn surface(&mut self) -> &mut BoardSurface {
        &mut self.surface
    }

    fn battery_sample(&mut self) -> Option<BatterySample> {
        let mut pmu = self.pmu.borrow_mut();

        let millivolts = match pmu.battery_voltage_mv() {
            Ok(mv) => mv,
            Err(err) => {
                debug!("pmu: vbat read failed: {:?}", err);
                return None;
            }
        };
        let charging = pmu.usb_plugged_in().unwrap_or(false);

        Some(BatterySample {
            millivolts,
            charging,
        })
    }

    fn reclaim(&mut self) {
        trace!(
            "heap: used={} free={}",
            esp_alloc::HEAP.used(),
            esp_alloc::HEAP.free()
        );
    }
}
