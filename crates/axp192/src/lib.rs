#![cfg_attr(not(test), no_std)]

//! AXP192 power management IC driver (I2C address 0x34).
//!
//! Covers the rails and telemetry the handheld uses: backlight brightness,
//! CPU core voltage, battery/VBUS/temperature ADCs, the coulomb counter,
//! and the latched power-key status.

pub mod regs;

use embedded_hal::i2c::I2c;

/// Fixed 7-bit bus address.
pub const ADDRESS: u8 = 0x34;

/// Driver errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error<E> {
    /// Nothing answered at the PMU address during probe.
    DeviceNotFound,
    /// Requested value rejected before any bus write.
    OutOfRange,
    /// Underlying I2C transfer failed.
    Bus(E),
}

/// Latched power-key edges since the last clear. Reading consumes them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PowerKeyStatus {
    pub short_press: bool,
    pub long_press: bool,
}

pub struct Axp192<I2C> {
    i2c: I2C,
}

impl<I2C, E> Axp192<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Probes the PMU and takes ownership of the bus handle. A silent
    /// address is fatal: the board cannot run without its PMU.
    pub fn new(i2c: I2C) -> Result<Self, Error<E>> {
        let mut pmu = Self { i2c };
        pmu.read_register(regs::POWER_STATUS)
            .map_err(|_| Error::DeviceNotFound)?;
        Ok(pmu)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut value = [0u8];
        self.i2c
            .write_read(ADDRESS, &[register], &mut value)
            .map_err(Error::Bus)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(ADDRESS, &[register, value])
            .map_err(Error::Bus)
    }

    /// Paired ADC read: 8 high bits, 4 low bits.
    fn read_adc_12bit(&mut self, high: u8, low: u8) -> Result<u16, Error<E>> {
        let h = self.read_register(high)?;
        let l = self.read_register(low)?;
        Ok((u16::from(h) << 4) | u16::from(l & 0x0F))
    }

    /// Paired ADC read: 8 high bits, 5 low bits (current channels).
    fn read_adc_13bit(&mut self, high: u8, low: u8) -> Result<u16, Error<E>> {
        let h = self.read_register(high)?;
        let l = self.read_register(low)?;
        Ok((u16::from(h) << 5) | u16::from(l & 0x1F))
    }

    fn read_accumulator(&mut self, base: u8) -> Result<u32, Error<E>> {
        let b3 = self.read_register(base)?;
        let b2 = self.read_register(base + 1)?;
        let b1 = self.read_register(base + 2)?;
        let b0 = self.read_register(base + 3)?;
        Ok(u32::from_be_bytes([b3, b2, b1, b0]))
    }

    /// Reads the power-key latch and acknowledges it in the same call, so
    /// each edge is observed at most once.
    pub fn take_power_key_status(&mut self) -> Result<PowerKeyStatus, Error<E>> {
        let status = self.read_register(regs::IRQ_STATUS_3)?;
        self.write_register(regs::IRQ_STATUS_3, 0xFF)?;

        Ok(PowerKeyStatus {
            short_press: status & regs::PEK_SHORT_PRESS_BIT != 0,
            long_press: status & regs::PEK_LONG_PRESS_BIT != 0,
        })
    }

    /// Drops any latched edges without reporting them. Used once at boot,
    /// before stale power-on bits can be mistaken for input.
    pub fn clear_power_key_latch(&mut self) -> Result<(), Error<E>> {
        self.write_register(regs::IRQ_STATUS_3, 0xFF)
    }

    /// Battery voltage in millivolts, 1.1 mV per LSB.
    pub fn battery_voltage_mv(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_adc_12bit(regs::BATTERY_VOLTAGE_H, regs::BATTERY_VOLTAGE_L)?;
        Ok(f32::from(raw) * 1.1)
    }

    /// VBUS voltage in millivolts, 1.7 mV per LSB.
    pub fn vbus_voltage_mv(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_adc_12bit(regs::VBUS_VOLTAGE_H, regs::VBUS_VOLTAGE_L)?;
        Ok(f32::from(raw) * 1.7)
    }

    /// VBUS input current in milliamps, 0.625 mA per LSB.
    pub fn vbus_current_ma(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_adc_12bit(regs::VBUS_CURRENT_H, regs::VBUS_CURRENT_L)?;
        Ok(f32::from(raw) * 0.625)
    }

    /// Battery charge current in milliamps, 0.5 mA per LSB.
    pub fn charge_current_ma(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_adc_13bit(regs::CHARGE_CURRENT_H, regs::CHARGE_CURRENT_L)?;
        Ok(f32::from(raw) * 0.5)
    }

    /// Battery discharge current in milliamps, 0.5 mA per LSB.
    pub fn discharge_current_ma(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_adc_13bit(regs::DISCHARGE_CURRENT_H, regs::DISCHARGE_CURRENT_L)?;
        Ok(f32::from(raw) * 0.5)
    }

    /// Instantaneous battery power in milliwatts.
    pub fn battery_power_mw(&mut self) -> Result<f32, Error<E>> {
        let h = self.read_register(regs::BATTERY_POWER_H)?;
        let m = self.read_register(regs::BATTERY_POWER_M)?;
        let l = self.read_register(regs::BATTERY_POWER_L)?;
        let raw = (u32::from(h) << 16) | (u32::from(m) << 8) | u32::from(l);
        Ok(raw as f32 * 1.1 * 0.5 / 1000.0)
    }

    /// Die temperature in degrees Celsius, 0.1 degC per LSB, -144.7 bias.
    pub fn temperature_c(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_adc_12bit(regs::TEMPERATURE_H, regs::TEMPERATURE_L)?;
        Ok(f32::from(raw) * 0.1 - 144.7)
    }

    /// Whether external input power is present and usable.
    pub fn usb_plugged_in(&mut self) -> Result<bool, Error<E>> {
        let status = self.read_register(regs::POWER_STATUS)?;
        let mask = regs::ACIN_PRESENT_BIT | regs::ACIN_USABLE_BIT;
        Ok(status & mask == mask)
    }

    /// Backlight brightness, 16 steps. The register's high nibble drives
    /// the LDO that feeds the panel backlight.
    pub fn set_screen_brightness(&mut self, brightness: u8) -> Result<(), Error<E>> {
        if brightness > 15 {
            return Err(Error::OutOfRange);
        }
        self.write_register(regs::GPIO0_LDO_VOLTAGE, (brightness & 0x0F) << 4)
    }

    /// CPU core rail via DC-DC2, 25 mV steps. Accepts 800..=1050 mV.
    pub fn set_cpu_vcore_mv(&mut self, millivolts: u16) -> Result<(), Error<E>> {
        if !(800..=1050).contains(&millivolts) {
            return Err(Error::OutOfRange);
        }
        let steps = ((millivolts - 700) / 25) as u8;
        self.write_register(regs::DCDC2_VOLTAGE, steps)
    }

    /// Cuts the backlight and secondary rails and arms PMU sleep. The
    /// device stays down until the power key wakes it.
    pub fn enter_sleep_mode(&mut self) -> Result<(), Error<E>> {
        self.write_register(regs::SLEEP_CONTROL, 0x0F)?;
        self.write_register(regs::GPIO0_LDO_VOLTAGE, 0x00)?;
        self.write_register(regs::LDO23_CONTROL, 0x00)
    }

    /// Turns every ADC channel on or off at once.
    pub fn enable_adc(&mut self, enable: bool) -> Result<(), Error<E>> {
        let value = if enable { 0xFF } else { 0x00 };
        self.write_register(regs::ADC_ENABLE_1, value)
    }

    pub fn enable_coulomb_counter(&mut self, enable: bool) -> Result<(), Error<E>> {
        let value = if enable {
            regs::COULOMB_ENABLE
        } else {
            regs::COULOMB_DISABLE
        };
        self.write_register(regs::COULOMB_CONTROL, value)
    }

    pub fn pause_coulomb_counter(&mut self) -> Result<(), Error<E>> {
        self.write_register(regs::COULOMB_CONTROL, regs::COULOMB_PAUSE)
    }

    pub fn clear_coulomb_counter(&mut self) -> Result<(), Error<E>> {
        self.write_register(regs::COULOMB_CONTROL, regs::COULOMB_CLEAR)
    }

    /// Net charge moved through the battery in milliamp-hours, positive
    /// while charging. Half an LSB is 65536 / (2 * 25 Hz) coulombs.
    pub fn coulomb_counter_mah(&mut self) -> Result<f32, Error<E>> {
        let charge = self.read_accumulator(regs::COULOMB_CHARGE_B3)?;
        let discharge = self.read_accumulator(regs::COULOMB_DISCHARGE_B3)?;
        let delta = charge as f32 - discharge as f32;
        Ok(65536.0 * 0.5 * delta / 3600.0 / 25.0)
    }
}
