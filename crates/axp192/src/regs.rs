//! AXP192 register map, datasheet rev 1.1 naming.

/// Input power status (VBUS presence in bits 6..7).
pub const POWER_STATUS: u8 = 0x00;
/// LDO2/LDO3 output control.
pub const LDO23_CONTROL: u8 = 0x12;
/// DC-DC2 output voltage, 25 mV steps from 0.7 V.
pub const DCDC2_VOLTAGE: u8 = 0x23;
/// Wakeup/sleep control.
pub const SLEEP_CONTROL: u8 = 0x31;
/// IRQ status bank 3: PEK edges (bit 1 short, bit 0 long). Write 1s to clear.
pub const IRQ_STATUS_3: u8 = 0x46;
/// VBUS voltage ADC, 1.7 mV/LSB.
pub const VBUS_VOLTAGE_H: u8 = 0x56;
pub const VBUS_VOLTAGE_L: u8 = 0x57;
/// VBUS current ADC, 0.625 mA/LSB.
pub const VBUS_CURRENT_H: u8 = 0x58;
pub const VBUS_CURRENT_L: u8 = 0x59;
/// Internal temperature ADC, 0.1 degC/LSB biased -144.7 degC.
pub const TEMPERATURE_H: u8 = 0x5E;
pub const TEMPERATURE_L: u8 = 0x5F;
/// Instantaneous battery power, 24-bit.
pub const BATTERY_POWER_H: u8 = 0x70;
pub const BATTERY_POWER_M: u8 = 0x71;
pub const BATTERY_POWER_L: u8 = 0x72;
/// Battery voltage ADC, 1.1 mV/LSB.
pub const BATTERY_VOLTAGE_H: u8 = 0x78;
pub const BATTERY_VOLTAGE_L: u8 = 0x79;
/// Battery charge current ADC, 13-bit, 0.5 mA/LSB.
pub const CHARGE_CURRENT_H: u8 = 0x7A;
pub const CHARGE_CURRENT_L: u8 = 0x7B;
/// Battery discharge current ADC, 13-bit, 0.5 mA/LSB.
pub const DISCHARGE_CURRENT_H: u8 = 0x7C;
pub const DISCHARGE_CURRENT_L: u8 = 0x7D;
/// ADC enable bank 1.
pub const ADC_ENABLE_1: u8 = 0x82;
/// Backlight/LDO0 voltage, brightness in the high nibble.
pub const GPIO0_LDO_VOLTAGE: u8 = 0x91;
/// Coulomb counter, charge accumulator (big-endian from 0xB0).
pub const COULOMB_CHARGE_B3: u8 = 0xB0;
/// Coulomb counter, discharge accumulator (big-endian from 0xB4).
pub const COULOMB_DISCHARGE_B3: u8 = 0xB4;
/// Coulomb counter control.
pub const COULOMB_CONTROL: u8 = 0xB8;

pub const PEK_SHORT_PRESS_BIT: u8 = 1 << 1;
pub const PEK_LONG_PRESS_BIT: u8 = 1 << 0;

pub const VBUS_PRESENT_BIT: u8 = 1 << 5;
pub const ACIN_PRESENT_BIT: u8 = 1 << 6;
pub const ACIN_USABLE_BIT: u8 = 1 << 7;

pub const COULOMB_ENABLE: u8 = 0x80;
pub const COULOMB_DISABLE: u8 = 0x00;
pub const COULOMB_PAUSE: u8 = 0xC0;
pub const COULOMB_CLEAR: u8 = 0xA0;
