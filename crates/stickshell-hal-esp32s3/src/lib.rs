#![no_std]

//! ESP32-S3 board support for the handheld shell: LCD-backed drawing
//! surface and flash-backed settings persistence.

pub mod platform;
pub mod storage;
