#![cfg_attr(not(test), no_std)]

//! Platform-independent application shell for the handheld: screen stack,
//! dirty-flag render scheduling, button dispatch, power-key debounce and
//! battery interpretation. Board bring-up and drawing backends live in the
//! HAL and firmware crates.

pub mod anim;
pub mod battery;
pub mod input;
pub mod launcher;
pub mod power_key;
pub mod screen;
pub mod settings;
pub mod shell;
pub mod surface;
