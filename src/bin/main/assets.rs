//! Linked-in placeholder icon assets.
//!
//! Solid RGB565 tiles stand in for the artwork until real assets are
//! flashed; each carousel entry gets a distinct color so navigation is
//! visible on hardware.

use log::warn;
use stickshell_core::{battery, launcher};
use stickshell_hal_esp32s3::platform::display::{ImageStore, RawImage};

const APP_ICON_WIDTH: u16 = 64;
const APP_ICON_HEIGHT: u16 = 60;
const APP_ICON_PIXELS: usize = APP_ICON_WIDTH as usize * APP_ICON_HEIGHT as usize;

const ARROW_WIDTH: u16 = 24;
const ARROW_HEIGHT: u16 = 23;
const ARROW_PIXELS: usize = ARROW_WIDTH as usize * ARROW_HEIGHT as usize;

const BATTERY_ICON_WIDTH: u16 = 24;
const BATTERY_ICON_HEIGHT: u16 = 12;
const BATTERY_ICON_PIXELS: usize = BATTERY_ICON_WIDTH as usize * BATTERY_ICON_HEIGHT as usize;

const fn tile<const N: usize>(color: u16) -> [u16; N] {
    [color; N]
}

static APP_TILES: [[u16; APP_ICON_PIXELS]; 9] = [
    tile(0x34DF), // camera
    tile(0xFD20), // explorer
    tile(0x8410), // settings
    tile(0xF81F), // music
    tile(0x07FF), // tools
    tile(0xFFE0), // brightness
    tile(0xF800), // alert
    tile(0x07E0), // power
    tile(0x001F), // reboot
];

static ARROW_TILE: [u16; ARROW_PIXELS] = tile(0xFFFF);

// Red through green, darkest at empty.
static DISCHARGE_TILES: [[u16; BATTERY_ICON_PIXELS]; 6] = [
    tile(0xF800),
    tile(0xFB20),
    tile(0xFE60),
    tile(0xBFE0),
    tile(0x47E0),
    tile(0x07E0),
];

// Cyan shades while on external power.
static CHARGE_TILES: [[u16; BATTERY_ICON_PIXELS]; 6] = [
    tile(0x0210),
    tile(0x0318),
    tile(0x041F),
    tile(0x05DF),
    tile(0x06FF),
    tile(0x07FF),
];

pub fn register_all(images: &mut ImageStore) {
    let mut register = |path: &'static str, width: u16, height: u16, data: &'static [u16]| {
        let image = RawImage {
            width,
            height,
            data,
        };
        if !images.register(path, image) {
            warn!("assets: image table full, {} skipped", path);
        }
    };

    for (entry, data) in launcher::APP_LIST.iter().zip(APP_TILES.iter()) {
        register(entry.icon, APP_ICON_WIDTH, APP_ICON_HEIGHT, data);
    }

    register(launcher::ARROW_ICON, ARROW_WIDTH, ARROW_HEIGHT, &ARROW_TILE);

    for (path, data) in battery::BATTERY_ICONS.iter().zip(DISCHARGE_TILES.iter()) {
        register(path, BATTERY_ICON_WIDTH, BATTERY_ICON_HEIGHT, data);
    }
    for (path, data) in battery::BATTERY_CHARGING_ICONS.iter().zip(CHARGE_TILES.iter()) {
        register(path, BATTERY_ICON_WIDTH, BATTERY_ICON_HEIGHT, data);
    }
}
