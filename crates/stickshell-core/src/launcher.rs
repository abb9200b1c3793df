//! Root launcher screen: horizontally scrolling icon carousel with a
//! battery readout.
//!
//! The launcher owns only UI state. It reports which app the user picked
//! by id; the firmware maps ids onto concrete screens, and ids without a
//! screen yet are inert.

use core::fmt::Write as _;

use log::debug;

use crate::{
    anim::AnimationSequencer,
    battery,
    screen::{ButtonState, DrawOutcome},
    surface::{Color, Platform, Surface},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppEntry {
    pub id: &'static str,
    pub icon: &'static str,
}

const fn entry(id: &'static str, icon: &'static str) -> AppEntry {
    AppEntry { id, icon }
}

pub const APP_LIST: [AppEntry; 9] = [
    entry("camera", "/res/icons/camera_64x60.jpg"),
    entry("explorer", "/res/icons/memory_card_64x60.jpg"),
    entry("settings", "/res/icons/settings_64x60.jpg"),
    entry("music", "/res/icons/music_64x60.jpg"),
    entry("tools", "/res/icons/tools_64x60.jpg"),
    entry("brightness", "/res/icons/brightness_64x60.jpg"),
    entry("alert", "/res/icons/alert_64x60.jpg"),
    entry("power", "/res/icons/power_64x60.jpg"),
    entry("reboot", "/res/icons/reboot_64x60.jpg"),
];

pub const ARROW_ICON: &str = "/res/icons/arrow_top_24x23.jpg";

const ICON_WIDTH: i16 = 64;
const ICON_HEIGHT: i16 = 60;
const ICON_PADDING: i16 = 6;
const ICON_MARGIN_TOP: i16 = 5;
/// The focused icon sits slightly above the row.
const FOCUS_LIFT: i16 = 10;
/// Frames per one-slot slide.
const SLIDE_STEPS: u8 = 3;

pub struct Launcher {
    apps: &'static [AppEntry],
    cursor: usize,
    slide: AnimationSequencer,
}

impl Launcher {
    pub const fn new() -> Self {
        Self::with_apps(&APP_LIST)
    }

    /// Panics when `apps` is empty; cursor arithmetic and the carousel
    /// layout both need at least one entry.
    pub const fn with_apps(apps: &'static [AppEntry]) -> Self {
        assert!(!apps.is_empty(), "launcher needs at least one app entry");
        Self {
            apps,
            cursor: 0,
            slide: AnimationSequencer::new(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Secondary button cycles the carousel. Returns whether a redraw is
    /// due.
    pub fn handle_secondary(&mut self, state: ButtonState) -> bool {
        if state != ButtonState::Pressed {
            return false;
        }

        self.cursor = (self.cursor + 1) % self.apps.len();
        self.slide.begin(SLIDE_STEPS);
        true
    }

    /// Primary button launches the focused entry. Returns the picked app
    /// id on the press edge, nothing on release.
    pub fn handle_primary(&mut self, state: ButtonState) -> Option<&'static str> {
        if state != ButtonState::Pressed {
            return None;
        }
        Some(self.apps[self.cursor].id)
    }

    /// The launcher consumes its own back gesture: cursor home, slide
    /// abandoned. Always handled, so the root is never popped.
    pub fn handle_back(&mut self) -> bool {
        self.cursor = 0;
        self.slide.cancel();
        true
    }

    /// Periodic wall-time tick. Forces a redraw so the battery readout
    /// refreshes even with no input.
    pub fn periodic_tick(&mut self) -> bool {
        true
    }

    pub fn draw<P: Platform>(&mut self, platform: &mut P) -> DrawOutcome {
        let slot = ICON_WIDTH + ICON_PADDING;
        let offset = match self.slide.next_progress() {
            Some(progress) => i16::from(progress) * slot / 100,
            None => 0,
        };

        let sample = platform.battery_sample();
        let surface = platform.surface();
        surface.clear();

        let width = surface.width() as i16;
        let height = surface.height() as i16;

        if let Some(sample) = sample {
            let volts = sample.millivolts / 1000.0;
            let fraction = battery::percentage_for(volts);

            let mut line: heapless::String<32> = heapless::String::new();
            let _ = write!(line, "Battery: {:.3}V {:.1}%", volts, fraction * 100.0);
            surface.draw_text(1, 1, &line, Color::GREEN, Color::BLACK);

            let icon = battery::icon_for(fraction, sample.charging);
            draw_icon_centered(surface, icon, width - 20, 12);
        }

        // Keep the row odd-sized so one icon is centered and the edges run
        // off-screen during slides.
        let mut visible = width / slot;
        if visible % 2 == 0 {
            visible += 1;
        } else {
            visible += 2;
        }
        let half = visible / 2;

        for i in -half..=half {
            let index = (self.cursor as i16 + i).rem_euclid(self.apps.len() as i16) as usize;
            let center_x = width / 2 + i * slot + offset;
            let mut center_y = height / 2 + ICON_MARGIN_TOP;
            if i == 0 {
                center_y -= FOCUS_LIFT;
            }
            draw_icon_centered(surface, self.apps[index].icon, center_x, center_y);
        }

        draw_icon_centered(
            surface,
            ARROW_ICON,
            width / 2,
            height / 2 + ICON_HEIGHT / 2 + ICON_PADDING + ICON_MARGIN_TOP,
        );

        surface.present();

        if self.slide.is_active() {
            DrawOutcome::AnimationPending
        } else {
            DrawOutcome::Settled
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_icon_centered<S: Surface>(surface: &mut S, path: &str, center_x: i16, center_y: i16) {
    match surface.load_image(path) {
        Ok(image) => {
            let (w, h) = surface.image_size(&image);
            surface.draw_image(&image, center_x - w as i16 / 2, center_y - h as i16 / 2);
        }
        Err(err) => debug!("launcher: icon {} skipped: {:?}", path, err),
    }
}
