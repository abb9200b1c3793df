use core::fmt::Write as _;

use stickshell_core::{
    battery,
    launcher::Launcher,
    screen::{BackResponse, ButtonState, DrawOutcome, InputResponse, Screen},
    surface::{Color, Platform, Surface},
};

use crate::platform::BoardPlatform;

/// Every navigable screen the firmware ships. Launcher ids without a
/// screen here are inert carousel entries.
pub enum App {
    Launcher(Launcher),
    Explorer,
    SystemInfo,
    Camera,
}

impl App {
    fn for_id(id: &str) -> Option<App> {
        match id {
            "camera" => Some(App::Camera),
            "explorer" => Some(App::Explorer),
            "settings" => Some(App::SystemInfo),
            _ => None,
        }
    }
}

impl<'a> Screen<BoardPlatform<'a>> for App {
    fn on_draw(&mut self, platform: &mut BoardPlatform<'a>) -> DrawOutcome {
        match self {
            App::Launcher(launcher) => launcher.draw(platform),
            App::Explorer => draw_placeholder(platform, "EXPLORER", "NO MEDIA PRESENT"),
            App::SystemInfo => draw_system_info(platform),
            App::Camera => draw_placeholder(platform, "CAMERA", "MODULE NOT FITTED"),
        }
    }

    fn on_back_pressed(&mut self) -> BackResponse {
        match self {
            // The launcher is the root; back only rewinds its cursor.
            App::Launcher(launcher) => {
                let _ = launcher.handle_back();
                BackResponse::Handled
            }
            _ => BackResponse::Ignored,
        }
    }

    fn on_primary_button(&mut self, state: ButtonState) -> InputResponse<Self> {
        match self {
            App::Launcher(launcher) => {
                match launcher.handle_primary(state).and_then(App::for_id) {
                    Some(app) => InputResponse::Navigate(app),
                    None => InputResponse::Ignored,
                }
            }
            _ => InputResponse::Ignored,
        }
    }

    fn on_secondary_button(&mut self, state: ButtonState) -> InputResponse<Self> {
        match self {
            App::Launcher(launcher) => {
                if launcher.handle_secondary(state) {
                    InputResponse::Redraw
                } else {
                    InputResponse::Ignored
                }
            }
            _ => InputResponse::Ignored,
        }
    }
}

fn draw_placeholder(platform: &mut BoardPlatform<'_>, title: &str, hint: &str) -> DrawOutcome {
    let surface = platform.surface();
    surface.clear();

    let bottom = surface.height() as i16 - 16;
    surface.draw_text(8, 8, title, Color::WHITE, Color::BLACK);
    surface.draw_text(8, 24, hint, Color::GREEN, Color::BLACK);
    surface.draw_text(8, bottom, "SHORT-PRESS POWER TO GO BACK", Color::BLUE, Color::BLACK);
    surface.present();

    DrawOutcome::Settled
}

fn draw_system_info(platform: &mut BoardPlatform<'_>) -> DrawOutcome {
    let sample = platform.battery_sample();
    let surface = platform.surface();
    surface.clear();

    surface.draw_text(8, 8, "SYSTEM INFO", Color::WHITE, Color::BLACK);

    match sample {
        Some(sample) => {
            let volts = sample.millivolts / 1000.0;
            let fraction = battery::percentage_for(volts);

            let mut line: heapless::String<32> = heapless::String::new();
            let _ = write!(line, "BATTERY {:.2}V {:.0}%", volts, fraction * 100.0);
            surface.draw_text(8, 24, &line, Color::GREEN, Color::BLACK);

            let source = if sample.charging {
                "POWER: EXTERNAL"
            } else {
                "POWER: BATTERY"
            };
            surface.draw_text(8, 40, source, Color::GREEN, Color::BLACK);
        }
        None => {
            surface.draw_text(8, 24, "BATTERY: UNAVAILABLE", Color::RED, Color::BLACK);
        }
    }

    let bottom = surface.height() as i16 - 16;
    surface.draw_text(8, bottom, "SHORT-PRESS POWER TO GO BACK", Color::BLUE, Color::BLACK);
    surface.present();

    DrawOutcome::Settled
}
