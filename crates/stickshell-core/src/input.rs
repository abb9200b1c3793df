//! Edge-interrupt to screen-handler routing for the two logical buttons.

use core::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::{
    screen::{ButtonState, InputResponse, LogicalButton, Screen},
    shell::Shell,
    surface::Platform,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    Delivered,
    /// An earlier edge was still being handled; this one is dropped, not
    /// queued. The line's own debounce makes retries pointless.
    DroppedBusy,
}

/// Routes raw GPIO edges to the active screen only.
///
/// The guard is the one explicit mutual-exclusion primitive in the shell:
/// a compare-and-set flag rather than a blocking lock, so an edge arriving
/// from interrupt context while a handler is mid-navigation can never
/// deadlock or reenter the stack.
pub struct InputDispatcher {
    in_flight: AtomicBool,
    active_low: bool,
}

impl InputDispatcher {
    /// Board convention: buttons are pulled up and read low while pressed.
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            active_low: true,
        }
    }

    pub const fn with_active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    fn button_state(&self, raw_level_high: bool) -> ButtonState {
        let pressed = if self.active_low {
            !raw_level_high
        } else {
            raw_level_high
        };

        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }

    /// Translates one edge and delivers it to the current screen. Screens
    /// below the top of the stack never see input.
    pub fn on_edge<P, S, const N: usize>(
        &self,
        shell: &mut Shell<P, S, N>,
        button: LogicalButton,
        raw_level_high: bool,
    ) -> DispatchOutcome
    where
        P: Platform,
        S: Screen<P>,
    {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("input: edge on {:?} dropped, handler busy", button);
            return DispatchOutcome::DroppedBusy;
        }

        let state = self.button_state(raw_level_high);
        let response = match button {
            LogicalButton::Primary => shell.current_mut().on_primary_button(state),
            LogicalButton::Secondary => shell.current_mut().on_secondary_button(state),
        };

        match response {
            InputResponse::Ignored => {}
            InputResponse::Redraw => shell.invalidate(),
            InputResponse::Navigate(screen) => shell.push(screen),
        }

        self.in_flight.store(false, Ordering::Release);
        DispatchOutcome::Delivered
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        screen::DrawOutcome,
        shell::{Shell, ShellConfig},
        surface::{BatterySample, Color, Surface, SurfaceError},
    };

    #[derive(Default)]
    struct NullSurface;

    impl Surface for NullSurface {
        type Image = ();

        fn width(&self) -> u16 {
            240
        }

        fn height(&self) -> u16 {
            135
        }

        fn clear(&mut self) {}

        fn draw_text(&mut self, _x: i16, _y: i16, _text: &str, _fg: Color, _bg: Color) {}

        fn load_image(&mut self, _path: &str) -> Result<(), SurfaceError> {
            Ok(())
        }

        fn image_size(&self, _image: &()) -> (u16, u16) {
            (0, 0)
        }

        fn draw_image(&mut self, _image: &(), _x: i16, _y: i16) {}

        fn present(&mut self) {}
    }

    #[derive(Default)]
    struct NullPlatform {
        surface: NullSurface,
    }

    impl Platform for NullPlatform {
        type Surface = NullSurface;

        fn surface(&mut self) -> &mut NullSurface {
            &mut self.surface
        }

        fn battery_sample(&mut self) -> Option<BatterySample> {
            None
        }

        fn reclaim(&mut self) {}
    }

    /// Counts every hook invocation it receives.
    #[derive(Default)]
    struct CountingScreen {
        presses: u32,
        releases: u32,
    }

    impl Screen<NullPlatform> for CountingScreen {
        fn on_draw(&mut self, _platform: &mut NullPlatform) -> DrawOutcome {
            DrawOutcome::Settled
        }

        fn on_primary_button(&mut self, state: ButtonState) -> InputResponse<Self> {
            match state {
                ButtonState::Pressed => self.presses += 1,
                ButtonState::Released => self.releases += 1,
            }
            InputResponse::Ignored
        }
    }

    fn shell() -> Shell<NullPlatform, CountingScreen, 4> {
        Shell::new(CountingScreen::default(), ShellConfig::new())
    }

    #[test]
    fn active_low_translation_maps_low_to_pressed() {
        let dispatcher = InputDispatcher::new();
        assert_eq!(dispatcher.button_state(false), ButtonState::Pressed);
        assert_eq!(dispatcher.button_state(true), ButtonState::Released);

        let active_high = InputDispatcher::new().with_active_low(false);
        assert_eq!(active_high.button_state(true), ButtonState::Pressed);
    }

    #[test]
    fn edge_arriving_while_a_handler_runs_is_dropped_whole() {
        let dispatcher = InputDispatcher::new();
        let mut shell = shell();

        // Guard held, as if an earlier edge were still mid-dispatch.
        dispatcher.in_flight.store(true, Ordering::Release);

        let outcome = dispatcher.on_edge(&mut shell, LogicalButton::Primary, false);
        assert_eq!(outcome, DispatchOutcome::DroppedBusy);
        assert_eq!(shell.current().presses, 0);
        assert_eq!(shell.current().releases, 0);

        // A drop never releases someone else's guard.
        assert!(dispatcher.in_flight.load(Ordering::Acquire));
    }

    #[test]
    fn guard_is_released_after_each_delivery() {
        let dispatcher = InputDispatcher::new();
        let mut shell = shell();

        assert_eq!(
            dispatcher.on_edge(&mut shell, LogicalButton::Primary, false),
            DispatchOutcome::Delivered
        );
        assert_eq!(
            dispatcher.on_edge(&mut shell, LogicalButton::Primary, true),
            DispatchOutcome::Delivered
        );
        assert_eq!(shell.current().presses, 1);
        assert_eq!(shell.current().releases, 1);
        assert!(!dispatcher.in_flight.load(Ordering::Acquire));
    }
}
