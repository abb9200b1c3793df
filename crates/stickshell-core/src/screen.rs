//! Screen capability hooks and handler responses.

use crate::surface::Platform;

/// Semantic state of a general-purpose button, after active-low translation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// The two general-purpose buttons routed through the input dispatcher.
/// The power key is not one of these; it only arrives via the polled latch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogicalButton {
    Primary,
    Secondary,
}

/// What a button handler asks the shell to do.
#[derive(Debug, Eq, PartialEq)]
pub enum InputResponse<S> {
    /// Event not consumed; nothing changes.
    Ignored,
    /// Screen state changed; schedule a redraw.
    Redraw,
    /// Push a new screen on top of this one.
    Navigate(S),
}

/// Back-gesture verdict. `Ignored` makes the shell pop the screen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackResponse {
    Handled,
    Ignored,
}

/// Whether a finished draw wants an immediate follow-up frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrawOutcome {
    Settled,
    /// The screen consumed one animation step and has more queued; the
    /// scheduler re-marks dirty so the next loop iteration draws again.
    AnimationPending,
}

/// One navigable unit of UI. Every hook except `on_draw` defaults to
/// "not my business" so concrete screens implement only what they use.
pub trait Screen<P: Platform> {
    fn on_draw(&mut self, platform: &mut P) -> DrawOutcome;

    fn on_back_pressed(&mut self) -> BackResponse {
        BackResponse::Ignored
    }

    fn on_primary_button(&mut self, state: ButtonState) -> InputResponse<Self>
    where
        Self: Sized,
    {
        let _ = state;
        InputResponse::Ignored
    }

    fn on_secondary_button(&mut self, state: ButtonState) -> InputResponse<Self>
    where
        Self: Sized,
    {
        let _ = state;
        InputResponse::Ignored
    }
}
