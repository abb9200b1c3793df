//! Navigation stack, dirty flag, and the frame service routine.

use core::marker::PhantomData;

use log::debug;

use crate::{
    screen::{BackResponse, DrawOutcome, Screen},
    surface::Platform,
};

/// Whether a processed back gesture should additionally restart the device.
/// Some deployments restart as a low-memory recovery measure; that is a
/// configuration choice, never a hidden side effect of popping a screen.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BackRestartPolicy {
    #[default]
    Never,
    AfterEveryBack,
    WhenRootReached,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ShellConfig {
    back_restart: BackRestartPolicy,
}

impl ShellConfig {
    pub const fn new() -> Self {
        Self {
            back_restart: BackRestartPolicy::Never,
        }
    }

    pub const fn with_back_restart(mut self, back_restart: BackRestartPolicy) -> Self {
        self.back_restart = back_restart;
        self
    }
}

/// Result of delivering one back gesture.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BackOutcome {
    pub handled: bool,
    pub popped: bool,
    /// The shell never restarts by itself; the firmware owns the primitive.
    pub restart_requested: bool,
}

/// The single explicitly-owned context shared by the scheduler, the input
/// dispatcher, and navigation. Exactly one screen is visible and active:
/// the top of the stack. The stack is never empty while the shell runs.
pub struct Shell<P, S, const N: usize>
where
    P: Platform,
    S: Screen<P>,
{
    stack: heapless::Vec<S, N>,
    dirty: bool,
    config: ShellConfig,
    _platform: PhantomData<P>,
}

impl<P, S, const N: usize> Shell<P, S, N>
where
    P: Platform,
    S: Screen<P>,
{
    /// Boots with the root screen already active and a redraw pending, so
    /// the first scheduler pass paints it.
    pub fn new(root: S, config: ShellConfig) -> Self {
        const { assert!(N > 0, "navigation stack needs room for the root screen") }

        let mut stack = heapless::Vec::new();
        let _ = stack.push(root);

        Self {
            stack,
            dirty: true,
            config,
            _platform: PhantomData,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Requests a redraw. Multiple requests before the next frame collapse
    /// into one.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }
}

include!("navigation.rs");
include!("scheduler.rs");

#[cfg(test)]
mod tests;
