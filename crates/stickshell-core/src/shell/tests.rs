use super::*;
use crate::{
    input::{DispatchOutcome, InputDispatcher},
    power_key::{PowerKeyLatch, PowerKeyMonitor},
    screen::{ButtonState, InputResponse, LogicalButton},
    surface::{BatterySample, Color, Surface, SurfaceError},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PlatformEvent {
    Drew(&'static str),
    Reclaimed,
}

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
struct TestPlatform {
    surface: NullSurface,
    events: Vec<PlatformEvent>,
}

impl Platform for TestPlatform {
    type Surface = NullSurface;

    fn surface(&mut self) -> &mut NullSurface {
        &mut self.surface
    }

    fn battery_sample(&mut self) -> Option<BatterySample> {
        None
    }

    fn reclaim(&mut self) {
        self.events.push(PlatformEvent::Reclaimed);
    }
}

enum TestScreen {
    Root,
    /// Consumes back gestures, like the launcher or a modal screen.
    Sticky,
    /// Counts primary presses; secondary press opens a Sticky screen.
    Counter {
        taps: u32,
    },
    /// Plays out a fixed number of animation frames before settling.
    Animated {
        frames_left: u8,
    },
}

impl Screen<TestPlatform> for TestScreen {
    fn on_draw(&mut self, platform: &mut TestPlatform) -> DrawOutcome {
        match self {
            TestScreen::Root => {
                platform.events.push(PlatformEvent::Drew("root"));
                DrawOutcome::Settled
            }
            TestScreen::Sticky => {
                platform.events.push(PlatformEvent::Drew("sticky"));
                DrawOutcome::Settled
            }
            TestScreen::Counter { .. } => {
                platform.events.push(PlatformEvent::Drew("counter"));
                DrawOutcome::Settled
            }
            TestScreen::Animated { frames_left } => {
                platform.events.push(PlatformEvent::Drew("animated"));
                if *frames_left > 0 {
                    *frames_left -= 1;
                    DrawOutcome::AnimationPending
                } else {
                    DrawOutcome::Settled
                }
            }
        }
    }

    fn on_back_pressed(&mut self) -> BackResponse {
        match self {
            TestScreen::Sticky => BackResponse::Handled,
            _ => BackResponse::Ignored,
        }
    }

    fn on_primary_button(&mut self, state: ButtonState) -> InputResponse<Self> {
        match (self, state) {
            (TestScreen::Counter { taps }, ButtonState::Pressed) => {
                *taps += 1;
                InputResponse::Redraw
            }
            _ => InputResponse::Ignored,
        }
    }

    fn on_secondary_button(&mut self, state: ButtonState) -> InputResponse<Self> {
        match (self, state) {
            (TestScreen::Counter { .. }, ButtonState::Pressed) => {
                InputResponse::Navigate(TestScreen::Sticky)
            }
            _ => InputResponse::Ignored,
        }
    }
}

fn shell_with(root: TestScreen) -> Shell<TestPlatform, TestScreen, 4> {
    Shell::new(root, ShellConfig::new())
}

fn drain_dirty(shell: &mut Shell<TestPlatform, TestScreen, 4>, platform: &mut TestPlatform) {
    while shell.service_frame(platform) {}
}

#[test]
fn boots_dirty_and_first_frame_paints_the_root() {
    let mut shell = shell_with(TestScreen::Root);
    let mut platform = TestPlatform::default();

    assert!(shell.is_dirty());
    assert!(shell.service_frame(&mut platform));
    assert_eq!(
        platform.events,
        [PlatformEvent::Drew("root"), PlatformEvent::Reclaimed]
    );
}

#[test]
fn pop_at_depth_one_is_a_noop() {
    let mut shell = shell_with(TestScreen::Root);
    let mut platform = TestPlatform::default();
    drain_dirty(&mut shell, &mut platform);

    assert!(!shell.pop());
    assert_eq!(shell.depth(), 1);
    assert!(!shell.is_dirty());
}

#[test]
fn push_activates_the_new_screen_and_marks_dirty() {
    let mut shell = shell_with(TestScreen::Root);
    let mut platform = TestPlatform::default();
    drain_dirty(&mut shell, &mut platform);

    shell.push(TestScreen::Sticky);
    assert_eq!(shell.depth(), 2);
    assert!(shell.is_dirty());

    platform.events.clear();
    shell.service_frame(&mut platform);
    assert_eq!(platform.events[0], PlatformEvent::Drew("sticky"));
}

#[test]
fn push_beyond_capacity_is_dropped() {
    let mut shell: Shell<TestPlatform, TestScreen, 2> =
        Shell::new(TestScreen::Root, ShellConfig::new());
    let mut platform = TestPlatform::default();

    shell.push(TestScreen::Sticky);
    drain_dirty_small(&mut shell, &mut platform);

    shell.push(TestScreen::Counter { taps: 0 });
    assert_eq!(shell.depth(), 2);
    assert!(!shell.is_dirty());
}

fn drain_dirty_small(shell: &mut Shell<TestPlatform, TestScreen, 2>, platform: &mut TestPlatform) {
    while shell.service_frame(platform) {}
}

#[test]
fn unhandled_back_pops_the_active_screen() {
    let mut shell = shell_with(TestScreen::Root);
    shell.push(TestScreen::Counter { taps: 0 });

    let outcome = shell.handle_back();
    assert!(!outcome.handled);
    assert!(outcome.popped);
    assert_eq!(shell.depth(), 1);
    assert!(shell.is_dirty());
}

#[test]
fn handled_back_keeps_the_screen_and_schedules_a_redraw() {
    let mut shell = shell_with(TestScreen::Root);
    let mut platform = TestPlatform::default();
    shell.push(TestScreen::Sticky);
    drain_dirty(&mut shell, &mut platform);

    let outcome = shell.handle_back();
    assert!(outcome.handled);
    assert!(!outcome.popped);
    assert_eq!(shell.depth(), 2);
    assert!(shell.is_dirty());
}

#[test]
fn back_at_the_root_neither_pops_nor_panics() {
    let mut shell = shell_with(TestScreen::Root);

    let outcome = shell.handle_back();
    assert!(!outcome.handled);
    assert!(!outcome.popped);
    assert_eq!(shell.depth(), 1);
}

#[test]
fn restart_policy_never_is_the_default() {
    let mut shell = shell_with(TestScreen::Root);
    shell.push(TestScreen::Counter { taps: 0 });

    assert!(!shell.handle_back().restart_requested);
    assert!(!shell.handle_back().restart_requested);
}

#[test]
fn restart_policy_after_every_back_fires_regardless_of_outcome() {
    let config = ShellConfig::new().with_back_restart(BackRestartPolicy::AfterEveryBack);
    let mut shell: Shell<TestPlatform, TestScreen, 4> = Shell::new(TestScreen::Sticky, config);

    // Even a handled back at the root requests a restart under this policy.
    assert!(shell.handle_back().restart_requested);
}

#[test]
fn restart_policy_when_root_reached_fires_only_on_the_final_pop() {
    let config = ShellConfig::new().with_back_restart(BackRestartPolicy::WhenRootReached);
    let mut shell: Shell<TestPlatform, TestScreen, 4> = Shell::new(TestScreen::Root, config);
    shell.push(TestScreen::Counter { taps: 0 });
    shell.push(TestScreen::Counter { taps: 0 });

    assert!(!shell.handle_back().restart_requested);
    assert!(shell.handle_back().restart_requested);
    assert!(!shell.handle_back().restart_requested);
}

#[test]
fn repeated_invalidations_collapse_into_one_frame() {
    let mut shell = shell_with(TestScreen::Root);
    let mut platform = TestPlatform::default();

    shell.invalidate();
    shell.invalidate();
    shell.invalidate();

    assert!(shell.service_frame(&mut platform));
    assert!(!shell.service_frame(&mut platform));
    let draws = platform
        .events
        .iter()
        .filter(|e| matches!(e, PlatformEvent::Drew(_)))
        .count();
    assert_eq!(draws, 1);
}

#[test]
fn clean_shell_skips_the_frame_entirely() {
    let mut shell = shell_with(TestScreen::Root);
    let mut platform = TestPlatform::default();
    drain_dirty(&mut shell, &mut platform);

    platform.events.clear();
    assert!(!shell.service_frame(&mut platform));
    assert!(platform.events.is_empty());
}

#[test]
fn animation_frames_keep_the_shell_dirty_until_settled() {
    let mut shell = shell_with(TestScreen::Animated { frames_left: 2 });
    let mut platform = TestPlatform::default();

    assert!(shell.service_frame(&mut platform));
    assert!(shell.is_dirty());
    assert!(shell.service_frame(&mut platform));
    assert!(shell.is_dirty());
    assert!(shell.service_frame(&mut platform));
    assert!(!shell.is_dirty());
    assert!(!shell.service_frame(&mut platform));
}

#[test]
fn dispatcher_delivers_to_the_active_screen_only() {
    let mut shell = shell_with(TestScreen::Root);
    shell.push(TestScreen::Counter { taps: 0 });
    let dispatcher = InputDispatcher::new();

    // Active-low line: a low level is a press.
    let outcome = dispatcher.on_edge(&mut shell, LogicalButton::Primary, false);
    assert_eq!(outcome, DispatchOutcome::Delivered);
    assert!(shell.is_dirty());

    match shell.current() {
        TestScreen::Counter { taps } => assert_eq!(*taps, 1),
        _ => panic!("counter should still be active"),
    }
}

#[test]
fn navigate_response_pushes_the_new_screen() {
    let mut shell = shell_with(TestScreen::Counter { taps: 0 });
    let dispatcher = InputDispatcher::new();

    dispatcher.on_edge(&mut shell, LogicalButton::Secondary, false);
    assert_eq!(shell.depth(), 2);
    assert!(matches!(shell.current(), TestScreen::Sticky));
}

#[test]
fn release_edges_reach_the_screen_but_change_nothing() {
    let mut shell = shell_with(TestScreen::Counter { taps: 0 });
    let mut platform = TestPlatform::default();
    drain_dirty(&mut shell, &mut platform);
    let dispatcher = InputDispatcher::new();

    let outcome = dispatcher.on_edge(&mut shell, LogicalButton::Primary, true);
    assert_eq!(outcome, DispatchOutcome::Delivered);
    assert!(!shell.is_dirty());
    match shell.current() {
        TestScreen::Counter { taps } => assert_eq!(*taps, 0),
        _ => panic!("counter should still be active"),
    }
}

#[test]
fn both_latched_bits_serve_long_first_then_still_deliver_back() {
    let mut monitor = PowerKeyMonitor::new();
    let mut shell = shell_with(TestScreen::Root);
    shell.push(TestScreen::Counter { taps: 0 });

    let _ = monitor.observe(PowerKeyLatch::default());

    let events = monitor.observe(PowerKeyLatch {
        short_press: true,
        long_press: true,
    });
    assert!(events.long_press);
    assert!(events.short_press);

    // The poll task serves the long press (sleep) first; the short press
    // in the same tick still maps to the universal back gesture.
    if events.short_press {
        let outcome = shell.handle_back();
        assert!(outcome.popped);
    }
    assert_eq!(shell.depth(), 1);
}

#[test]
fn boot_latch_arm_short_press_with_handled_back_changes_nothing() {
    let mut monitor = PowerKeyMonitor::new();
    let mut shell = shell_with(TestScreen::Root);
    shell.push(TestScreen::Sticky);

    // Chip reset leaves both latch bits set; the first tick must not fire.
    let stale = monitor.observe(PowerKeyLatch {
        short_press: true,
        long_press: true,
    });
    assert!(!stale.any());

    // The latch self-clears before the next tick; the monitor arms quietly.
    assert!(!monitor.observe(PowerKeyLatch::default()).any());

    // A real short press now maps to the universal back gesture.
    let events = monitor.observe(PowerKeyLatch {
        short_press: true,
        long_press: false,
    });
    assert!(events.short_press);
    assert!(!events.long_press);

    let outcome = shell.handle_back();
    assert!(outcome.handled);
    assert!(!outcome.popped);
    assert!(!outcome.restart_requested);
    assert_eq!(shell.depth(), 2);
}
