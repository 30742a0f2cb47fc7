//=========================================================================
// Cursor Lock Emulation
//=========================================================================
//
// Poll task emulating a hidden, relative-motion ("disabled") cursor on a
// toolkit that only offers absolute pointer positions.
//
// The task runs on the UI thread's own periodic callback, at a rate
// unrelated to the render loop. Each poll reads the global pointer
// position and either:
//
// - Visible: converts it to surface-local coordinates (bottom-left
//   origin) and emits the delta from the previous poll.
// - Hidden: measures the displacement from a lock anchor, emits it as
//   relative motion and warps the real pointer back onto the anchor, so
//   it never leaves the surface or hits a screen edge.
//
// State machine (per poll):
// ```text
//  visible ──set_cursor_visible(false)──> [relock] ──anchor──> hidden
//     ↑                                                          │
//     └────────── [show: warp to anchor, default cursor] <───────┘
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::pointer_input::{CursorAppearance, PointerInput};

//=== Geometry ============================================================

/// Point in global screen coordinates (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle occupied by the embedded surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenBounds {
    pub const fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self { min_x, min_y, width, height }
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x() && p.y >= self.min_y && p.y <= self.max_y()
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.min_x + self.width / 2.0, self.min_y + self.height / 2.0)
    }
}

//=== Toolkit Seams =======================================================

/// UI-side view of the embedded surface, queried on the UI thread.
pub trait PointerSurface {
    /// Whether the window hosting the surface has input focus.
    fn is_focused(&self) -> bool;

    /// Current surface bounds in screen coordinates.
    fn screen_bounds(&self) -> ScreenBounds;

    /// Converts a screen point to surface-local coordinates (top-left origin).
    fn screen_to_local(&self, p: ScreenPoint) -> (f64, f64);

    fn set_cursor(&self, cursor: CursorAppearance);
}

/// Global pointer access (the toolkit's "robot").
pub trait PointerDevice {
    fn position(&self) -> ScreenPoint;

    /// Moves the real pointer to `p`.
    fn warp_to(&mut self, p: ScreenPoint);
}

//=== PollOutcome =========================================================

/// What a single poll did. Mostly useful for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Window not focused; nothing was read or changed.
    Unfocused,

    /// Pointer outside the surface, or no movement.
    Idle,

    /// New lock anchor captured; no event emitted.
    Anchored,

    /// A motion event was queued.
    Moved,
}

//=== CursorLockEmulator ==================================================

/// UI-thread poll task owning the lock anchor and last local position.
pub struct CursorLockEmulator {
    input: Arc<PointerInput>,
    /// Set while the pointer is locked.
    anchor: Option<ScreenPoint>,
    last_local: (i32, i32),
}

impl CursorLockEmulator {
    pub fn new(input: Arc<PointerInput>) -> Self {
        Self {
            input,
            anchor: None,
            last_local: (0, 0),
        }
    }

    /// Runs one poll. Call from the UI thread's periodic callback.
    pub fn poll<S, D>(&mut self, surface: &S, device: &mut D) -> PollOutcome
    where
        S: PointerSurface + ?Sized,
        D: PointerDevice + ?Sized,
    {
        if !surface.is_focused() {
            return PollOutcome::Unfocused;
        }

        let cursor = self.input.cursor();

        //--- Pending appearance changes -----------------------------------
        if cursor.take_needs_hide() {
            surface.set_cursor(CursorAppearance::Hidden);
        }
        if cursor.take_needs_show() {
            // Hide and show may both land between two polls; then nothing
            // was locked and the pointer stays where it is.
            if let Some(anchor) = self.anchor.take() {
                device.warp_to(anchor);
                trace!(target: "input::pointer", "Cursor released at {:?}", anchor);
            }
            surface.set_cursor(CursorAppearance::Default);
        }

        let bounds = surface.screen_bounds();
        let pointer = device.position();

        if cursor.is_visible() {
            if !bounds.contains(pointer) {
                return PollOutcome::Idle;
            }
            self.poll_visible(surface, pointer)
        } else {
            let relock = cursor.take_needs_relock();
            match self.anchor {
                Some(anchor) if !relock => self.poll_hidden(device, pointer, anchor),
                _ => {
                    let anchor = if bounds.contains(pointer) { pointer } else { bounds.center() };
                    self.anchor = Some(anchor);
                    trace!(target: "input::pointer", "Cursor locked at {:?}", anchor);
                    PollOutcome::Anchored
                }
            }
        }
    }

    fn poll_visible<S>(&mut self, surface: &S, pointer: ScreenPoint) -> PollOutcome
    where
        S: PointerSurface + ?Sized,
    {
        let (lx, ly) = surface.screen_to_local(pointer);
        let x = lx.round() as i32;
        let y = self.input.current_height() - ly.round() as i32;

        let dx = x - self.last_local.0;
        let dy = y - self.last_local.1;
        self.last_local = (x, y);

        if self.input.push_motion(x, y, dx, dy) {
            PollOutcome::Moved
        } else {
            PollOutcome::Idle
        }
    }

    fn poll_hidden<D>(&mut self, device: &mut D, pointer: ScreenPoint, anchor: ScreenPoint) -> PollOutcome
    where
        D: PointerDevice + ?Sized,
    {
        let dx = (pointer.x - anchor.x).round() as i32;
        let dy = (pointer.y - anchor.y).round() as i32;

        let x = self.last_local.0 + dx;
        let y = self.last_local.1 + dy;
        self.last_local = (x, y);

        device.warp_to(anchor);

        // Screen y grows downwards while the warp consumes the displacement,
        // so the vertical delta is reported inverted.
        if self.input.push_motion(x, y, dx, -dy) {
            PollOutcome::Moved
        } else {
            PollOutcome::Idle
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Current lock anchor in screen coordinates, if the pointer is locked.
    pub fn anchor(&self) -> Option<ScreenPoint> {
        self.anchor
    }

    /// Last tracked surface-local pointer position.
    pub fn last_local(&self) -> (i32, i32) {
        self.last_local
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseMotionEvent;
    use crate::testing::{FakePointerDevice, FakePointerSurface, RecordingInput};

    // Surface at (100, 50) on screen, 640x480.
    fn setup() -> (Arc<PointerInput>, CursorLockEmulator, FakePointerSurface, FakePointerDevice) {
        let input = Arc::new(PointerInput::new());
        input.set_current_height(480);
        let emulator = CursorLockEmulator::new(Arc::clone(&input));
        let surface = FakePointerSurface::new(ScreenBounds::new(100.0, 50.0, 640.0, 480.0));
        let device = FakePointerDevice::at(ScreenPoint::new(200.0, 150.0));
        (input, emulator, surface, device)
    }

    fn drain_motion(input: &PointerInput) -> Vec<MouseMotionEvent> {
        let mut listener = RecordingInput::default();
        input.drain_and_dispatch(&mut listener);
        listener.motions
    }

    #[test]
    fn bounds_contains_is_edge_inclusive() {
        let bounds = ScreenBounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(bounds.contains(ScreenPoint::new(0.0, 0.0)));
        assert!(bounds.contains(ScreenPoint::new(10.0, 10.0)));
        assert!(!bounds.contains(ScreenPoint::new(10.5, 5.0)));
        assert_eq!(bounds.center(), ScreenPoint::new(5.0, 5.0));
    }

    #[test]
    fn unfocused_poll_does_nothing() {
        let (input, mut emulator, mut surface, mut device) = setup();
        surface.focused = false;
        input.set_cursor_visible(false);

        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Unfocused);
        assert!(surface.cursors.borrow().is_empty());
        assert!(drain_motion(&input).is_empty());
    }

    #[test]
    fn visible_poll_flips_y_and_emits_delta() {
        let (input, mut emulator, surface, mut device) = setup();

        // Local (100, 100) → engine (100, 380)
        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Moved);
        device.pos = ScreenPoint::new(210.0, 140.0);
        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Moved);

        let motions = drain_motion(&input);
        assert_eq!(motions.len(), 2);
        assert_eq!((motions[0].x, motions[0].y), (100, 380));
        assert_eq!((motions[1].x, motions[1].y), (110, 390));
        assert_eq!((motions[1].dx, motions[1].dy), (10, 10));
        assert_eq!(input.position(), (110, 390));
    }

    #[test]
    fn visible_poll_without_motion_is_idle() {
        let (input, mut emulator, surface, mut device) = setup();
        emulator.poll(&surface, &mut device);
        drain_motion(&input);

        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Idle);
        assert!(drain_motion(&input).is_empty());
    }

    #[test]
    fn visible_poll_outside_surface_is_ignored() {
        let (input, mut emulator, surface, mut device) = setup();
        device.pos = ScreenPoint::new(5.0, 5.0);

        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Idle);
        assert!(drain_motion(&input).is_empty());
    }

    #[test]
    fn hide_then_two_polls_anchors_then_reports_inverted_delta() {
        let (input, mut emulator, surface, mut device) = setup();
        emulator.poll(&surface, &mut device);
        drain_motion(&input);
        let before = emulator.last_local();

        input.set_cursor_visible(false);

        // First poll: anchor capture only.
        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Anchored);
        assert_eq!(emulator.anchor(), Some(ScreenPoint::new(200.0, 150.0)));
        assert_eq!(surface.cursors.borrow().as_slice(), &[CursorAppearance::Hidden]);
        assert!(drain_motion(&input).is_empty());

        // Second poll: user moved the pointer by (7, 4).
        device.pos = ScreenPoint::new(207.0, 154.0);
        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Moved);

        let motions = drain_motion(&input);
        assert_eq!(motions.len(), 1);
        assert_eq!((motions[0].dx, motions[0].dy), (7, -4));
        assert_eq!(emulator.last_local(), (before.0 + 7, before.1 + 4));
        assert_eq!(device.pos, ScreenPoint::new(200.0, 150.0), "Pointer must be warped back");
        assert_eq!(device.warps.last(), Some(&ScreenPoint::new(200.0, 150.0)));
    }

    #[test]
    fn anchor_falls_back_to_surface_center() {
        let (input, mut emulator, surface, mut device) = setup();
        device.pos = ScreenPoint::new(0.0, 0.0);
        input.set_cursor_visible(false);

        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Anchored);
        assert_eq!(emulator.anchor(), Some(ScreenPoint::new(420.0, 290.0)));
    }

    #[test]
    fn hidden_poll_without_motion_still_warps_but_emits_nothing() {
        let (input, mut emulator, surface, mut device) = setup();
        input.set_cursor_visible(false);
        emulator.poll(&surface, &mut device);

        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Idle);
        assert_eq!(device.warps.len(), 1);
        assert!(drain_motion(&input).is_empty());
    }

    #[test]
    fn hide_show_round_trip_keeps_local_position() {
        let (input, mut emulator, surface, mut device) = setup();
        emulator.poll(&surface, &mut device);
        let start = emulator.last_local();
        drain_motion(&input);

        input.set_cursor_visible(false);
        emulator.poll(&surface, &mut device);
        emulator.poll(&surface, &mut device);

        input.set_cursor_visible(true);
        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Idle);

        assert_eq!(emulator.last_local(), start);
        assert!(drain_motion(&input).is_empty());
        assert_eq!(
            surface.cursors.borrow().as_slice(),
            &[CursorAppearance::Hidden, CursorAppearance::Default]
        );
    }

    #[test]
    fn hide_then_show_between_polls_leaves_pointer_alone() {
        let (input, mut emulator, surface, mut device) = setup();
        emulator.poll(&surface, &mut device);
        drain_motion(&input);

        input.set_cursor_visible(false);
        input.set_cursor_visible(true);
        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Idle);

        assert!(device.warps.is_empty(), "No anchor was captured, nothing to warp to");
        assert_eq!(device.pos, ScreenPoint::new(200.0, 150.0));
        assert_eq!(emulator.anchor(), None);
        assert_eq!(surface.cursors.borrow().as_slice(), &[CursorAppearance::Default]);

        // A later hide still captures a fresh anchor.
        input.set_cursor_visible(false);
        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Anchored);
        assert_eq!(emulator.anchor(), Some(ScreenPoint::new(200.0, 150.0)));
    }

    #[test]
    fn hidden_motion_rounds_fractional_displacement() {
        let (input, mut emulator, surface, mut device) = setup();
        input.set_cursor_visible(false);
        emulator.poll(&surface, &mut device);

        device.pos = ScreenPoint::new(200.6, 149.4);
        assert_eq!(emulator.poll(&surface, &mut device), PollOutcome::Moved);

        let motions = drain_motion(&input);
        assert_eq!((motions[0].dx, motions[0].dy), (1, 1));
    }

    #[test]
    fn show_warps_pointer_back_to_anchor() {
        let (input, mut emulator, surface, mut device) = setup();
        input.set_cursor_visible(false);
        emulator.poll(&surface, &mut device);

        input.set_cursor_visible(true);
        device.pos = ScreenPoint::new(600.0, 400.0);
        emulator.poll(&surface, &mut device);

        assert_eq!(device.warps.last(), Some(&ScreenPoint::new(200.0, 150.0)));
        assert!(input.is_cursor_visible());
    }
}
