//=========================================================================
// Pointer Input
//=========================================================================
//
// Pointer side of the input bridge: button and scroll handlers, cursor
// visibility requests, and the shared state the cursor-lock poll task
// works against.
//
// Architecture:
// ```text
//  UI thread                               Render thread
//  ─────────                               ─────────────
//  on_button() ──> buttons bridge ───┐
//  on_scroll() ──> motion bridge ──┐ │
//  CursorLockEmulator::poll() ─────┘ │
//                                    └──> drain_and_dispatch()
//                                         set_cursor_visible()
//                                         set_current_height()
// ```
//
// Shared fields are atomics with one writer each: cursor visibility and
// the surface height are written by the render thread, the last pointer
// position and wheel accumulator by the UI thread. Hide/show/relock
// requests are raised by the render thread and compare-and-cleared by the
// poll task.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event::{input_time_nanos, MouseButton, MouseButtonEvent, MouseMotionEvent, RawInputListener};
use crate::core::bridge::EventBridge;
use crate::core::error::UsageError;

//=== Constants ===========================================================

/// Scale applied to toolkit scroll deltas before they reach the engine.
pub const WHEEL_SCALE: f64 = 10.0;

//=== ToolkitButton =======================================================

/// Pointer button as reported by the UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolkitButton {
    Primary,
    Secondary,
    Middle,
    /// Back/forward and other extra buttons. Not forwarded to the engine.
    Other(u16),
}

static BUTTON_MAP: [(ToolkitButton, MouseButton); 3] = [
    (ToolkitButton::Primary, MouseButton::Left),
    (ToolkitButton::Secondary, MouseButton::Right),
    (ToolkitButton::Middle, MouseButton::Middle),
];

fn engine_button(button: ToolkitButton) -> Option<MouseButton> {
    BUTTON_MAP
        .iter()
        .find(|(toolkit, _)| *toolkit == button)
        .map(|(_, engine)| *engine)
}

//=== CursorAppearance ====================================================

/// Cursor shape the poll task asks the surface to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAppearance {
    Default,
    Hidden,
}

//=== CursorState =========================================================

/// Cursor visibility and pending transition requests.
#[derive(Debug)]
pub(crate) struct CursorState {
    visible: AtomicBool,
    needs_hide: AtomicBool,
    needs_show: AtomicBool,
    needs_relock: AtomicBool,
}

impl CursorState {
    fn new() -> Self {
        Self {
            visible: AtomicBool::new(true),
            needs_hide: AtomicBool::new(false),
            needs_show: AtomicBool::new(false),
            needs_relock: AtomicBool::new(false),
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    /// Consumes a pending hide request.
    pub(crate) fn take_needs_hide(&self) -> bool {
        Self::take(&self.needs_hide)
    }

    /// Consumes a pending show request.
    pub(crate) fn take_needs_show(&self) -> bool {
        Self::take(&self.needs_show)
    }

    /// Consumes a pending request to capture a new lock anchor.
    pub(crate) fn take_needs_relock(&self) -> bool {
        Self::take(&self.needs_relock)
    }

    fn take(flag: &AtomicBool) -> bool {
        flag.compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

//=== PointerInput ========================================================

/// Pointer translator shared by the UI thread and the render thread.
#[derive(Debug)]
pub struct PointerInput {
    motion: EventBridge<MouseMotionEvent>,
    buttons: EventBridge<MouseButtonEvent>,
    cursor: CursorState,

    /// Last emitted pointer position (surface-local, bottom-left origin).
    mouse_x: AtomicI32,
    mouse_y: AtomicI32,

    wheel: AtomicI32,

    /// Negotiated surface height, used for the y-flip.
    current_height: AtomicI32,
}

impl PointerInput {
    pub fn new() -> Self {
        Self {
            motion: EventBridge::new(),
            buttons: EventBridge::new(),
            cursor: CursorState::new(),
            mouse_x: AtomicI32::new(0),
            mouse_y: AtomicI32::new(0),
            wheel: AtomicI32::new(0),
            current_height: AtomicI32::new(0),
        }
    }

    //--- UI Thread: Handlers ----------------------------------------------

    /// Handles a button press or release at the last known pointer position.
    ///
    /// Returns `false` when the toolkit button has no engine counterpart.
    pub fn on_button(&self, button: ToolkitButton, pressed: bool) -> bool {
        let Some(engine) = engine_button(button) else {
            trace!(target: "input::pointer", "Unmapped toolkit button {:?} ignored", button);
            return false;
        };

        let (x, y) = self.position();
        self.buttons.push(MouseButtonEvent {
            button: engine,
            pressed,
            x,
            y,
            time: input_time_nanos(),
        });
        true
    }

    /// Handles a scroll notification.
    ///
    /// `delta_y` is the toolkit's vertical scroll amount. The scaled value is
    /// added to the wheel accumulator and reported as a wheel-only motion
    /// event.
    pub fn on_scroll(&self, delta_y: f64) {
        let delta_wheel = (delta_y * WHEEL_SCALE).round() as i32;
        let wheel = self.wheel.fetch_add(delta_wheel, Ordering::AcqRel) + delta_wheel;
        let (x, y) = self.position();

        self.motion.push(MouseMotionEvent {
            x,
            y,
            dx: 0,
            dy: 0,
            wheel,
            delta_wheel,
            time: input_time_nanos(),
        });
    }

    /// Queues a motion event and records the new position. Zero deltas are
    /// dropped.
    pub(crate) fn push_motion(&self, x: i32, y: i32, dx: i32, dy: i32) -> bool {
        if dx == 0 && dy == 0 {
            return false;
        }

        self.motion.push(MouseMotionEvent {
            x,
            y,
            dx,
            dy,
            wheel: self.wheel.load(Ordering::Acquire),
            delta_wheel: 0,
            time: input_time_nanos(),
        });
        self.mouse_x.store(x, Ordering::Release);
        self.mouse_y.store(y, Ordering::Release);
        true
    }

    pub(crate) fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    //--- Render Thread ----------------------------------------------------

    /// Requests a visible cursor or hidden, locked pointer mode.
    ///
    /// Takes effect on the poll task's next run. Repeating the current mode
    /// is a no-op.
    pub fn set_cursor_visible(&self, visible: bool) {
        let was_visible = self.cursor.visible.load(Ordering::Acquire);

        if visible && !was_visible {
            self.cursor.needs_hide.store(false, Ordering::Release);
            self.cursor.needs_relock.store(false, Ordering::Release);
            self.cursor.needs_show.store(true, Ordering::Release);
            debug!(target: "input::pointer", "Cursor show requested");
        } else if !visible && was_visible {
            self.cursor.needs_relock.store(true, Ordering::Release);
            self.cursor.needs_hide.store(true, Ordering::Release);
            self.cursor.needs_show.store(false, Ordering::Release);
            debug!(target: "input::pointer", "Cursor hide requested");
        }

        self.cursor.visible.store(visible, Ordering::Release);
    }

    /// Records the negotiated surface height. Called on every resize.
    pub fn set_current_height(&self, height: i32) {
        self.current_height.store(height, Ordering::Release);
    }

    /// Delivers queued motion events, then queued button events.
    pub fn drain_and_dispatch<R>(&self, listener: &mut R) -> usize
    where
        R: RawInputListener + ?Sized,
    {
        let motion = self.motion.drain_with(|event| listener.on_mouse_motion_event(event));
        let buttons = self.buttons.drain_with(|event| listener.on_mouse_button_event(event));
        motion + buttons
    }

    /// Custom cursor images cannot be set through the toolkit surface.
    pub fn set_native_cursor(&self) -> Result<(), UsageError> {
        Err(UsageError::Unsupported("set_native_cursor"))
    }

    //--- Queries ----------------------------------------------------------

    /// The toolkit does not expose a button count; three are assumed.
    pub fn button_count(&self) -> usize {
        BUTTON_MAP.len()
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor.is_visible()
    }

    pub fn current_height(&self) -> i32 {
        self.current_height.load(Ordering::Acquire)
    }

    /// Last emitted pointer position.
    pub fn position(&self) -> (i32, i32) {
        (
            self.mouse_x.load(Ordering::Acquire),
            self.mouse_y.load(Ordering::Acquire),
        )
    }

    pub fn wheel(&self) -> i32 {
        self.wheel.load(Ordering::Acquire)
    }
}

impl Default for PointerInput {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
