//=========================================================================
// Raw Input Events
//
// Engine-side representation of keyboard and pointer input as it leaves
// the UI toolkit and enters the render thread.
//
// Responsibilities:
// - Define engine key codes and mouse buttons
// - Define the three raw event kinds (key, motion, button)
// - Stamp events with a monotonic nanosecond timestamp at enqueue time
// - Define the listener that receives drained events
//
// Event Flow:
// ```text
// UI toolkit notification
//         ↓
//    KeyInput / PointerInput (translate + timestamp)
//         ↓
//    EventBridge (FIFO per kind)
//         ↓
//    RawInputListener (render thread, once per frame)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::OnceLock;
use std::time::Instant;

//=== MouseButton =========================================================

/// Engine mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,
}

//=== KeyCode =============================================================

/// Engine keyboard key identifier.
///
/// Unlike toolkit identifiers, left and right modifier variants are
/// distinct, and numpad keys never alias their main-block counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Punctuation ------------------------------------------------------
    Minus, Equals, LeftBracket, RightBracket, Semicolon, Apostrophe,
    Grave, Backslash, Comma, Period, Slash,

    //--- Editing & Whitespace ---------------------------------------------
    Escape, Backspace, Tab, Return, Space, Insert, Delete,

    //--- Navigation -------------------------------------------------------
    Home, End, PageUp, PageDown,
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,

    //--- Modifiers (sided) ------------------------------------------------
    LeftShift, RightShift,
    LeftControl, RightControl,
    LeftAlt, RightAlt,
    LeftMeta, RightMeta,

    //--- Locks & System ---------------------------------------------------
    CapsLock, NumLock, ScrollLock, PrintScreen, Pause,

    //--- Numpad -----------------------------------------------------------
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter, NumpadEquals, NumpadComma,

    /// Key the toolkit reported but could not identify.
    Unknown,
}

//=== Timestamps ==========================================================

/// Monotonic input clock in nanoseconds.
///
/// Measured from the first call in this process. Only differences between
/// timestamps are meaningful.
pub fn input_time_nanos() -> u64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as u64
}

//=== KeyInputEvent =======================================================

/// Key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInputEvent {
    pub key: KeyCode,

    /// First printable character of the notification, if any.
    pub key_char: Option<char>,

    pub pressed: bool,

    /// Auto-repeat generated by holding the key.
    pub repeating: bool,

    /// Enqueue time, see [`input_time_nanos`].
    pub time: u64,
}

//=== MouseMotionEvent ====================================================

/// Pointer motion or wheel change.
///
/// Coordinates are surface-local with a bottom-left origin. A pure wheel
/// event has `dx == dy == 0` and a non-zero `delta_wheel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMotionEvent {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,

    /// Accumulated wheel position.
    pub wheel: i32,

    pub delta_wheel: i32,
    pub time: u64,
}

//=== MouseButtonEvent ====================================================

/// Pointer button press or release at the last known pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub pressed: bool,
    pub x: i32,
    pub y: i32,
    pub time: u64,
}

//=== RawInputListener ====================================================

/// Receiver of drained input events.
///
/// Only ever called on the render thread, while the translators drain their
/// bridges at the start of a frame.
pub trait RawInputListener {
    fn on_key_event(&mut self, event: KeyInputEvent);
    fn on_mouse_motion_event(&mut self, event: MouseMotionEvent);
    fn on_mouse_button_event(&mut self, event: MouseButtonEvent);
}

//=========================================================================
// Unit Tests
//=========================================================================
