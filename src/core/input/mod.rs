//=========================================================================
// Input Bridge
//=========================================================================
//
// Keyboard and pointer translation from the UI toolkit into engine input
// events, queued for the render thread.
//
// Components:
// - `event`: engine event types and the `RawInputListener`
// - `key_map`: toolkit key → engine key code table
// - `key_input`: keyboard translator
// - `pointer_input`: button/scroll translator and shared cursor state
// - `cursor_lock`: UI-side poll task with hidden-cursor emulation
//
//=========================================================================

//=== Module Declarations =================================================

pub mod cursor_lock;
pub mod event;
pub mod key_input;
pub mod key_map;
pub mod pointer_input;

//=== Public API ==========================================================

pub use cursor_lock::{CursorLockEmulator, PointerDevice, PointerSurface, PollOutcome, ScreenBounds, ScreenPoint};
pub use event::{
    input_time_nanos, KeyCode, KeyInputEvent, MouseButton, MouseButtonEvent, MouseMotionEvent,
    RawInputListener,
};
pub use key_input::KeyInput;
pub use key_map::ToolkitKey;
pub use pointer_input::{CursorAppearance, PointerInput, ToolkitButton};
