//=========================================================================
// Platform Event Mapper
//
// Converts winit input identifiers into the toolkit-level identifiers the
// input translators consume.
//
// winit reports left and right modifiers separately; they collapse into
// one toolkit modifier here and fan back out to both engine codes in the
// key map. Keys without a toolkit counterpart become `Undefined`.
//
//=========================================================================

use winit::event::{MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::core::input::{ToolkitButton, ToolkitKey};

/// Pixel scroll distance treated as one line.
pub const PIXELS_PER_LINE: f64 = 20.0;

//=== Key Conversion ======================================================

impl From<WinitKeyCode> for ToolkitKey {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Escape => Self::Escape,

            //--- Numeric keys -----------------------------------------------------
            W::Digit0 => Self::Digit0, W::Digit1 => Self::Digit1,
            W::Digit2 => Self::Digit2, W::Digit3 => Self::Digit3,
            W::Digit4 => Self::Digit4, W::Digit5 => Self::Digit5,
            W::Digit6 => Self::Digit6, W::Digit7 => Self::Digit7,
            W::Digit8 => Self::Digit8, W::Digit9 => Self::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            W::KeyA => Self::A, W::KeyB => Self::B, W::KeyC => Self::C,
            W::KeyD => Self::D, W::KeyE => Self::E, W::KeyF => Self::F,
            W::KeyG => Self::G, W::KeyH => Self::H, W::KeyI => Self::I,
            W::KeyJ => Self::J, W::KeyK => Self::K, W::KeyL => Self::L,
            W::KeyM => Self::M, W::KeyN => Self::N, W::KeyO => Self::O,
            W::KeyP => Self::P, W::KeyQ => Self::Q, W::KeyR => Self::R,
            W::KeyS => Self::S, W::KeyT => Self::T, W::KeyU => Self::U,
            W::KeyV => Self::V, W::KeyW => Self::W, W::KeyX => Self::X,
            W::KeyY => Self::Y, W::KeyZ => Self::Z,

            //--- Punctuation ------------------------------------------------------
            W::Minus => Self::Minus, W::Equal => Self::Equals,
            W::BracketLeft => Self::OpenBracket, W::BracketRight => Self::CloseBracket,
            W::Semicolon => Self::Semicolon, W::Quote => Self::Quote,
            W::Backquote => Self::BackQuote, W::Backslash => Self::BackSlash,
            W::Comma => Self::Comma, W::Period => Self::Period, W::Slash => Self::Slash,

            //--- Editing ----------------------------------------------------------
            W::Backspace => Self::BackSpace, W::Tab => Self::Tab,
            W::Enter => Self::Enter, W::Space => Self::Space,
            W::Insert => Self::Insert, W::Delete => Self::Delete,

            //--- Modifiers (sides collapse) ---------------------------------------
            W::ShiftLeft | W::ShiftRight => Self::Shift,
            W::ControlLeft | W::ControlRight => Self::Control,
            W::AltLeft | W::AltRight => Self::Alt,
            W::SuperLeft | W::SuperRight | W::Meta => Self::Meta,

            //--- Locks ------------------------------------------------------------
            W::CapsLock => Self::CapsLock, W::NumLock => Self::NumLock,
            W::ScrollLock => Self::ScrollLock,

            //--- Function keys ----------------------------------------------------
            W::F1 => Self::F1, W::F2 => Self::F2, W::F3 => Self::F3,
            W::F4 => Self::F4, W::F5 => Self::F5, W::F6 => Self::F6,
            W::F7 => Self::F7, W::F8 => Self::F8, W::F9 => Self::F9,
            W::F10 => Self::F10, W::F11 => Self::F11, W::F12 => Self::F12,

            //--- Numpad -----------------------------------------------------------
            W::Numpad0 => Self::Numpad0, W::Numpad1 => Self::Numpad1,
            W::Numpad2 => Self::Numpad2, W::Numpad3 => Self::Numpad3,
            W::Numpad4 => Self::Numpad4, W::Numpad5 => Self::Numpad5,
            W::Numpad6 => Self::Numpad6, W::Numpad7 => Self::Numpad7,
            W::Numpad8 => Self::Numpad8, W::Numpad9 => Self::Numpad9,
            W::NumpadAdd => Self::Add, W::NumpadSubtract => Self::Subtract,
            W::NumpadMultiply => Self::Multiply, W::NumpadDivide => Self::Divide,
            W::NumpadDecimal => Self::Decimal,
            W::NumpadEnter => Self::Enter,
            W::NumpadEqual => Self::Equals,
            W::NumpadComma => Self::Comma,

            //--- Navigation -------------------------------------------------------
            W::Home => Self::Home, W::End => Self::End,
            W::PageUp => Self::PageUp, W::PageDown => Self::PageDown,
            W::ArrowUp => Self::Up, W::ArrowDown => Self::Down,
            W::ArrowLeft => Self::Left, W::ArrowRight => Self::Right,
            W::PrintScreen => Self::PrintScreen, W::Pause => Self::Pause,

            //--- Fallback ---------------------------------------------------------
            _ => Self::Undefined,
        }
    }
}

impl From<PhysicalKey> for ToolkitKey {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(code) => code.into(),
            PhysicalKey::Unidentified(_) => Self::Undefined,
        }
    }
}

//=== Mouse Conversion ====================================================

impl From<WinitMouseButton> for ToolkitButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => Self::Primary,
            WinitMouseButton::Right => Self::Secondary,
            WinitMouseButton::Middle => Self::Middle,
            WinitMouseButton::Back => Self::Other(3),
            WinitMouseButton::Forward => Self::Other(4),
            WinitMouseButton::Other(id) => Self::Other(id),
        }
    }
}

/// Vertical scroll amount in lines. Pixel deltas are converted with
/// [`PIXELS_PER_LINE`].
pub fn scroll_lines(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
