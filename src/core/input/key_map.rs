//=========================================================================
// Key Map
//
// Static translation table between toolkit key identifiers and engine
// key codes.
//
// The toolkit reports a single identifier for both sides of a modifier
// (one `Shift` for left and right shift), and a single `Enter`, `Equals`
// and `Comma` for the main block and the numpad. Those identifiers fan out
// to every engine code they may stand for, so that engine bindings on
// either side still fire.
//
// The table is immutable. Forward and reverse lookups are built once on
// first use; the reverse lookup keeps the first toolkit key (in table
// order) that lists a given engine code.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::sync::OnceLock;

//=== Internal Modules ====================================================

use super::event::KeyCode;

//=== ToolkitKey ==========================================================

/// Key identifier as reported by the UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolkitKey {
    Undefined,
    Escape,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    Minus, Equals, BackSpace, Tab,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    OpenBracket, CloseBracket, Enter,
    Shift, Control, Alt, Meta,
    Semicolon, Quote, BackQuote, BackSlash, Comma, Period, Slash,
    Space, CapsLock,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    NumLock, ScrollLock,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    Add, Subtract, Multiply, Divide, Decimal,
    Home, End, PageUp, PageDown, Up, Down, Left, Right,
    Insert, Delete, PrintScreen, Pause,
}

//=== Table ===============================================================

struct Entry {
    key: ToolkitKey,
    name: &'static str,
    codes: &'static [KeyCode],
}

const fn entry(key: ToolkitKey, name: &'static str, codes: &'static [KeyCode]) -> Entry {
    Entry { key, name, codes }
}

use KeyCode as K;
use ToolkitKey as T;

static TABLE: &[Entry] = &[
    entry(T::Undefined, "Undefined", &[K::Unknown]),
    entry(T::Escape, "Esc", &[K::Escape]),

    //--- Digits -----------------------------------------------------------
    entry(T::Digit1, "1", &[K::Digit1]),
    entry(T::Digit2, "2", &[K::Digit2]),
    entry(T::Digit3, "3", &[K::Digit3]),
    entry(T::Digit4, "4", &[K::Digit4]),
    entry(T::Digit5, "5", &[K::Digit5]),
    entry(T::Digit6, "6", &[K::Digit6]),
    entry(T::Digit7, "7", &[K::Digit7]),
    entry(T::Digit8, "8", &[K::Digit8]),
    entry(T::Digit9, "9", &[K::Digit9]),
    entry(T::Digit0, "0", &[K::Digit0]),

    entry(T::Minus, "Minus", &[K::Minus]),
    entry(T::Equals, "Equals", &[K::Equals, K::NumpadEquals]),
    entry(T::BackSpace, "Backspace", &[K::Backspace]),
    entry(T::Tab, "Tab", &[K::Tab]),

    //--- Letters ----------------------------------------------------------
    entry(T::A, "A", &[K::KeyA]),
    entry(T::B, "B", &[K::KeyB]),
    entry(T::C, "C", &[K::KeyC]),
    entry(T::D, "D", &[K::KeyD]),
    entry(T::E, "E", &[K::KeyE]),
    entry(T::F, "F", &[K::KeyF]),
    entry(T::G, "G", &[K::KeyG]),
    entry(T::H, "H", &[K::KeyH]),
    entry(T::I, "I", &[K::KeyI]),
    entry(T::J, "J", &[K::KeyJ]),
    entry(T::K, "K", &[K::KeyK]),
    entry(T::L, "L", &[K::KeyL]),
    entry(T::M, "M", &[K::KeyM]),
    entry(T::N, "N", &[K::KeyN]),
    entry(T::O, "O", &[K::KeyO]),
    entry(T::P, "P", &[K::KeyP]),
    entry(T::Q, "Q", &[K::KeyQ]),
    entry(T::R, "R", &[K::KeyR]),
    entry(T::S, "S", &[K::KeyS]),
    entry(T::T, "T", &[K::KeyT]),
    entry(T::U, "U", &[K::KeyU]),
    entry(T::V, "V", &[K::KeyV]),
    entry(T::W, "W", &[K::KeyW]),
    entry(T::X, "X", &[K::KeyX]),
    entry(T::Y, "Y", &[K::KeyY]),
    entry(T::Z, "Z", &[K::KeyZ]),

    //--- Punctuation ------------------------------------------------------
    entry(T::OpenBracket, "Open Bracket", &[K::LeftBracket]),
    entry(T::CloseBracket, "Close Bracket", &[K::RightBracket]),
    entry(T::Enter, "Enter", &[K::NumpadEnter, K::Return]),
    entry(T::Semicolon, "Semicolon", &[K::Semicolon]),
    entry(T::Quote, "Quote", &[K::Apostrophe]),
    entry(T::BackQuote, "Back Quote", &[K::Grave]),
    entry(T::BackSlash, "Back Slash", &[K::Backslash]),
    entry(T::Comma, "Comma", &[K::NumpadComma, K::Comma]),
    entry(T::Period, "Period", &[K::Period]),
    entry(T::Slash, "Slash", &[K::Slash]),
    entry(T::Space, "Space", &[K::Space]),

    //--- Modifiers --------------------------------------------------------
    entry(T::Shift, "Shift", &[K::LeftShift, K::RightShift]),
    entry(T::Control, "Ctrl", &[K::LeftControl, K::RightControl]),
    entry(T::Alt, "Alt", &[K::LeftAlt, K::RightAlt]),
    entry(T::Meta, "Meta", &[K::LeftMeta, K::RightMeta]),

    //--- Function Keys ----------------------------------------------------
    entry(T::F1, "F1", &[K::F1]),
    entry(T::F2, "F2", &[K::F2]),
    entry(T::F3, "F3", &[K::F3]),
    entry(T::F4, "F4", &[K::F4]),
    entry(T::F5, "F5", &[K::F5]),
    entry(T::F6, "F6", &[K::F6]),
    entry(T::F7, "F7", &[K::F7]),
    entry(T::F8, "F8", &[K::F8]),
    entry(T::F9, "F9", &[K::F9]),
    entry(T::F10, "F10", &[K::F10]),
    entry(T::F11, "F11", &[K::F11]),
    entry(T::F12, "F12", &[K::F12]),

    //--- Locks ------------------------------------------------------------
    entry(T::CapsLock, "Caps Lock", &[K::CapsLock]),
    entry(T::NumLock, "Num Lock", &[K::NumLock]),
    entry(T::ScrollLock, "Scroll Lock", &[K::ScrollLock]),

    //--- Numpad -----------------------------------------------------------
    entry(T::Numpad7, "Numpad 7", &[K::Numpad7]),
    entry(T::Numpad8, "Numpad 8", &[K::Numpad8]),
    entry(T::Numpad9, "Numpad 9", &[K::Numpad9]),
    entry(T::Subtract, "Subtract", &[K::NumpadSubtract]),
    entry(T::Numpad4, "Numpad 4", &[K::Numpad4]),
    entry(T::Numpad5, "Numpad 5", &[K::Numpad5]),
    entry(T::Numpad6, "Numpad 6", &[K::Numpad6]),
    entry(T::Add, "Add", &[K::NumpadAdd]),
    entry(T::Numpad1, "Numpad 1", &[K::Numpad1]),
    entry(T::Numpad2, "Numpad 2", &[K::Numpad2]),
    entry(T::Numpad3, "Numpad 3", &[K::Numpad3]),
    entry(T::Numpad0, "Numpad 0", &[K::Numpad0]),
    entry(T::Decimal, "Decimal", &[K::NumpadDecimal]),
    entry(T::Multiply, "Multiply", &[K::NumpadMultiply]),
    entry(T::Divide, "Divide", &[K::NumpadDivide]),

    //--- Navigation & System ----------------------------------------------
    entry(T::PrintScreen, "Print Screen", &[K::PrintScreen]),
    entry(T::Pause, "Pause", &[K::Pause]),
    entry(T::Home, "Home", &[K::Home]),
    entry(T::Up, "Up", &[K::ArrowUp]),
    entry(T::PageUp, "Page Up", &[K::PageUp]),
    entry(T::Left, "Left", &[K::ArrowLeft]),
    entry(T::Right, "Right", &[K::ArrowRight]),
    entry(T::End, "End", &[K::End]),
    entry(T::Down, "Down", &[K::ArrowDown]),
    entry(T::PageDown, "Page Down", &[K::PageDown]),
    entry(T::Insert, "Insert", &[K::Insert]),
    entry(T::Delete, "Delete", &[K::Delete]),
];

//=== Lookups =============================================================

struct Lookups {
    forward: HashMap<ToolkitKey, &'static Entry>,
    reverse: HashMap<KeyCode, &'static Entry>,
}

fn lookups() -> &'static Lookups {
    static LOOKUPS: OnceLock<Lookups> = OnceLock::new();
    LOOKUPS.get_or_init(|| {
        let mut forward = HashMap::with_capacity(TABLE.len());
        let mut reverse = HashMap::with_capacity(TABLE.len() + 8);

        for entry in TABLE {
            forward.insert(entry.key, entry);
            for code in entry.codes {
                reverse.entry(*code).or_insert(entry);
            }
        }

        Lookups { forward, reverse }
    })
}

/// Engine key codes a toolkit key stands for.
///
/// Returns an empty slice for keys the table does not know, one code for
/// ordinary keys and two for collapsed identifiers such as `Shift`.
pub fn to_engine_codes(key: ToolkitKey) -> &'static [KeyCode] {
    match lookups().forward.get(&key) {
        Some(entry) => entry.codes,
        None => &[],
    }
}

/// First toolkit key (in table order) mapping to `code`, or
/// [`ToolkitKey::Undefined`].
pub fn from_engine_code(code: KeyCode) -> ToolkitKey {
    lookups().reverse.get(&code).map_or(ToolkitKey::Undefined, |entry| entry.key)
}

/// Display name of the toolkit key mapping to `code`.
pub fn key_name(code: KeyCode) -> &'static str {
    lookups().reverse.get(&code).map_or("Undefined", |entry| entry.name)
}

//=========================================================================
// Unit Tests
//=========================================================================
