//=========================================================================
// Key Input
//=========================================================================
//
// Translates toolkit key notifications into engine key events.
//
// Architecture:
//   UI thread:     on_key() → key_map fan-out → EventBridge<KeyInputEvent>
//   Render thread: drain_and_dispatch() → RawInputListener::on_key_event
//
// The UI thread only pushes and the render thread only drains, so no lock
// is involved.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{input_time_nanos, KeyCode, KeyInputEvent, RawInputListener};
use super::key_map::{self, ToolkitKey};
use crate::core::bridge::EventBridge;

//=== KeyInput ============================================================

/// Keyboard side of the input bridge.
///
/// Shared between the UI thread (handlers) and the render thread (drain),
/// typically behind an `Arc`.
#[derive(Debug, Default)]
pub struct KeyInput {
    events: EventBridge<KeyInputEvent>,
}

impl KeyInput {
    pub fn new() -> Self {
        Self {
            events: EventBridge::new(),
        }
    }

    //--- UI Thread --------------------------------------------------------

    /// Handles a key press or release reported by the toolkit.
    ///
    /// Enqueues one event per engine code the key maps to, all sharing one
    /// timestamp. `text` is the toolkit's text payload; its first character
    /// becomes the event's `key_char`. Returns the number of events queued.
    pub fn on_key(&self, key: ToolkitKey, text: Option<&str>, pressed: bool, repeating: bool) -> usize {
        let codes = key_map::to_engine_codes(key);
        if codes.is_empty() {
            trace!(target: "input::key", "Unmapped toolkit key {:?} ignored", key);
            return 0;
        }

        let key_char = text.and_then(|t| t.chars().next());
        let time = input_time_nanos();

        for &code in codes {
            self.events.push(KeyInputEvent {
                key: code,
                key_char,
                pressed,
                repeating,
                time,
            });
        }

        trace!(
            target: "input::key",
            "{:?} {} -> {} event(s)",
            key,
            if pressed { "pressed" } else { "released" },
            codes.len()
        );

        codes.len()
    }

    //--- Render Thread ----------------------------------------------------

    /// Delivers all queued key events to `listener` in FIFO order.
    pub fn drain_and_dispatch<R>(&self, listener: &mut R) -> usize
    where
        R: RawInputListener + ?Sized,
    {
        self.events.drain_with(|event| listener.on_key_event(event))
    }

    //--- Queries ----------------------------------------------------------

    /// Human-readable name for an engine key code.
    pub fn key_name(&self, code: KeyCode) -> &'static str {
        key_map::key_name(code)
    }

    /// Number of events waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingInput;

    #[test]
    fn plain_key_enqueues_one_event() {
        let input = KeyInput::new();

        assert_eq!(input.on_key(ToolkitKey::W, Some("w"), true, false), 1);

        let mut listener = RecordingInput::default();
        input.drain_and_dispatch(&mut listener);

        assert_eq!(listener.keys.len(), 1);
        let event = listener.keys[0];
        assert_eq!(event.key, KeyCode::KeyW);
        assert_eq!(event.key_char, Some('w'));
        assert!(event.pressed);
        assert!(!event.repeating);
    }

    #[test]
    fn collapsed_modifier_enqueues_two_events_with_one_timestamp() {
        let input = KeyInput::new();

        assert_eq!(input.on_key(ToolkitKey::Shift, None, true, false), 2);
        assert_eq!(input.pending(), 2);

        let mut listener = RecordingInput::default();
        input.drain_and_dispatch(&mut listener);

        let keys: Vec<KeyCode> = listener.keys.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![KeyCode::LeftShift, KeyCode::RightShift]);
        assert_eq!(listener.keys[0].time, listener.keys[1].time);
        assert!(listener.keys.iter().all(|e| e.key_char.is_none()));
    }

    #[test]
    fn empty_text_means_no_character() {
        let input = KeyInput::new();
        input.on_key(ToolkitKey::F5, Some(""), false, false);

        let mut listener = RecordingInput::default();
        input.drain_and_dispatch(&mut listener);

        assert_eq!(listener.keys[0].key_char, None);
        assert!(!listener.keys[0].pressed);
    }

    #[test]
    fn only_first_character_of_text_is_kept() {
        let input = KeyInput::new();
        input.on_key(ToolkitKey::A, Some("ab"), true, true);

        let mut listener = RecordingInput::default();
        input.drain_and_dispatch(&mut listener);

        assert_eq!(listener.keys[0].key_char, Some('a'));
        assert!(listener.keys[0].repeating);
    }

    #[test]
    fn drain_preserves_notification_order() {
        let input = KeyInput::new();
        input.on_key(ToolkitKey::A, None, true, false);
        input.on_key(ToolkitKey::B, None, true, false);
        input.on_key(ToolkitKey::A, None, false, false);

        let mut listener = RecordingInput::default();
        assert_eq!(input.drain_and_dispatch(&mut listener), 3);

        let seq: Vec<(KeyCode, bool)> = listener.keys.iter().map(|e| (e.key, e.pressed)).collect();
        assert_eq!(
            seq,
            vec![(KeyCode::KeyA, true), (KeyCode::KeyB, true), (KeyCode::KeyA, false)]
        );
        assert_eq!(input.drain_and_dispatch(&mut listener), 0);
    }

    #[test]
    fn key_name_uses_reverse_table() {
        let input = KeyInput::new();
        assert_eq!(input.key_name(KeyCode::LeftAlt), "Alt");
    }
}
