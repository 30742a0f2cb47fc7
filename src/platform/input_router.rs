//=========================================================================
// Input Router
//
// Feeds winit window events into the input translators.
//
// Runs on the thread that owns the winit event loop (the UI thread). Key,
// button and wheel events go to the translators' bridges; a close request
// asks the render context to shut down. Pointer motion is not routed: the
// cursor-lock poll task samples the pointer position itself.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Dependencies ===============================================

use log::{info, trace};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

//=== Internal Dependencies ===============================================

use super::event_mapper::scroll_lines;
use crate::context::ContextHandle;
use crate::core::input::{KeyInput, PointerInput, ToolkitButton, ToolkitKey};

//=== InputRouter =========================================================

pub struct InputRouter {
    key_input: Arc<KeyInput>,
    pointer_input: Arc<PointerInput>,
    handle: Option<ContextHandle>,
}

impl InputRouter {
    pub fn new(key_input: Arc<KeyInput>, pointer_input: Arc<PointerInput>) -> Self {
        Self {
            key_input,
            pointer_input,
            handle: None,
        }
    }

    /// Routes `CloseRequested` to `handle.destroy()`.
    pub fn with_context_handle(mut self, handle: ContextHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Routes one window event. Returns `true` if the event was consumed.
    pub fn route(&self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.route_key(
                    key_event.physical_key,
                    key_event.text.as_deref(),
                    key_event.state,
                    key_event.repeat,
                );
                true
            }

            WindowEvent::MouseInput { state, button, .. } => self.route_button(*button, *state),

            WindowEvent::MouseWheel { delta, .. } => {
                self.route_scroll(*delta);
                true
            }

            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                match &self.handle {
                    Some(handle) => {
                        handle.destroy(false);
                        true
                    }
                    None => false,
                }
            }

            _ => false,
        }
    }

    //--- Per-Kind Routing -------------------------------------------------

    pub fn route_key(&self, key: PhysicalKey, text: Option<&str>, state: ElementState, repeat: bool) -> usize {
        let toolkit = ToolkitKey::from(key);
        self.key_input.on_key(toolkit, text, state.is_pressed(), repeat)
    }

    pub fn route_button(&self, button: WinitMouseButton, state: ElementState) -> bool {
        let toolkit = ToolkitButton::from(button);
        self.pointer_input.on_button(toolkit, state.is_pressed())
    }

    pub fn route_scroll(&self, delta: MouseScrollDelta) {
        let lines = scroll_lines(delta);
        trace!(target: "platform", "Scroll {:?} -> {} line(s)", delta, lines);
        self.pointer_input.on_scroll(lines);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
