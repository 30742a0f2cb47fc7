//=========================================================================
// Platform Subsystem
//
// winit adapter for hosts that drive the embedded context from a winit
// event loop.
//
// ```text
//  winit event loop (UI thread)
//    │
//    ├─ InputRouter::route(WindowEvent)
//    │    ├─ KeyboardInput ──> KeyInput::on_key
//    │    ├─ MouseInput ─────> PointerInput::on_button
//    │    ├─ MouseWheel ─────> PointerInput::on_scroll
//    │    └─ CloseRequested ─> ContextHandle::destroy
//    │
//    └─ (bridges drained by the render thread each frame)
// ```
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event_mapper;
mod input_router;

//=== Public API ==========================================================

pub use event_mapper::{scroll_lines, PIXELS_PER_LINE};
pub use input_router::InputRouter;
