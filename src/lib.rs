//=========================================================================
// Drift Embed - Library Root
//
// Runs an engine's render loop on a dedicated thread, drawing into an
// off-screen surface owned by a host UI toolkit, and bridges the toolkit's
// input onto that thread.
//
// Responsibilities:
// - Configure and spawn the render context (`ContextBuilder`)
// - Translate toolkit keyboard/pointer input into engine events
// - Emulate a locked, hidden cursor on toolkits without pointer lock
// - Adapt winit window events for hosts built on winit
//
// Typical usage:
// ```ignore
// use drift_embed::prelude::*;
//
// let context = ContextBuilder::new().build(listener, surface, devices);
// let keys = context.key_input();      // hand to the toolkit's key handler
// let handle = context.handle();       // keep for shutdown
// let render_thread = context.create()?;
//
// // ... later, from the UI thread:
// handle.destroy(false);
// render_thread.join().ok();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the thread-agnostic building blocks: event bridges, input
// translation, render seams and error types.
//
// `context` holds the render context and the render thread.
//
// `platform` holds the winit adapter.
//
pub mod context;
pub mod core;
pub mod platform;
pub mod prelude;

//--- Test Support --------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing;

//--- Public Exports ------------------------------------------------------

pub use crate::context::{ContextBuilder, ContextHandle, ContextState, FrameTimer, RenderContext, SystemListener};
pub use crate::core::{ContextError, UsageError};
