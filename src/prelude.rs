//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use drift_embed::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Render context
pub use crate::context::{ContextBuilder, ContextHandle, ContextState, FrameTimer, RenderContext, SystemListener};

// Errors
pub use crate::core::error::{ContextError, UsageError};

// Input
pub use crate::core::input::{
    CursorLockEmulator, KeyCode, KeyInput, KeyInputEvent, MouseButton, MouseButtonEvent, MouseMotionEvent,
    PointerDevice, PointerInput, PointerSurface, RawInputListener, ToolkitButton, ToolkitKey,
};

// Render seams
pub use crate::core::render::{
    DeviceFactory, GraphicsDevice, PresentationMode, Size, SwapChain, SwapChainProvider, TransferType,
};

// winit adapter
pub use crate::platform::InputRouter;
