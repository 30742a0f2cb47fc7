//=========================================================================
// Render Context
//
// Entry point for embedding an engine's render loop inside a UI toolkit
// surface.
//
// Architecture:
// ```text
//     ContextBuilder ──build()──> RenderContext ──create()──> [render thread]
//         │                          │                          │
//         ├─ with_disable_debug_...  ├─ key_input()             └─ RenderLoop
//         ├─ with_force_main_...     ├─ pointer_input()
//         ├─ with_buffer_count()     └─ handle() ──> ContextHandle
//         └─ with_presentation_...                     ├─ destroy()
//                                                      └─ state()
// ```
//
// The embedding thread keeps the input translators (to wire toolkit
// handlers) and a `ContextHandle` (to request shutdown). Everything else
// moves onto the render thread at `create()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod frame_timer;
mod lifecycle;
mod render_loop;

//=== Standard Library Imports ============================================

use std::sync::Arc;
use std::thread::{self, JoinHandle};

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::{ContextError, UsageError};
use crate::core::input::{KeyInput, PointerInput, RawInputListener};
use crate::core::render::{DeviceFactory, PresentationMode, SwapChainProvider, TransferType};
use lifecycle::Lifecycle;
use render_loop::RenderLoop;

//=== Public Exports ======================================================

pub use frame_timer::FrameTimer;
pub use lifecycle::ContextState;

//=== SystemListener ======================================================

/// Engine callbacks driven by the render thread.
///
/// Every method is called on the render thread only. Input events arrive
/// through the [`RawInputListener`] supertrait while input is drained at
/// the start of each frame.
pub trait SystemListener: RawInputListener + Send + 'static {
    /// Called once, after the graphics context exists.
    fn initialize(&mut self);

    /// Called after each swap-chain (re)negotiation.
    fn reshape(&mut self, width: u32, height: u32);

    /// Cleanup of resources released during the previous frame.
    fn post_frame(&mut self) {}

    /// Renders one frame.
    fn update(&mut self, timer: &FrameTimer);

    /// Called once during teardown, before the context is released.
    fn destroy(&mut self);

    /// Reports a fatal startup or runtime failure.
    fn handle_error(&mut self, message: &str, cause: &ContextError);
}

//=== ContextSettings =====================================================

#[derive(Debug, Clone)]
pub(crate) struct ContextSettings {
    pub(crate) disable_debug_output: bool,
    pub(crate) buffer_count: usize,
    pub(crate) presentation_mode: PresentationMode,
    pub(crate) transfer: TransferType,
    pub(crate) thread_name: String,
}

//=== ContextBuilder ======================================================

/// Builder for a [`RenderContext`].
///
/// # Default Values
///
/// - **Debug output**: enabled
/// - **Transfer**: best available (not forced to main memory)
/// - **Buffer count**: 2
/// - **Presentation mode**: Mailbox
/// - **Thread name**: `"render"`
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    disable_debug_output: bool,
    force_main_memory_transfer: bool,
    buffer_count: usize,
    presentation_mode: PresentationMode,
    thread_name: String,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self {
            disable_debug_output: false,
            force_main_memory_transfer: false,
            buffer_count: 2,
            presentation_mode: PresentationMode::Mailbox,
            thread_name: "render".to_string(),
        }
    }

    /// Stops driver debug messages from being routed to the log.
    pub fn with_disable_debug_output(mut self, disable: bool) -> Self {
        self.disable_debug_output = disable;
        self
    }

    /// Uses the main-memory transfer even if a zero-copy path is available.
    pub fn with_force_main_memory_transfer(mut self, force: bool) -> Self {
        self.force_main_memory_transfer = force;
        self
    }

    /// Sets the number of targets in the swap-chain ring.
    ///
    /// # Panics
    ///
    /// Panics if `count == 0`.
    pub fn with_buffer_count(mut self, count: usize) -> Self {
        assert!(count > 0, "Buffer count must be positive");
        self.buffer_count = count;
        self
    }

    pub fn with_presentation_mode(mut self, mode: PresentationMode) -> Self {
        self.presentation_mode = mode;
        self
    }

    /// Names the render thread (visible in logs and debuggers).
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "Thread name must not be empty");
        self.thread_name = name;
        self
    }

    /// Builds the context, probing `provider` for the transfer type.
    pub fn build<L, P, F>(self, listener: L, provider: P, factory: F) -> RenderContext<L, P, F>
    where
        L: SystemListener,
        P: SwapChainProvider,
        F: DeviceFactory,
    {
        let transfer = TransferType::select(self.force_main_memory_transfer, |t| provider.supports_transfer(t));

        RenderContext {
            listener,
            provider,
            factory,
            settings: ContextSettings {
                disable_debug_output: self.disable_debug_output,
                buffer_count: self.buffer_count,
                presentation_mode: self.presentation_mode,
                transfer,
                thread_name: self.thread_name,
            },
            key_input: Arc::new(KeyInput::new()),
            pointer_input: Arc::new(PointerInput::new()),
            lifecycle: Arc::new(Lifecycle::new()),
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== RenderContext =======================================================

/// A configured context that has not started yet.
///
/// Wire the input translators into the toolkit, keep a [`ContextHandle`],
/// then call [`create`](Self::create). The context is consumed by
/// `create`, so it cannot be started twice.
pub struct RenderContext<L, P, F> {
    listener: L,
    provider: P,
    factory: F,
    settings: ContextSettings,
    key_input: Arc<KeyInput>,
    pointer_input: Arc<PointerInput>,
    lifecycle: Arc<Lifecycle>,
}

impl<L, P, F> RenderContext<L, P, F>
where
    L: SystemListener,
    P: SwapChainProvider,
    F: DeviceFactory,
{
    /// Keyboard translator, for the toolkit's key handlers.
    pub fn key_input(&self) -> Arc<KeyInput> {
        Arc::clone(&self.key_input)
    }

    /// Pointer translator, for button/scroll handlers and the poll task.
    pub fn pointer_input(&self) -> Arc<PointerInput> {
        Arc::clone(&self.pointer_input)
    }

    pub fn handle(&self) -> ContextHandle {
        ContextHandle {
            lifecycle: Arc::clone(&self.lifecycle),
        }
    }

    /// Transfer type chosen at build time.
    pub fn transfer_type(&self) -> TransferType {
        self.settings.transfer
    }

    /// Spawns the render thread and returns immediately.
    ///
    /// Startup failures on the render thread are reported through
    /// [`SystemListener::handle_error`], not here. The only error returned
    /// is a failure to spawn the thread itself.
    pub fn create(self) -> Result<JoinHandle<()>, ContextError> {
        let name = self.settings.thread_name.clone();
        info!(target: "render", "Spawning render thread '{}'", name);

        thread::Builder::new()
            .name(name)
            .spawn(move || RenderLoop::new(self).run())
            .map_err(ContextError::ThreadSpawn)
    }
}

//=== ContextHandle =======================================================

/// Cloneable control handle usable from any thread.
#[derive(Debug, Clone)]
pub struct ContextHandle {
    lifecycle: Arc<Lifecycle>,
}

impl ContextHandle {
    /// Requests shutdown and returns immediately.
    ///
    /// The render loop notices the request at its next iteration boundary,
    /// finishes the frame in flight and tears down. `wait_for` is accepted
    /// for API compatibility and ignored: this call never blocks. Join the
    /// render thread's `JoinHandle` to wait for teardown.
    pub fn destroy(&self, wait_for: bool) {
        if wait_for {
            debug!(target: "render", "destroy(wait_for = true) does not block");
        }
        self.lifecycle.request_close();
    }

    pub fn is_close_requested(&self) -> bool {
        self.lifecycle.is_close_requested()
    }

    pub fn state(&self) -> ContextState {
        self.lifecycle.state()
    }

    /// Restarting an embedded context is not supported.
    pub fn restart(&self) -> Result<(), UsageError> {
        Err(UsageError::Unsupported("restart"))
    }

    /// The window title belongs to the UI toolkit.
    pub fn set_title(&self, _title: &str) -> Result<(), UsageError> {
        Err(UsageError::Unsupported("set_title"))
    }

    /// Frames are always presented through the swap-chain.
    pub fn set_auto_flush_frames(&self, _enabled: bool) -> Result<(), UsageError> {
        Err(UsageError::Unsupported("set_auto_flush_frames"))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
