//=========================================================================
// Render Loop
//=========================================================================
//
// Body of the render thread. Everything in here runs on that one thread:
// the graphics device is created, used and dropped here, and the
// swap-chain never leaves it.
//
// Per iteration:
//   1. query surface size
//   2. (re)negotiate swap-chain on size change → reshape, pointer height
//   3. acquire target
//   4. build attachments, check completeness (incomplete = warning)
//   5. viewport
//   6. post_frame → drain key + pointer input → tick timer → update
//   7. release attachments
//   8. present
//
// Failures in 3–8 (errors or panics) drop the frame and the loop goes on.
// Failures outside that section are fatal: reported to the listener, then
// teardown runs. A close request is only observed between iterations.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::frame_timer::FrameTimer;
use super::lifecycle::{ContextState, Lifecycle};
use super::{ContextSettings, RenderContext, SystemListener};
use crate::core::error::ContextError;
use crate::core::input::{KeyInput, PointerInput};
use crate::core::render::{
    DeviceFactory, FramebufferStatus, GraphicsDevice, Size, SwapChain, SwapChainConfig,
    SwapChainProvider, ThreadAffine,
};

//=== RenderLoop ==========================================================

pub(crate) struct RenderLoop<L, P: SwapChainProvider, F> {
    listener: L,
    provider: P,
    factory: F,
    settings: ContextSettings,

    key_input: Arc<KeyInput>,
    pointer_input: Arc<PointerInput>,
    lifecycle: Arc<Lifecycle>,

    swap_chain: Option<P::SwapChain>,
    size: Size,
    timer: FrameTimer,
}

impl<L, P, F> RenderLoop<L, P, F>
where
    L: SystemListener,
    P: SwapChainProvider,
    F: DeviceFactory,
{
    //--- Construction -----------------------------------------------------

    /// Takes over a context. Must be called on the render thread.
    pub(crate) fn new(context: RenderContext<L, P, F>) -> Self {
        let RenderContext {
            listener,
            provider,
            factory,
            settings,
            key_input,
            pointer_input,
            lifecycle,
        } = context;

        Self {
            listener,
            provider,
            factory,
            settings,
            key_input,
            pointer_input,
            lifecycle,
            swap_chain: None,
            size: Size::default(),
            timer: FrameTimer::new(),
        }
    }

    //--- Thread Body ------------------------------------------------------

    pub(crate) fn run(mut self) {
        self.lifecycle.advance(ContextState::Initializing);

        let Some(mut device) = self.init_in_thread() else {
            error!(target: "render", "Display initialization failed. Cannot continue.");
            self.lifecycle.advance(ContextState::Destroyed);
            return;
        };

        self.lifecycle.advance(ContextState::Running);

        // Anything escaping the per-frame guard lands here.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.listener.initialize();
            self.run_loop(&mut device)
        }));

        let fatal = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e),
            Err(payload) => Some(ContextError::from_panic(payload)),
        };

        if let Some(cause) = fatal {
            error!(target: "render", "Uncaught error on render thread: {}", cause);
            let message = format!("Uncaught error thrown in thread '{}'", thread_name());
            self.report_error(&message, &cause);
        }

        self.deinit_in_thread(device);
    }

    //--- Initialization ---------------------------------------------------

    fn init_in_thread(&mut self) -> Option<ThreadAffine<F::Device>> {
        self.timer = FrameTimer::new();

        let created = panic::catch_unwind(AssertUnwindSafe(|| self.factory.create_device()))
            .unwrap_or_else(|payload| Err(ContextError::from_panic(payload)));

        let mut device = match created {
            Ok(device) => ThreadAffine::new(device),
            Err(e) => {
                self.report_error("Failed to create display", &e);
                return None;
            }
        };

        info!(
            target: "render",
            "Graphics context running on thread '{}': {}",
            thread_name(),
            device.get().describe()
        );
        info!(target: "render", "Using '{}' transfer type", self.settings.transfer);

        if !self.settings.disable_debug_output {
            device.get_mut().set_debug_output(true);
        }

        Some(device)
    }

    //--- Main Loop --------------------------------------------------------

    fn run_loop(&mut self, device: &mut ThreadAffine<F::Device>) -> Result<(), ContextError> {
        loop {
            self.negotiate_swap_chain()?;

            if let Err(e) = self.render_frame(device) {
                warn!(target: "render", "Dropped frame: {}", e);
            }

            if self.lifecycle.is_close_requested() {
                return Ok(());
            }
        }
    }

    /// Steps 1–2: keeps exactly one swap-chain sized to the surface.
    fn negotiate_swap_chain(&mut self) -> Result<(), ContextError> {
        let size = self.provider.surface_size();
        if self.swap_chain.is_some() && size == self.size {
            return Ok(());
        }

        if let Some(old) = self.swap_chain.take() {
            debug!(target: "render", "Disposing {} swap-chain", self.size);
            old.dispose();
        }

        let config = SwapChainConfig {
            size,
            buffer_count: self.settings.buffer_count,
            presentation_mode: self.settings.presentation_mode,
            transfer: self.settings.transfer,
        };
        debug!(target: "render", "(Re)creating swap-chain: {:?}", config);

        self.swap_chain = Some(self.provider.create_swap_chain(&config)?);
        self.size = size;

        self.listener.reshape(size.width, size.height);
        self.pointer_input.set_current_height(size.height as i32);
        Ok(())
    }

    /// Steps 3–8. Any error or panic here costs one frame, nothing more.
    ///
    /// Once acquired, a target always goes back to the swap-chain: presented
    /// when the frame was drawn, discarded otherwise.
    fn render_frame(&mut self, device: &mut ThreadAffine<F::Device>) -> Result<(), ContextError> {
        let Some(swap_chain) = self.swap_chain.as_mut() else {
            return Err(ContextError::SwapChain("no swap-chain negotiated".to_string()));
        };

        let target = catch_frame(|| swap_chain.acquire())?;
        let device = device.get_mut();

        let size = self.size;
        let listener = &mut self.listener;
        let key_input = &self.key_input;
        let pointer_input = &self.pointer_input;
        let timer = &mut self.timer;

        let drawn = match catch_frame(|| device.create_attachments(target.color, size)) {
            Ok(attachments) => {
                let drawn = catch_frame(|| {
                    if let FramebufferStatus::Incomplete(reason) = device.framebuffer_status(&attachments)? {
                        warn!(target: "render", "Framebuffer incomplete ({}), drawing anyway", reason);
                    }

                    device.set_viewport(size);

                    listener.post_frame();
                    key_input.drain_and_dispatch(listener);
                    pointer_input.drain_and_dispatch(listener);

                    timer.tick();
                    listener.update(timer);
                    Ok(())
                });

                device.release_attachments(attachments);
                drawn
            }
            Err(e) => Err(e),
        };

        match drawn {
            Ok(()) => catch_frame(|| swap_chain.present(target)),
            Err(e) => {
                if let Err(discard) = catch_frame(|| swap_chain.discard(target)) {
                    warn!(target: "render", "Could not return target to swap-chain: {}", discard);
                }
                Err(e)
            }
        }
    }

    //--- Teardown ---------------------------------------------------------

    fn deinit_in_thread(mut self, mut device: ThreadAffine<F::Device>) {
        self.lifecycle.advance(ContextState::ShuttingDown);
        info!(target: "render", "Render context shutting down");

        if panic::catch_unwind(AssertUnwindSafe(|| self.listener.destroy())).is_err() {
            error!(target: "render", "Listener panicked during destroy");
        }

        if let Some(swap_chain) = self.swap_chain.take() {
            swap_chain.dispose();
        }

        if !self.settings.disable_debug_output {
            device.get_mut().set_debug_output(false);
        }
        drop(device);

        self.lifecycle.advance(ContextState::Destroyed);
        info!(target: "render", "Display destroyed");
    }

    //--- Helpers ----------------------------------------------------------

    fn report_error(&mut self, message: &str, cause: &ContextError) {
        let listener = &mut self.listener;
        if panic::catch_unwind(AssertUnwindSafe(|| listener.handle_error(message, cause))).is_err() {
            error!(target: "render", "Listener panicked while handling error: {}", message);
        }
    }
}

/// Runs one frame step, turning a panic into a frame error.
fn catch_frame<T, S>(step: S) -> Result<T, ContextError>
where
    S: FnOnce() -> Result<T, ContextError>,
{
    panic::catch_unwind(AssertUnwindSafe(step)).unwrap_or_else(|payload| Err(ContextError::from_panic(payload)))
}

fn thread_name() -> String {
    thread::current().name().unwrap_or("<unnamed>").to_string()
}
