//=========================================================================
// Graphics Device Seam
//=========================================================================
//
// Thread-affine graphics context used by the render loop.
//
// A graphics context is bound to the thread that created it: it may only
// be used, and must be destroyed, on that thread. `ThreadAffine<T>`
// records the owner thread and asserts it on every access and on drop
// (debug builds), and is `!Send`, so the compiler already refuses to move
// it elsewhere.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::marker::PhantomData;
use std::thread::{self, ThreadId};

//=== Internal Dependencies ===============================================

use super::swap_chain::{Size, TextureId};
use crate::core::error::ContextError;

//=== Framebuffer Types ===================================================

/// Transient color + depth attachment set built around one render target.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameAttachments {
    pub framebuffer: u32,
    pub depth: TextureId,
    pub color: TextureId,
}

/// Result of a framebuffer completeness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,

    /// Incomplete, with the backend's reason. The frame is still attempted.
    Incomplete(String),
}

//=== Traits ==============================================================

/// Graphics operations the render loop needs each frame.
pub trait GraphicsDevice {
    /// Short description for the init log (API version, adapter).
    fn describe(&self) -> String;

    /// Creates a framebuffer with `color` attached and a fresh depth texture.
    fn create_attachments(&mut self, color: TextureId, size: Size) -> Result<FrameAttachments, ContextError>;

    fn framebuffer_status(&mut self, attachments: &FrameAttachments) -> Result<FramebufferStatus, ContextError>;

    fn set_viewport(&mut self, size: Size);

    /// Unbinds and deletes the framebuffer and depth texture.
    fn release_attachments(&mut self, attachments: FrameAttachments);

    /// Routes driver debug messages to the log, or stops doing so.
    fn set_debug_output(&mut self, enabled: bool);
}

/// Creates the device on the render thread.
///
/// The factory itself crosses threads; the device it creates never does.
pub trait DeviceFactory: Send + 'static {
    type Device: GraphicsDevice;

    fn create_device(&mut self) -> Result<Self::Device, ContextError>;
}

//=== ThreadAffine ========================================================

/// Owns a value that must stay on the thread that created it.
pub struct ThreadAffine<T> {
    inner: T,
    owner: ThreadId,
    _not_send: PhantomData<*const ()>,
}

impl<T> ThreadAffine<T> {
    /// Binds `inner` to the current thread.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            owner: thread::current().id(),
            _not_send: PhantomData,
        }
    }

    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    pub fn is_owner_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    pub fn get(&self) -> &T {
        self.assert_owner();
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.assert_owner();
        &mut self.inner
    }

    fn assert_owner(&self) {
        debug_assert!(
            self.is_owner_thread(),
            "thread-affine resource used off its owner thread ({:?})",
            self.owner
        );
    }
}

impl<T> Drop for ThreadAffine<T> {
    fn drop(&mut self) {
        if !thread::panicking() {
            self.assert_owner();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
