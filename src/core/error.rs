//=========================================================================
// Context Errors
//=========================================================================
//
// Error types shared by the render loop, the graphics seams and the input
// translators.
//
// Taxonomy:
// - `ContextError`: failures on the render thread (startup, swap-chain,
//   per-frame). Whether they are fatal depends on where they surface,
//   not on the variant.
// - `UsageError`: calls the embedded context does not support. Returned
//   synchronously to the caller, never forwarded to the render thread.
//
//=========================================================================

use std::fmt;

//=== ContextError ========================================================

/// Render-thread failure.
#[derive(Debug)]
pub enum ContextError {
    /// Graphics context or device creation failed.
    ContextCreation(String),

    /// Swap-chain negotiation against the surface failed.
    SwapChain(String),

    /// No render target could be acquired for this frame.
    Acquire(String),

    /// Framebuffer attachments could not be created or queried.
    Framebuffer(String),

    /// Presenting a target back to the swap-chain failed.
    Present(String),

    /// The render thread could not be spawned.
    ThreadSpawn(std::io::Error),

    /// A panic was caught on the render thread.
    Panicked(String),
}

impl ContextError {
    /// Builds a [`ContextError::Panicked`] from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked(message)
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextCreation(e) => write!(f, "Graphics context creation failed: {}", e),
            Self::SwapChain(e) => write!(f, "Swap-chain negotiation failed: {}", e),
            Self::Acquire(e) => write!(f, "Render target acquisition failed: {}", e),
            Self::Framebuffer(e) => write!(f, "Framebuffer error: {}", e),
            Self::Present(e) => write!(f, "Present failed: {}", e),
            Self::ThreadSpawn(e) => write!(f, "Render thread spawn failed: {}", e),
            Self::Panicked(e) => write!(f, "Render thread panicked: {}", e),
        }
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

//=== UsageError ==========================================================

/// Programming error: the requested operation is not available on an
/// embedded context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// The named operation is not supported.
    Unsupported(&'static str),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(op) => write!(f, "{} is not supported on an embedded context", op),
        }
    }
}

impl std::error::Error for UsageError {}

//=========================================================================
// Unit Tests
//=========================================================================
