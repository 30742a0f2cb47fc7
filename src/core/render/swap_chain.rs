//=========================================================================
// Swap-Chain Seam
//=========================================================================
//
// Boundary between the render thread and the UI-side off-screen surface.
//
// The surface side (`SwapChainProvider`) reports its size and hands out
// swap-chains; a swap-chain cycles a small ring of render targets between
// the renderer (acquire → draw → present) and the compositor.
//
// Lifetime:
// ```text
//  provider (UI-owned, outlives the context)
//     └─ create_swap_chain(config)   render thread only
//          ├─ acquire() → RenderTarget
//          ├─ present(RenderTarget)
//          ├─ discard(RenderTarget)     frame failed, target not shown
//          └─ dispose()              on resize or teardown
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::error::ContextError;

//=== Size ================================================================

/// Surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

//=== TransferType ========================================================

/// How presented images reach the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferType {
    /// Zero-copy shared GPU surface.
    PlatformSurface,

    /// Zero-copy OS-specific interop path.
    DxInterop,

    /// Copy through shared main memory. Always available.
    MainMemory,
}

impl TransferType {
    /// Selection order, highest capability first.
    pub const PRIORITY: [TransferType; 3] = [
        TransferType::PlatformSurface,
        TransferType::DxInterop,
        TransferType::MainMemory,
    ];

    /// Picks the first available transfer type in [`PRIORITY`](Self::PRIORITY)
    /// order, or [`MainMemory`](Self::MainMemory) when forced.
    pub fn select<F>(force_main_memory: bool, is_available: F) -> Self
    where
        F: Fn(TransferType) -> bool,
    {
        if force_main_memory {
            return TransferType::MainMemory;
        }

        Self::PRIORITY
            .into_iter()
            .find(|t| *t == TransferType::MainMemory || is_available(*t))
            .unwrap_or(TransferType::MainMemory)
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlatformSurface => write!(f, "PlatformSurface"),
            Self::DxInterop => write!(f, "DxInterop"),
            Self::MainMemory => write!(f, "MainMemory"),
        }
    }
}

//=== PresentationMode ====================================================

/// Queueing policy for presented images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationMode {
    /// Newest image replaces any not yet shown.
    #[default]
    Mailbox,

    /// Images are shown in order; present waits for a free slot.
    Fifo,
}

//=== SwapChainConfig =====================================================

/// Parameters negotiated with the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapChainConfig {
    pub size: Size,
    pub buffer_count: usize,
    pub presentation_mode: PresentationMode,
    pub transfer: TransferType,
}

//=== RenderTarget ========================================================

/// Texture handle owned by the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// One presentable image, held by the render thread for a single frame.
///
/// Not `Clone`: a target is handed back exactly once, through
/// [`SwapChain::present`] or [`SwapChain::discard`].
#[derive(Debug, PartialEq, Eq)]
pub struct RenderTarget {
    /// Slot in the swap-chain ring.
    pub index: usize,

    /// Color image to attach as the frame's color buffer.
    pub color: TextureId,
}

//=== Traits ==============================================================

/// Ring of presentable targets. Used only on the render thread.
pub trait SwapChain {
    /// Takes the next free target. May block until one is available.
    fn acquire(&mut self) -> Result<RenderTarget, ContextError>;

    /// Returns a drawn target to the compositor.
    fn present(&mut self, target: RenderTarget) -> Result<(), ContextError>;

    /// Returns an undrawn target to the ring without showing it.
    fn discard(&mut self, target: RenderTarget) -> Result<(), ContextError>;

    /// Releases the ring.
    fn dispose(self);
}

/// UI-side off-screen surface the context renders into.
///
/// Constructed on the embedding thread, queried for transfer capabilities
/// there, then moved to the render thread for the rest of its use.
pub trait SwapChainProvider: Send + 'static {
    type SwapChain: SwapChain;

    /// Size the surface currently reports.
    fn surface_size(&self) -> Size;

    /// Whether `transfer` can be used on this platform.
    fn supports_transfer(&self, transfer: TransferType) -> bool;

    fn create_swap_chain(&mut self, config: &SwapChainConfig) -> Result<Self::SwapChain, ContextError>;
}

//=========================================================================
// Unit Tests
//=========================================================================
