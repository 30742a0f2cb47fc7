//=========================================================================
// Render Seams
//=========================================================================
//
// Traits the render loop drives: the UI-side surface and its swap-chain,
// and the thread-affine graphics device.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod device;
pub mod swap_chain;

//=== Public API ==========================================================

pub use device::{DeviceFactory, FrameAttachments, FramebufferStatus, GraphicsDevice, ThreadAffine};
pub use swap_chain::{
    PresentationMode, RenderTarget, Size, SwapChain, SwapChainConfig, SwapChainProvider, TextureId,
    TransferType,
};
