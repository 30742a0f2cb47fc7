//=========================================================================
// Core
//=========================================================================
//
// Building blocks shared by the render context and the UI side:
//
// - `bridge`: cross-thread event queues
// - `input`: keyboard/pointer translation and cursor-lock emulation
// - `render`: swap-chain and graphics device seams
// - `error`: error types
//
//=========================================================================

pub mod bridge;
pub mod error;
pub mod input;
pub mod render;

pub use error::{ContextError, UsageError};
