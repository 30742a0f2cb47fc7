//=========================================================================
// Thread Bridge
//=========================================================================
//
// Cross-thread plumbing between the UI toolkit thread and the render
// thread. Everything that crosses that boundary goes through a bridge;
// nothing else is shared apart from single-writer atomics.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_bridge;

//=== Public API ==========================================================

pub use event_bridge::EventBridge;
