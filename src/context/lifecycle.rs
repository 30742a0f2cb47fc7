//=========================================================================
// Context Lifecycle
//=========================================================================
//
// Linear lifecycle shared between the embedding thread and the render
// thread:
//
//   Created → Initializing → Running → ShuttingDown → Destroyed
//
// Initializing may jump straight to Destroyed when startup fails. The
// state is written only by the thread driving that phase; the close
// request flag is written by anyone and only read by the render loop at
// iteration boundaries.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

//=== External Dependencies ===============================================

use log::trace;

//=== ContextState ========================================================

/// Lifecycle phase of a render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ContextState {
    Created = 0,
    Initializing = 1,
    Running = 2,
    ShuttingDown = 3,
    Destroyed = 4,
}

impl ContextState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Created,
            1 => Self::Initializing,
            2 => Self::Running,
            3 => Self::ShuttingDown,
            _ => Self::Destroyed,
        }
    }
}

impl fmt::Display for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

//=== Lifecycle ===========================================================

#[derive(Debug)]
pub(crate) struct Lifecycle {
    state: AtomicU8,
    close_requested: AtomicBool,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(ContextState::Created as u8),
            close_requested: AtomicBool::new(false),
        }
    }

    pub(crate) fn state(&self) -> ContextState {
        ContextState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Moves forward to `next`. States never go backwards.
    pub(crate) fn advance(&self, next: ContextState) {
        let current = self.state();
        debug_assert!(
            next > current,
            "illegal lifecycle transition {} -> {}",
            current,
            next
        );
        trace!(target: "render", "Lifecycle {} -> {}", current, next);
        self.state.store(next as u8, Ordering::Release);
    }

    pub(crate) fn request_close(&self) {
        self.close_requested.store(true, Ordering::Release);
    }

    pub(crate) fn is_close_requested(&self) -> bool {
        self.close_requested.load(Ordering::Acquire)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
