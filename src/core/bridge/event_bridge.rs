//=========================================================================
// Event Bridge
//=========================================================================
//
// Unbounded multi-producer / single-consumer queue connecting the UI
// thread (producers) with the render thread (the only consumer).
//
// Architecture:
//   UI thread ── push() ──> [crossbeam unbounded] ──> drain_all() ── render thread
//
// Producers never block and never fail. The queue is not bounded: input
// arrives at UI-event rate, so growth is limited by how fast a user can
// click and type, and backpressure is not applied.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};

//=== EventBridge =========================================================

/// Thread-safe FIFO handing values from UI-side producers to the render
/// thread.
///
/// Ownership of each value moves from the producer to the consumer when it
/// is drained. Ordering is strict FIFO within one bridge; no ordering is
/// implied between two different bridges.
///
/// # Examples
///
/// ```no_run
/// use drift_embed::core::bridge::EventBridge;
///
/// let bridge = EventBridge::new();
/// bridge.push(1);
/// bridge.push(2);
///
/// assert_eq!(bridge.drain_all(), vec![1, 2]);
/// assert!(bridge.drain_all().is_empty());
/// ```
#[derive(Debug)]
pub struct EventBridge<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> EventBridge<T> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty bridge.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    //--- Producer Side ----------------------------------------------------

    /// Enqueues an item. Callable from any thread, never blocks.
    pub fn push(&self, item: T) {
        // The receiver lives in `self`, so the channel cannot be disconnected
        // while a producer still holds a reference to the bridge.
        let _ = self.sender.send(item);
    }

    //--- Consumer Side ----------------------------------------------------

    /// Removes and returns every item queued at the time of the call.
    ///
    /// Items pushed concurrently while draining are left for the next call,
    /// so a fast producer cannot keep the consumer inside this method.
    pub fn drain_all(&self) -> Vec<T> {
        let pending = self.receiver.len();
        let mut items = Vec::with_capacity(pending);
        self.drain_with(|item| items.push(item));
        items
    }

    /// Visits the same snapshot as [`drain_all`](Self::drain_all) without
    /// collecting into a `Vec`. Returns the number of items visited.
    pub fn drain_with<F>(&self, mut visit: F) -> usize
    where
        F: FnMut(T),
    {
        let pending = self.receiver.len();
        let mut drained = 0;

        for item in self.receiver.try_iter().take(pending) {
            visit(item);
            drained += 1;
        }

        drained
    }

    //--- Queries ----------------------------------------------------------

    /// Number of items currently queued.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T> Default for EventBridge<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
