//=========================================================================
// Test Support
//=========================================================================
//
// Fakes shared by the unit tests:
//
// - `RecordingInput`: collects drained input events
// - `FakePointerSurface` / `FakePointerDevice`: scripted pointer platform
// - `Journal`: ordered log of calls made by the render thread
// - `Script`: failure injection and acquire gating, shared with the fakes
// - `RecordingListener`, `ScriptedProvider`, `ScriptedFactory`: render seams
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};

//=== Internal Dependencies ===============================================

use crate::context::{FrameTimer, SystemListener};
use crate::core::error::ContextError;
use crate::core::input::{
    CursorAppearance, KeyInputEvent, MouseButtonEvent, MouseMotionEvent, PointerDevice, PointerSurface,
    RawInputListener, ScreenBounds, ScreenPoint,
};
use crate::core::render::{
    DeviceFactory, FrameAttachments, FramebufferStatus, GraphicsDevice, RenderTarget, Size, SwapChain,
    SwapChainConfig, SwapChainProvider, TextureId, TransferType,
};

/// Polls `condition` until it holds, panicking after `timeout`.
pub(crate) fn wait_until<C>(timeout: Duration, mut condition: C)
where
    C: FnMut() -> bool,
{
    let start = Instant::now();
    while !condition() {
        if start.elapsed() > timeout {
            panic!("Condition not met within {:?}", timeout);
        }
        thread::sleep(Duration::from_millis(1));
    }
}

//=== RecordingInput ======================================================

#[derive(Debug, Default)]
pub(crate) struct RecordingInput {
    pub(crate) keys: Vec<KeyInputEvent>,
    pub(crate) motions: Vec<MouseMotionEvent>,
    pub(crate) buttons: Vec<MouseButtonEvent>,
    pub(crate) order: Vec<&'static str>,
}

impl RawInputListener for RecordingInput {
    fn on_key_event(&mut self, event: KeyInputEvent) {
        self.keys.push(event);
        self.order.push("key");
    }

    fn on_mouse_motion_event(&mut self, event: MouseMotionEvent) {
        self.motions.push(event);
        self.order.push("motion");
    }

    fn on_mouse_button_event(&mut self, event: MouseButtonEvent) {
        self.buttons.push(event);
        self.order.push("button");
    }
}

//=== Pointer Platform ====================================================

pub(crate) struct FakePointerSurface {
    pub(crate) bounds: ScreenBounds,
    pub(crate) focused: bool,
    pub(crate) cursors: RefCell<Vec<CursorAppearance>>,
}

impl FakePointerSurface {
    pub(crate) fn new(bounds: ScreenBounds) -> Self {
        Self {
            bounds,
            focused: true,
            cursors: RefCell::new(Vec::new()),
        }
    }
}

impl PointerSurface for FakePointerSurface {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn screen_bounds(&self) -> ScreenBounds {
        self.bounds
    }

    fn screen_to_local(&self, p: ScreenPoint) -> (f64, f64) {
        (p.x - self.bounds.min_x, p.y - self.bounds.min_y)
    }

    fn set_cursor(&self, cursor: CursorAppearance) {
        self.cursors.borrow_mut().push(cursor);
    }
}

pub(crate) struct FakePointerDevice {
    pub(crate) pos: ScreenPoint,
    pub(crate) warps: Vec<ScreenPoint>,
}

impl FakePointerDevice {
    pub(crate) fn at(pos: ScreenPoint) -> Self {
        Self { pos, warps: Vec::new() }
    }
}

impl PointerDevice for FakePointerDevice {
    fn position(&self) -> ScreenPoint {
        self.pos
    }

    fn warp_to(&mut self, p: ScreenPoint) {
        self.pos = p;
        self.warps.push(p);
    }
}

//=== Journal =============================================================

#[derive(Debug, Clone, Default)]
pub(crate) struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, entry: &str) -> usize {
        self.entries.lock().unwrap().iter().filter(|e| *e == entry).count()
    }

    pub(crate) fn count_prefix(&self, prefix: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

//=== Script ==============================================================

/// Knobs the render-seam fakes read on every call.
///
/// Frame numbers are 1-based; `0` disables the failure.
pub(crate) struct Script {
    size: Mutex<Size>,
    pub(crate) fail_device_creation: AtomicBool,
    pub(crate) fail_swap_chain_creation: AtomicBool,
    pub(crate) fail_status_on_frame: AtomicU64,
    pub(crate) incomplete_framebuffer: AtomicBool,
    pub(crate) fail_present_on_frame: AtomicU64,
    pub(crate) panic_update_on_frame: AtomicU64,
    pub(crate) gate_acquire: AtomicBool,
    pub(crate) acquire_blocked: AtomicBool,
    pub(crate) acquired: AtomicU64,
    pub(crate) returned: AtomicU64,
    gate_tx: Sender<()>,
    gate_rx: Receiver<()>,
    device_threads: Mutex<Vec<String>>,
}

impl Script {
    pub(crate) fn new(size: Size) -> Self {
        let (gate_tx, gate_rx) = unbounded();
        Self {
            size: Mutex::new(size),
            fail_device_creation: AtomicBool::new(false),
            fail_swap_chain_creation: AtomicBool::new(false),
            fail_status_on_frame: AtomicU64::new(0),
            incomplete_framebuffer: AtomicBool::new(false),
            fail_present_on_frame: AtomicU64::new(0),
            panic_update_on_frame: AtomicU64::new(0),
            gate_acquire: AtomicBool::new(false),
            acquire_blocked: AtomicBool::new(false),
            acquired: AtomicU64::new(0),
            returned: AtomicU64::new(0),
            gate_tx,
            gate_rx,
            device_threads: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn size(&self) -> Size {
        *self.size.lock().unwrap()
    }

    pub(crate) fn set_size(&self, size: Size) {
        *self.size.lock().unwrap() = size;
    }

    /// Unblocks an acquire held by `gate_acquire` and disarms the gate.
    pub(crate) fn release_acquire(&self) {
        self.gate_acquire.store(false, Ordering::SeqCst);
        self.gate_tx.send(()).unwrap();
    }

    /// Names of the threads the device was created and dropped on.
    pub(crate) fn device_threads(&self) -> Vec<String> {
        self.device_threads.lock().unwrap().clone()
    }

    fn record_device_thread(&self) {
        let name = thread::current().name().unwrap_or("<unnamed>").to_string();
        self.device_threads.lock().unwrap().push(name);
    }

    fn hits(frame: u64, trigger: &AtomicU64) -> bool {
        let trigger = trigger.load(Ordering::SeqCst);
        trigger != 0 && frame == trigger
    }
}

//=== RecordingListener ===================================================

pub(crate) struct RecordingListener {
    journal: Journal,
    script: Arc<Script>,
    updates: u64,
}

impl RecordingListener {
    pub(crate) fn new(journal: Journal, script: Arc<Script>) -> Self {
        Self {
            journal,
            script,
            updates: 0,
        }
    }
}

impl RawInputListener for RecordingListener {
    fn on_key_event(&mut self, event: KeyInputEvent) {
        self.journal.push(format!("key {:?} {}", event.key, event.pressed));
    }

    fn on_mouse_motion_event(&mut self, event: MouseMotionEvent) {
        self.journal
            .push(format!("motion {} {} wheel {}", event.x, event.y, event.delta_wheel));
    }

    fn on_mouse_button_event(&mut self, event: MouseButtonEvent) {
        self.journal.push(format!("button {:?} {}", event.button, event.pressed));
    }
}

impl SystemListener for RecordingListener {
    fn initialize(&mut self) {
        self.journal.push("initialize");
    }

    fn reshape(&mut self, width: u32, height: u32) {
        self.journal.push(format!("reshape {}x{}", width, height));
    }

    fn post_frame(&mut self) {
        self.journal.push("post_frame");
    }

    fn update(&mut self, timer: &FrameTimer) {
        self.updates += 1;
        assert_eq!(timer.frame_count(), self.updates);
        self.journal.push("update");

        if Script::hits(self.updates, &self.script.panic_update_on_frame) {
            panic!("scripted update failure");
        }
    }

    fn destroy(&mut self) {
        self.journal.push("destroy");
    }

    fn handle_error(&mut self, message: &str, _cause: &ContextError) {
        self.journal.push(format!("handle_error {}", message));
    }
}

//=== ScriptedProvider ====================================================

/// Supports `DxInterop` and `MainMemory`.
pub(crate) struct ScriptedProvider {
    journal: Journal,
    script: Arc<Script>,
}

impl ScriptedProvider {
    pub(crate) fn new(journal: Journal, script: Arc<Script>) -> Self {
        Self { journal, script }
    }
}

impl SwapChainProvider for ScriptedProvider {
    type SwapChain = FakeSwapChain;

    fn surface_size(&self) -> Size {
        self.script.size()
    }

    fn supports_transfer(&self, transfer: TransferType) -> bool {
        matches!(transfer, TransferType::DxInterop | TransferType::MainMemory)
    }

    fn create_swap_chain(&mut self, config: &SwapChainConfig) -> Result<FakeSwapChain, ContextError> {
        if self.script.fail_swap_chain_creation.load(Ordering::SeqCst) {
            return Err(ContextError::SwapChain("scripted failure".to_string()));
        }

        self.journal.push(format!(
            "create_swap_chain {} x{} {}",
            config.size, config.buffer_count, config.transfer
        ));
        Ok(FakeSwapChain {
            journal: self.journal.clone(),
            script: Arc::clone(&self.script),
            size: config.size,
            buffer_count: config.buffer_count,
            next: 0,
            outstanding: 0,
            presents: 0,
        })
    }
}

pub(crate) struct FakeSwapChain {
    journal: Journal,
    script: Arc<Script>,
    size: Size,
    buffer_count: usize,
    next: usize,
    outstanding: usize,
    presents: u64,
}

impl FakeSwapChain {
    fn give_back(&mut self) {
        self.outstanding -= 1;
        self.script.returned.fetch_add(1, Ordering::SeqCst);
    }
}

impl SwapChain for FakeSwapChain {
    fn acquire(&mut self) -> Result<RenderTarget, ContextError> {
        if self.script.gate_acquire.load(Ordering::SeqCst) {
            self.script.acquire_blocked.store(true, Ordering::SeqCst);
            let _ = self.script.gate_rx.recv();
            self.script.acquire_blocked.store(false, Ordering::SeqCst);
        }

        // Paces the loop.
        thread::sleep(Duration::from_millis(1));

        // A real ring would block here.
        if self.outstanding == self.buffer_count {
            self.journal.push("ring exhausted");
            return Err(ContextError::Acquire("all targets in flight".to_string()));
        }
        self.outstanding += 1;
        self.script.acquired.fetch_add(1, Ordering::SeqCst);

        let index = self.next;
        self.next = (self.next + 1) % self.buffer_count;
        Ok(RenderTarget {
            index,
            color: TextureId(100 + index as u32),
        })
    }

    fn present(&mut self, _target: RenderTarget) -> Result<(), ContextError> {
        self.give_back();
        self.presents += 1;
        if Script::hits(self.presents, &self.script.fail_present_on_frame) {
            self.journal.push("present failed");
            return Err(ContextError::Present("scripted failure".to_string()));
        }
        self.journal.push("present");
        Ok(())
    }

    fn discard(&mut self, _target: RenderTarget) -> Result<(), ContextError> {
        self.give_back();
        self.journal.push("discard");
        Ok(())
    }

    fn dispose(self) {
        self.journal.push(format!("dispose {}", self.size));
    }
}

//=== ScriptedFactory =====================================================

pub(crate) struct ScriptedFactory {
    journal: Journal,
    script: Arc<Script>,
}

impl ScriptedFactory {
    pub(crate) fn new(journal: Journal, script: Arc<Script>) -> Self {
        Self { journal, script }
    }
}

impl DeviceFactory for ScriptedFactory {
    type Device = FakeDevice;

    fn create_device(&mut self) -> Result<FakeDevice, ContextError> {
        if self.script.fail_device_creation.load(Ordering::SeqCst) {
            return Err(ContextError::ContextCreation("scripted failure".to_string()));
        }

        self.script.record_device_thread();
        self.journal.push("create_device");
        Ok(FakeDevice {
            journal: self.journal.clone(),
            script: Arc::clone(&self.script),
            frames: 0,
        })
    }
}

pub(crate) struct FakeDevice {
    journal: Journal,
    script: Arc<Script>,
    frames: u64,
}

impl GraphicsDevice for FakeDevice {
    fn describe(&self) -> String {
        "FakeDevice 1.0".to_string()
    }

    fn create_attachments(&mut self, color: TextureId, _size: Size) -> Result<FrameAttachments, ContextError> {
        self.journal.push("create_attachments");
        Ok(FrameAttachments {
            framebuffer: 1,
            depth: TextureId(1),
            color,
        })
    }

    fn framebuffer_status(&mut self, _attachments: &FrameAttachments) -> Result<FramebufferStatus, ContextError> {
        self.frames += 1;
        if Script::hits(self.frames, &self.script.fail_status_on_frame) {
            self.journal.push("status failed");
            return Err(ContextError::Framebuffer("scripted failure".to_string()));
        }

        if self.script.incomplete_framebuffer.load(Ordering::SeqCst) {
            Ok(FramebufferStatus::Incomplete("missing attachment".to_string()))
        } else {
            Ok(FramebufferStatus::Complete)
        }
    }

    fn set_viewport(&mut self, _size: Size) {}

    fn release_attachments(&mut self, _attachments: FrameAttachments) {
        self.journal.push("release_attachments");
    }

    fn set_debug_output(&mut self, enabled: bool) {
        self.journal.push(if enabled { "debug on" } else { "debug off" });
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.script.record_device_thread();
        self.journal.push("drop_device");
    }
}
