//! Animated counters ("Solo 15 lotes disponibles").
//!
//! A counter ramps from 0 to its target once, the first time it scrolls into
//! view. The ramp itself is a pure state machine driven by frame timestamps:
//!
//! - `Idle`: shows 0 until the first visibility trigger
//! - `Running`: shows `floor(target * elapsed / duration)`
//! - `Done`: shows exactly `target`, forever
//!
//! Two drivers are provided: `CounterDriver` for hosts with a frame callback
//! (request/cancel per frame), and `spawn_ramp` for a tokio task publishing
//! values on a watch channel. Both stop touching the counter once their
//! owner is dropped.

use crate::notify::Subscription;
use crate::visual::VisibilityObserver;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Ramp length used by the landing page counters.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    Idle,
    Running { started_at: Duration },
    Done,
}

#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    target: u32,
    duration: Duration,
    suffix: String,
    value: u32,
    phase: CounterPhase,
}

impl AnimatedCounter {
    pub fn new(target: u32, duration: Duration) -> Self {
        Self {
            target,
            duration,
            suffix: String::new(),
            value: 0,
            phase: CounterPhase::Idle,
        }
    }

    /// Text appended after the number, e.g. `"+"` or `"%"`.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Start the ramp at time `now`. Only the first call has any effect.
    pub fn trigger(&mut self, now: Duration) -> bool {
        if self.phase != CounterPhase::Idle {
            return false;
        }
        self.phase = CounterPhase::Running { started_at: now };
        true
    }

    /// Visibility change from the host element's observer.
    pub fn on_visibility(&mut self, intersecting: bool, now: Duration) -> bool {
        intersecting && self.trigger(now)
    }

    /// Advance to frame time `now` and return the value to display.
    pub fn tick(&mut self, now: Duration) -> u32 {
        let CounterPhase::Running { started_at } = self.phase else {
            return self.value;
        };

        let fraction = if self.target == 0 || self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_sub(started_at);
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        if fraction >= 1.0 {
            self.value = self.target;
            self.phase = CounterPhase::Done;
        } else {
            self.value = (self.target as f64 * fraction).floor() as u32;
        }
        self.value
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, CounterPhase::Running { .. })
    }

    pub fn is_done(&self) -> bool {
        self.phase == CounterPhase::Done
    }

    pub fn display(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }
}

// ==================== Frame-driven driver ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host frame callbacks (`requestAnimationFrame` and friends).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Default)]
struct ManualFramesState {
    next: u64,
    pending: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

/// Scheduler whose frames are delivered by hand: the host loop (or a test)
/// takes the pending handles and calls `CounterDriver::on_frame` with them.
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ManualFrames {
    state: Rc<RefCell<ManualFramesState>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet delivered or cancelled.
    pub fn take_pending(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn cancelled(&self) -> Vec<FrameHandle> {
        self.state.borrow().cancelled.clone()
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameHandle {
        let mut state = self.state.borrow_mut();
        let handle = FrameHandle(state.next);
        state.next += 1;
        state.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut state = self.state.borrow_mut();
        state.pending.retain(|pending| *pending != handle);
        state.cancelled.push(handle);
    }
}

/// Owns a counter and keeps exactly one frame in flight while it runs.
///
/// Dropping the driver (the counter's element unmounting) cancels the
/// outstanding frame, so no tick lands after teardown.
pub struct CounterDriver<S: FrameScheduler> {
    counter: AnimatedCounter,
    scheduler: S,
    pending: Option<FrameHandle>,
}

impl<S: FrameScheduler> CounterDriver<S> {
    pub fn new(counter: AnimatedCounter, scheduler: S) -> Self {
        Self {
            counter,
            scheduler,
            pending: None,
        }
    }

    pub fn counter(&self) -> &AnimatedCounter {
        &self.counter
    }

    pub fn on_visibility(&mut self, intersecting: bool, now: Duration) {
        if self.counter.on_visibility(intersecting, now) {
            debug!("Counter to {} triggered", self.counter.target());
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Deliver a frame. Frames other than the one in flight are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, now: Duration) -> u32 {
        if self.pending != Some(handle) {
            return self.counter.value();
        }
        self.pending = None;

        let value = self.counter.tick(now);
        if !self.counter.is_done() {
            self.pending = Some(self.scheduler.request_frame());
        }
        value
    }

    /// Wire the driver to an element's visibility. `clock` supplies the
    /// host's frame timestamp when the trigger fires.
    pub fn watch<C>(
        driver: &Rc<RefCell<Self>>,
        observer: &dyn VisibilityObserver,
        clock: C,
    ) -> Subscription
    where
        S: 'static,
        C: Fn() -> Duration + 'static,
    {
        let weak = Rc::downgrade(driver);
        observer.observe(Box::new(move |intersecting: &bool| {
            if let Some(driver) = weak.upgrade() {
                driver.borrow_mut().on_visibility(*intersecting, clock());
            }
        }))
    }
}

impl<S: FrameScheduler> Drop for CounterDriver<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

// ==================== Tokio driver ====================

/// A counter ramp running on the tokio runtime.
///
/// Dropping the handle aborts the task.
pub struct RampHandle {
    target: u32,
    values: watch::Receiver<u32>,
    task: JoinHandle<()>,
}

/// Start a ramp immediately, ticking every `frame_interval`.
pub fn spawn_ramp(target: u32, duration: Duration, frame_interval: Duration) -> RampHandle {
    let (tx, rx) = watch::channel(0);

    let task = tokio::spawn(async move {
        let started = tokio::time::Instant::now();
        let mut counter = AnimatedCounter::new(target, duration);
        counter.trigger(Duration::ZERO);

        let mut frames = tokio::time::interval(frame_interval);
        loop {
            frames.tick().await;
            let value = counter.tick(started.elapsed());
            if tx.send(value).is_err() || counter.is_done() {
                break;
            }
        }
    });

    RampHandle {
        target,
        values: rx,
        task,
    }
}

impl RampHandle {
    pub fn current(&self) -> u32 {
        *self.values.borrow()
    }

    /// A receiver for views that render every published value.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.values.clone()
    }

    /// Wait until the ramp reaches its target. Returns the last value seen
    /// if the task stopped early.
    pub async fn finished(&mut self) -> u32 {
        let target = self.target;
        if let Ok(value) = self.values.wait_for(|value| *value == target).await {
            return *value;
        }
        *self.values.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RampHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
