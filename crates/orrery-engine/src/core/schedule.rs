//! Frame scheduling.
//!
//! A `FrameScheduler` invokes a callback once, at the next frame. The render
//! loop re-arms itself from inside every callback, so it keeps running until
//! the scheduler stops invoking callbacks. Platform adapters (browser
//! animation frames) live in the web crate; `FixedRateScheduler` is the
//! headless adapter used by tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::time::ManualClock;

/// A one-shot frame callback.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Something that can run a callback at the next frame.
pub trait FrameScheduler {
    /// Queue `callback` to run once at the next frame.
    fn schedule_next(&self, callback: FrameCallback);
}

/// Drive `step` once per frame, forever.
///
/// Each invocation re-arms the next one before running `step`. There is no
/// stop handle: the loop ends when the scheduler drops its pending callback.
pub fn run_loop<S, F>(scheduler: Rc<S>, step: F)
where
    S: FrameScheduler + ?Sized + 'static,
    F: FnMut() + 'static,
{
    arm(scheduler, Rc::new(RefCell::new(step)));
}

fn arm<S, F>(scheduler: Rc<S>, step: Rc<RefCell<F>>)
where
    S: FrameScheduler + ?Sized + 'static,
    F: FnMut() + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.schedule_next(Box::new(move || {
        arm(Rc::clone(&next), Rc::clone(&step));
        (step.borrow_mut())();
    }));
}

/// Headless scheduler ticking a `ManualClock` at a fixed period.
///
/// Frame `k` (counting from zero) observes `start + k * period` on the clock.
pub struct FixedRateScheduler {
    period: f64,
    clock: ManualClock,
    pending: RefCell<Vec<FrameCallback>>,
    cancelled: Cell<bool>,
}

impl FixedRateScheduler {
    pub fn new(period: f64, clock: ManualClock) -> Self {
        Self {
            period,
            clock,
            pending: RefCell::new(Vec::new()),
            cancelled: Cell::new(false),
        }
    }

    /// Scheduler firing `hz` frames per simulated second.
    pub fn at_hz(hz: f64, clock: ManualClock) -> Self {
        Self::new(1.0 / hz, clock)
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run every callback queued before this frame, then advance the clock.
    /// Callbacks queued while firing wait for the next frame.
    /// Returns false when nothing was pending.
    pub fn fire(&self) -> bool {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        if due.is_empty() {
            return false;
        }
        for callback in due {
            callback();
        }
        self.clock.advance(self.period);
        true
    }

    /// Fire up to `frames` frames. Returns how many actually ran.
    pub fn run_frames(&self, frames: u64) -> u64 {
        let mut ran = 0;
        while ran < frames && self.fire() {
            ran += 1;
        }
        ran
    }

    /// Withdraw all future invocations. Pending callbacks are dropped and
    /// later `schedule_next` calls are ignored.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        self.pending.borrow_mut().clear();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn schedule_next(&self, callback: FrameCallback) {
        if self.cancelled.get() {
            return;
        }
        self.pending.borrow_mut().push(callback);
    }
}
