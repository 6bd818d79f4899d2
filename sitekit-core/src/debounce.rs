//! Debouncing as an explicit cancellable scheduled task.
//!
//! Every call to [`Debouncer::schedule`] cancels the pending task, if any, and
//! schedules the new one after the quiet period, so a burst of calls collapses into
//! the last one.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::time::Duration;

/// A unit of asynchronous work run on the local event loop.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Timer and task primitives of the host event loop.
pub trait Scheduler {
    /// Token identifying a scheduled callback.
    type Handle;

    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Cancel a scheduled callback. Cancelling one that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);

    /// Drive `task` to completion without blocking the caller's event.
    fn spawn(&self, task: LocalTask);
}

/// Last-write-wins delay in front of an action.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub const fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: RefCell::new(None),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Replace any pending task with `task`, due after the quiet period.
    pub fn schedule(&self, task: impl FnOnce() + 'static) {
        self.cancel();
        let handle = self.scheduler.schedule(self.delay, Box::new(task));
        *self.pending.borrow_mut() = Some(handle);
    }

    /// Drop the pending task without running it.
    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }
    }
}

struct VirtualTimer {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct VirtualClock {
    now: Duration,
    next_id: u64,
    timers: Vec<VirtualTimer>,
}

/// Deterministic [`Scheduler`] driven by a manual clock.
///
/// Timers fire only inside [`VirtualScheduler::advance`]; spawned futures run to
/// completion immediately. Clones share the same clock.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

impl VirtualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of timers that have not fired or been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    /// Move the clock forward, firing due timers in deadline order. Timers scheduled
    /// by a firing task are honoured within the same advance.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        while let Some(timer) = self.next_due(target) {
            self.clock.borrow_mut().now = timer.due;
            (timer.task)();
        }
        self.clock.borrow_mut().now = target;
    }

    fn next_due(&self, target: Duration) -> Option<VirtualTimer> {
        let mut clock = self.clock.borrow_mut();
        let position = clock
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(position, _)| position)?;
        Some(clock.timers.remove(position))
    }
}

impl Scheduler for VirtualScheduler {
    type Handle = u64;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> u64 {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.timers.push(VirtualTimer { id, due, task });
        id
    }

    fn cancel(&self, handle: u64) {
        self.clock
            .borrow_mut()
            .timers
            .retain(|timer| timer.id != handle);
    }

    fn spawn(&self, task: LocalTask) {
        futures::executor::block_on(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const QUIET: Duration = Duration::from_millis(300);

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        let make = move || {
            let count = Rc::clone(&handle);
            Box::new(move || count.set(count.get() + 1)) as Box<dyn FnOnce()>
        };
        (count, make)
    }

    #[test]
    fn fires_once_after_quiet_period() {
        let scheduler = VirtualScheduler::new();
        let debouncer = Debouncer::new(scheduler.clone(), QUIET);
        let (count, make) = counter();

        debouncer.schedule(make());
        scheduler.advance(Duration::from_millis(299));
        assert_eq!(count.get(), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn burst_collapses_to_last_call() {
        let scheduler = VirtualScheduler::new();
        let debouncer = Debouncer::new(scheduler.clone(), QUIET);
        let last = Rc::new(Cell::new(""));

        for word in ["c", "ca", "cac", "cache"] {
            let last = Rc::clone(&last);
            debouncer.schedule(move || last.set(word));
            scheduler.advance(Duration::from_millis(100));
        }
        assert_eq!(last.get(), "");
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(QUIET);
        assert_eq!(last.get(), "cache");
    }

    #[test]
    fn cancel_drops_pending_task() {
        let scheduler = VirtualScheduler::new();
        let debouncer = Debouncer::new(scheduler.clone(), QUIET);
        let (count, make) = counter();

        debouncer.schedule(make());
        debouncer.cancel();
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn separated_calls_each_fire() {
        let scheduler = VirtualScheduler::new();
        let debouncer = Debouncer::new(scheduler.clone(), QUIET);
        let (count, make) = counter();

        debouncer.schedule(make());
        scheduler.advance(QUIET);
        debouncer.schedule(make());
        scheduler.advance(QUIET);
        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.now(), QUIET * 2);
    }

    #[test]
    fn timers_scheduled_while_firing_run_in_the_same_advance() {
        let scheduler = VirtualScheduler::new();
        let (count, make) = counter();
        let inner = scheduler.clone();
        let nested = make();
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                inner.schedule(Duration::from_millis(10), nested);
            }),
        );
        scheduler.advance(Duration::from_millis(25));
        assert_eq!(count.get(), 1);
    }
}
