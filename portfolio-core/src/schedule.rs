//! Timer abstraction used by the debouncer and the chart loader.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Handle of a scheduled task, valid until the task runs or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// One-shot timers on a single-threaded event loop.
pub trait Scheduler {
    /// Runs `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;
    /// Drops a pending task. Unknown or already-fired ids are ignored.
    fn cancel(&self, id: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, id: TimerId) {
        (**self).cancel(id)
    }
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Tasks fire in deadline order (ties in scheduling order) when the clock is
/// advanced past them. Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, u64), Box<dyn FnOnce()>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.advance_to(target);
    }

    /// Moves the clock to `target`, running every task due on the way.
    ///
    /// Tasks scheduled by running tasks fire in the same call when their
    /// deadline is not after `target`.
    pub fn advance_to(&self, target: Duration) {
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .queue
                    .first_key_value()
                    .map(|(key, _)| *key)
                    .filter(|(deadline, _)| *deadline <= target);
                match due {
                    Some(key) => {
                        state.now = state.now.max(key.0);
                        state.queue.remove(&key)
                    }
                    None => None,
                }
            };

            match task {
                Some(task) => task(),
                None => break,
            }
        }

        let mut state = self.state.borrow_mut();
        state.now = state.now.max(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let deadline = state.now + delay;
        state.queue.insert((deadline, id), task);
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        self.state
            .borrow_mut()
            .queue
            .retain(|(_, task_id), _| *task_id != id.0);
    }
}
