//! Trailing-edge debounce over a [`Scheduler`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::schedule::{Scheduler, TimerId};

/// Wrapped callback returned by [`debounce`].
///
/// Each [`call`](Debounced::call) supersedes the pending one, so the callback
/// runs once, `wait` after the last call, with that call's arguments.
pub struct Debounced<A, S: Scheduler> {
    shared: Rc<Shared<A>>,
    scheduler: S,
    wait: Duration,
}

struct Shared<A> {
    func: RefCell<Box<dyn FnMut(A)>>,
    pending: Cell<Option<TimerId>>,
}

pub fn debounce<A, S, F>(scheduler: S, wait: Duration, func: F) -> Debounced<A, S>
where
    A: 'static,
    S: Scheduler,
    F: FnMut(A) + 'static,
{
    Debounced {
        shared: Rc::new(Shared {
            func: RefCell::new(Box::new(func)),
            pending: Cell::new(None),
        }),
        scheduler,
        wait,
    }
}

impl<A: 'static, S: Scheduler> Debounced<A, S> {
    pub fn call(&self, args: A) {
        self.cancel();

        let shared = Rc::clone(&self.shared);
        let id = self.scheduler.schedule(
            self.wait,
            Box::new(move || {
                shared.pending.set(None);
                (shared.func.borrow_mut())(args);
            }),
        );
        self.shared.pending.set(Some(id));
    }

    pub fn is_pending(&self) -> bool {
        self.shared.pending.get().is_some()
    }

    /// Drops the pending invocation, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.shared.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn burst_fires_once_after_the_last_call() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let clock = scheduler.clone();
        let log = Rc::clone(&fired);
        let debounced = debounce(scheduler.clone(), ms(16), move |value: u32| {
            log.borrow_mut().push((clock.now(), value));
        });

        debounced.call(1);
        scheduler.advance_to(ms(5));
        debounced.call(2);
        scheduler.advance_to(ms(10));
        debounced.call(3);

        scheduler.advance_to(ms(25));
        assert!(fired.borrow().is_empty());
        assert!(debounced.is_pending());

        scheduler.advance_to(ms(100));
        assert_eq!(*fired.borrow(), vec![(ms(26), 3)]);
        assert!(!debounced.is_pending());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn quiet_period_lets_each_call_through() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let debounced = debounce(scheduler.clone(), ms(16), move |()| counter.set(counter.get() + 1));

        debounced.call(());
        scheduler.advance(ms(20));
        debounced.call(());
        scheduler.advance(ms(20));

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn cancel_drops_the_pending_call() {
        let scheduler = ManualScheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let debounced = debounce(scheduler.clone(), ms(16), move |()| counter.set(counter.get() + 1));

        debounced.call(());
        debounced.cancel();
        scheduler.advance(ms(50));

        assert_eq!(count.get(), 0);
        assert!(!debounced.is_pending());
    }
}
