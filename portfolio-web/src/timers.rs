#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use portfolio_core::{Scheduler, TimerId};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Window};

type Task = Box<dyn FnOnce()>;

/// [`Scheduler`] backed by `window.setTimeout`.
///
/// A single dispatcher closure receives the task id as the timeout argument,
/// so cancelled timers leave nothing behind on the JS side.
pub struct WindowScheduler {
    window: Window,
    next_id: Cell<u64>,
    tasks: Rc<RefCell<HashMap<u64, (i32, Task)>>>,
    dispatcher: Closure<dyn FnMut(JsValue)>,
}

impl WindowScheduler {
    pub fn new(window: Window) -> Self {
        let tasks: Rc<RefCell<HashMap<u64, (i32, Task)>>> = Rc::default();
        let pending = Rc::clone(&tasks);
        let dispatcher = Closure::wrap(Box::new(move |id: JsValue| {
            let Some(id) = id.as_f64() else {
                return;
            };
            let task = pending.borrow_mut().remove(&(id as u64));
            if let Some((_, task)) = task {
                task();
            }
        }) as Box<dyn FnMut(JsValue)>);

        Self {
            window,
            next_id: Cell::new(0),
            tasks,
            dispatcher,
        }
    }
}

impl Scheduler for WindowScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_1(
            self.dispatcher.as_ref().unchecked_ref(),
            timeout,
            &JsValue::from_f64(id as f64),
        ) {
            Ok(handle) => {
                self.tasks.borrow_mut().insert(id, (handle, task));
            }
            Err(err) => console::error_1(&err),
        }
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        if let Some((handle, _)) = self.tasks.borrow_mut().remove(&id.0) {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for WindowScheduler {
    fn drop(&mut self) {
        for (_, (handle, _)) in self.tasks.borrow_mut().drain() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
