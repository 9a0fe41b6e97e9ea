use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::{MotionError, MotionResult};

struct FrameInner {
    pending: Cell<Option<i32>>,
    alive: Cell<bool>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameInner {
    fn request(&self) {
        if !self.alive.get() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(callback) = self.callback.borrow().as_ref() {
            if let Ok(id) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                self.pending.set(Some(id));
            }
        }
    }
}

/// Repaint-aligned callback loop. The callback receives the frame timestamp
/// in milliseconds and returns whether to keep running. Dropping the loop
/// cancels the pending frame.
pub struct FrameLoop {
    inner: Rc<FrameInner>,
}

impl FrameLoop {
    pub fn start<F>(mut tick: F) -> MotionResult<Self>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        if web_sys::window().is_none() {
            return Err(MotionError::NoWindow);
        }
        let inner = Rc::new(FrameInner {
            pending: Cell::new(None),
            alive: Cell::new(true),
            callback: RefCell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            if !inner.alive.get() {
                return;
            }
            if tick(timestamp) {
                inner.request();
            } else {
                inner.alive.set(false);
            }
        });
        *inner.callback.borrow_mut() = Some(callback);
        inner.request();
        Ok(Self { inner })
    }

    pub fn is_running(&self) -> bool {
        self.inner.alive.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.inner.alive.set(false);
        if let Some(id) = self.inner.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // The closure may be the caller on this stack; free it on a later task.
        if let Ok(mut slot) = self.inner.callback.try_borrow_mut() {
            if let Some(callback) = slot.take() {
                Timeout::new(0, move || drop(callback)).forget();
            }
        }
    }
}
