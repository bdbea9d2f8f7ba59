//! `requestAnimationFrame` driver.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;

use crate::engine::TickControl;

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    // The closure re-registers itself each frame, so it lives apart from
    // `callback` to avoid overlapping borrows.
    closure: RefCell<Option<RafClosure>>,
    callback: RefCell<Box<dyn FnMut(f64) -> TickControl>>,
    running: Cell<bool>,
    raf_id: Cell<Option<i32>>,
}

/// Calls `callback` with each frame timestamp (ms) until it returns
/// [`TickControl::Stop`] or [`stop`](Self::stop) is called.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

fn request_frame(closure: &RafClosure) -> Result<i32, JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(closure.as_ref().unchecked_ref())
}

impl RafLoop {
    pub fn new(callback: impl FnMut(f64) -> TickControl + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                running: Cell::new(false),
                raf_id: Cell::new(None),
            }),
        }
    }

    /// No-op if already running.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.inner.running.get() {
            return Ok(());
        }
        self.inner.running.set(true);

        // Weak so the closure stored inside `inner` does not keep `inner` alive.
        let weak = Rc::downgrade(&self.inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.raf_id.set(None);
            if !inner.running.get() {
                return;
            }

            let control = (inner.callback.borrow_mut())(timestamp_ms);
            if control == TickControl::Stop {
                inner.running.set(false);
                return;
            }

            if inner.running.get() {
                if let Some(ref closure) = *inner.closure.borrow() {
                    match request_frame(closure) {
                        Ok(id) => inner.raf_id.set(Some(id)),
                        Err(e) => {
                            crate::console_warn!("logoloop: requestAnimationFrame failed: {e:?}");
                            inner.running.set(false);
                        }
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = match request_frame(&closure) {
            Ok(id) => id,
            Err(e) => {
                self.inner.running.set(false);
                return Err(e);
            }
        };
        self.inner.raf_id.set(Some(id));
        *self.inner.closure.borrow_mut() = Some(closure);
        Ok(())
    }

    /// Cancels the pending frame. No callback runs after this returns.
    pub fn stop(&self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.raf_id.take() {
            if let Some(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        self.inner.closure.borrow_mut().take();
    }
}
