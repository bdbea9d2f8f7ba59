//! Size-change and hover sources for a loop container.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, EventTarget, ResizeObserver};

/// Calls `on_resize` whenever the observed element changes size, and once
/// shortly after observation begins.
pub struct ResizeWatch {
    observer: Option<ResizeObserver>,
    _callback: Closure<dyn FnMut()>,
}

impl ResizeWatch {
    pub fn observe(target: &Element, on_resize: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(on_resize) as Box<dyn FnMut()>);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(target);
        Ok(Self {
            observer: Some(observer),
            _callback: callback,
        })
    }

    pub fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// mouseenter / mouseleave listeners reporting hover state.
pub struct HoverWatch {
    target: EventTarget,
    enter: Closure<dyn FnMut()>,
    leave: Closure<dyn FnMut()>,
    attached: bool,
}

impl HoverWatch {
    pub fn listen(
        target: &EventTarget,
        on_hover: impl Fn(bool) + Clone + 'static,
    ) -> Result<Self, JsValue> {
        let on_enter = on_hover.clone();
        let enter = Closure::wrap(Box::new(move || on_enter(true)) as Box<dyn FnMut()>);
        let leave = Closure::wrap(Box::new(move || on_hover(false)) as Box<dyn FnMut()>);
        target.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())?;
        target.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            enter,
            leave,
            attached: true,
        })
    }

    pub fn disconnect(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let _ = self
            .target
            .remove_event_listener_with_callback("mouseenter", self.enter.as_ref().unchecked_ref());
        let _ = self
            .target
            .remove_event_listener_with_callback("mouseleave", self.leave.as_ref().unchecked_ref());
    }
}

impl Drop for HoverWatch {
    fn drop(&mut self) {
        self.disconnect();
    }
}
