use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use web_sys::{Element, HtmlElement};

use crate::config::LoopConfig;
use crate::engine::{EngineState, LoopEngine};

mod dom;
mod observe;
mod raf;

use dom::{ContainerClaim, DomTrack};
use observe::{HoverWatch, ResizeWatch};
use raf::RafLoop;

const CONTAINER_SELECTOR: &str = ".logoloop";

type SharedEngine = Rc<RefCell<LoopEngine<DomTrack>>>;

fn read_f64(options: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

fn read_bool(options: &JsValue, key: &str) -> Option<bool> {
    Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_bool())
}

/// `{ speed, pauseOnHover, smoothingTimeConstant }`; anything missing or
/// mistyped keeps its default.
fn config_from_options(options: &JsValue) -> LoopConfig {
    let mut config = LoopConfig::default();
    if !options.is_object() {
        return config;
    }
    if let Some(speed) = read_f64(options, "speed") {
        config.speed = speed;
    }
    if let Some(pause) = read_bool(options, "pauseOnHover") {
        config.pause_on_hover = pause;
    }
    if let Some(tau) = read_f64(options, "smoothingTimeConstant") {
        config.smoothing_time_constant = tau;
    }
    config.sanitized()
}

/// `data-speed`, `data-pause-on-hover`, `data-smoothing` on the container.
fn config_from_dataset(el: &Element) -> LoopConfig {
    let mut config = LoopConfig::default();
    if let Some(speed) = el.get_attribute("data-speed").and_then(|s| s.trim().parse().ok()) {
        config.speed = speed;
    }
    if let Some(pause) = el.get_attribute("data-pause-on-hover") {
        config.pause_on_hover = pause.trim() != "false";
    }
    if let Some(tau) = el.get_attribute("data-smoothing").and_then(|s| s.trim().parse().ok()) {
        config.smoothing_time_constant = tau;
    }
    config.sanitized()
}

/// One marquee bound to a `.logoloop` container.
#[wasm_bindgen]
pub struct LogoLoop {
    engine: SharedEngine,
    raf: RafLoop,
    resize: ResizeWatch,
    hover: Option<HoverWatch>,
    claim: ContainerClaim,
}

#[wasm_bindgen]
impl LogoLoop {
    /// Attaches to `container`, tiles the track and starts scrolling.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, options: JsValue) -> Result<LogoLoop, JsValue> {
        Self::with_config(container, config_from_options(&options))
    }

    pub fn pause(&self) {
        self.engine.borrow_mut().pause();
    }

    pub fn resume(&self) {
        self.engine.borrow_mut().resume();
    }

    /// Stops the frame loop and unregisters every observer. Idempotent.
    pub fn destroy(&mut self) {
        self.raf.stop();
        self.resize.disconnect();
        if let Some(mut hover) = self.hover.take() {
            hover.disconnect();
        }
        self.engine.borrow_mut().destroy();
        self.claim.release();
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.borrow().state() == EngineState::Running
    }

    /// True while hover or an explicit `pause()` is easing the loop to a stop.
    #[wasm_bindgen(getter, js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.engine.borrow().is_paused()
    }

    #[wasm_bindgen(getter, js_name = tileCount)]
    pub fn tile_count(&self) -> usize {
        self.engine.borrow().tile_count()
    }
}

impl LogoLoop {
    pub fn with_config(container: HtmlElement, config: LoopConfig) -> Result<LogoLoop, JsValue> {
        let claim = ContainerClaim::acquire(&container)?;
        let surface = DomTrack::attach(container.clone())?;
        let engine: SharedEngine = Rc::new(RefCell::new(LoopEngine::new(surface, config)));
        engine.borrow_mut().start();

        let resize = {
            let engine = Rc::downgrade(&engine);
            ResizeWatch::observe(&container, move || {
                if let Some(engine) = engine.upgrade() {
                    engine.borrow_mut().notify_resize();
                }
            })?
        };

        let hover = if config.pause_on_hover {
            let engine = Rc::downgrade(&engine);
            let watch = HoverWatch::listen(&container, move |hovered| {
                if let Some(engine) = engine.upgrade() {
                    engine.borrow_mut().set_hovered(hovered);
                }
            })?;
            Some(watch)
        } else {
            None
        };

        let raf = {
            let engine = Rc::clone(&engine);
            RafLoop::new(move |timestamp_ms| engine.borrow_mut().tick(timestamp_ms))
        };
        raf.start()?;

        crate::console_log!(
            "logoloop: started with {} tile(s) at {} px/s",
            engine.borrow().tile_count(),
            config.speed
        );

        Ok(LogoLoop {
            engine,
            raf,
            resize,
            hover,
            claim,
        })
    }
}

impl Drop for LogoLoop {
    fn drop(&mut self) {
        self.destroy();
    }
}

thread_local! {
    static AUTO_LOOPS: RefCell<Vec<LogoLoop>> = const { RefCell::new(Vec::new()) };
}

fn init_all() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let containers = document.query_selector_all(CONTAINER_SELECTOR)?;

    for i in 0..containers.length() {
        let Some(el) = containers
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let config = config_from_dataset(&el);
        match LogoLoop::with_config(el, config) {
            Ok(instance) => AUTO_LOOPS.with(|loops| loops.borrow_mut().push(instance)),
            Err(e) => crate::console_warn!("logoloop: skipping container {i}: {e:?}"),
        }
    }
    Ok(())
}

/// Tears down every loop created by auto-initialisation.
#[wasm_bindgen(js_name = destroyAll)]
pub fn destroy_all() {
    let loops = AUTO_LOOPS.with(|loops| std::mem::take(&mut *loops.borrow_mut()));
    drop(loops);
}

/// Initialises every `.logoloop` on the page once layout is available.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    if document.ready_state() == "complete" {
        return init_all();
    }

    let on_load = Closure::once(move || {
        if let Err(e) = init_all() {
            crate::console_warn!("logoloop: auto-init failed: {e:?}");
        }
    });
    window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    // Runs once at page load; the listener is never removed.
    on_load.forget();
    Ok(())
}
