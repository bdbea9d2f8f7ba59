//! DOM-backed track.
//!
//! Expected markup:
//!
//! ```html
//! <div class="logoloop">
//!   <div class="logoloop__track">
//!     <ul class="logoloop__list">…</ul>
//!   </div>
//! </div>
//! ```
//!
//! While a loop is live the container carries `data-logoloop-active`; a
//! second loop on the same container is refused.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use crate::engine::TrackSurface;
use crate::tile::Tile;

pub const TRACK_SELECTOR: &str = ".logoloop__track";
pub const LIST_SELECTOR: &str = ".logoloop__list";
const CLONE_ATTR: &str = "data-logoloop-clone";
const GENERATION_ATTR: &str = "data-logoloop-generation";
const OWNER_ATTR: &str = "data-logoloop-active";

/// Marks a container as driven by a live loop. A second loop cannot attach
/// until the claim is released, so only one instance ever owns the clones.
pub struct ContainerClaim {
    container: Option<HtmlElement>,
}

impl ContainerClaim {
    pub fn acquire(container: &HtmlElement) -> Result<Self, JsValue> {
        if container.has_attribute(OWNER_ATTR) {
            return Err(JsValue::from_str(
                "container is already driven by a live LogoLoop",
            ));
        }
        container.set_attribute(OWNER_ATTR, "")?;
        Ok(Self {
            container: Some(container.clone()),
        })
    }

    pub fn release(&mut self) {
        if let Some(container) = self.container.take() {
            let _ = container.remove_attribute(OWNER_ATTR);
        }
    }
}

impl Drop for ContainerClaim {
    fn drop(&mut self) {
        self.release();
    }
}

pub struct DomTrack {
    container: HtmlElement,
    track: HtmlElement,
    list: HtmlElement,
    clones: Vec<Element>,
}

fn find(parent: &Element, selector: &str) -> Result<HtmlElement, JsValue> {
    parent
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("{selector} not found")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("{selector} is not an HTML element")))
}

impl DomTrack {
    pub fn attach(container: HtmlElement) -> Result<Self, JsValue> {
        let track = find(&container, TRACK_SELECTOR)?;
        let list = find(&track, LIST_SELECTOR)?;

        // Clones left behind by an earlier, released instance.
        let stale = track.query_selector_all(&format!("[{CLONE_ATTR}]"))?;
        for i in 0..stale.length() {
            if let Some(node) = stale.item(i) {
                if let Ok(el) = node.dyn_into::<Element>() {
                    el.remove();
                }
            }
        }

        Ok(Self {
            container,
            track,
            list,
            clones: Vec::new(),
        })
    }

    fn make_clone(&self, tile: &Tile) -> Result<Element, JsValue> {
        let clone: Element = self.list.clone_node_with_deep(true)?.dyn_into()?;
        if tile.is_hidden_from_assistive_tech() {
            clone.set_attribute("aria-hidden", "true")?;
        }
        clone.set_attribute(CLONE_ATTR, &tile.index.to_string())?;
        clone.set_attribute(GENERATION_ATTR, &tile.generation.to_string())?;
        // Clones must not duplicate ids or stay in the tab order.
        clone.remove_attribute("id")?;
        let focusable = clone.query_selector_all("a, button, [tabindex]")?;
        for i in 0..focusable.length() {
            if let Some(el) = focusable.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                el.set_attribute("tabindex", "-1")?;
            }
        }
        Ok(clone)
    }

    fn try_rebuild(&mut self, tiles: &[Tile]) -> Result<(), JsValue> {
        for clone in self.clones.drain(..) {
            clone.remove();
        }
        for tile in tiles.iter().filter(|t| !t.is_primary()) {
            let clone = self.make_clone(tile)?;
            self.track.append_child(&clone)?;
            self.clones.push(clone);
        }
        Ok(())
    }
}

impl TrackSurface for DomTrack {
    fn viewport_width(&self) -> f64 {
        f64::from(self.container.client_width())
    }

    fn unit_width(&self) -> f64 {
        f64::from(self.list.offset_width())
    }

    fn rebuild(&mut self, tiles: &[Tile]) {
        if let Err(e) = self.try_rebuild(tiles) {
            crate::console_warn!("logoloop: failed to rebuild clones: {e:?}");
        }
    }

    fn translate(&mut self, x: f64) {
        let _ = self
            .track
            .style()
            .set_property("transform", &format!("translate3d({x}px, 0, 0)"));
    }
}
