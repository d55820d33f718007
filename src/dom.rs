use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Window};

use tiltcard_core::{CardChoice, CardSurface, Rect, Size, Vec2};

use crate::sensors;

pub(crate) const HINT_ID: &str = "hint";
pub(crate) const CARD_ID: &str = "card";
pub(crate) const STAGE_ID: &str = "stage";
pub(crate) const OVERLAY_ID: &str = "select-overlay";

const HIDDEN_CLASS: &str = "is-hidden";
const VISIBLE_CLASS: &str = "is-visible";
const LANDSCAPE_CLASS: &str = "is-landscape";
const LANDSCAPE_QUERY: &str = "(orientation: landscape)";

/// Elements the widget drives. Cloning only clones the JS handles.
#[derive(Clone)]
pub(crate) struct WidgetDom {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) hint: Element,
    pub(crate) card: HtmlImageElement,
    pub(crate) stage: Element,
    pub(crate) overlay: Element,
}

impl WidgetDom {
    pub(crate) fn find(window: Window) -> Result<Self, String> {
        let document = window.document().ok_or("document unavailable")?;
        let hint = element_by_id(&document, HINT_ID)?;
        let card = element_by_id(&document, CARD_ID)?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| format!("#{CARD_ID} is not an <img>"))?;
        let stage = element_by_id(&document, STAGE_ID)?;
        let overlay = element_by_id(&document, OVERLAY_ID)?;
        Ok(Self {
            window,
            document,
            hint,
            card,
            stage,
            overlay,
        })
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }
}

fn element_by_id(document: &Document, id: &str) -> Result<Element, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("missing #{id}"))
}

fn window_dimension(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f32 {
    value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0) as f32
}

pub(crate) struct DomSurface {
    dom: WidgetDom,
}

impl DomSurface {
    pub(crate) fn new(dom: WidgetDom) -> Self {
        Self { dom }
    }

    fn set_style(&self, property: &str, value: Option<&str>) {
        let style = self.dom.card.style();
        match value {
            Some(value) => {
                let _ = style.set_property(property, value);
            }
            None => {
                let _ = style.remove_property(property);
            }
        }
    }
}

impl CardSurface for DomSurface {
    fn viewport(&self) -> Size {
        Size::new(
            window_dimension(self.dom.window.inner_width()),
            window_dimension(self.dom.window.inner_height()),
        )
    }

    fn card_rect(&self) -> Rect {
        let rect = self.dom.card.get_bounding_client_rect();
        Rect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }

    fn place(&mut self, position: Option<Vec2>) {
        match position {
            Some(position) => {
                self.set_style("left", Some(&format!("{}px", position.x)));
                self.set_style("top", Some(&format!("{}px", position.y)));
            }
            None => {
                self.set_style("left", None);
                self.set_style("top", None);
            }
        }
    }

    fn set_card_visible(&mut self, visible: bool) {
        let classes = self.dom.card.class_list();
        if visible {
            let _ = classes.add_1(VISIBLE_CLASS);
        } else {
            let _ = classes.remove_1(VISIBLE_CLASS);
        }
        let aria_hidden = if visible { "false" } else { "true" };
        let _ = self.dom.card.set_attribute("aria-hidden", aria_hidden);
    }

    fn hide_hint(&mut self) {
        let _ = self.dom.hint.class_list().add_1(HIDDEN_CLASS);
    }

    fn hide_overlay(&mut self) {
        let _ = self.dom.overlay.class_list().add_1(HIDDEN_CLASS);
    }

    fn apply_choice(&mut self, choice: &CardChoice) {
        if let Some(src) = choice.image_src() {
            self.dom.card.set_src(src);
        }
        self.set_style("width", choice.explicit_width());
        self.set_style("height", choice.explicit_height());
    }

    fn lock_orientation(&mut self) {
        sensors::lock_portrait(&self.dom.window);
    }

    fn matches_landscape(&self) -> bool {
        self.dom
            .window
            .match_media(LANDSCAPE_QUERY)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }

    fn set_landscape(&mut self, landscape: bool) {
        if let Some(body) = self.dom.body() {
            let _ = body
                .class_list()
                .toggle_with_force(LANDSCAPE_CLASS, landscape);
        }
    }
}
