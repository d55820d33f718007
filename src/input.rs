use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlImageElement, PointerEvent};

use tiltcard_core::{CardChoice, PointerId, PointerInput, Vec2};

const CARD_BUTTON_SELECTOR: &str = "button[data-card]";
const CARD_SRC_ATTR: &str = "data-card";
const CARD_WIDTH_ATTR: &str = "data-card-width";
const CARD_HEIGHT_ATTR: &str = "data-card-height";

pub(crate) fn pointer_id(event: &PointerEvent) -> PointerId {
    PointerId(event.pointer_id())
}

pub(crate) fn client_position(event: &PointerEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

/// Resolves a click inside the selection overlay to the card button it
/// landed on, if any.
pub(crate) fn card_choice_from_event(event: &Event) -> Option<CardChoice> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest(CARD_BUTTON_SELECTOR).ok()??;
    Some(card_choice_from_button(&button))
}

pub(crate) fn card_choice_from_button(button: &Element) -> CardChoice {
    CardChoice {
        src: button.get_attribute(CARD_SRC_ATTR),
        width: button.get_attribute(CARD_WIDTH_ATTR),
        height: button.get_attribute(CARD_HEIGHT_ATTR),
    }
}

/// Pointer capture on the card element.
pub(crate) struct PointerCapture {
    card: HtmlImageElement,
}

impl PointerCapture {
    pub(crate) fn new(card: HtmlImageElement) -> Self {
        Self { card }
    }
}

impl PointerInput for PointerCapture {
    fn capture(&mut self, pointer: PointerId) {
        let _ = self.card.set_pointer_capture(pointer.0);
    }

    fn release(&mut self, pointer: PointerId) {
        let _ = self.card.release_pointer_capture(pointer.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn button_attributes_become_choice() {
        let document = web_sys::window().unwrap().document().unwrap();
        let button = document.create_element("button").unwrap();
        button.set_attribute(CARD_SRC_ATTR, "cards/ace.webp").unwrap();
        button.set_attribute(CARD_WIDTH_ATTR, "70vw").unwrap();

        let choice = card_choice_from_button(&button);
        assert_eq!(choice.image_src(), Some("cards/ace.webp"));
        assert_eq!(choice.explicit_width(), Some("70vw"));
        assert_eq!(choice.explicit_height(), None);
    }
}
