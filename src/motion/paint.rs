use web_sys::HtmlElement;
use yew::NodeRef;

use super::tween::{StyleFrame, ANIMATED_CSS};

const PIN_ATTR: &str = "data-pinned";

pub fn apply(node: &NodeRef, frame: &StyleFrame) {
    let Some(element) = node.cast::<HtmlElement>() else {
        return;
    };
    let style = element.style();
    for (property, value) in frame.declarations() {
        let _ = style.set_property(property, &value);
    }
}

pub fn revert(node: &NodeRef) {
    let Some(element) = node.cast::<HtmlElement>() else {
        return;
    };
    let style = element.style();
    for property in ANIMATED_CSS {
        let _ = style.remove_property(property);
    }
}

/// Stretches the pin container so its sticky frame stays in view for
/// `distance` extra viewport heights.
pub fn pin(anchor: &NodeRef, distance: f64) {
    let Some(element) = anchor.cast::<HtmlElement>() else {
        return;
    };
    let _ = element.set_attribute(PIN_ATTR, "");
    let _ = element
        .style()
        .set_property("height", &format!("{}vh", (1.0 + distance.max(0.0)) * 100.0));
}

pub fn unpin(anchor: &NodeRef) {
    let Some(element) = anchor.cast::<HtmlElement>() else {
        return;
    };
    let _ = element.remove_attribute(PIN_ATTR);
    let _ = element.style().remove_property("height");
}
