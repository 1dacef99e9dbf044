use crate::constants::LOADING_ID;
use web_sys as web;

/// Toggle the "loading model" indicator. A missing element is ignored.
pub fn set_visible(document: &web::Document, visible: bool) {
    let Some(el) = document.get_element_by_id(LOADING_ID) else {
        return;
    };
    let style = if visible { "" } else { "display:none" };
    if el.get_attribute("style").as_deref() != Some(style) {
        let _ = el.set_attribute("style", style);
    }
}
