use crate::app::App;
use crate::dom;
use showroom_core::InputEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn push_scroll(app: &App, window: &web::Window, document: &web::Document) {
    let fraction = dom::page_scroll_fraction(window, document);
    app.borrow_mut().push_input(InputEvent::Scroll(fraction));
}

/// Page scroll drives the ambient spin and the focused record.
pub fn wire_scroll(app: &App, window: &web::Window, document: &web::Document) {
    push_scroll(app, window, document);
    for event in ["scroll", "resize"] {
        let app = app.clone();
        let win = window.clone();
        let doc = document.clone();
        let closure = Closure::wrap(Box::new(move || {
            push_scroll(&app, &win, &doc);
        }) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
