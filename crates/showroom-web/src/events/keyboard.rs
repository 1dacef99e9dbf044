use crate::app::App;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, app: &App) {
    let mut engine = app.borrow_mut();
    if !engine.session().is_open() {
        return;
    }
    match ev.key().as_str() {
        "Escape" => {
            engine.close();
            ev.prevent_default();
        }
        "r" | "R" => engine.reset_view(),
        _ => {}
    }
}

pub fn wire_keyboard(app: &App, document: &web::Document) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &app);
    }) as Box<dyn FnMut(_)>);
    let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
