use crate::app::App;
use crate::input::{self, Gesture, PointerTracker};
use showroom_core::{InputEvent, InteractionMode};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Drag orbits, a two-finger pinch zooms. Both only matter in the detail view,
/// the controller ignores them otherwise.
pub fn wire_pointer_handlers(app: &App, canvas: &web::HtmlCanvasElement) {
    let tracker = Rc::new(RefCell::new(PointerTracker::default()));

    {
        let tracker = tracker.clone();
        let canvas_target = canvas.clone();
        listen(canvas, "pointerdown", move |ev: web::PointerEvent| {
            let mut tracker = tracker.borrow_mut();
            tracker.down(ev.pointer_id(), ev.client_x() as f32, ev.client_y() as f32);
            if tracker.active() == 2 {
                log::debug!("[input] pinch start");
            }
            let _ = canvas_target.set_pointer_capture(ev.pointer_id());
        });
    }
    {
        let tracker = tracker.clone();
        let app = app.clone();
        let canvas_move = canvas.clone();
        listen(canvas, "pointermove", move |ev: web::PointerEvent| {
            let gesture = tracker.borrow_mut().moved(
                ev.pointer_id(),
                ev.client_x() as f32,
                ev.client_y() as f32,
            );
            let event = match gesture {
                Some(Gesture::Drag { dx, dy }) => {
                    let height = canvas_move.client_height() as f32;
                    input::drag_fraction(dx, dy, height).map(|(dx, dy)| InputEvent::Drag { dx, dy })
                }
                Some(Gesture::Pinch { wheel }) => Some(InputEvent::Wheel(wheel)),
                None => None,
            };
            if let Some(event) = event {
                app.borrow_mut().push_input(event);
            }
        });
    }
    {
        let tracker = tracker.clone();
        listen(canvas, "pointerup", move |ev: web::PointerEvent| {
            tracker.borrow_mut().up(ev.pointer_id());
        });
    }
    // a cancelled touch sequence ends every active gesture
    listen(canvas, "pointercancel", move |_: web::PointerEvent| {
        tracker.borrow_mut().clear();
    });
}

/// Wheel zoom. The page keeps scrolling unless the detail view is open.
pub fn wire_wheel(app: &App, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let mut engine = app.borrow_mut();
        if engine.mode() != InteractionMode::Detail {
            return;
        }
        ev.prevent_default();
        engine.push_input(InputEvent::Wheel(input::wheel_delta_px(
            ev.delta_y(),
            ev.delta_mode(),
        )));
    }) as Box<dyn FnMut(_)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}
