#![cfg(target_arch = "wasm32")]
use showroom_core::{BrandFilter, CatalogStore, Showroom, ShowroomParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use constants::{CANVAS_ID, CLOSE_BUTTON_ID, RESET_BUTTON_ID};
use render::GpuState;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showroom-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
        resize_closure.forget();
    }

    let catalog = CatalogStore::builtin()?;

    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = GpuState::new(leaked_canvas).await?;

    let app: app::App = Rc::new(RefCell::new(Showroom::new(
        catalog,
        gpu,
        ShowroomParams::default(),
    )));
    app::install(&app);

    events::wire_scroll(&app, &window, &document);
    events::wire_pointer_handlers(&app, &canvas);
    events::wire_wheel(&app, &canvas);
    events::wire_keyboard(&app, &document);
    {
        let app = app.clone();
        dom::add_click_listener(&document, CLOSE_BUTTON_ID, move || app.borrow_mut().close());
    }
    {
        let app = app.clone();
        dom::add_click_listener(&document, RESET_BUTTON_ID, move || {
            app.borrow_mut().reset_view()
        });
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(app, canvas, document)));
    frame::start_loop(frame_ctx);
    log::info!("[init] frame loop running");
    Ok(())
}

// ===================== Presentation-layer exports =====================

/// Apply a brand filter label ("All", "Yamaha", ...). Unknown labels are rejected.
#[wasm_bindgen]
pub fn set_brand_filter(label: &str) -> bool {
    let Some(brand) = BrandFilter::parse(label) else {
        log::warn!("[filter] unknown brand {:?}", label);
        return false;
    };
    app::with_engine(|engine| engine.set_brand(brand)).is_some()
}

#[wasm_bindgen]
pub fn set_search_query(query: &str) {
    app::with_engine(|engine| engine.set_query(query));
}

/// Slugs of the records passing the current filter, in catalog order.
#[wasm_bindgen]
pub fn filtered_slugs() -> Vec<String> {
    app::with_engine(|engine| engine.filtered().slugs()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn focused_slug() -> Option<String> {
    app::with_engine(|engine| engine.focused_record().map(|r| r.slug.clone())).flatten()
}

/// Open the detail viewer. Returns false when the slug is unknown.
#[wasm_bindgen]
pub fn open_viewer(slug: &str) -> bool {
    match app::with_engine(|engine| engine.open(slug)) {
        Some(Ok(())) => true,
        Some(Err(e)) => {
            log::warn!("[viewer] {}", e);
            false
        }
        None => false,
    }
}

#[wasm_bindgen]
pub fn close_viewer() {
    app::with_engine(|engine| engine.close());
}

#[wasm_bindgen]
pub fn reset_view() {
    app::with_engine(|engine| engine.reset_view());
}

/// Full record as JSON for the detail panel.
#[wasm_bindgen]
pub fn record_json(slug: &str) -> Option<String> {
    app::with_engine(|engine| {
        let record = engine.catalog().by_slug(slug)?;
        serde_json::to_string(record)
            .map_err(|e| log::error!("[catalog] serialize {}: {}", slug, e))
            .ok()
    })
    .flatten()
}
