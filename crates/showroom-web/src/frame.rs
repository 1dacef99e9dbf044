use crate::app::App;
use crate::assets;
use crate::constants::MAX_FRAME_DT;
use crate::overlay;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub app: App,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub last_instant: Instant,
    pub loading_visible: bool,
}

impl FrameContext {
    pub fn new(app: App, canvas: web::HtmlCanvasElement, document: web::Document) -> Self {
        overlay::set_visible(&document, false);
        Self {
            app,
            canvas,
            document,
            last_instant: Instant::now(),
            loading_visible: false,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;

        let width = self.canvas.width();
        let height = self.canvas.height();
        let aspect = width as f32 / height.max(1) as f32;

        let (requests, resolving) = {
            let mut engine = self.app.borrow_mut();
            engine
                .scene_mut()
                .surface_mut()
                .resize_if_needed(width, height);
            match engine.tick(dt, aspect) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[frame] surface lost, reconfiguring");
                    engine.scene_mut().surface_mut().reconfigure();
                }
                Err(wgpu::SurfaceError::Timeout) => log::debug!("[frame] surface timeout"),
                Err(e) => log::error!("render error: {:?}", e),
            }
            (engine.take_requests(), engine.is_resolving())
        };
        assets::dispatch(&self.app, requests);

        if resolving != self.loading_visible {
            overlay::set_visible(&self.document, resolving);
            self.loading_visible = resolving;
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(closure) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}
