use crate::render::GpuState;
use showroom_core::Showroom;
use std::cell::RefCell;
use std::rc::Rc;

pub type Engine = Showroom<GpuState<'static>>;
pub type App = Rc<RefCell<Engine>>;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub fn install(app: &App) {
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));
}

/// Run `f` against the engine if it is up and not already borrowed.
pub fn with_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
    let app = APP.with(|slot| slot.borrow().clone());
    let Some(app) = app else {
        log::warn!("[app] engine not ready");
        return None;
    };
    let Ok(mut engine) = app.try_borrow_mut() else {
        log::warn!("[app] engine busy");
        return None;
    };
    Some(f(&mut engine))
}
