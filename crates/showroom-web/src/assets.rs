use crate::app::App;
use showroom_core::{AssetError, ResolveRequest};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_bytes(path: &str) -> Result<Vec<u8>, AssetError> {
    let fail = |reason: String| AssetError::unavailable(path, reason);
    let window = web::window().ok_or_else(|| fail("no window".into()))?;
    let init = web::RequestInit::new();
    init.set_method("GET");
    init.set_mode(web::RequestMode::SameOrigin);
    let request = web::Request::new_with_str_and_init(path, &init)
        .map_err(|e| fail(format!("{:?}", e)))?;
    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| fail(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| fail(format!("{:?}", e)))?;
    if !response.ok() {
        return Err(fail(format!("HTTP {}", response.status())));
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(|e| fail(format!("{:?}", e)))?)
        .await
        .map_err(|e| fail(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetch every request and hand the outcome back to the engine.
pub fn dispatch(app: &App, requests: Vec<ResolveRequest>) {
    for request in requests {
        log::info!("[assets] fetching {}", request.path);
        let app = app.clone();
        spawn_local(async move {
            let fetched = fetch_bytes(&request.path).await;
            if let Err(e) = &fetched {
                log::debug!("[assets] fetch failed: {}", e);
            }
            let mounted = app
                .borrow_mut()
                .complete_resolution(request.ticket, fetched);
            if mounted {
                log::info!("[assets] mounted {}", request.path);
            }
        });
    }
}
