use heli_core::{CoreError, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("[dom] could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Current window size in CSS pixels with the device pixel ratio.
pub fn window_viewport(window: &web::Window) -> Result<Viewport, CoreError> {
    let css = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    Viewport::new(
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

/// Size the canvas backing store in physical pixels and its box in CSS pixels.
pub fn apply_surface_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    let (w_px, h_px) = viewport.surface_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width()));
    _ = style.set_property("height", &format!("{}px", viewport.height()));
}
