#![cfg(target_arch = "wasm32")]
use heli_core::{AppState, FrameDriver, InputParams, MotionParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod render;
mod texture_size;

use constants::{CANVAS_ID, HELICOPTER_SOUND_URL, SOUND_VOLUME};

fn wire_resize(window: &web::Window, canvas: &web::HtmlCanvasElement, app: Rc<RefCell<AppState>>) {
    let canvas = canvas.clone();
    let win = window.clone();
    dom::listen(window, "resize", move |_: web::Event| {
        match dom::window_viewport(&win) {
            Ok(viewport) => {
                app.borrow_mut().resize(viewport);
                dom::apply_surface_size(&canvas, viewport);
            }
            // Minimized or collapsed; keep the last good size.
            Err(e) => log::debug!("[resize] skipped: {}", e),
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("heli-web starting");

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

    let viewport = dom::window_viewport(&window)?;
    dom::apply_surface_size(&canvas, viewport);
    let app = Rc::new(RefCell::new(AppState::new(viewport, InputParams::default())?));

    let gpu = frame::init_gpu(&canvas, &app).await?;

    let audio_ctx = match audio::create_context() {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            log::warn!("[audio] unavailable: {:?}", e);
            None
        }
    };
    if let Some(ctx) = &audio_ctx {
        audio::spawn_soundtrack(ctx.clone(), HELICOPTER_SOUND_URL, SOUND_VOLUME);
    }

    let pending_textures = assets::TextureQueue::default();
    assets::spawn_texture_loads(
        document.clone(),
        gpu.max_texture_dimension(),
        pending_textures.clone(),
    );

    wire_resize(&window, &canvas, app.clone());
    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        app: app.clone(),
        audio_ctx: audio_ctx.clone(),
    });
    events::wire_keydown(app.clone(), audio_ctx.clone());

    frame::start_loop(frame::FrameContext {
        app,
        driver: FrameDriver::new(MotionParams::default()),
        gpu,
        listener: audio_ctx.as_ref().map(|ctx| ctx.listener()),
        pending_textures,
        stats: frame::FrameStats::default(),
    });
    Ok(())
}
