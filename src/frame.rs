use crate::assets::TextureQueue;
use crate::audio;
use crate::constants::STATS_INTERVAL_SEC;
use crate::render::GpuState;
use heli_core::{AppState, FrameDriver, FrameScheduler};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules the tick closure with `requestAnimationFrame`.
#[derive(Clone)]
pub struct RafScheduler {
    tick: TickClosure,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        let Some(w) = web::window() else { return };
        if let Some(cb) = self.tick.borrow().as_ref() {
            if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
            }
        }
    }
}

/// Logs the achieved frame rate every few seconds at debug level.
pub struct FrameStats {
    window_start: Instant,
    frames: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
        }
    }
}

impl FrameStats {
    pub fn record(&mut self, vehicle_x: f64) {
        self.frames += 1;
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= STATS_INTERVAL_SEC {
            log::debug!(
                "[frame] {:.1} fps, helicopter x {:.2}",
                self.frames as f32 / elapsed,
                vehicle_x
            );
            self.window_start = Instant::now();
            self.frames = 0;
        }
    }
}

pub struct FrameContext {
    pub app: Rc<RefCell<AppState>>,
    pub driver: FrameDriver,
    pub gpu: GpuState,
    pub listener: Option<web::AudioListener>,
    pub pending_textures: TextureQueue,
    pub stats: FrameStats,
}

impl FrameContext {
    pub fn frame(&mut self, scheduler: &mut RafScheduler) {
        for (slot, image) in std::mem::take(&mut *self.pending_textures.borrow_mut()) {
            log::debug!("[assets] {:?} ready ({}x{})", slot, image.width, image.height);
            self.gpu.set_texture(slot, &image);
        }

        let mut app = self.app.borrow_mut();
        let (w, h) = app.viewport().surface_size();
        self.gpu.resize_if_needed(w, h);

        match self.driver.tick(&mut app, scheduler, &mut self.gpu) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.gpu.reconfigure(),
            Err(e) => log::error!("[frame] render error: {:?}", e),
        }

        if let Some(listener) = &self.listener {
            audio::update_listener_to_camera(listener, app.camera.position);
        }
        self.stats.record(app.motion.vehicle_x);
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    app: &Rc<RefCell<AppState>>,
) -> anyhow::Result<GpuState> {
    // Snapshot; only the mesh list is read at init.
    let scene = app.borrow().scene.clone();
    GpuState::new(canvas, &scene).await
}

pub fn start_loop(frame_ctx: FrameContext) {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let mut scheduler = RafScheduler { tick: tick.clone() };
    let frame_ctx = Rc::new(RefCell::new(frame_ctx));
    let frame_ctx_tick = frame_ctx.clone();
    let mut tick_scheduler = scheduler.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame(&mut tick_scheduler);
    }) as Box<dyn FnMut()>));
    frame_ctx.borrow_mut().driver.start(&mut scheduler);
}
